use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["outletdb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["outletdb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["outletdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn scrape_defaults_to_live_fetch_and_writes() {
    let cli = Cli::try_parse_from(["outletdb-cli", "scrape"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            html_file: None,
            dry_run: false
        })
    ));
}

#[test]
fn scrape_accepts_snapshot_and_dry_run() {
    let cli = Cli::try_parse_from([
        "outletdb-cli",
        "scrape",
        "--html-file",
        "snapshots/kl.html",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Scrape { html_file, dry_run }) => {
            assert_eq!(html_file, Some(PathBuf::from("snapshots/kl.html")));
            assert!(dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_list_command() {
    let cli = Cli::try_parse_from(["outletdb-cli", "list"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::List)));
}

#[test]
fn ask_takes_question_as_single_argument() {
    let cli = Cli::try_parse_from(["outletdb-cli", "ask", "Which outlets have WiFi in KL?"])
        .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Ask { question }) => assert_eq!(question, "Which outlets have WiFi in KL?"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn ask_requires_a_question() {
    assert!(Cli::try_parse_from(["outletdb-cli", "ask"]).is_err());
}
