//! Read-side commands: `list` and `ask`.

use outletdb_ask::{answer_question, interpret_or_default, interpreter_from_config};
use outletdb_core::AppConfig;
use outletdb_db::OutletRow;

/// Print every stored outlet.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let rows = outletdb_db::list_outlets(pool).await?;

    if rows.is_empty() {
        println!("no outlets stored; run `scrape` first");
        return Ok(());
    }

    println!("{:<6}{:<40}{:<24}TELEPHONE", "ID", "NAME", "COORDINATES");
    for row in &rows {
        println!("{}", format_row(row));
    }
    println!("{} outlet(s)", rows.len());
    Ok(())
}

fn format_row(row: &OutletRow) -> String {
    let coords = row
        .latitude
        .zip(row.longitude)
        .map_or_else(|| "-".to_string(), |(lat, lon)| format!("{lat},{lon}"));
    format!(
        "{:<6}{:<40}{:<24}{}",
        row.id,
        row.name,
        coords,
        row.telephone.as_deref().unwrap_or("-")
    )
}

/// Answer a plain-language question from the stored outlets.
///
/// # Errors
///
/// Returns an error if the interpreter cannot be constructed or the database
/// query fails. Interpreter call failures are not errors; they produce the
/// guidance answer.
pub(crate) async fn run_ask(
    config: &AppConfig,
    pool: &sqlx::SqlitePool,
    question: &str,
) -> anyhow::Result<()> {
    let question = question.trim();
    anyhow::ensure!(!question.is_empty(), "question must not be blank");

    let interpreter = interpreter_from_config(config)?;
    let interpretation = interpret_or_default(interpreter.as_ref(), question).await;
    let outlets = outletdb_db::list_outlet_records(pool).await?;
    let answer = answer_question(&interpretation, &outlets);

    println!("{}", answer.message);
    for name in &answer.outlets {
        println!("  - {name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(latitude: Option<f64>, telephone: Option<&str>) -> OutletRow {
        OutletRow {
            id: 12,
            name: "McDonald's Mid Valley".to_string(),
            address: "Mid Valley City".to_string(),
            latitude,
            longitude: Some(101.677),
            telephone: telephone.map(str::to_string),
            waze_link: None,
            google_map_link: None,
            features: "{}".to_string(),
        }
    }

    #[test]
    fn row_shows_coordinates_and_telephone() {
        let line = format_row(&row(Some(3.118), Some("03-2938 3888")));
        assert!(line.starts_with("12    McDonald's Mid Valley"));
        assert!(line.contains("3.118,101.677"));
        assert!(line.ends_with("03-2938 3888"));
    }

    #[test]
    fn row_with_partial_coordinates_shows_dash() {
        let line = format_row(&row(None, None));
        assert!(!line.contains("101.677"));
        assert!(line.ends_with('-'));
    }
}
