use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("locator page at {url} returned an empty body")]
    EmptyPage { url: String },

    #[error("locator page at {url} is a bot challenge, not the outlet listing")]
    BotChallenge { url: String },

    #[error("could not read HTML snapshot {path}: {source}")]
    Snapshot {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
