use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed feed payload: {0}")]
    Feed(#[from] serde_json::Error),

    #[error("unknown timezone '{0}'")]
    Timezone(String),

    #[error("invalid date '{0}', use YYYY-MM-DD format")]
    Date(String),

    #[error("query mode requires an API token (--token or EVENTS_API_TOKEN)")]
    MissingToken,

    #[error("query target 'event' requires --event-id")]
    MissingEventId,
}

pub type Result<T> = std::result::Result<T, Error>;
