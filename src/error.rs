use thiserror::Error;

#[derive(Error, Debug)]
pub enum M209Error {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid lug settings: {0}")]
    Lugs(String),

    #[error("Invalid pin settings: {0}")]
    Pins(String),

    #[error("Invalid indicator: {0}")]
    Indicator(String),

    #[error("Invalid text: {0}")]
    Text(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    /// A rejection-sampling loop hit its retry ceiling. The rule set is most
    /// likely contradictory.
    #[error("Gave up generating random {what} after {attempts} attempts")]
    RandomizationExhausted { what: &'static str, attempts: usize },

    #[error("Worker pool Error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type M209Result<T> = Result<T, M209Error>;
