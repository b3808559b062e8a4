use thiserror::Error;

#[derive(Error, Debug)]
pub enum RamseyError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid move: cannot toggle ({u}, {v}) on a graph with {vertices} vertices")]
    InvalidMove { u: usize, v: usize, vertices: usize },

    #[error("Malformed graph (line {line}): {reason}")]
    MalformedGraph { line: usize, reason: String },

    #[error("Population is empty")]
    EmptyPopulation,

    #[error("Degenerate parent split: {parents} parents, crossover needs at least 4")]
    DegenerateParentSplit { parents: usize },
}

pub type RfResult<T> = Result<T, RamseyError>;
