use thiserror::Error;

#[derive(Error, Debug)]
pub enum GantryError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Travel limit on {axis}: target {target} outside {min}..={max}")]
    TravelLimit {
        axis: String,
        target: i64,
        min: i64,
        max: i64,
    },

    #[error("Tool fault: {0}")]
    Tool(String),

    #[error("Script error at line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<GantryError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
