use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("Unsupported JSON value: {0}")]
    UnsupportedJson(String),

    #[error("maximum recursion depth exceeded ({0} frames)")]
    RecursionLimit(usize),

    #[error("{0}")]
    Empty(&'static str),

    #[error("Tree is empty")]
    EmptyTree,

    #[error("Value not found: {0}")]
    ValueNotFound(i64),

    #[error("Corrupt node file {}: {reason}", file.display())]
    CorruptNode { file: PathBuf, reason: String },

    #[error("Gave up after {0} attempts")]
    GaveUp(u64),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CursedError>;
