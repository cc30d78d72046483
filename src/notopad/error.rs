use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotopadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode {}: file is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NotopadError>;
