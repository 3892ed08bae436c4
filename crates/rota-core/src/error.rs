use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RotaError {
    /// Short error code string, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            RotaError::Config(_) => "CONFIG_ERROR",
            RotaError::InvalidInput(_) => "INVALID_INPUT",
            RotaError::Serialization(_) => "SERIALIZATION_ERROR",
            RotaError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, RotaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(RotaError::Config("x".into()).code(), "CONFIG_ERROR");
        assert_eq!(RotaError::InvalidInput("x".into()).code(), "INVALID_INPUT");

        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(RotaError::from(bad).code(), "SERIALIZATION_ERROR");
    }
}
