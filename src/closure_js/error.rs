use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no configuration registered for extension `{0}`")]
    NotConfigured(String),
    #[error("configuration registered for extension `{0}` has an unexpected type")]
    TypeMismatch(String),
    #[error("grep extern token must not be empty (label `{0}`)")]
    EmptyToken(String),
    #[error("invalid grep extern pattern: {0}")]
    Pattern(#[from] regex::Error),
}
