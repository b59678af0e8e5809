use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable holds a value that does not parse.
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
