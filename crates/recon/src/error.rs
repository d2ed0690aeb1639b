use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad scan limit, empty vocabulary, etc.).
    ConfigValidation(String),
    /// No records were extracted from any input file.
    NoData,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::NoData => write!(f, "no extractable shipment data in any input file"),
        }
    }
}

impl std::error::Error for PipelineError {}
