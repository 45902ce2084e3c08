use thiserror::Error;

#[derive(Error, Debug)]
pub enum LapviewError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Laptop not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid value '{value}' for filter '{field}'")]
    InvalidCriterion { field: String, value: String },

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Laptop has no identity and cannot be selected: {0}")]
    MissingIdentity(String),

    #[error("Comparison needs at least 2 laptops, {0} selected")]
    CompareUnavailable(usize),

    #[error("Unexpected response from catalog service: {0}")]
    UnexpectedResponse(String),
}

impl LapviewError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LapviewError::HttpError(_) => Some(
                "Check that the catalog service is running, or point at it with:\n  LAPVIEW_API_URL=http://host:port/api/v1 lapview list"
            ),
            LapviewError::RecordNotFound(_) => Some(
                "Run `lapview list` to see available laptop ids"
            ),
            LapviewError::InvalidCriterion { .. } => Some(
                "Price and rating filters take plain numbers, e.g. --min-price 500 --min-rating 4.0"
            ),
            LapviewError::UnknownFilter(_) => Some(
                "Known filters: brand, minPrice, maxPrice, minRating, processor, memory, storage, display, query"
            ),
            LapviewError::CompareUnavailable(_) => Some(
                "Pass two or more ids: lapview compare 3 7"
            ),
            LapviewError::ConfigError(_) | LapviewError::TomlError(_) => Some(
                "Inspect your configuration with `lapview config`, or recreate it with `lapview config --init`"
            ),
            LapviewError::UnexpectedResponse(_) => Some(
                "Try loading a saved response instead: lapview --file laptops.json list"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LapviewError>;
