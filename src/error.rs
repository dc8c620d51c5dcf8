use thiserror::Error;

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// An enumerated option (`kind`, `zoom`, `style`, ...) got a value outside its domain.
    #[error("invalid value {value:?} for option `{option}`")]
    InvalidOption { option: &'static str, value: String },

    /// An option (`x`, `y`, ...) names a column the table does not have.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// The table itself is malformed (empty, ragged, duplicate names).
    #[error("table shape error: {0}")]
    Shape(String),

    /// Reinjecting series data into a config with fewer series than the original.
    #[error("edited config has {found} series, original has {expected}")]
    SeriesMismatch { expected: usize, found: usize },

    /// A dotted path that cannot be resolved inside a config.
    #[error("invalid config path `{0}`")]
    Path(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(option: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidOption {
            option,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
