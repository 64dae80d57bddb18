use flagdex_core::compare::SelectionError;

#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Failed to fetch countries data: {0}")]
    Fetch(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Country not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl Error {
    /// Whether another attempt at the same request could succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, Error::Parse(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
