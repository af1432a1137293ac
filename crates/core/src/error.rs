#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid display mode: {0}")]
    InvalidDisplayMode(String),
    #[error("invalid debounce interval: {0}")]
    InvalidDebounce(#[source] std::num::ParseIntError),
    #[error("coalescing writer requires a running tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("failed to parse translation catalog: {0}")]
    CatalogParse(serde_yaml::Error),
    #[error("translation catalog must be a mapping of keys to strings")]
    CatalogNotMapping,
    #[error("failed to hash view inputs: {0}")]
    ContentKey(serde_json::Error),
}

pub type ViewResult<T> = std::result::Result<T, ViewError>;
