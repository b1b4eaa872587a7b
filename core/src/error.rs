#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout document is not valid json: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("layout document has the wrong shape: {0}")]
    Shape(String),
    #[error("layout entry `{id}` has a non-finite coordinate")]
    NonFinite { id: String },
    #[error("layout encode failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("layout storage failed: {0}")]
    Storage(String),
}
