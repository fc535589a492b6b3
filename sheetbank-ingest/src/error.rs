use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The payload is an HTML page (usually a sign-in wall), not CSV.
    #[error("Link error. Please ensure the Sheet is 'Public' or 'Anyone with the link'.")]
    UnusableSource,

    #[error("invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),
}
