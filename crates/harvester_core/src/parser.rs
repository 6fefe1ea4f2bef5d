use crate::Record;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid selector {selector}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("missing element {0}")]
    MissingElement(&'static str),
}

/// Extracts one record from a fetched detail page.
///
/// Implementations must be pure: no network IO, no shared state. `Ok(None)`
/// means the page carried no usable data; callers treat it like `Err`.
pub trait ItemParser: Send + Sync {
    fn parse(&self, html: &str, id: &str, display_name: &str) -> Result<Option<Record>, ParseError>;
}

/// Signature shared by the built-in per-entity extraction functions.
pub type ParseFn = fn(&str, &str, &str) -> Result<Option<Record>, ParseError>;

impl<F> ItemParser for F
where
    F: Fn(&str, &str, &str) -> Result<Option<Record>, ParseError> + Send + Sync,
{
    fn parse(&self, html: &str, id: &str, display_name: &str) -> Result<Option<Record>, ParseError> {
        self(html, id, display_name)
    }
}
