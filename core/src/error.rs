use crate::document::DocId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Rejected input: bad document id, control characters, malformed query.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("document {0} not found")]
    NotFound(DocId),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(SearchError::NotFound(7).to_string(), "document 7 not found");
        assert_eq!(
            SearchError::invalid("Word \"a\u{1}\" is invalid").to_string(),
            "invalid argument: Word \"a\u{1}\" is invalid"
        );
    }
}
