// Error handling for opensearch-description

use thiserror::Error;

/// Result type alias using DescriptionError.
pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// Errors surfaced by parsing, validation and URL resolution.
///
/// Per-field failures that have a documented default (an unparseable number, an unknown
/// role) never reach this type; the parser recovers them locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Missing required element: {0}")]
    MissingRequiredElement(String),

    #[error("Invalid value for attribute '{attribute}': {value:?}")]
    InvalidAttributeSyntax { attribute: String, value: String },

    #[error("Unknown template token: {0}")]
    UnknownTemplateToken(String),

    #[error("No value bound for required parameter '{0}'")]
    UnboundRequiredParameter(String),

    #[error("Malformed description document: {0}")]
    MalformedDocument(String),

    #[error("Invalid search profile: {0}")]
    InvalidProfile(String),

    // Raised only by the source loader, never by the core.
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

impl DescriptionError {
    pub fn invalid_attribute(attribute: &str, value: &str) -> Self {
        DescriptionError::InvalidAttributeSyntax {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    /// True for errors that come from the document itself rather than from loading it
    /// or from a search profile.
    pub fn is_document_error(&self) -> bool {
        !matches!(
            self,
            DescriptionError::Io(_) | DescriptionError::Fetch(_) | DescriptionError::InvalidProfile(_)
        )
    }
}

impl From<std::io::Error> for DescriptionError {
    fn from(err: std::io::Error) -> Self {
        DescriptionError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for DescriptionError {
    fn from(err: serde_yaml::Error) -> Self {
        DescriptionError::InvalidProfile(err.to_string())
    }
}

impl From<quick_xml::Error> for DescriptionError {
    fn from(err: quick_xml::Error) -> Self {
        DescriptionError::MalformedDocument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DescriptionError::invalid_attribute("type", "text html");
        assert_eq!(
            err.to_string(),
            "Invalid value for attribute 'type': \"text html\""
        );

        let err = DescriptionError::UnboundRequiredParameter("q".to_string());
        assert!(err.to_string().contains("'q'"));
    }

    #[test]
    fn test_document_error_classification() {
        assert!(DescriptionError::MissingRequiredElement("ShortName".into()).is_document_error());
        assert!(!DescriptionError::Fetch("timeout".into()).is_document_error());
    }
}
