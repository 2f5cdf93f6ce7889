use std::io;

/// Errors that can occur while classifying and planning beans
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported target shape on [{element}]: {message}")]
    UnsupportedTargetShape { element: String, message: String },

    #[error("Signature mismatch on [{element}]: {message}")]
    SignatureMismatch { element: String, message: String },

    #[error("Unsupported method kind on [{element}]: {message}")]
    UnsupportedMethodKind { element: String, message: String },

    #[error("Disallowed annotation on [{element}]: {message}")]
    DisallowedAnnotation { element: String, message: String },

    #[error("Illegal declaration location of [{element}]: {message}")]
    IllegalLocation { element: String, message: String },

    #[error("Class not found: {0}")]
    ClassNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),
}

impl Error {
    /// The declaration element a planning failure is attributed to, if any
    pub fn element(&self) -> Option<&str> {
        match self {
            Error::UnsupportedTargetShape { element, .. }
            | Error::SignatureMismatch { element, .. }
            | Error::UnsupportedMethodKind { element, .. }
            | Error::DisallowedAnnotation { element, .. }
            | Error::IllegalLocation { element, .. } => Some(element),
            Error::ClassNotFound(name) => Some(name),
            _ => None,
        }
    }

    pub(crate) fn unsupported_target(element: impl ToString, message: impl Into<String>) -> Self {
        Error::UnsupportedTargetShape {
            element: element.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn signature_mismatch(element: impl ToString, message: impl Into<String>) -> Self {
        Error::SignatureMismatch {
            element: element.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for beanforge operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_is_reported_for_planning_errors() {
        let err = Error::signature_mismatch("com.acme.Foo#bar()", "Argument lengths don't match.");
        assert_eq!(err.element(), Some("com.acme.Foo#bar()"));
        assert!(err.to_string().contains("Argument lengths don't match."));

        let err = Error::ConfigError("bad".to_string());
        assert_eq!(err.element(), None);
    }
}
