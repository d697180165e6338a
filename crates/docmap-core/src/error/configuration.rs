use super::Error;

/// Error when declarative model metadata is malformed.
///
/// This occurs when:
/// - An identifier field is not also declared as a column
/// - An extract directive defines no columns, targets an unknown field, or
///   extracts into itself through a cycle of groups
/// - A field combines directives that cannot be combined
/// - The manager is asked about a model or collaborator it was not configured with
///
/// These are authoring mistakes and are reported as soon as the model's
/// metadata is resolved.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
