use super::Error;

/// Error when a schema configuration is invalid.
///
/// This occurs when:
/// - A relation references a table that is not declared
/// - A relation mapping names a column that does not exist on either side
/// - A table, column, or relation name cannot be used as a type or field name
/// - Two tables produce the same generated type or root field name
///
/// These errors are raised while loading the schema, before any request is
/// compiled.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
