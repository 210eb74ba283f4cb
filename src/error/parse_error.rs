use thiserror::Error;

/// Represents all errors that can occur during lexing or tree building.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found a character or literal the lexer cannot classify.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The offending source slice.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Brackets are unbalanced, mismatched, or a group lacks a required
    /// head.
    #[error("Error on line {line}: Malformed grouping: {details}.")]
    MalformedGrouping {
        /// What was wrong with the grouping.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ParseError {
    /// Shorthand for a [`ParseError::MalformedGrouping`].
    pub(crate) fn grouping(details: impl Into<String>, line: usize) -> Self {
        Self::MalformedGrouping { details: details.into(),
                                  line }
    }
}
