use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// None of these are recoverable from inside a script: the first error aborts
/// the remaining statements and is handed back to the driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A call head resolved to no builtin, directly or indirectly.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    FunctionNotFound {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to read a variable that was never bound.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `cast` was given a type name missing from the type table.
    #[error("Error on line {line}: Unknown type '{name}'.")]
    UnknownType {
        /// The requested type name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value could not be converted to the requested type.
    #[error("Error on line {line}: Cannot cast '{value}' to {target}.")]
    InvalidCast {
        /// Display form of the rejected value.
        value:  String,
        /// The requested type name.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access a list element outside the allowed bounds.
    #[error("Error on line {line}: Index {index} is out of range for a list of length {len}.")]
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the list at the time of access.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a builtin.
    #[error("Error on line {line}: Argument count mismatch for '{name}': {found} given.")]
    ArgumentCountMismatch {
        /// The builtin being called.
        name:  String,
        /// The number of arguments supplied.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An argument was invalid or out of range.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An argument was evaluated in value position but produced nothing.
    #[error("Error on line {line}: Value missing.")]
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `assert` call received `false`.
    #[error("Error on line {line}: Assertion failed.")]
    AssertionFailed {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reading input or writing output failed.
    #[error("Error on line {line}: I/O failure: {details}.")]
    Io {
        /// The underlying I/O error message.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Shorthand for a [`RuntimeError::TypeError`].
    pub(crate) fn type_error(details: impl Into<String>, line: usize) -> Self {
        Self::TypeError { details: details.into(),
                          line }
    }

    /// Shorthand for a [`RuntimeError::InvalidArgument`].
    pub(crate) fn invalid_argument(details: impl Into<String>, line: usize) -> Self {
        Self::InvalidArgument { details: details.into(),
                                line }
    }

    /// Wraps an I/O failure raised by the output sink or input source.
    pub(crate) fn io(err: &std::io::Error, line: usize) -> Self {
        Self::Io { details: err.to_string(),
                   line }
    }
}
