/// Parsing errors.
///
/// Defines the errors raised while scanning source text and while grouping
/// the token stream into blocks and expressions. Grouping failures such as
/// unbalanced brackets are detected here, before anything is evaluated.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// functions and variables, failed casts, division by zero, out-of-range list
/// access and the other failures a builtin can report.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
