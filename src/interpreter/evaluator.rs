/// Core evaluation logic and context management.
///
/// Contains the runtime context, the tree walker and the result type shared
/// by every builtin.
pub mod core;

/// Utility functions for evaluation.
///
/// Argument evaluation helpers and variable access used by the builtins.
pub mod utils;

/// Function resolution and the builtin library.
///
/// Resolves call heads to builtins, checks arity and dispatches with the
/// unevaluated arguments.
pub mod function;
