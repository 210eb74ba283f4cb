//! # dicelang
//!
//! dicelang is a small interpreted scripting language with a dice-rolling
//! accumulator, written in Rust. Source text is tokenized, grouped into
//! bracketed blocks `[ ... ]` and calls `( ... )`, and evaluated by a tree
//! walker against a mutable context.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use tracing::debug;

use crate::interpreter::{
    evaluator::core::Context, lexer::tokenize, parser::core::build_program, value::core::Value,
};

/// Defines the structure of parsed code.
///
/// This module declares `SyntaxNode` (blocks, calls and literal statements)
/// and `Argument`, the unevaluated call argument handed to builtins.
///
/// # Responsibilities
/// - Defines the two-level tree produced by the tree builder.
/// - Attaches source lines to nodes for error reporting.
/// - Re-serializes trees back to bracketed source.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, tree builder,
///   evaluator).
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, tree building, evaluation and value
/// representations.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Runs a script in an existing context and returns the value of its last
/// statement.
///
/// # Errors
/// Returns the first lexing, grouping or runtime error. Statements after a
/// failing one are not executed.
///
/// # Examples
/// ```
/// use dicelang::{interpreter::evaluator::core::Context, interpreter::value::core::Value, run};
///
/// let mut ctx = Context::seeded(1);
/// let last = run("set \"x\" 2; (times (get \"x\") 21)", &mut ctx).unwrap();
///
/// assert_eq!(last, Some(Value::Integer(42)));
/// ```
pub fn run(source: &str, context: &mut Context) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized source");

    let program = build_program(&tokens)?;
    Ok(context.exec(&program)?)
}

/// Returns the final evaluation result after execution.
///
/// This function runs the whole source string in a fresh context. If
/// `auto_print` is set, the value of the last statement is printed.
///
/// # Errors
/// Returns an error if tokenizing, grouping or evaluation fails.
///
/// # Examples
/// ```
/// use dicelang::get_result;
///
/// // Simple program: no error should occur.
/// let source = "set \"total\" (add 2 2); assert (equal (get \"total\") 4)";
/// assert!(get_result(source, false).is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let source = "get \"missing\"";
/// assert!(get_result(source, false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = Context::new();
    let result = run(source, &mut context)?;

    if auto_print && let Some(v) = result {
        println!("{v}");
    }

    Ok(())
}
