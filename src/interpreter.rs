/// The evaluator module walks the syntax tree against a runtime context.
///
/// The evaluator executes blocks statement by statement, resolves call heads
/// to builtins (directly or through a computed name), and hands each builtin
/// its arguments unevaluated so that control flow stays lazy.
///
/// # Responsibilities
/// - Owns the `Context`: variables, builtin table, cast table, dice state.
/// - Implements the builtin library.
/// - Reports runtime errors with the line of the failing call.
pub mod evaluator;
/// The lexer module tokenizes source code for the tree builder.
///
/// The lexer reads the raw source text and produces `(Token, line)` pairs:
/// numbers, strings, identifiers, brackets, operators and statement breaks.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Skips whitespace and `//` comments.
/// - Reports characters it cannot classify.
pub mod lexer;
/// The parser module is the tree builder.
///
/// It groups the flat token stream into nested blocks and calls by tracking
/// bracket nesting.
///
/// # Responsibilities
/// - Builds `Block` and `Expression` nodes from bracketed groups.
/// - Rejects unbalanced or mismatched brackets and calls without a head.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its accessors.
/// - Provides the conversion functions behind `cast`.
pub mod value;
