/// Builtin table, arity checking and call-head resolution.
pub mod core;

/// `print`, `println` and `input`.
pub mod io;

/// `set`, `get` and `cast`.
pub mod variable;

/// Arithmetic and equality: `add`, `subtract`, `times`, `divide`, `neg`,
/// `equal` and `notequal`.
pub mod arithmetic;

/// Lazily evaluated control flow: `if`, `while` and `assert`.
pub mod control;

/// List construction and mutation: `list`, `push`, `pop`, `index` and
/// `range`.
pub mod list;

/// The dice accumulator: `dice` and `roll`.
pub mod dice;
