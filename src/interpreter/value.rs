/// Runtime values.
///
/// Defines the closed `Value` enum every builtin matches on: integers,
/// floats, strings, booleans and shared mutable lists. Also provides the
/// accessors that turn a value into the native type a builtin expects.
pub mod core;
/// The cast type table.
///
/// Maps type names such as `Integer` or `List` to the conversion function
/// the `cast` builtin applies.
pub mod cast;
