/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between `i64`, `usize`
/// and `f64` without risking silent data loss. List indexing, dice counts and
/// casts all go through these helpers.
///
/// All functions return a `Result` or `Option`, which carries a value only if
/// the conversion is lossless and valid.
pub mod num;
