/// Entry points of the tree builder.
///
/// Scans a token slice once with a stack of open groups and assembles each
/// group as soon as its closing bracket is seen.
pub mod core;

/// Assembly of groups into nodes.
///
/// Turns the flat items of a group into a `Block` of statements or an
/// `Expression` with a head and arguments.
pub mod block;
