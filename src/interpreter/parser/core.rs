use crate::{
    ast::{GroupKind, SyntaxNode},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::block::{assemble_block, assemble_expression},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// One top-level element of a group, after nested groups have been built.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A token that sits directly inside the group.
    Token(Token, usize),
    /// A fully built nested group.
    Group(SyntaxNode),
    /// A statement separator.
    Break(usize),
}

/// Builds the syntax tree of a single bracketed group.
///
/// The tokens must form exactly one `[` block or `(` call, brackets
/// included. They are scanned by [`split_groups`] and the single resulting
/// group is returned.
///
/// # Errors
/// `MalformedGrouping` if the tokens do not form exactly one well-bracketed
/// group, or if a call has no head.
///
/// # Example
/// ```
/// use dicelang::{
///     ast::SyntaxNode,
///     interpreter::{lexer::tokenize, parser::core::build},
/// };
///
/// let tokens = tokenize("(add 1 (neg 2))").unwrap();
/// let node = build(&tokens).unwrap();
///
/// assert!(matches!(node, SyntaxNode::Expression { ref args, .. } if args.len() == 2));
/// assert!(build(&tokenize("(add 1 2").unwrap()).is_err());
/// ```
pub fn build(tokens: &[(Token, usize)]) -> ParseResult<SyntaxNode> {
    let Some((first, line)) = tokens.first() else {
        return Err(ParseError::grouping("nothing to group", 1));
    };

    if first.op().and_then(GroupKind::opened_by).is_none() {
        return Err(ParseError::grouping(format!("expected '[' or '(' but found '{first}'"),
                                        *line));
    }

    let mut items = split_groups(tokens)?;

    if items.len() == 1
       && let Some(Item::Group(node)) = items.pop()
    {
        return Ok(node);
    }

    Err(ParseError::grouping("expected exactly one bracketed group", *line))
}

/// Builds a whole script.
///
/// A script is an implicit top-level block: it is not wrapped in brackets and
/// its final statement does not need a trailing `;`.
///
/// # Errors
/// `MalformedGrouping` for any unbalanced or malformed group in the script.
///
/// # Example
/// ```
/// use dicelang::{
///     ast::SyntaxNode,
///     interpreter::{lexer::tokenize, parser::core::build_program},
/// };
///
/// let tokens = tokenize("set \"x\" 1; println (get \"x\")").unwrap();
/// let program = build_program(&tokens).unwrap();
///
/// assert!(matches!(program, SyntaxNode::Block { ref statements, .. } if statements.len() == 2));
/// ```
pub fn build_program(tokens: &[(Token, usize)]) -> ParseResult<SyntaxNode> {
    let items = split_groups(tokens)?;
    assemble_block(items, tokens.first().map_or(1, |(_, line)| *line))
}

/// A group whose opening bracket has been seen but not its close.
struct OpenGroup {
    kind:  GroupKind,
    line:  usize,
    items: Vec<Item>,
}

/// Splits a token slice into its top-level items in one left-to-right pass.
///
/// Open groups are kept on a stack; its depth is the nesting level. An
/// opening bracket pushes a new group, a closing bracket pops the innermost
/// one, assembles it and appends the node to its parent. Every other token
/// goes to the innermost open group, or to the top level when none is open.
/// `Raw` punctuation only separates arguments and is dropped.
///
/// # Errors
/// `MalformedGrouping` for a stray closing bracket, a closing bracket of the
/// wrong kind, a group left open at the end of the slice, or a group that
/// fails to assemble.
pub fn split_groups(tokens: &[(Token, usize)]) -> ParseResult<Vec<Item>> {
    let mut top = Vec::new();
    let mut open: Vec<OpenGroup> = Vec::new();

    for (token, line) in tokens {
        let op = token.op();

        if let Some(kind) = op.and_then(GroupKind::opened_by) {
            open.push(OpenGroup { kind,
                                  line: *line,
                                  items: Vec::new() });
            continue;
        }

        if let Some(kind) = op.and_then(GroupKind::closed_by) {
            let Some(group) = open.pop() else {
                return Err(ParseError::grouping(format!("unmatched '{}'", kind.close()), *line));
            };

            if group.kind != kind {
                return Err(ParseError::grouping(format!("'{}' opened on line {} is closed by '{}'",
                                                        group.kind.open(),
                                                        group.line,
                                                        kind.close()),
                                                *line));
            }

            let node = match group.kind {
                GroupKind::Block => assemble_block(group.items, group.line)?,
                GroupKind::Expression => assemble_expression(group.items, group.line)?,
            };
            innermost(&mut open, &mut top).push(Item::Group(node));
            continue;
        }

        let item = match token {
            Token::Break => Item::Break(*line),
            Token::Raw(_) => continue,
            _ => Item::Token(token.clone(), *line),
        };
        innermost(&mut open, &mut top).push(item);
    }

    if let Some(group) = open.last() {
        return Err(ParseError::grouping(format!("'{}' is never closed", group.kind.open()),
                                        group.line));
    }

    Ok(top)
}

/// The item list new items are appended to.
fn innermost<'a>(open: &'a mut [OpenGroup], top: &'a mut Vec<Item>) -> &'a mut Vec<Item> {
    match open.last_mut() {
        Some(group) => &mut group.items,
        None => top,
    }
}
