use crate::{
    ast::{Argument, SyntaxNode},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{Item, ParseResult},
    },
};

/// Assembles the items of a `[ ... ]` group into a block.
///
/// Statements are split on breaks and empty statements are dropped, so
/// `[a; ; b;]` holds two statements.
///
/// # Parameters
/// - `items`: Top-level items of the group.
/// - `line`: Line of the opening bracket.
///
/// # Returns
/// A `SyntaxNode::Block`.
pub fn assemble_block(items: Vec<Item>, line: usize) -> ParseResult<SyntaxNode> {
    let mut statements = Vec::new();
    let mut current = Vec::new();

    for item in items {
        if let Item::Break(_) = item {
            if !current.is_empty() {
                statements.push(assemble_statement(std::mem::take(&mut current))?);
            }
        } else {
            current.push(item);
        }
    }

    if !current.is_empty() {
        statements.push(assemble_statement(current)?);
    }

    Ok(SyntaxNode::Block { statements, line })
}

/// Assembles the items of a `( ... )` group into a call.
///
/// The first item is the head and must be a token; the rest are arguments.
///
/// # Errors
/// `MalformedGrouping` if the call is empty, its head is a group, or it
/// contains a statement break.
pub fn assemble_expression(items: Vec<Item>, line: usize) -> ParseResult<SyntaxNode> {
    if let Some(Item::Break(break_line)) = items.iter().find(|item| matches!(item, Item::Break(_))) {
        return Err(ParseError::grouping("';' is only allowed between statements of a block",
                                        *break_line));
    }

    let mut items = items.into_iter();

    let (head, line) = match items.next() {
        Some(Item::Token(head, head_line)) => (head, head_line),
        Some(Item::Group(group)) => {
            return Err(ParseError::grouping("a call must start with a function name, not a group",
                                            group.line()));
        },
        Some(Item::Break(_)) | None => {
            return Err(ParseError::grouping("'()' has no function name", line));
        },
    };

    let args = items.map(into_argument).collect();

    Ok(SyntaxNode::Expression { head, args, line })
}

/// Assembles one statement of a block.
///
/// - A single group is the statement itself.
/// - A single literal other than an identifier is a literal statement.
/// - Anything else is a call without brackets: `print "hi"` is
///   `(print "hi")`, and a lone identifier such as `roll` calls it with no
///   arguments.
fn assemble_statement(mut items: Vec<Item>) -> ParseResult<SyntaxNode> {
    if items.len() == 1 {
        match items.pop() {
            Some(Item::Group(node)) => return Ok(node),
            Some(Item::Token(token, line)) if !matches!(token, Token::Identifier(_) | Token::Op(_)) => {
                return Ok(SyntaxNode::Literal { token, line });
            },
            Some(item) => items.push(item),
            None => {},
        }
    }

    match items.first() {
        Some(Item::Group(group)) => {
            Err(ParseError::grouping("a statement must start with a function name, not a group",
                                     group.line()))
        },
        Some(Item::Token(_, line) | Item::Break(line)) => {
            let line = *line;
            assemble_expression(items, line)
        },
        None => assemble_expression(items, 1),
    }
}

/// Converts a top-level item of a call into an unevaluated argument.
fn into_argument(item: Item) -> Argument {
    match item {
        Item::Token(token, _) => Argument::from(&token),
        Item::Group(node) => Argument::Node(node),
        Item::Break(_) => Argument::Op(';'),
    }
}
