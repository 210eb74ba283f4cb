use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// The tree builder only cares about brackets and statement breaks; every
/// other token is carried through as a head or argument of a group.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Decimal literals with one decimal point, such as `3.14`, `1.` or `.5`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    #[regex(r"\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted strings. No escape processing; may span lines.
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Bare identifiers made of letters and underscores, such as `set`.
    #[regex(r"[a-zA-Z_]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Brackets, the slice delimiter `:` and the arithmetic operators.
    #[regex(r"[()\[\]:+\-*/]", first_char)]
    Op(char),
    /// `;`
    #[token(";")]
    Break,
    /// Any other punctuation. Treated as an argument separator.
    #[regex(r#"[,{}<>=!?&|%^~@#$'`\\]"#, first_char)]
    Raw(char),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Newlines only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns the bracket or separator character this token stands for, if
    /// it is an operator token.
    #[must_use]
    pub const fn op(&self) -> Option<char> {
        match self {
            Self::Op(c) => Some(*c),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(r) => write!(f, "{r:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Op(c) | Self::Raw(c) => write!(f, "{c}"),
            Self::Break => write!(f, ";"),
            Self::Comment | Self::NewLine | Self::Ignored => Ok(()),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes a whole source string into `(Token, line)` pairs.
///
/// Lines are counted from 1.
///
/// # Errors
/// Returns `UnexpectedToken` for characters the lexer does not recognize and
/// for integer literals that do not fit in an `i64`.
///
/// # Example
/// ```
/// use dicelang::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("(set \"x\" 1);").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Op('('),
///                 Token::Identifier("set".into()),
///                 Token::Str("x".into()),
///                 Token::Integer(1),
///                 Token::Op(')'),
///                 Token::Break]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         line });
            },
        }
    }

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals that overflow `i64` are rejected and surface as a lexer error.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal and accounts for any
/// newlines it spans.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let newlines = slice.chars().filter(|&c| c == '\n').count();
    let contents = slice[1..slice.len() - 1].to_string();

    lex.extras.line += newlines;
    contents
}

/// Returns the single character matched by an operator or raw token.
fn first_char(lex: &logos::Lexer<Token>) -> Option<char> {
    lex.slice().chars().next()
}
