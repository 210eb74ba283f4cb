use crate::interpreter::lexer::Token;

/// The two kinds of bracketed group the tree builder understands.
///
/// Lists are not a bracket kind; they are built at runtime by the `list`
/// builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `[ ... ]`, a sequence of statements.
    Block,
    /// `( ... )`, a function call.
    Expression,
}

impl GroupKind {
    /// Returns the group kind opened by `c`, if `c` is an opening bracket.
    #[must_use]
    pub const fn opened_by(c: char) -> Option<Self> {
        match c {
            '[' => Some(Self::Block),
            '(' => Some(Self::Expression),
            _ => None,
        }
    }

    /// Returns the group kind closed by `c`, if `c` is a closing bracket.
    #[must_use]
    pub const fn closed_by(c: char) -> Option<Self> {
        match c {
            ']' => Some(Self::Block),
            ')' => Some(Self::Expression),
            _ => None,
        }
    }

    /// The opening bracket of this group kind.
    #[must_use]
    pub const fn open(self) -> char {
        match self {
            Self::Block => '[',
            Self::Expression => '(',
        }
    }

    /// The closing bracket of this group kind.
    #[must_use]
    pub const fn close(self) -> char {
        match self {
            Self::Block => ']',
            Self::Expression => ')',
        }
    }
}

/// A node of the two-level syntax tree.
///
/// Blocks hold statements, expressions hold a head token and a list of
/// unevaluated arguments. Every node remembers the line it started on so
/// runtime errors can point back at the failing statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    /// `[ s1; s2; ... ]`, an ordered sequence of statements.
    Block {
        /// The statements, in execution order.
        statements: Vec<Self>,
        /// Line of the opening bracket.
        line:       usize,
    },
    /// `( head a b c )`, a function call.
    Expression {
        /// Names the function, directly or through a computed string.
        head: Token,
        /// The arguments, left unevaluated until the builtin asks for them.
        args: Vec<Argument>,
        /// Line of the head token.
        line: usize,
    },
    /// A bare literal in statement position.
    Literal {
        /// The literal token.
        token: Token,
        /// Line of the token.
        line:  usize,
    },
}

impl SyntaxNode {
    /// The source line this node starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Block { line, .. } | Self::Expression { line, .. } | Self::Literal { line, .. } => {
                *line
            },
        }
    }

    /// Convenience constructor for a call node.
    #[must_use]
    pub fn call(name: &str, args: Vec<Argument>, line: usize) -> Self {
        Self::Expression { head: Token::Identifier(name.to_string()),
                           args,
                           line }
    }

    /// Convenience constructor for a block node.
    #[must_use]
    pub const fn block(statements: Vec<Self>, line: usize) -> Self {
        Self::Block { statements, line }
    }

    /// Re-serializes the bracket structure of this node.
    ///
    /// Heads and literal arguments are written as their source text, nested
    /// groups with their brackets, and statements are separated by `;`.
    ///
    /// # Example
    /// ```
    /// use dicelang::{interpreter::lexer::tokenize, interpreter::parser::core::build};
    ///
    /// let tokens = tokenize("[(set \"x\" (add 1 2)); (print x)]").unwrap();
    /// let tree = build(&tokens).unwrap();
    ///
    /// assert_eq!(tree.to_source(), "[(set \"x\" (add 1 2)); (print x)]");
    /// ```
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::Block { statements, .. } => {
                let inner = statements.iter().map(Self::to_source).collect::<Vec<_>>().join("; ");
                format!("[{inner}]")
            },
            Self::Expression { head, args, .. } => {
                let mut out = format!("({head}");
                for arg in args {
                    out.push(' ');
                    out.push_str(&arg.to_source());
                }
                out.push(')');
                out
            },
            Self::Literal { token, .. } => token.to_string(),
        }
    }
}

/// An argument of a call, kept unevaluated.
///
/// Builtins receive a slice of these and decide themselves which to evaluate,
/// in what order, and how many times. Evaluation only reads and writes through
/// the context passed in; an argument never changes itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// An integer literal.
    IntegerLit(i64),
    /// A decimal literal.
    FloatLit(f64),
    /// A string literal.
    StringLit(String),
    /// A boolean literal. The lexer never produces one; `true` and `false` in
    /// source are ordinary variables.
    BooleanLit(bool),
    /// A bare identifier, looked up in the variables when evaluated.
    VariableRef(String),
    /// A list whose items are evaluated in order.
    ListLit(Vec<Self>),
    /// A bare operator token, such as the `:` of a slice.
    Op(char),
    /// A nested block or call, executed on demand.
    Node(SyntaxNode),
}

impl Argument {
    /// Returns `true` if this is the bare operator token `c`.
    #[must_use]
    pub fn is_op(&self, c: char) -> bool {
        matches!(self, Self::Op(op) if *op == c)
    }

    /// Re-serializes this argument as source text.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::IntegerLit(n) => n.to_string(),
            Self::FloatLit(r) => Token::Float(*r).to_string(),
            Self::StringLit(s) => format!("\"{s}\""),
            Self::BooleanLit(b) => b.to_string(),
            Self::VariableRef(name) => name.clone(),
            Self::ListLit(items) => {
                let inner = items.iter().map(Self::to_source).collect::<Vec<_>>().join(" ");
                format!("(list {inner})")
            },
            Self::Op(c) => c.to_string(),
            Self::Node(node) => node.to_source(),
        }
    }
}

impl From<&Token> for Argument {
    fn from(token: &Token) -> Self {
        match token {
            Token::Float(r) => Self::FloatLit(*r),
            Token::Integer(n) => Self::IntegerLit(*n),
            Token::Str(s) => Self::StringLit(s.clone()),
            Token::Identifier(name) => Self::VariableRef(name.clone()),
            Token::Op(c) | Token::Raw(c) => Self::Op(*c),
            Token::Break | Token::Comment | Token::NewLine | Token::Ignored => Self::Op(';'),
        }
    }
}

impl From<SyntaxNode> for Argument {
    fn from(node: SyntaxNode) -> Self {
        Self::Node(node)
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Self::IntegerLit(value)
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Self::FloatLit(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Self::BooleanLit(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::StringLit(value.to_string())
    }
}
