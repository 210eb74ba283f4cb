use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{
                arithmetic::{self, Operator},
                control, dice, io, list, variable,
            },
        },
        lexer::Token,
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context, its arguments still unevaluated, and the
/// line of the call. It decides itself which arguments to evaluate and how
/// often, and returns a value or nothing.
pub type BuiltinFn = fn(&mut Context, &[Argument], usize) -> EvalResult<Option<Value>>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Between(min, max)` accepts any count in the inclusive range.
/// - `AtLeast(n)` accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::Between(min, max) => min <= n && n <= max,
            Self::AtLeast(min) => n >= min,
        }
    }
}

/// A named entry of the builtin table.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// The name the builtin was registered under.
    pub name:  &'static str,
    /// How many arguments it accepts.
    pub arity: Arity,
    func:      BuiltinFn,
}

impl Builtin {
    /// Checks the argument count and runs the handler.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the arity does not allow `args.len()`, plus
    /// whatever the handler reports.
    pub fn invoke(&self, ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
        if !self.arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: self.name.to_string(),
                                                             found: args.len(),
                                                             line });
        }

        (self.func)(ctx, args, line)
    }
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides a string name, an arity specification and a function
/// pointer implementing the builtin. The macro produces `BUILTIN_TABLE`, the
/// static table used to seed a context.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "print"    => { arity: Arity::AtLeast(0), func: io::print },
    "println"  => { arity: Arity::AtLeast(0), func: io::println },
    "input"    => { arity: Arity::Between(0, 1), func: io::input },
    "set"      => { arity: Arity::Exact(2), func: variable::set },
    "get"      => { arity: Arity::Exact(1), func: variable::get },
    "cast"     => { arity: Arity::Exact(2), func: variable::cast },
    "equal"    => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::equality(true, ctx, args, line) },
    "notequal" => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::equality(false, ctx, args, line) },
    "add"      => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Add, ctx, args, line) },
    "subtract" => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Subtract, ctx, args, line) },
    "times"    => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Times, ctx, args, line) },
    "divide"   => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Divide, ctx, args, line) },
    "+"        => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Add, ctx, args, line) },
    "-"        => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Subtract, ctx, args, line) },
    "*"        => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Times, ctx, args, line) },
    "/"        => { arity: Arity::Exact(2), func: |ctx, args, line| arithmetic::binary(Operator::Divide, ctx, args, line) },
    "neg"      => { arity: Arity::Exact(1), func: arithmetic::neg },
    "if"       => { arity: Arity::Between(2, 3), func: control::if_fn },
    "while"    => { arity: Arity::Exact(2), func: control::while_fn },
    "assert"   => { arity: Arity::Exact(1), func: control::assert_fn },
    "list"     => { arity: Arity::AtLeast(0), func: list::list },
    "push"     => { arity: Arity::Between(2, 3), func: list::push },
    "pop"      => { arity: Arity::Between(1, 2), func: list::pop },
    "index"    => { arity: Arity::Exact(2), func: list::index },
    "range"    => { arity: Arity::Between(1, 4), func: list::range },
    "dice"     => { arity: Arity::Exact(2), func: dice::dice },
    "roll"     => { arity: Arity::Exact(0), func: dice::roll },
}

/// Builds the function table installed in every new context.
#[must_use]
pub fn default_functions() -> HashMap<String, Builtin> {
    BUILTIN_TABLE.iter().map(|builtin| (builtin.name.to_string(), *builtin)).collect()
}

impl Context {
    /// Resolves a call head to a builtin.
    ///
    /// Resolution order:
    /// 1. the head's own name (identifier, string or operator) in the
    ///    function table;
    /// 2. the head evaluated as a value: an identifier bound to a string, or a
    ///    string literal, names the builtin indirectly;
    /// 3. otherwise `FunctionNotFound`.
    ///
    /// # Example
    /// ```
    /// use dicelang::interpreter::{evaluator::core::Context, lexer::Token};
    ///
    /// let mut ctx = Context::seeded(0);
    /// ctx.set_variable("op".into(), "add".into());
    ///
    /// assert_eq!(ctx.resolve(&Token::Identifier("op".into()), 1).unwrap().name, "add");
    /// assert!(ctx.resolve(&Token::Identifier("nope".into()), 1).is_err());
    /// ```
    pub fn resolve(&self, head: &Token, line: usize) -> EvalResult<Builtin> {
        let direct = match head {
            Token::Identifier(name) | Token::Str(name) => Some(name.clone()),
            Token::Op(c) => Some(c.to_string()),
            _ => None,
        };

        if let Some(name) = &direct
           && let Some(builtin) = self.functions.get(name)
        {
            return Ok(*builtin);
        }

        let computed = match head {
            Token::Identifier(name) => self.variables.get(name),
            _ => None,
        };

        if let Some(Value::Str(name)) = computed {
            trace!(head = %head, target = %name, "resolving call head indirectly");
            return self.functions
                       .get(name)
                       .copied()
                       .ok_or_else(|| RuntimeError::FunctionNotFound { name: name.clone(),
                                                                       line });
        }

        Err(RuntimeError::FunctionNotFound { name: head.to_string(),
                                             line })
    }

    /// Evaluates a function call.
    ///
    /// The head is resolved with [`Context::resolve`], then the builtin runs
    /// with the arguments still unevaluated.
    ///
    /// # Parameters
    /// - `head`: The call head.
    /// - `args`: Unevaluated arguments.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The builtin's result, or an error if resolution, arity or the builtin
    /// fails.
    pub fn call(&mut self, head: &Token, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
        let builtin = self.resolve(head, line)?;
        trace!(name = builtin.name, args = args.len(), line, "calling builtin");
        builtin.invoke(self, args, line)
    }
}
