use std::{
    collections::HashMap,
    io::{self, BufRead, Write},
};

use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    ast::{Argument, SyntaxNode},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::{Builtin, default_functions},
        value::{
            cast::{CastFn, default_types},
            core::Value,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Name of the variable holding the interpreter version.
pub const VERSION_VARIABLE: &str = "version";

/// Stores the runtime evaluation context.
///
/// One context is created per program run and threaded through every
/// evaluation by reference. It holds the variables, the builtin table, the
/// cast table, the dice accumulator, the random generator used by `roll`,
/// and the input and output streams of the script.
///
/// ## Usage
///
/// Variables are global to the run: a `set` inside a nested block is visible
/// everywhere afterwards. Independent runs use independent contexts.
pub struct Context {
    /// Variable bindings, global to the run.
    pub variables:         HashMap<String, Value>,
    /// Builtin handlers by name. Scripts cannot change this table.
    pub functions:         HashMap<String, Builtin>,
    /// Conversion functions used by `cast`, by type name.
    pub types:             HashMap<String, CastFn>,
    /// Maximum face value of every die declared so far, in order.
    pub dice_faces:        Vec<i64>,
    /// Product of every `amount` passed to `dice` so far.
    pub roll_multiplicity: i64,
    pub(crate) rng:        StdRng,
    pub(crate) output:     Box<dyn Write>,
    pub(crate) input:      Box<dyn BufRead>,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a new evaluation context.
    ///
    /// Variables are seeded with `true`, `false` and `version`; the builtin
    /// and cast tables are installed; the dice generator is seeded from OS
    /// entropy. Output goes to stdout and input comes from stdin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a context whose dice generator is seeded with `seed`, so that
    /// rolls are reproducible.
    ///
    /// # Example
    /// ```
    /// use dicelang::interpreter::evaluator::core::Context;
    ///
    /// let ctx = Context::seeded(7);
    /// assert_eq!(ctx.roll_multiplicity, 1);
    /// assert!(ctx.dice_faces.is_empty());
    /// ```
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let variables = HashMap::from([("true".to_string(), Value::Bool(true)),
                                       ("false".to_string(), Value::Bool(false)),
                                       (VERSION_VARIABLE.to_string(),
                                        Value::from(env!("CARGO_PKG_VERSION")))]);

        Self { variables,
               functions: default_functions(),
               types: default_types(),
               dice_faces: Vec::new(),
               roll_multiplicity: 1,
               rng,
               output: Box::new(io::stdout()),
               input: Box::new(io::BufReader::new(io::stdin())) }
    }

    /// Replaces the sink that `print` and `println` write to.
    #[must_use]
    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    /// Replaces the source that `input` reads lines from.
    #[must_use]
    pub fn with_input(mut self, input: Box<dyn BufRead>) -> Self {
        self.input = input;
        self
    }

    /// Executes a syntax node and returns the value it produces, if any.
    ///
    /// - A block runs its statements in order and yields the value of the
    ///   last one; earlier results are discarded. Blocks do not open a scope.
    /// - An expression resolves its head and calls the builtin with the
    ///   arguments still unevaluated.
    /// - A literal evaluates to itself.
    ///
    /// The first error aborts the run.
    ///
    /// # Example
    /// ```
    /// use dicelang::{
    ///     ast::{Argument, SyntaxNode},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::seeded(0);
    /// let set_x = SyntaxNode::call("set", vec!["x".into(), Argument::IntegerLit(1)], 1);
    /// let program = SyntaxNode::block(vec![set_x,
    ///                                      SyntaxNode::call("get", vec!["x".into()], 2)],
    ///                                 1);
    ///
    /// assert_eq!(ctx.exec(&program).unwrap(), Some(Value::Integer(1)));
    /// ```
    pub fn exec(&mut self, node: &SyntaxNode) -> EvalResult<Option<Value>> {
        match node {
            SyntaxNode::Block { statements, .. } => {
                let mut last = None;

                for statement in statements {
                    debug!(line = statement.line(), "executing statement");
                    last = self.exec(statement)?;
                }

                Ok(last)
            },
            SyntaxNode::Expression { head, args, line } => self.call(head, args, *line),
            SyntaxNode::Literal { token, line } => {
                self.eval_argument(&Argument::from(token), *line)
            },
        }
    }
}
