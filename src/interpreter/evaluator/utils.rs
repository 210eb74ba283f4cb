use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a single unevaluated argument.
    ///
    /// Literals evaluate to themselves, variable references are looked up,
    /// list literals evaluate their items in order, bare operators evaluate to
    /// their character as a string, and nested nodes are executed now.
    ///
    /// # Parameters
    /// - `arg`: The argument to evaluate.
    /// - `line`: Line of the call, for error reporting.
    ///
    /// # Returns
    /// The produced value, or `None` when a nested node yields nothing.
    ///
    /// # Example
    /// ```
    /// use dicelang::{
    ///     ast::Argument,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::seeded(0);
    /// let v = ctx.eval_argument(&Argument::VariableRef("true".into()), 1).unwrap();
    ///
    /// assert_eq!(v, Some(Value::Bool(true)));
    /// ```
    pub fn eval_argument(&mut self, arg: &Argument, line: usize) -> EvalResult<Option<Value>> {
        match arg {
            Argument::IntegerLit(n) => Ok(Some(Value::Integer(*n))),
            Argument::FloatLit(r) => Ok(Some(Value::Float(*r))),
            Argument::StringLit(s) => Ok(Some(Value::Str(s.clone()))),
            Argument::BooleanLit(b) => Ok(Some(Value::Bool(*b))),
            Argument::VariableRef(name) => self.get_variable(name, line).map(Some),
            Argument::ListLit(items) => Ok(Some(Value::list(self.eval_values(items, line)?))),
            Argument::Op(c) => Ok(Some(Value::Str(c.to_string()))),
            Argument::Node(node) => self.exec(node),
        }
    }

    /// Evaluates an argument in value position.
    ///
    /// # Errors
    /// `MissingValue` if the argument produced nothing, for example a nested
    /// `print`.
    pub fn eval_value(&mut self, arg: &Argument, line: usize) -> EvalResult<Value> {
        self.eval_argument(arg, line)?
            .ok_or(RuntimeError::MissingValue { line })
    }

    /// Evaluates every argument in order.
    pub fn eval_values(&mut self, args: &[Argument], line: usize) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(args.len());

        for arg in args {
            values.push(self.eval_value(arg, line)?);
        }

        Ok(values)
    }

    /// Evaluates an argument that must produce a string.
    pub fn eval_string(&mut self, arg: &Argument, line: usize) -> EvalResult<String> {
        match self.eval_value(arg, line)? {
            Value::Str(s) => Ok(s),
            other => Err(RuntimeError::type_error(format!("expected String, found {}",
                                                          other.type_name()),
                                                  line)),
        }
    }

    /// Evaluates an argument that must produce an integer.
    pub fn eval_integer(&mut self, arg: &Argument, line: usize) -> EvalResult<i64> {
        self.eval_value(arg, line)?.as_integer(line)
    }

    /// Evaluates an argument that must produce a boolean.
    pub fn eval_bool(&mut self, arg: &Argument, line: usize) -> EvalResult<bool> {
        self.eval_value(arg, line)?.as_bool(line)
    }

    /// Looks up a variable.
    ///
    /// Lists come back as a new handle to the same list, so mutations through
    /// the result are visible through the variable.
    ///
    /// # Errors
    /// `UndefinedVariable` if the name was never bound.
    pub fn get_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Binds a variable, replacing any previous binding.
    pub fn set_variable(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }
}
