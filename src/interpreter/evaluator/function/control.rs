use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// `(if condition action [else])`
///
/// Evaluates the condition, then exactly one of the branches. The branch not
/// taken is never evaluated. Without an else branch a false condition yields
/// nothing.
///
/// # Example
/// ```
/// use dicelang::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::build, value::core::Value,
/// };
///
/// let mut ctx = Context::seeded(0);
/// let call = build(&tokenize("(if false [(set \"x\" 1)] [(set \"x\" 2)])").unwrap()).unwrap();
///
/// ctx.exec(&call).unwrap();
/// assert_eq!(ctx.variables["x"], Value::Integer(2));
/// ```
pub fn if_fn(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    if ctx.eval_bool(&args[0], line)? {
        ctx.eval_argument(&args[1], line)
    } else if let Some(otherwise) = args.get(2) {
        ctx.eval_argument(otherwise, line)
    } else {
        Ok(None)
    }
}

/// `(while condition body)`
///
/// Re-evaluates the condition before every iteration and runs the body while
/// it holds. There is no iteration cap.
pub fn while_fn(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    while ctx.eval_bool(&args[0], line)? {
        ctx.eval_argument(&args[1], line)?;
    }

    Ok(None)
}

/// Asserts that a boolean argument is true.
///
/// Returns `true` on success.
///
/// # Errors
/// `AssertionFailed` if the argument is false.
pub fn assert_fn(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    if !ctx.eval_bool(&args[0], line)? {
        return Err(RuntimeError::AssertionFailed { line });
    }
    Ok(Some(Value::Bool(true)))
}
