use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Binds a variable and returns the bound value.
///
/// The first argument must evaluate to the variable name (a string), the
/// second to the value. Bindings are global to the run.
///
/// # Example
/// ```
/// use dicelang::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::build, value::core::Value,
/// };
///
/// let mut ctx = Context::seeded(0);
/// let call = build(&tokenize("(set \"x\" 41)").unwrap()).unwrap();
///
/// assert_eq!(ctx.exec(&call).unwrap(), Some(Value::Integer(41)));
/// assert_eq!(ctx.variables["x"], Value::Integer(41));
/// ```
pub fn set(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let name = ctx.eval_string(&args[0], line)?;
    let value = ctx.eval_value(&args[1], line)?;

    ctx.set_variable(name, value.clone());
    Ok(Some(value))
}

/// Looks up a variable by its evaluated name.
///
/// # Errors
/// `UndefinedVariable` if nothing is bound under that name.
pub fn get(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let name = ctx.eval_string(&args[0], line)?;
    ctx.get_variable(&name, line).map(Some)
}

/// Converts a value with a conversion function from the type table.
///
/// The first argument names the target type, the second is the value.
///
/// # Errors
/// - `UnknownType` if the type table has no such entry.
/// - `InvalidCast` if the value cannot be converted.
pub fn cast(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let target = ctx.eval_string(&args[0], line)?;

    let convert = *ctx.types
                      .get(&target)
                      .ok_or_else(|| RuntimeError::UnknownType { name: target.clone(),
                                                                 line })?;

    let value = ctx.eval_value(&args[1], line)?;
    convert(&value, line).map(Some)
}
