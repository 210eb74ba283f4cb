use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::{list_position, usize_to_i64_checked},
};

/// The slice delimiter accepted by `range`.
const SLICE_DELIMITER: char = ':';

/// Evaluates every argument and returns them as a new list.
pub fn list(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    Ok(Some(Value::list(ctx.eval_values(args, line)?)))
}

/// `(push list item [index])`
///
/// Inserts `item` at `index` (`0..=len`), or appends it. The list is changed
/// in place and returned.
///
/// # Errors
/// - `InvalidArgument` if `item` is the list itself or contains it.
/// - `IndexOutOfRange` if `index` is outside `0..=len`.
///
/// # Example
/// ```
/// use dicelang::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::build_program, value::core::Value,
/// };
///
/// let mut ctx = Context::seeded(0);
/// let program = build_program(&tokenize("(set \"l\" (list 1 3)); (push (get \"l\") 2 1)").unwrap())
///     .unwrap();
/// ctx.exec(&program).unwrap();
///
/// assert_eq!(ctx.variables["l"],
///            Value::list(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]));
/// ```
pub fn push(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let target = ctx.eval_value(&args[0], line)?;
    let items = target.as_list(line)?;
    let item = ctx.eval_value(&args[1], line)?;

    if item.refers_to(&items) {
        return Err(RuntimeError::invalid_argument("a list cannot contain itself", line));
    }

    match args.get(2) {
        Some(index) => {
            let index = ctx.eval_integer(index, line)?;
            let position = list_position(index, items.borrow().len(), true, line)?;
            items.borrow_mut().insert(position, item);
        },
        None => items.borrow_mut().push(item),
    }

    Ok(Some(target))
}

/// `(pop list [index])`
///
/// Removes and returns the element at `index`, or the last element.
///
/// # Errors
/// `IndexOutOfRange` for an out-of-bounds index or an empty list.
pub fn pop(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let items = ctx.eval_value(&args[0], line)?.as_list(line)?;
    let len = items.borrow().len();

    let index = match args.get(1) {
        Some(index) => ctx.eval_integer(index, line)?,
        None => usize_to_i64_checked(len, line)? - 1,
    };

    let position = list_position(index, len, false, line)?;
    let removed = items.borrow_mut().remove(position);
    Ok(Some(removed))
}

/// `(index list i)`
///
/// # Errors
/// `IndexOutOfRange` if `i` is not in `0..len`.
pub fn index(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let items = ctx.eval_value(&args[0], line)?.as_list(line)?;
    let index = ctx.eval_integer(&args[1], line)?;

    let items = items.borrow();
    let position = list_position(index, items.len(), false, line)?;
    Ok(Some(items[position].clone()))
}

/// `(range list [start] [:] [end])`
///
/// Returns a new list copied from a sub-range of `list`. The shapes after the
/// list are: nothing or `:` (whole list), `: end`, `start :` and
/// `start : end`. The `:` must be a bare operator token; it is never
/// evaluated.
///
/// # Errors
/// - `InvalidArgument` for any other shape.
/// - `IndexOutOfRange` unless `0 <= start <= end <= len`.
///
/// # Example
/// ```
/// use dicelang::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::build, value::core::Value,
/// };
///
/// let mut ctx = Context::seeded(0);
/// let call = build(&tokenize("(range (list 1 2 3 4) 1 : 3)").unwrap()).unwrap();
///
/// assert_eq!(ctx.exec(&call).unwrap(),
///            Some(Value::list(vec![Value::Integer(2), Value::Integer(3)])));
/// ```
pub fn range(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let items = ctx.eval_value(&args[0], line)?.as_list(line)?;

    let (start, end) = match &args[1..] {
        [] => (None, None),
        [colon] if colon.is_op(SLICE_DELIMITER) => (None, None),
        [colon, end] if colon.is_op(SLICE_DELIMITER) => (None, Some(end)),
        [start, colon] if colon.is_op(SLICE_DELIMITER) => (Some(start), None),
        [start, colon, end] if colon.is_op(SLICE_DELIMITER) => (Some(start), Some(end)),
        _ => {
            return Err(RuntimeError::invalid_argument("range expects `:end`, `start:` or `start:end` after the list",
                                                      line));
        },
    };

    let start = start.map(|arg| ctx.eval_integer(arg, line)).transpose()?;
    let end = end.map(|arg| ctx.eval_integer(arg, line)).transpose()?;

    let items = items.borrow();
    let len = items.len();

    let start = list_position(start.unwrap_or(0), len, true, line)?;
    let end = match end {
        Some(end) => list_position(end, len, true, line)?,
        None => len,
    };

    if start > end {
        return Err(RuntimeError::IndexOutOfRange { index: usize_to_i64_checked(start, line)?,
                                                   len,
                                                   line });
    }

    Ok(Some(Value::list(items[start..end].to_vec())))
}
