use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// The four binary arithmetic builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Times,
    Divide,
}

impl Operator {
    const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Times => "times",
            Self::Divide => "divide",
        }
    }
}

/// Evaluates both operands, left first, and applies `op`.
///
/// # Errors
/// `DivisionByZero`, `Overflow`, or `TypeError` for unsupported operands.
pub fn binary(op: Operator, ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let left = ctx.eval_value(&args[0], line)?;
    let right = ctx.eval_value(&args[1], line)?;

    apply(op, &left, &right, line).map(Some)
}

/// Applies a binary arithmetic operator to two evaluated values.
///
/// - Two integers use checked integer arithmetic, except `divide`.
/// - `divide` is true division and always yields a float.
/// - Mixed integers and floats are promoted to float.
/// - `add` concatenates two strings or two lists.
/// - `times` repeats a string or list by a non-negative integer; a result
///   too large to allocate is an `Overflow`.
///
/// # Example
/// ```
/// use dicelang::interpreter::{
///     evaluator::function::arithmetic::{Operator, apply},
///     value::core::Value,
/// };
///
/// let sum = apply(Operator::Add, &Value::Integer(2), &Value::Float(0.5), 1).unwrap();
/// assert_eq!(sum, Value::Float(2.5));
///
/// let joined = apply(Operator::Add, &"dice".into(), &"lang".into(), 1).unwrap();
/// assert_eq!(joined, Value::from("dicelang"));
///
/// assert!(apply(Operator::Divide, &Value::Integer(1), &Value::Integer(0), 1).is_err());
/// ```
pub fn apply(op: Operator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    use Value::{Float, Integer, List, Str};

    match (op, left, right) {
        (Operator::Divide, Integer(_) | Float(_), Integer(_) | Float(_)) => {
            let divisor = right.as_float(line)?;
            if divisor == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Float(left.as_float(line)? / divisor))
        },
        (Operator::Add, Integer(a), Integer(b)) => checked(a.checked_add(*b), line),
        (Operator::Subtract, Integer(a), Integer(b)) => checked(a.checked_sub(*b), line),
        (Operator::Times, Integer(a), Integer(b)) => checked(a.checked_mul(*b), line),
        (_, Integer(_) | Float(_), Integer(_) | Float(_)) => {
            let (a, b) = (left.as_float(line)?, right.as_float(line)?);
            Ok(Float(match op {
                         Operator::Add => a + b,
                         Operator::Subtract => a - b,
                         Operator::Times => a * b,
                         Operator::Divide => a / b,
                     }))
        },
        (Operator::Add, Str(a), Str(b)) => Ok(Str(format!("{a}{b}"))),
        (Operator::Add, List(a), List(b)) => {
            let mut joined = a.borrow().clone();
            joined.extend(b.borrow().iter().cloned());
            Ok(Value::list(joined))
        },
        (Operator::Times, Str(s), Integer(n)) | (Operator::Times, Integer(n), Str(s)) => {
            let count = repeat_count(*n, line)?;
            let total = s.len().checked_mul(count).ok_or(RuntimeError::Overflow { line })?;

            let mut repeated = String::new();
            repeated.try_reserve_exact(total)
                    .map_err(|_| RuntimeError::Overflow { line })?;
            if total > 0 {
                for _ in 0..count {
                    repeated.push_str(s);
                }
            }
            Ok(Str(repeated))
        },
        (Operator::Times, List(items), Integer(n)) | (Operator::Times, Integer(n), List(items)) => {
            let count = repeat_count(*n, line)?;
            let items = items.borrow();
            let total = items.len().checked_mul(count).ok_or(RuntimeError::Overflow { line })?;

            let mut repeated: Vec<Value> = Vec::new();
            repeated.try_reserve_exact(total)
                    .map_err(|_| RuntimeError::Overflow { line })?;
            repeated.extend(items.iter().cloned().cycle().take(total));
            Ok(Value::list(repeated))
        },
        _ => Err(RuntimeError::type_error(format!("cannot {} {} and {}",
                                                  op.name(),
                                                  left.type_name(),
                                                  right.type_name()),
                                          line)),
    }
}

fn checked(result: Option<i64>, line: usize) -> EvalResult<Value> {
    result.map(Value::Integer).ok_or(RuntimeError::Overflow { line })
}

fn repeat_count(n: i64, line: usize) -> EvalResult<usize> {
    usize::try_from(n).map_err(|_| {
                          RuntimeError::invalid_argument(format!("cannot repeat {n} times"), line)
                      })
}

/// Returns the arithmetic negation of its operand.
pub fn neg(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    match ctx.eval_value(&args[0], line)? {
        Value::Integer(n) => n.checked_neg()
                              .map(|n| Some(Value::Integer(n)))
                              .ok_or(RuntimeError::Overflow { line }),
        Value::Float(r) => Ok(Some(Value::Float(-r))),
        other => Err(RuntimeError::type_error(format!("cannot negate {}", other.type_name()),
                                              line)),
    }
}

/// Structural equality (`equal`) or inequality (`notequal`) of both operands.
pub fn equality(expect_equal: bool, ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let left = ctx.eval_value(&args[0], line)?;
    let right = ctx.eval_value(&args[1], line)?;

    Ok(Some(Value::Bool((left == right) == expect_equal)))
}
