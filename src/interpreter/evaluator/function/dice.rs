use rand::Rng;
use tracing::debug;

use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// `(dice amount sides)`
///
/// Records one die with `sides` faces and multiplies the number of trials
/// the next `roll` produces by `amount`. Declarations accumulate: nothing is
/// reset, neither here nor by `roll`.
///
/// # Errors
/// - `InvalidArgument` if `amount` is negative or `sides` is below 1.
/// - `Overflow` if the trial count no longer fits in an integer.
pub fn dice(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let amount = ctx.eval_integer(&args[0], line)?;
    let sides = ctx.eval_integer(&args[1], line)?;

    if amount < 0 {
        return Err(RuntimeError::invalid_argument(format!("cannot declare {amount} dice"), line));
    }
    if sides < 1 {
        return Err(RuntimeError::invalid_argument(format!("a die needs at least one side, found {sides}"),
                                                  line));
    }

    ctx.roll_multiplicity = ctx.roll_multiplicity
                               .checked_mul(amount)
                               .ok_or(RuntimeError::Overflow { line })?;
    ctx.dice_faces.push(sides);

    debug!(amount,
           sides,
           multiplicity = ctx.roll_multiplicity,
           faces = ctx.dice_faces.len(),
           "declared dice");
    Ok(None)
}

/// `(roll)`
///
/// Produces `roll_multiplicity` independent trials. Each trial is a list with
/// one uniformly random integer in `1..=sides` per recorded die, in
/// declaration order. Numbers come from the context's own generator.
///
/// # Errors
/// `Overflow` if the trial list cannot be allocated.
///
/// # Example
/// ```
/// use dicelang::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::build_program, value::core::Value,
/// };
///
/// let mut ctx = Context::seeded(42);
/// let program = build_program(&tokenize("dice 3 6; roll").unwrap()).unwrap();
///
/// let Some(Value::List(trials)) = ctx.exec(&program).unwrap() else { panic!("expected a list") };
/// assert_eq!(trials.borrow().len(), 3);
/// ```
pub fn roll(ctx: &mut Context, _args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    let faces = ctx.dice_faces.clone();
    let count = usize::try_from(ctx.roll_multiplicity).map_err(|_| RuntimeError::Overflow { line })?;

    let mut trials: Vec<Value> = Vec::new();
    trials.try_reserve_exact(count)
          .map_err(|_| RuntimeError::Overflow { line })?;

    for _ in 0..count {
        let trial = faces.iter()
                         .map(|&sides| Value::Integer(ctx.rng.gen_range(1..=sides)))
                         .collect();
        trials.push(Value::list(trial));
    }

    debug!(trials = trials.len(), dice = faces.len(), "rolled");
    Ok(Some(Value::list(trials)))
}
