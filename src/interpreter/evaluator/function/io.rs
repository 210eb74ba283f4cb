use std::io::Write;

use crate::{
    ast::Argument,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Writes every argument to the output, separated by single spaces, without
/// a trailing newline.
///
/// Returns nothing.
///
/// # Example
/// ```
/// use dicelang::interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::build};
///
/// let mut ctx = Context::seeded(0).with_output(Box::new(std::io::sink()));
/// let call = build(&tokenize("(print \"total:\" 3)").unwrap()).unwrap();
///
/// assert_eq!(ctx.exec(&call).unwrap(), None);
/// ```
pub fn print(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    write_values(ctx, args, false, line)?;
    Ok(None)
}

/// Like [`print`], then writes one newline after the whole group.
pub fn println(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    write_values(ctx, args, true, line)?;
    Ok(None)
}

/// Reads one line of input and returns it as a string.
///
/// An optional prompt argument is written (and flushed) first. The line
/// terminator is stripped; end of input yields an empty string.
pub fn input(ctx: &mut Context, args: &[Argument], line: usize) -> EvalResult<Option<Value>> {
    if let Some(prompt) = args.first() {
        let prompt = ctx.eval_value(prompt, line)?;
        write!(ctx.output, "{prompt}").and_then(|()| ctx.output.flush())
                                      .map_err(|e| RuntimeError::io(&e, line))?;
    }

    let mut buffer = String::new();
    ctx.input
       .read_line(&mut buffer)
       .map_err(|e| RuntimeError::io(&e, line))?;

    let trimmed = buffer.trim_end_matches(['\n', '\r']);
    Ok(Some(Value::Str(trimmed.to_string())))
}

/// Evaluates all arguments first, then writes them in one go so a failing
/// argument leaves no partial output.
fn write_values(ctx: &mut Context, args: &[Argument], newline: bool, line: usize) -> EvalResult<()> {
    let values = ctx.eval_values(args, line)?;
    let text = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");

    let written = if newline {
        writeln!(ctx.output, "{text}")
    } else {
        write!(ctx.output, "{text}")
    };

    written.and_then(|()| ctx.output.flush())
           .map_err(|e| RuntimeError::io(&e, line))
}
