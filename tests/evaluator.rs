use std::{cell::RefCell, io, io::Cursor, rc::Rc};

use dicelang::{
    error::{ParseError, RuntimeError},
    interpreter::{evaluator::core::Context, value::core::Value},
    run,
};
use pretty_assertions::assert_eq;

/// An output sink that can still be read after the context took ownership of
/// a clone.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output should be utf-8")
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn quiet_context() -> Context {
    Context::seeded(0).with_output(Box::new(io::sink()))
}

fn eval(source: &str) -> Option<Value> {
    let mut ctx = quiet_context();
    run(source, &mut ctx).unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

fn runtime_error(source: &str) -> RuntimeError {
    let mut ctx = quiet_context();
    runtime_error_in(source, &mut ctx)
}

fn runtime_error_in(source: &str, ctx: &mut Context) -> RuntimeError {
    match run(source, ctx) {
        Ok(value) => panic!("{source:?} succeeded with {value:?}"),
        Err(e) => match e.downcast::<RuntimeError>() {
            Ok(e) => *e,
            Err(e) => panic!("{source:?} failed with a non-runtime error: {e}"),
        },
    }
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Integer).collect())
}

#[test]
fn if_takes_exactly_one_branch() {
    let mut ctx = quiet_context();
    run("if true [set \"x\" 1] [set \"y\" 2]", &mut ctx).unwrap();

    assert_eq!(ctx.variables.get("x"), Some(&Value::Integer(1)));
    assert_eq!(ctx.variables.get("y"), None);

    let mut ctx = quiet_context();
    run("if false [set \"x\" 1] [set \"y\" 2]", &mut ctx).unwrap();

    assert_eq!(ctx.variables.get("x"), None);
    assert_eq!(ctx.variables.get("y"), Some(&Value::Integer(2)));
}

#[test]
fn if_returns_branch_value() {
    assert_eq!(eval("if true 1 2"), Some(Value::Integer(1)));
    assert_eq!(eval("if false 1 2"), Some(Value::Integer(2)));
    assert_eq!(eval("if false 1"), None);
}

#[test]
fn untaken_branch_errors_never_fire() {
    assert_eq!(eval("if true 1 (divide 1 0)"), Some(Value::Integer(1)));
    assert_eq!(eval("if false (get \"missing\") 2"), Some(Value::Integer(2)));
}

#[test]
fn condition_must_be_boolean() {
    assert!(matches!(runtime_error("if 1 [set \"x\" 1]"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("while \"yes\" []"), RuntimeError::TypeError { .. }));
}

#[test]
fn while_runs_until_condition_fails() {
    let mut ctx = quiet_context();
    let last = run("set \"x\" 0; while (notequal (get \"x\") 5) [set \"x\" (add (get \"x\") 1)]",
                   &mut ctx).unwrap();

    assert_eq!(last, None);
    assert_eq!(ctx.variables["x"], Value::Integer(5));
}

#[test]
fn while_with_false_condition_never_runs_body() {
    let mut ctx = quiet_context();
    run("while false [set \"x\" 1]", &mut ctx).unwrap();

    assert!(!ctx.variables.contains_key("x"));
}

#[test]
fn arithmetic_results() {
    assert_eq!(eval("add 2 3"), Some(Value::Integer(5)));
    assert_eq!(eval("subtract 2 3"), Some(Value::Integer(-1)));
    assert_eq!(eval("times 4 2.5"), Some(Value::Float(10.0)));
    assert_eq!(eval("divide 7 2"), Some(Value::Float(3.5)));
    assert_eq!(eval("neg 2.5"), Some(Value::Float(-2.5)));
    assert_eq!(eval("times (list 1) 3"), Some(ints(&[1, 1, 1])));
}

#[test]
fn arithmetic_failures() {
    assert!(matches!(runtime_error("divide 1 0"), RuntimeError::DivisionByZero { line: 1 }));
    assert!(matches!(runtime_error("divide 1 0.0"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("add 9223372036854775807 1"), RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("add true 1"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("times \"a\" (neg 1)"),
                     RuntimeError::InvalidArgument { .. }));
}

#[test]
fn equality_is_structural() {
    assert_eq!(eval("equal 1 1.0"), Some(Value::Bool(true)));
    assert_eq!(eval("equal (list 1 (list 2)) (list 1 (list 2))"), Some(Value::Bool(true)));
    assert_eq!(eval("equal \"1\" 1"), Some(Value::Bool(false)));
    assert_eq!(eval("notequal true false"), Some(Value::Bool(true)));
}

#[test]
fn casts_convert_or_fail() {
    assert_eq!(eval("cast \"Integer\" \"42\""), Some(Value::Integer(42)));
    assert_eq!(eval("cast \"Integer\" (neg 2.7)"), Some(Value::Integer(-2)));
    assert_eq!(eval("cast \"Float\" 3"), Some(Value::Float(3.0)));
    assert_eq!(eval("cast \"String\" 1.5"), Some(Value::from("1.5")));
    assert_eq!(eval("cast \"Boolean\" 0"), Some(Value::Bool(false)));

    assert_eq!(runtime_error("cast \"Integer\" \"abc\""),
               RuntimeError::InvalidCast { value:  "abc".into(),
                                           target: "Integer".into(),
                                           line:   1, });
    assert_eq!(runtime_error("cast \"Complex\" 1"),
               RuntimeError::UnknownType { name: "Complex".into(),
                                           line: 1, });
}

#[test]
fn lists_are_mutated_through_variables() {
    let mut ctx = quiet_context();
    run("set \"l\" (list 1 2); push (get \"l\") 3; push (get \"l\") 0 0", &mut ctx).unwrap();
    assert_eq!(ctx.variables["l"], ints(&[0, 1, 2, 3]));

    assert_eq!(run("pop (get \"l\")", &mut ctx).unwrap(), Some(Value::Integer(3)));
    assert_eq!(run("pop (get \"l\") 0", &mut ctx).unwrap(), Some(Value::Integer(0)));
    assert_eq!(ctx.variables["l"], ints(&[1, 2]));

    assert_eq!(run("index (get \"l\") 1", &mut ctx).unwrap(), Some(Value::Integer(2)));
}

#[test]
fn list_bounds_are_checked() {
    assert_eq!(runtime_error("index (list 1 2) 2"),
               RuntimeError::IndexOutOfRange { index: 2,
                                               len:   2,
                                               line:  1, });
    assert!(matches!(runtime_error("index (list 1 2) (neg 1)"),
                     RuntimeError::IndexOutOfRange { index: -1, .. }));
    assert!(matches!(runtime_error("pop (list)"), RuntimeError::IndexOutOfRange { .. }));
    assert!(matches!(runtime_error("push (list) 1 5"), RuntimeError::IndexOutOfRange { .. }));
    assert!(matches!(runtime_error("push 1 1"), RuntimeError::TypeError { .. }));
}

#[test]
fn range_forms() {
    let xs = "(list 0 1 2 3 4)";

    assert_eq!(eval(&format!("range {xs}")), Some(ints(&[0, 1, 2, 3, 4])));
    assert_eq!(eval(&format!("range {xs} :")), Some(ints(&[0, 1, 2, 3, 4])));
    assert_eq!(eval(&format!("range {xs} : 2")), Some(ints(&[0, 1])));
    assert_eq!(eval(&format!("range {xs} 3 :")), Some(ints(&[3, 4])));
    assert_eq!(eval(&format!("range {xs} 1 : 4")), Some(ints(&[1, 2, 3])));
    assert_eq!(eval(&format!("range {xs} 2 : 2")), Some(ints(&[])));

    assert!(matches!(runtime_error(&format!("range {xs} 3 : 1")),
                     RuntimeError::IndexOutOfRange { .. }));
    assert!(matches!(runtime_error(&format!("range {xs} 0 : 6")),
                     RuntimeError::IndexOutOfRange { .. }));
    assert!(matches!(runtime_error(&format!("range {xs} 1 2")),
                     RuntimeError::InvalidArgument { .. }));
}

#[test]
fn range_copies_the_list() {
    let mut ctx = quiet_context();
    run("set \"a\" (list 1 2); set \"b\" (range (get \"a\")); push (get \"b\") 3", &mut ctx).unwrap();

    assert_eq!(ctx.variables["a"], ints(&[1, 2]));
    assert_eq!(ctx.variables["b"], ints(&[1, 2, 3]));
}

#[test]
fn unknown_function_is_reported() {
    assert_eq!(runtime_error("frobnicate 1 2"),
               RuntimeError::FunctionNotFound { name: "frobnicate".into(),
                                                line: 1, });
}

#[test]
fn call_heads_resolve_indirectly() {
    assert_eq!(eval("set \"op\" \"add\"; op 2 3"), Some(Value::Integer(5)));
    assert_eq!(eval("\"times\" 2 3"), Some(Value::Integer(6)));
    assert_eq!(eval("+ 2 3"), Some(Value::Integer(5)));

    assert_eq!(runtime_error("set \"op\" \"nothing\"; op 1"),
               RuntimeError::FunctionNotFound { name: "nothing".into(),
                                                line: 1, });
    assert!(matches!(runtime_error("set \"op\" 3; op 1"),
                     RuntimeError::FunctionNotFound { .. }));
}

#[test]
fn variables_must_exist() {
    assert_eq!(runtime_error("get \"nope\""),
               RuntimeError::UndefinedVariable { name: "nope".into(),
                                                 line: 1, });
    assert!(matches!(runtime_error("add nope 1"), RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn seeded_variables() {
    assert_eq!(eval("get \"true\""), Some(Value::Bool(true)));
    assert_eq!(eval("if false 1 (get \"false\")"), Some(Value::Bool(false)));
    assert_eq!(eval("get \"version\""), Some(Value::from(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn nested_print_has_no_value() {
    assert!(matches!(runtime_error("set \"x\" (print 1)"), RuntimeError::MissingValue { .. }));
}

#[test]
fn arity_is_checked() {
    assert_eq!(runtime_error("set \"x\""),
               RuntimeError::ArgumentCountMismatch { name:  "set".into(),
                                                     found: 1,
                                                     line:  1, });
    assert!(matches!(runtime_error("roll 1"), RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(runtime_error("if true 1 2 3"),
                     RuntimeError::ArgumentCountMismatch { .. }));
}

#[test]
fn print_writes_to_the_output() {
    let out = SharedBuffer::default();
    let mut ctx = Context::seeded(0).with_output(Box::new(out.clone()));

    run("print \"total:\" (add 1 2); print \"!\"; println; println (list 1 2.5 \"a\")", &mut ctx).unwrap();

    assert_eq!(out.contents(), "total: 3!\n[1, 2.5, a]\n");
}

#[test]
fn failing_print_argument_writes_nothing() {
    let out = SharedBuffer::default();
    let mut ctx = Context::seeded(0).with_output(Box::new(out.clone()));

    assert!(run("println \"before\" (get \"missing\")", &mut ctx).is_err());
    assert_eq!(out.contents(), "");
}

#[test]
fn input_reads_lines() {
    let out = SharedBuffer::default();
    let mut ctx = Context::seeded(0).with_output(Box::new(out.clone()))
                                    .with_input(Box::new(Cursor::new("alice\r\nbob\n")));

    run("set \"a\" (input \"name? \"); set \"b\" (input); set \"c\" (input)", &mut ctx).unwrap();

    assert_eq!(ctx.variables["a"], Value::from("alice"));
    assert_eq!(ctx.variables["b"], Value::from("bob"));
    assert_eq!(ctx.variables["c"], Value::from(""));
    assert_eq!(out.contents(), "name? ");
}

#[test]
fn first_error_aborts_the_run() {
    let mut ctx = quiet_context();
    let err = runtime_error_in("set \"x\" 1;\nget \"y\";\nset \"x\" 2", &mut ctx);

    assert_eq!(err.to_string(), "Error on line 2: Unknown variable 'y'.");
    assert_eq!(ctx.variables["x"], Value::Integer(1));
}

#[test]
fn parse_errors_run_nothing() {
    let mut ctx = quiet_context();
    let err = run("set \"x\" 1; (set \"y\" 2", &mut ctx).unwrap_err();

    assert!(err.downcast_ref::<ParseError>().is_some());
    assert!(!ctx.variables.contains_key("x"));
}

#[test]
fn contexts_are_independent() {
    let mut first = quiet_context();
    let mut second = quiet_context();

    run("set \"x\" 1; dice 2 6", &mut first).unwrap();

    assert!(!second.variables.contains_key("x"));
    assert_eq!(second.roll_multiplicity, 1);
    assert!(matches!(runtime_error_in("get \"x\"", &mut second),
                     RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn block_yields_last_statement() {
    assert_eq!(eval("[1; 2; 3]"), Some(Value::Integer(3)));
    assert_eq!(eval("[]"), None);
    assert_eq!(eval("1.5"), Some(Value::Float(1.5)));
}

#[test]
fn list_cannot_be_pushed_into_itself() {
    let out = SharedBuffer::default();
    let mut ctx = Context::seeded(0).with_output(Box::new(out.clone()));
    run("set \"a\" (list)", &mut ctx).unwrap();

    assert!(matches!(runtime_error_in("push (get \"a\") (get \"a\")", &mut ctx),
                     RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error_in("push (get \"a\") (list 1 (list (get \"a\")))", &mut ctx),
                     RuntimeError::InvalidArgument { .. }));

    run("println (get \"a\"); println (equal (get \"a\") (list))", &mut ctx).unwrap();
    assert_eq!(out.contents(), "[]\ntrue\n");
}

#[test]
fn shared_and_copied_lists_can_be_pushed() {
    let mut ctx = quiet_context();
    run("set \"a\" (list 1); set \"b\" (list (get \"a\") (get \"a\")); \
         push (get \"b\") (get \"a\"); push (get \"a\") (range (get \"a\"))",
        &mut ctx).unwrap();

    assert_eq!(ctx.variables["a"], Value::list(vec![Value::Integer(1), ints(&[1])]));
    assert_eq!(run("index (get \"b\") 2", &mut ctx).unwrap(), Some(ctx.variables["a"].clone()));
}

#[test]
fn oversized_repeats_are_overflow() {
    assert!(matches!(runtime_error("times \"ab\" 4611686018427387904"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("times (list 1) 1000000000000000000"),
                     RuntimeError::Overflow { .. }));
    assert_eq!(eval("times \"\" 1000000000000000000"), Some(Value::from("")));
}
