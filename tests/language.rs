use std::fs;

use dicelang::get_result;
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "dice"))
    {
        let path = entry.path();
        let script =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&script, false) {
            panic!("Demo script {path:?} failed:\n{script}\nError: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("set \"x\" (add 1 2); assert (equal (get \"x\") 3)");
    assert_success("set \"x\" (times 7 9); assert (equal (get \"x\") 63)");
    assert_success("set \"x\" (subtract 8 5); assert (equal (get \"x\") 3)");
    assert_success("set \"x\" (divide 10 4); assert (equal (get \"x\") 2.5)");
    assert_success("assert (equal (neg 5) (subtract 0 5))");
}

#[test]
fn operator_aliases() {
    assert_success("assert (equal (+ 1 2) 3)");
    assert_success("assert (equal (- 1 2) (neg 1))");
    assert_success("assert (equal (* 3 4) 12)");
    assert_success("assert (equal (/ 9 3) 3)");
}

#[test]
fn mixed_numbers_and_strings() {
    assert_success("assert (equal (add 1 0.5) 1.5)");
    assert_success("assert (equal (add \"ab\" \"cd\") \"abcd\")");
    assert_success("assert (equal (times \"ab\" 3) \"ababab\")");
    assert_success("assert (equal (add (list 1) (list 2)) (list 1 2))");
    assert_failure("add \"a\" 1");
}

#[test]
fn statements_may_be_bracketed_or_bare() {
    assert_success("(set \"x\" 1); [set \"y\" 2]; assert (equal (add (get \"x\") (get \"y\")) 3)");
    assert_success("set \"x\" 1;;; assert (equal (get \"x\") 1);");
    assert_success("[(set \"x\" 1); (assert (equal (get \"x\") 1))]");
}

#[test]
fn variables_are_global_to_the_run() {
    assert_success("[[set \"inner\" 7]]; assert (equal (get \"inner\") 7)");
    assert_success("if true [set \"y\" 1]; assert (equal (get \"y\") 1)");
}

#[test]
fn seeded_defaults() {
    assert_success("assert true");
    assert_success("assert (notequal true false)");
    assert_success("assert (equal (cast \"String\" (get \"version\")) (get \"version\"))");
}

#[test]
fn comments_and_separators_are_ignored() {
    assert_success("// setup\nset \"x\" 1; // trailing\nassert (equal (add 1, 2) 3)");
}

#[test]
fn while_loop_counts() {
    assert_success(r#"
        set "x" 0;
        while (notequal (get "x") 5) [set "x" (add (get "x") 1)];
        assert (equal (get "x") 5)
    "#);
}

#[test]
fn nested_control_flow() {
    assert_success(r#"
        set "i" 0;
        set "evens" (list);
        while (notequal (get "i") 6) [
            if (equal (cast "Integer" (divide (get "i") 2)) (divide (get "i") 2))
                [push (get "evens") (get "i")];
            set "i" (add (get "i") 1)
        ];
        assert (equal (get "evens") (list 0 2 4))
    "#);
}

#[test]
fn failures() {
    assert_failure("divide 1 0");
    assert_failure("divide 1.0 0.0");
    assert_failure("get \"missing\"");
    assert_failure("frobnicate 1");
    assert_failure("cast \"Integer\" \"abc\"");
    assert_failure("cast \"Complex\" 1");
    assert_failure("index (list 1 2) 2");
    assert_failure("pop (list)");
    assert_failure("assert false");
    assert_failure("if 1 [println 1]");
    assert_failure("set \"x\" (println 1)");
    assert_failure("dice 1 0");
}

#[test]
fn malformed_sources() {
    assert_failure("(set \"x\" 1");
    assert_failure("set \"x\" 1)");
    assert_failure("[(set \"x\" 1])");
    assert_failure("()");
    assert_failure("(set \"x\" ; 1)");
    assert_failure("set \"x\" \u{a7}");
}

#[test]
fn wrong_builtin_arity_is_error() {
    assert_failure("set \"x\"");
    assert_failure("roll 1");
    assert_failure("if true");
}
