mod utils;
use calcex::{eval, evaluate, make_default_operators, parse, tokenize, CalcError};
use std::iter::{once, repeat};
use utils::assert_float_eq_f64;

fn test(sut: &str, reference: &str) {
    println!("testing {}...", sut);
    assert_eq!(evaluate(sut), reference);
}

#[test]
fn test_blank_input() {
    test("", "");
    test("   ", "");
    test(" \t \n ", "");
}

#[test]
fn test_binary_operators() {
    test("1+2+3+4", "10");
    test("1+2*3", "7");
    test("(1+2)*3", "9");
    test("10-4-3", "3");
    test("8/4/2", "1");
    test("2^3", "8");
    test("2*3^2", "18");
    test("2^3^2", "64");
    test("10/4", "2.5");
    test("0/5", "0");
    test("5^0", "1");
}

#[test]
fn test_unary_operators() {
    test("-1-2-3-4", "-10");
    test("--1", "1");
    test("---1", "-1");
    test("--1-2-3--4", "0");
    test("++++1++2+3+++++++++4", "10");
    test("-(1+2)", "-3");
    test("2*-3", "-6");
    test("2^-2", "0.25");
    test("-2^2", "4");
    test("(- 3)", "-3");
    test("(1+2)-3", "0");
}

#[test]
fn test_division_by_zero() {
    test("1/0", "ZeroDivisionError");
    test("-1/0", "ZeroDivisionError");
    test("1/-0", "ZeroDivisionError");
    test("1/(2-2)", "ZeroDivisionError");
    test("5+4/(3-3)", "ZeroDivisionError");
    // the leftmost failure wins
    test("(1/0)+(2*a)", "ZeroDivisionError");
    test("(2*a)+(1/0)", "Invalid Expression");
}

#[test]
fn test_invalid_expressions() {
    test("2*a", "Invalid Expression");
    test("2*ä", "Invalid Expression");
    test("1.2.3", "Invalid Expression");
    test(".", "Invalid Expression");
    test("1 2", "Invalid Expression");
    test("()", "Invalid Expression");
    test("(1+2", "Invalid Expression");
    test("1+2)", "Invalid Expression");
    test("1+", "Invalid Expression");
    test("*1", "Invalid Expression");
    test("1e3", "Invalid Expression");
    test("sin(1)", "Invalid Expression");
}

#[test]
fn test_rounding() {
    test("1/3", "0.3333");
    test("2/3", "0.6667");
    test("-1/3", "-0.3333");
    test("1.00005", "1.0001");
    test("0.1+0.2", "0.3");
    test("0*-1", "0");
}

#[test]
fn test_formatting_is_idempotent() {
    for sut in ["1/3", "-1/3", "2/3", "10/4", "1.00005", "7*3", "0.1+0.2"] {
        let formatted = evaluate(sut);
        println!("re-evaluating {}...", formatted);
        assert_eq!(evaluate(&formatted), formatted);
    }
}

#[test]
fn test_eval_typed() {
    assert_float_eq_f64(eval("1.3+0.7").unwrap(), 2.0);
    assert_float_eq_f64(eval("2-1/2").unwrap(), 1.5);
    assert_float_eq_f64(eval("-(1+2)^2").unwrap(), 9.0);
    assert_float_eq_f64(eval("2^3^2").unwrap(), 64.0);
    assert_eq!(eval("1/(2-2)"), Err(CalcError::DivisionByZero));
    assert_eq!(eval("2*a"), Err(CalcError::InvalidExpression));
    assert_eq!(eval(""), Err(CalcError::InvalidExpression));
}

#[test]
fn test_error_messages() {
    assert_eq!(format!("{}", CalcError::InvalidExpression), "Invalid Expression");
    assert_eq!(format!("{}", CalcError::DivisionByZero), "ZeroDivisionError");
}

#[test]
fn test_whitespace_does_not_change_the_tree() {
    let ops = make_default_operators::<f64>();
    // single-character tokens only, so whitespace can go after any character
    let expressions = [
        "((1+2)*(3-4))",
        "(((-1)))",
        "((2^(1+1))/(5-(2*2)))",
        "((-(3))+((4)*(2)))",
    ];
    for sut in expressions {
        let reference = parse(&tokenize(sut, &ops));
        for _ in 0..50 {
            let spaced = sut
                .chars()
                .flat_map(|c| {
                    let n_spaces = (rand::random::<f64>() * 3.0) as usize;
                    once(c).chain(repeat(' ').take(n_spaces))
                })
                .collect::<String>();
            let spaced = format!("  {}", spaced);
            assert_eq!(parse(&tokenize(&spaced, &ops)), reference);
            assert_eq!(evaluate(&spaced), evaluate(sut));
        }
    }
}
