//! Calcex evaluates strings of elementary arithmetic. Supported are the
//! binary operators `+`, `-`, `*`, `/`, and `^`, the unary operators `+` and
//! `-`, parentheses, floating point numbers, and whitespace between tokens.
//! ```rust
//! assert_eq!(calcex::evaluate("1+2*3"), "7");
//! assert_eq!(calcex::evaluate("(1+2)*3"), "9");
//! assert_eq!(calcex::evaluate("--1-2-3--4"), "0");
//! ```
//! Results are rounded to 4 decimal digits and rendered with the minimal
//! number of decimals. Broken input never panics, it renders a classified
//! message, and blank input renders as the empty string.
//! ```rust
//! assert_eq!(calcex::evaluate("1/3"), "0.3333");
//! assert_eq!(calcex::evaluate("1/0"), "ZeroDivisionError");
//! assert_eq!(calcex::evaluate("2*a"), "Invalid Expression");
//! assert_eq!(calcex::evaluate("   "), "");
//! ```
//! Callers who prefer typed values over display strings can use
//! [`eval`](eval) and match on [`CalcResult`](CalcResult).
//! ```rust
//! use calcex::CalcError;
//! assert_eq!(calcex::eval("2^-2"), Ok(0.25));
//! assert_eq!(calcex::eval("1/(3-3)"), Err(CalcError::DivisionByZero));
//! ```

use lazy_static::lazy_static;

mod definitions;
mod expression;
mod format;
mod operators;
mod parser;
mod result;
mod util;

pub use expression::{parse, ExprNode};
pub use format::{fmt_result, fmt_value, round_value};
pub use operators::{make_default_operators, BinOp, Operator, UNARY_PRIO};
pub use parser::{tokenize, OpToken, Paren, ParsedToken};
pub use result::{CalcError, CalcResult};

lazy_static! {
    /// The `f64` instance of the default operators, built once and handed to
    /// the tokenizer by reference.
    static ref DEFAULT_OPERATORS: Vec<Operator<'static, f64>> = make_default_operators();
}

/// Evaluates an arithmetic expression to a typed value.
///
/// # Arguments
///
/// * `text` - expression to be evaluated
///
/// # Errors
///
/// Structurally broken input, including the empty string, yields
/// [`CalcError::InvalidExpression`](CalcError::InvalidExpression), a zero
/// divisor yields [`CalcError::DivisionByZero`](CalcError::DivisionByZero).
///
pub fn eval(text: &str) -> CalcResult<f64> {
    let parsed_tokens = parser::tokenize(text, &DEFAULT_OPERATORS);
    expression::parse(&parsed_tokens).eval()
}

/// Evaluates an arithmetic expression and renders the outcome for display,
/// rounded to 4 decimal digits. Failures render as their canonical messages.
/// Blank input is not an expression at all and renders as the empty string.
pub fn evaluate(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    format::fmt_result(eval(text))
}

#[cfg(test)]
mod tests {
    use crate::util::assert_float_eq_f64;
    use crate::{eval, evaluate, CalcError};

    #[test]
    fn test_eval() {
        assert_float_eq_f64(eval("1.3+0.7").unwrap(), 2.0);
        assert_float_eq_f64(eval("1.3+0.7*2").unwrap(), 2.7);
        assert_float_eq_f64(eval("1.3+0.7*2-1/10").unwrap(), 2.6);
        assert_float_eq_f64(eval("-(1+2)^2").unwrap(), 9.0);
        assert!(eval("1.3+0.7**2").is_err());
        assert_eq!(eval(""), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_evaluate_renders_strings() {
        assert_eq!(evaluate("1.3+0.7"), "2");
        assert_eq!(evaluate("10/4"), "2.5");
        assert_eq!(evaluate("1.3+0.7**2"), "Invalid Expression");
    }
}
