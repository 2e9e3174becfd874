use crate::CalcResult;

// display precision of 4 decimal digits
const ROUND_FACTOR: f64 = 10_000.0;

/// Rounds to 4 decimal digits with ties away from zero. The value is nudged
/// one epsilon away from zero first, so that decimal inputs such as `1.00005`
/// end up on the expected side of the tie despite their inexact binary
/// representation.
pub fn round_value(x: f64) -> f64 {
    let nudged = x + x.signum() * f64::EPSILON;
    let rounded = (nudged * ROUND_FACTOR).round() / ROUND_FACTOR;
    // adding positive zero turns a -0.0 into 0.0 and leaves the rest alone
    rounded + 0.0
}

/// Renders a value rounded to 4 decimal digits with the minimal number of
/// decimals, e.g., `5` instead of `5.0000` and `0.5` instead of `0.5000`.
pub fn fmt_value(x: f64) -> String {
    format!("{}", round_value(x))
}

/// Renders an evaluation outcome, either the rounded value or the canonical
/// message of the failure.
pub fn fmt_result(res: CalcResult<f64>) -> String {
    match res {
        Ok(x) => fmt_value(x),
        Err(e) => format!("{}", e),
    }
}

#[cfg(test)]
use crate::CalcError;

#[test]
fn test_round_value() {
    assert_eq!(round_value(1.0 / 3.0), 0.3333);
    assert_eq!(round_value(2.0 / 3.0), 0.6667);
    assert_eq!(round_value(1.00005), 1.0001);
    assert_eq!(round_value(-1.00005), -1.0001);
    assert_eq!(round_value(0.1 + 0.2), 0.3);
    assert_eq!(round_value(5.0), 5.0);
}

#[test]
fn test_fmt_value() {
    assert_eq!(fmt_value(5.0), "5");
    assert_eq!(fmt_value(2.5), "2.5");
    assert_eq!(fmt_value(1.0 / 3.0), "0.3333");
    assert_eq!(fmt_value(-1.0 / 3.0), "-0.3333");
    assert_eq!(fmt_value(0.1 + 0.2), "0.3");
    // tiny magnitudes collapse to a plain zero, not to -0
    assert_eq!(fmt_value(-0.00001), "0");
    assert_eq!(fmt_value(-0.0), "0");
}

#[test]
fn test_fmt_result() {
    assert_eq!(fmt_result(Ok(7.0)), "7");
    assert_eq!(fmt_result(Err(CalcError::InvalidExpression)), "Invalid Expression");
    assert_eq!(fmt_result(Err(CalcError::DivisionByZero)), "ZeroDivisionError");
}
