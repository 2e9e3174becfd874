use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// This is what you get back if something went wrong with your expression.
/// The `Display` implementation yields the canonical message that replaces
/// the numeric result.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum CalcError {
    /// Structurally broken input, e.g., missing operands, unmatched
    /// parentheses, unparseable numerals, or characters outside of the
    /// supported set.
    InvalidExpression,
    /// A division whose divisor evaluated to exactly zero.
    DivisionByZero,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let msg = match self {
            CalcError::InvalidExpression => "Invalid Expression",
            CalcError::DivisionByZero => "ZeroDivisionError",
        };
        write!(f, "{}", msg)
    }
}
impl Error for CalcError {}

/// Calcex' result type with [`CalcError`](CalcError) as error type.
pub type CalcResult<U> = Result<U, CalcError>;
