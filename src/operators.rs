use crate::{CalcError, CalcResult};
use num::Float;

/// Priority of the unary operators. It is strictly larger than every binary
/// priority, i.e., a unary operator binds before any pending binary
/// reduction, e.g., `-2^2 == 4`.
pub const UNARY_PRIO: i32 = 4;

/// An operator is a symbol together with up to two meanings, one per arity.
/// Which meaning applies at a given occurrence is decided by the tokenizer
/// based on the preceding token.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Operator<'a, T: Copy> {
    /// Representation of the operator in the string to be parsed, e.g., `-` or `^`.
    pub repr: &'a str,
    /// Binary meaning that contains a priority besides a function pointer, if available.
    pub bin_op: Option<BinOp<T>>,
    /// Unary meaning without an explicit priority, since all unary operators
    /// share [`UNARY_PRIO`](UNARY_PRIO).
    pub unary_op: Option<fn(T) -> T>,
}

impl<'a, T: Copy> Operator<'a, T> {
    pub fn has_bin(&self) -> bool {
        self.bin_op.is_some()
    }
    pub fn has_unary(&self) -> bool {
        self.unary_op.is_some()
    }
}

/// A binary operator that consists of a function pointer and a priority.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BinOp<T> {
    /// Implementation of the binary operation. The signature is fallible
    /// since a division reports a zero divisor instead of returning a float
    /// infinity.
    pub apply: fn(T, T) -> CalcResult<T>,
    /// Priority of the binary operation. An operation with a higher number is
    /// reduced first, e.g., `*` before `+`.
    pub prio: i32,
}

/// Returns the operators of elementary arithmetic.
///
/// Equal-priority binary operators are reduced left to right, unary operators
/// are applied rightmost-first, e.g., `---1 == -(-(-1))`.
pub fn make_default_operators<T: Float>() -> Vec<Operator<'static, T>> {
    vec![
        Operator {
            repr: "^",
            bin_op: Some(BinOp {
                apply: |a: T, b| Ok(a.powf(b)),
                prio: 3,
            }),
            unary_op: None,
        },
        Operator {
            repr: "*",
            bin_op: Some(BinOp {
                apply: |a, b| Ok(a * b),
                prio: 2,
            }),
            unary_op: None,
        },
        Operator {
            repr: "/",
            bin_op: Some(BinOp {
                apply: |a: T, b: T| {
                    if b == T::zero() {
                        Err(CalcError::DivisionByZero)
                    } else {
                        Ok(a / b)
                    }
                },
                prio: 2,
            }),
            unary_op: None,
        },
        Operator {
            repr: "+",
            bin_op: Some(BinOp {
                apply: |a, b| Ok(a + b),
                prio: 1,
            }),
            unary_op: Some(|a: T| a),
        },
        Operator {
            repr: "-",
            bin_op: Some(BinOp {
                apply: |a, b| Ok(a - b),
                prio: 1,
            }),
            unary_op: Some(|a: T| -a),
        },
    ]
}

#[test]
fn test_unary_prio_exceeds_binary_prios() {
    for op in make_default_operators::<f64>() {
        if let Some(bin_op) = op.bin_op {
            assert!(bin_op.prio < UNARY_PRIO, "{} too strong", op.repr);
        }
    }
}

#[test]
fn test_division_reports_zero_divisor() {
    let ops = make_default_operators::<f64>();
    let div = ops.iter().find(|op| op.repr == "/").unwrap();
    let apply = div.bin_op.unwrap().apply;
    assert_eq!(apply(1.0, 0.0), Err(CalcError::DivisionByZero));
    assert_eq!(apply(1.0, -0.0), Err(CalcError::DivisionByZero));
    assert_eq!(apply(1.0, 4.0), Ok(0.25));
}

#[test]
fn test_arities() {
    let ops = make_default_operators::<f64>();
    for op in &ops {
        assert!(op.has_bin());
        assert_eq!(op.has_unary(), op.repr == "+" || op.repr == "-");
    }
}
