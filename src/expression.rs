use crate::definitions::{N_NODES_ON_STACK, N_OPS_ON_STACK};
use crate::parser::{OpToken, Paren, ParsedToken};
use crate::{CalcError, CalcResult};
use smallvec::SmallVec;

/// Binary expression tree created by [`parse`](parse). Every node owns its
/// children exclusively; each reduction during parsing consumes the children
/// and moves them into the freshly built parent.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode<'a, T: Copy> {
    Leaf(T),
    Unary {
        repr: &'a str,
        apply: fn(T) -> T,
        operand: Box<ExprNode<'a, T>>,
    },
    Binary {
        repr: &'a str,
        apply: fn(T, T) -> CalcResult<T>,
        left: Box<ExprNode<'a, T>>,
        right: Box<ExprNode<'a, T>>,
    },
    /// Structurally broken part of the input with a short reason. Evaluating
    /// it fails, the reason is kept for debugging.
    Invalid(&'static str),
}

impl<'a, T: Copy> ExprNode<'a, T> {
    /// Evaluates the tree recursively. Children are evaluated left to right
    /// and the first failure is propagated unconditionally, i.e., a failing
    /// left child wins over a failing right child.
    pub fn eval(&self) -> CalcResult<T> {
        match self {
            ExprNode::Leaf(x) => Ok(*x),
            ExprNode::Unary { apply, operand, .. } => Ok(apply(operand.eval()?)),
            ExprNode::Binary {
                apply, left, right, ..
            } => {
                let left_val = left.eval()?;
                let right_val = right.eval()?;
                apply(left_val, right_val)
            }
            ExprNode::Invalid(_) => Err(CalcError::InvalidExpression),
        }
    }
}

type NodeStack<'a, T> = SmallVec<[ExprNode<'a, T>; N_NODES_ON_STACK]>;

enum StackedOp<'a, T: Copy> {
    Op(OpToken<'a, T>),
    /// Sentinel for an opening parenthesis. It outranks nothing, so it stops
    /// every reduction loop.
    ParenOpen,
}

/// Pops the children of `op` off the node stack and pushes the newly built
/// node back. Too few operands on the stack yield an
/// [`ExprNode::Invalid`](ExprNode::Invalid) instead of a well-formed node.
fn reduce<'a, T: Copy>(nodes: &mut NodeStack<'a, T>, op: OpToken<'a, T>) {
    let reduced = match op {
        OpToken::Unary { repr, apply } => match nodes.pop() {
            Some(operand) => ExprNode::Unary {
                repr,
                apply,
                operand: Box::new(operand),
            },
            None => ExprNode::Invalid("unary operator without operand"),
        },
        OpToken::Binary { repr, op } => {
            let right = nodes.pop();
            let left = nodes.pop();
            match (left, right) {
                (Some(left), Some(right)) => ExprNode::Binary {
                    repr,
                    apply: op.apply,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                _ => ExprNode::Invalid("binary operator without two operands"),
            }
        }
    };
    nodes.push(reduced);
}

/// Shunting-yard parser fused with the tree construction.
///
/// Operands go onto a node stack, operators onto an operator stack. Whenever
/// the top of the operator stack outranks an incoming operator it is reduced
/// right away, so the node stack always carries finished subtrees. At the end
/// of input the operator stack is drained the same way and the node stack
/// must collapse to exactly one root.
///
/// Parsing is total. Structural failures, e.g., unmatched parentheses or
/// missing operands, are returned as [`ExprNode::Invalid`](ExprNode::Invalid)
/// roots instead of errors.
pub fn parse<'a, T: Copy>(tokens: &[ParsedToken<'a, T>]) -> ExprNode<'a, T> {
    let mut nodes: NodeStack<'a, T> = SmallVec::new();
    let mut ops: SmallVec<[StackedOp<'a, T>; N_OPS_ON_STACK]> = SmallVec::new();

    for token in tokens {
        match token {
            ParsedToken::Num(x) => nodes.push(ExprNode::Leaf(*x)),
            ParsedToken::Invalid => nodes.push(ExprNode::Invalid("unrecognized token")),
            ParsedToken::Paren(Paren::Open) => ops.push(StackedOp::ParenOpen),
            ParsedToken::Paren(Paren::Close) => loop {
                match ops.pop() {
                    Some(StackedOp::Op(top)) => reduce(&mut nodes, top),
                    Some(StackedOp::ParenOpen) => break,
                    None => return ExprNode::Invalid("too many closing parentheses"),
                }
            },
            ParsedToken::Op(op) => {
                loop {
                    let top_outranks = match ops.last() {
                        Some(StackedOp::Op(top)) => {
                            if op.is_right_associative() {
                                top.prio() > op.prio()
                            } else {
                                top.prio() >= op.prio()
                            }
                        }
                        _ => false,
                    };
                    if !top_outranks {
                        break;
                    }
                    if let Some(StackedOp::Op(top)) = ops.pop() {
                        reduce(&mut nodes, top);
                    }
                }
                ops.push(StackedOp::Op(*op));
            }
        }
    }

    while let Some(stacked) = ops.pop() {
        match stacked {
            StackedOp::Op(top) => reduce(&mut nodes, top),
            StackedOp::ParenOpen => return ExprNode::Invalid("parentheses mismatch"),
        }
    }

    match (nodes.pop(), nodes.is_empty()) {
        (Some(root), true) => root,
        (Some(_), false) => ExprNode::Invalid("leftover operands"),
        (None, _) => ExprNode::Invalid("empty expression"),
    }
}

#[cfg(test)]
use crate::operators::make_default_operators;
#[cfg(test)]
use crate::parser::tokenize;

#[test]
fn test_precedence_tree() {
    let ops = make_default_operators::<f64>();
    let root = parse(&tokenize("1+2*3", &ops));
    match root {
        ExprNode::Binary {
            repr: "+",
            left,
            right,
            ..
        } => {
            assert_eq!(*left, ExprNode::Leaf(1.0));
            match *right {
                ExprNode::Binary {
                    repr: "*",
                    left,
                    right,
                    ..
                } => {
                    assert_eq!(*left, ExprNode::Leaf(2.0));
                    assert_eq!(*right, ExprNode::Leaf(3.0));
                }
                _ => panic!("2*3 should be the right subtree"),
            }
        }
        _ => panic!("+ should be the root"),
    }
    // parentheses force the other shape
    let root = parse(&tokenize("(1+2)*3", &ops));
    match root {
        ExprNode::Binary { repr: "*", .. } => (),
        _ => panic!("* should be the root"),
    }
}

#[test]
fn test_binary_operators_reduce_left_to_right() {
    let ops = make_default_operators::<f64>();
    assert_eq!(
        parse(&tokenize("10-4-3", &ops)),
        parse(&tokenize("(10-4)-3", &ops))
    );
    assert_eq!(
        parse(&tokenize("8/4/2", &ops)),
        parse(&tokenize("(8/4)/2", &ops))
    );
    assert_eq!(
        parse(&tokenize("2^3^2", &ops)),
        parse(&tokenize("(2^3)^2", &ops))
    );
}

#[test]
fn test_unary_operators_stack_rightmost_first() {
    let ops = make_default_operators::<f64>();
    let root = parse(&tokenize("---1", &ops));
    let mut depth = 0;
    let mut cur = &root;
    while let ExprNode::Unary { repr: "-", operand, .. } = cur {
        depth += 1;
        cur = operand.as_ref();
    }
    assert_eq!(depth, 3);
    assert_eq!(*cur, ExprNode::Leaf(1.0));
    // unary binds tighter than any binary operator
    assert_eq!(
        parse(&tokenize("-2^2", &ops)),
        parse(&tokenize("(-2)^2", &ops))
    );
}

#[test]
fn test_structural_failures() {
    let ops = make_default_operators::<f64>();
    let test = |text: &str, reason: &'static str| {
        println!("parsing {}...", text);
        assert_eq!(parse(&tokenize(text, &ops)), ExprNode::Invalid(reason));
    };
    test("", "empty expression");
    test("()", "empty expression");
    test("1+2)", "too many closing parentheses");
    test(")(", "too many closing parentheses");
    test("(1+2", "parentheses mismatch");
    test("((2)", "parentheses mismatch");
    test("1 2", "leftover operands");
    test("(1)(2)", "leftover operands");
}

#[test]
fn test_missing_operands_yield_invalid_nodes() {
    let ops = make_default_operators::<f64>();
    assert_eq!(
        parse(&tokenize("1+", &ops)),
        ExprNode::Invalid("binary operator without two operands")
    );
    // the invalid node is an ordinary operand for the surrounding expression
    let root = parse(&tokenize("(1+)*2", &ops));
    match root {
        ExprNode::Binary { repr: "*", left, .. } => {
            assert_eq!(*left, ExprNode::Invalid("binary operator without two operands"));
        }
        _ => panic!("* should be the root"),
    }
}

#[test]
fn test_eval_failure_propagation() {
    let ops = make_default_operators::<f64>();
    let eval = |text: &str| parse(&tokenize(text, &ops)).eval();
    assert_eq!(eval("1/0"), Err(CalcError::DivisionByZero));
    assert_eq!(eval("1/(2-2)"), Err(CalcError::DivisionByZero));
    assert_eq!(eval("(1/0)+(2*a)"), Err(CalcError::DivisionByZero));
    assert_eq!(eval("(2*a)+(1/0)"), Err(CalcError::InvalidExpression));
    assert_eq!(eval("-(1/0)"), Err(CalcError::DivisionByZero));
    assert_eq!(eval("2*a"), Err(CalcError::InvalidExpression));
}
