use crate::operators::{BinOp, Operator, UNARY_PRIO};
use lazy_static::lazy_static;
use num::Float;
use regex::Regex;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

/// Operator occurrence with the arity already resolved by the tokenizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpToken<'a, T: Copy> {
    Unary { repr: &'a str, apply: fn(T) -> T },
    Binary { repr: &'a str, op: BinOp<T> },
}

impl<'a, T: Copy> OpToken<'a, T> {
    pub fn repr(&self) -> &'a str {
        match self {
            OpToken::Unary { repr, .. } => repr,
            OpToken::Binary { repr, .. } => repr,
        }
    }

    pub fn prio(&self) -> i32 {
        match self {
            OpToken::Unary { .. } => UNARY_PRIO,
            OpToken::Binary { op, .. } => op.prio,
        }
    }

    /// Unary operators stack rightmost-applied-first, binary operators of
    /// equal priority are reduced left to right.
    pub fn is_right_associative(&self) -> bool {
        matches!(self, OpToken::Unary { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParsedToken<'a, T: Copy> {
    Num(T),
    Op(OpToken<'a, T>),
    Paren(Paren),
    /// Placeholder for anything the tokenizer cannot make sense of. It is
    /// kept in the token sequence and consumed by the parser as a failure.
    Invalid,
}

/// Converts a text into a vector of tokens in a single left-to-right pass.
///
/// Tokenization is total. Characters outside of the supported set and
/// numerals that do not parse as a finite number become
/// [`ParsedToken::Invalid`](ParsedToken::Invalid) instead of errors.
/// Whitespace separates tokens and is never emitted.
///
/// # Arguments
///
/// * `text` - text to be tokenized
/// * `ops` - slice of operators to look up symbols in
///
pub fn tokenize<'a, T>(text: &'a str, ops: &[Operator<'a, T>]) -> Vec<ParsedToken<'a, T>>
where
    T: Copy + Float + FromStr,
{
    lazy_static! {
        static ref RE_NUMERAL: Regex = Regex::new(r"^[0-9.]+").unwrap();
    }

    let mut tokens = Vec::new();
    let mut cur_offset = 0usize;
    while let Some(c) = text[cur_offset..].chars().next() {
        let text_rest = &text[cur_offset..];
        if c.is_whitespace() {
            cur_offset += c.len_utf8();
            continue;
        }
        let next_token = if c == '(' {
            cur_offset += 1;
            ParsedToken::Paren(Paren::Open)
        } else if c == ')' {
            cur_offset += 1;
            ParsedToken::Paren(Paren::Close)
        } else if let Some(numeral) = RE_NUMERAL.find(text_rest) {
            cur_offset += numeral.end();
            match numeral.as_str().parse::<T>() {
                Ok(x) if x.is_finite() => ParsedToken::Num(x),
                _ => ParsedToken::Invalid,
            }
        } else if let Some(op) = ops.iter().find(|op| text_rest.starts_with(op.repr)) {
            cur_offset += op.repr.len();
            resolve_arity(op, tokens.last())
        } else {
            cur_offset += c.len_utf8();
            ParsedToken::Invalid
        };
        tokens.push(next_token);
    }
    tokens
}

/// Decides whether an operator occurrence is unary or binary. It is unary iff
/// it is the first token or the previous token is an operator of either arity
/// or an opening parenthesis. A closing parenthesis ends a grouped value, so
/// `)` followed by `-` means subtraction.
fn resolve_arity<'a, T: Copy>(
    op: &Operator<'a, T>,
    prev: Option<&ParsedToken<'a, T>>,
) -> ParsedToken<'a, T> {
    let unary_position = matches!(
        prev,
        None | Some(ParsedToken::Op(_)) | Some(ParsedToken::Paren(Paren::Open))
    );
    if unary_position {
        match op.unary_op {
            Some(apply) => ParsedToken::Op(OpToken::Unary { repr: op.repr, apply }),
            None => ParsedToken::Invalid,
        }
    } else {
        match op.bin_op {
            Some(bin_op) => ParsedToken::Op(OpToken::Binary {
                repr: op.repr,
                op: bin_op,
            }),
            None => ParsedToken::Invalid,
        }
    }
}

#[cfg(test)]
use crate::operators::make_default_operators;

#[cfg(test)]
fn arities(tokens: &[ParsedToken<f64>]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            ParsedToken::Num(_) => 'n',
            ParsedToken::Op(OpToken::Unary { .. }) => 'u',
            ParsedToken::Op(OpToken::Binary { .. }) => 'b',
            ParsedToken::Paren(Paren::Open) => '(',
            ParsedToken::Paren(Paren::Close) => ')',
            ParsedToken::Invalid => '!',
        })
        .collect()
}

#[test]
fn test_numerals() {
    let ops = make_default_operators::<f64>();
    let plus = ops.iter().find(|op| op.repr == "+").unwrap().bin_op.unwrap();
    assert_eq!(
        tokenize("12.5+.5", &ops),
        vec![
            ParsedToken::Num(12.5),
            ParsedToken::Op(OpToken::Binary {
                repr: "+",
                op: plus
            }),
            ParsedToken::Num(0.5)
        ]
    );
    assert_eq!(tokenize("4.", &ops), vec![ParsedToken::Num(4.0)]);
    assert_eq!(tokenize("1.2.3", &ops), vec![ParsedToken::Invalid]);
    assert_eq!(tokenize(".", &ops), vec![ParsedToken::Invalid]);
    assert!(tokenize("", &ops).is_empty());
    // numerals overflowing f64 are not finite numbers
    let huge = "9".repeat(400);
    assert_eq!(tokenize(&huge, &ops), vec![ParsedToken::Invalid]);
}

#[test]
fn test_arity_resolution() {
    let ops = make_default_operators::<f64>();
    let test = |text: &str, reference: &str| {
        println!("tokenizing {}...", text);
        assert_eq!(arities(&tokenize(text, &ops)), reference);
    };
    test("-1", "un");
    test("--1-2-3--4", "uunbnbnbun");
    test("++++1++2+3+++++++++4", "uuuunbunbnbuuuuuuuun");
    test("2*-3", "nbun");
    test("(-1)", "(un)");
    test("(1)-2", "(n)bn");
    test("(1+2)-(3)", "(nbn)b(n)");
    // no unary meaning of * and /
    test("*1", "!n");
    test("(/2)", "(!n)");
    test("2^-2", "nbun");
    test("^2", "!n");
}

#[test]
fn test_invalid_characters() {
    let ops = make_default_operators::<f64>();
    assert_eq!(arities(&tokenize("2*a", &ops)), "nb!");
    assert_eq!(arities(&tokenize("2*ä+1", &ops)), "nb!bn");
    assert_eq!(arities(&tokenize("{x}", &ops)), "!!!");
}

#[test]
fn test_whitespace_is_a_separator() {
    let ops = make_default_operators::<f64>();
    assert_eq!(tokenize(" \t1 +\n2 ", &ops), tokenize("1+2", &ops));
    assert_eq!(arities(&tokenize("1 2", &ops)), "nn");
    assert_eq!(arities(&tokenize("1 . 2", &ops)), "n!n");
}
