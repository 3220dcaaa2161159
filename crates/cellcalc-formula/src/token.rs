//! Formula tokens and the tokenizer
//!
//! The tokenizer only classifies text; it never fails. Runs of characters
//! that match no token pattern are yielded as [`Lexeme::Invalid`] and
//! rejected later by the validator.

use crate::error::EvaluationError;
use lazy_regex::{regex, Lazy, Regex};
use std::fmt;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Operator for a symbol character, if it is one of `+ - * /`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The operator's symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// `*` and `/`, which bind tighter than `+` and `-`
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }

    /// Apply the operator with `left` as the left operand
    ///
    /// Division by exactly zero is an error rather than an infinity.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, EvaluationError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A validated formula token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Non-negative numeric literal
    Number(f64),
    /// Variable name: a letter followed by letters and/or digits
    Variable(String),
    /// Binary operator
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Number, variable or ')', i.e. a token that ends an operand
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::RightParen
        )
    }

    /// Number, variable or '(', i.e. a token that starts an operand
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::LeftParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals such as 1e400 overflow to infinity; keep them re-parseable
            Token::Number(n) if n.is_infinite() => f.write_str("1e999"),
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// A classified slice of formula text, as produced by [`tokenize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme<'a> {
    LeftParen,
    RightParen,
    Operator(Operator),
    Variable(&'a str),
    Number(&'a str),
    /// Text matching no token pattern
    Invalid(&'a str),
}

impl<'a> Lexeme<'a> {
    /// The source text of this lexeme
    pub fn text(&self) -> &'a str {
        match self {
            Lexeme::LeftParen => "(",
            Lexeme::RightParen => ")",
            Lexeme::Operator(op) => op.symbol(),
            Lexeme::Variable(s) | Lexeme::Number(s) | Lexeme::Invalid(s) => s,
        }
    }
}

impl fmt::Display for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Token patterns in priority order. Alternation is leftmost-first, so
/// earlier alternatives win at the same position.
fn token_pattern() -> &'static Lazy<Regex> {
    regex!(
        r"(?x)
        \( | \) | [-+*/]
        | [a-zA-Z][a-zA-Z0-9]*
        | (?: [0-9]+\.[0-9]* | \.[0-9]+ | [0-9]+ ) (?: e[-+]?[0-9]+ )?
        | \s+
        "
    )
}

/// Split formula text into lexemes, discarding whitespace
///
/// The returned iterator is lazy and `Clone`, so a scan can be restarted
/// from any point.
///
/// # Example
/// ```rust
/// use cellcalc_formula::token::{tokenize, Lexeme, Operator};
///
/// let lexemes: Vec<_> = tokenize("x1 + 2").collect();
/// assert_eq!(
///     lexemes,
///     vec![
///         Lexeme::Variable("x1"),
///         Lexeme::Operator(Operator::Add),
///         Lexeme::Number("2"),
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens { input, pos: 0 }
}

/// Iterator over the lexemes of a formula string
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }

            let start = self.pos;
            let m = match token_pattern().find_at(self.input, start) {
                Some(m) => m,
                None => {
                    self.pos = self.input.len();
                    return Some(Lexeme::Invalid(&self.input[start..]));
                }
            };

            // Unmatched text before the next token
            if m.start() > start {
                self.pos = m.start();
                return Some(Lexeme::Invalid(&self.input[start..m.start()]));
            }

            self.pos = m.end();
            if let Some(lexeme) = classify(m.as_str()) {
                return Some(lexeme);
            }
        }
    }
}

/// Classify text matched by the token pattern; `None` for whitespace
fn classify(text: &str) -> Option<Lexeme<'_>> {
    let c = text.chars().next()?;
    if c.is_whitespace() {
        return None;
    }

    let lexeme = match c {
        '(' => Lexeme::LeftParen,
        ')' => Lexeme::RightParen,
        _ => {
            if let Some(op) = Operator::from_char(c) {
                Lexeme::Operator(op)
            } else if c.is_ascii_alphabetic() {
                Lexeme::Variable(text)
            } else {
                Lexeme::Number(text)
            }
        }
    };
    Some(lexeme)
}
