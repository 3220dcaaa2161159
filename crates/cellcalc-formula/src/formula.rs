//! The compiled formula type

use crate::error::{EvaluationError, FormatError};
use crate::evaluator;
use crate::lookup::Lookup;
use crate::token::{tokenize, Token};
use crate::validator::validate;
use ahash::AHashSet;
use std::fmt;
use std::str::FromStr;

/// A syntactically valid infix formula
///
/// Built only through validation, so every `Formula` is non-empty, has
/// balanced parentheses, starts with an operand or '(', ends with an
/// operand or ')', and has no invalid token adjacencies. It is never
/// mutated after construction and can be evaluated any number of times.
///
/// # Example
/// ```rust
/// use cellcalc_formula::{Formula, NoVariables};
///
/// let formula = Formula::new("(5 * 2) + 8").unwrap();
/// assert_eq!(formula.evaluate(&NoVariables).unwrap(), 18.0);
/// assert_eq!(formula.to_string(), "(5*2)+8");
///
/// assert!(Formula::new("2 5 + 3").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    /// Parse and validate formula text
    pub fn new(formula: &str) -> Result<Self, FormatError> {
        let lexemes: Vec<_> = tokenize(formula).collect();
        match validate(&lexemes) {
            Ok(tokens) => {
                tracing::debug!(formula, tokens = tokens.len(), "parsed formula");
                Ok(Self { tokens })
            }
            Err(err) => {
                tracing::debug!(formula, error = %err, "rejected formula");
                Err(err)
            }
        }
    }

    /// The validated tokens, in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Distinct variable names, in order of first appearance
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(name.as_str()),
                _ => None,
            })
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Evaluate the formula, resolving variables through `lookup`
    pub fn evaluate<L>(&self, lookup: &L) -> Result<f64, EvaluationError>
    where
        L: Lookup + ?Sized,
    {
        evaluator::evaluate(self, lookup)
    }
}

/// Normalized text: tokens without whitespace
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::new(s)
    }
}

impl TryFrom<&str> for Formula {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Formula::new(value)
    }
}

/// Absent input is treated like empty input
impl TryFrom<Option<&str>> for Formula {
    type Error = FormatError;

    fn try_from(value: Option<&str>) -> Result<Self, Self::Error> {
        match value {
            Some(text) => Formula::new(text),
            None => Err(FormatError::Empty),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Formula {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Formula {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Formula::new(&text).map_err(serde::de::Error::custom)
    }
}
