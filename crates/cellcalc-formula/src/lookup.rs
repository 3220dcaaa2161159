//! Variable resolution for formula evaluation

use crate::error::UndefinedVariable;
use ahash::AHashMap;

/// Maps variable names to values during evaluation
///
/// Supplied per evaluation call, so one [`Formula`](crate::Formula) can be
/// evaluated against different bindings. Implemented for closures:
///
/// ```rust
/// use cellcalc_formula::{Formula, UndefinedVariable};
///
/// let formula: Formula = "x * 2".parse().unwrap();
/// let lookup = |name: &str| match name {
///     "x" => Ok(21.0),
///     _ => Err(UndefinedVariable::new(name)),
/// };
/// assert_eq!(formula.evaluate(&lookup).unwrap(), 42.0);
/// ```
pub trait Lookup {
    /// Resolve a variable, or fail with [`UndefinedVariable`]
    fn lookup(&self, name: &str) -> Result<f64, UndefinedVariable>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Result<f64, UndefinedVariable>,
{
    fn lookup(&self, name: &str) -> Result<f64, UndefinedVariable> {
        self(name)
    }
}

/// A lookup that resolves no variables
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl Lookup for NoVariables {
    fn lookup(&self, name: &str) -> Result<f64, UndefinedVariable> {
        Err(UndefinedVariable::new(name))
    }
}

/// A table of variable bindings
///
/// Names are matched exactly (case-sensitive).
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: AHashMap<String, f64>,
}

impl Variables {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding
    pub fn with<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Bind a variable, returning its previous value
    pub fn set<S: Into<String>>(&mut self, name: S, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Get a variable's value
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Remove a binding, returning its value
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variables are bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Lookup for Variables {
    fn lookup(&self, name: &str) -> Result<f64, UndefinedVariable> {
        self.get(name).ok_or_else(|| UndefinedVariable::new(name))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Variables {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        vars.extend(iter);
        vars
    }
}

impl<S: Into<String>> Extend<(S, f64)> for Variables {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variables() {
        let mut vars = Variables::new().with("x", 2.0).with("y", 3.0);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.lookup("x"), Ok(2.0));
        assert_eq!(vars.lookup("X"), Err(UndefinedVariable::new("X")));

        assert_eq!(vars.set("x", 5.0), Some(2.0));
        assert_eq!(vars.get("x"), Some(5.0));
        assert_eq!(vars.remove("y"), Some(3.0));
        assert_eq!(vars.lookup("y"), Err(UndefinedVariable::new("y")));
    }

    #[test]
    fn test_variables_from_iter() {
        let vars: Variables = [("a1", 1.0), ("b2", 2.0)].into_iter().collect();
        assert_eq!(vars.get("b2"), Some(2.0));
        assert!(!vars.is_empty());
        assert!(Variables::new().is_empty());
    }

    #[test]
    fn test_no_variables() {
        assert_eq!(NoVariables.lookup("x"), Err(UndefinedVariable::new("x")));
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |name: &str| {
            if name.len() == 1 {
                Ok(1.0)
            } else {
                Err(UndefinedVariable::new(name))
            }
        };
        assert_eq!(lookup.lookup("a"), Ok(1.0));
        assert_eq!(lookup.lookup("ab").unwrap_err().name(), "ab");
    }
}
