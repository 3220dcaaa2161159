//! Formula evaluator
//!
//! A single left-to-right pass over the validated tokens using an operand
//! stack and an operator stack. `*` and `/` are reduced as soon as their
//! right operand is known; `+` and `-` are deferred until the next `+`/`-`,
//! a closing parenthesis, or the end of the formula.

use crate::error::EvaluationError;
use crate::formula::Formula;
use crate::lookup::Lookup;
use crate::token::{Operator, Token};

/// Entries of the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Operator(Operator),
    LeftParen,
}

/// Evaluate a formula, resolving variables through `lookup`
///
/// # Example
/// ```rust
/// use cellcalc_formula::{evaluate, Formula, Variables};
///
/// let formula = Formula::new("x*y-2+35/9").unwrap();
/// let vars = Variables::new().with("x", 2.0).with("y", 3.0);
/// let value = evaluate(&formula, &vars).unwrap();
/// assert!((value - (2.0 * 3.0 - 2.0 + 35.0 / 9.0)).abs() < 1e-9);
/// ```
pub fn evaluate<L>(formula: &Formula, lookup: &L) -> Result<f64, EvaluationError>
where
    L: Lookup + ?Sized,
{
    let result = Evaluation::default().run(formula.tokens(), lookup);
    match &result {
        Ok(value) => tracing::trace!(formula = %formula, value, "evaluated formula"),
        Err(err) => tracing::trace!(formula = %formula, error = %err, "formula evaluation failed"),
    }
    result
}

/// Stacks for one evaluation call
#[derive(Debug, Default)]
struct Evaluation {
    operands: Vec<f64>,
    operators: Vec<Pending>,
}

impl Evaluation {
    fn run<L>(mut self, tokens: &[Token], lookup: &L) -> Result<f64, EvaluationError>
    where
        L: Lookup + ?Sized,
    {
        for token in tokens {
            match token {
                Token::Number(value) => self.push_operand(*value)?,
                Token::Variable(name) => {
                    let value = lookup.lookup(name)?;
                    self.push_operand(value)?;
                }
                Token::Operator(op) if op.is_multiplicative() => {
                    self.operators.push(Pending::Operator(*op));
                }
                Token::Operator(op) => {
                    self.reduce_additive()?;
                    self.operators.push(Pending::Operator(*op));
                }
                Token::LeftParen => self.operators.push(Pending::LeftParen),
                Token::RightParen => {
                    self.reduce_additive()?;
                    if self.operators.pop() != Some(Pending::LeftParen) {
                        return Err(EvaluationError::Malformed("unmatched ')'"));
                    }
                    self.reduce_multiplicative()?;
                }
            }
        }

        self.finish()
    }

    /// Push a resolved operand, first applying a pending `*` or `/`
    fn push_operand(&mut self, value: f64) -> Result<(), EvaluationError> {
        if let Some(op) = self.pop_operator_if(Operator::is_multiplicative) {
            let left = self.pop_operand()?;
            self.operands.push(op.apply(left, value)?);
        } else {
            self.operands.push(value);
        }
        Ok(())
    }

    /// Apply a pending `+` or `-` on top of the operator stack
    fn reduce_additive(&mut self) -> Result<(), EvaluationError> {
        match self.pop_operator_if(|op| !op.is_multiplicative()) {
            Some(op) => self.apply_top(op),
            None => Ok(()),
        }
    }

    /// Apply a pending `*` or `/` on top of the operator stack
    fn reduce_multiplicative(&mut self) -> Result<(), EvaluationError> {
        match self.pop_operator_if(Operator::is_multiplicative) {
            Some(op) => self.apply_top(op),
            None => Ok(()),
        }
    }

    /// Replace the top two operands with `op` applied to them
    fn apply_top(&mut self, op: Operator) -> Result<(), EvaluationError> {
        let right = self.pop_operand()?;
        let left = self.pop_operand()?;
        self.operands.push(op.apply(left, right)?);
        Ok(())
    }

    fn pop_operator_if(&mut self, pred: impl Fn(Operator) -> bool) -> Option<Operator> {
        match self.operators.last() {
            Some(Pending::Operator(op)) if pred(*op) => {
                let op = *op;
                self.operators.pop();
                Some(op)
            }
            _ => None,
        }
    }

    fn pop_operand(&mut self) -> Result<f64, EvaluationError> {
        self.operands
            .pop()
            .ok_or(EvaluationError::Malformed("missing operand"))
    }

    /// Apply the last pending operator, if any, and return the result
    fn finish(mut self) -> Result<f64, EvaluationError> {
        match self.operators.pop() {
            None => {}
            Some(Pending::Operator(op)) => self.apply_top(op)?,
            Some(Pending::LeftParen) => return Err(EvaluationError::Malformed("unclosed '('")),
        }

        match (self.operands.pop(), self.operators.is_empty() && self.operands.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(EvaluationError::Malformed("operands left over")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UndefinedVariable;
    use crate::lookup::{NoVariables, Variables};
    use pretty_assertions::assert_eq;

    fn eval(formula: &str) -> Result<f64, EvaluationError> {
        let formula = Formula::new(formula).unwrap();
        evaluate(&formula, &NoVariables)
    }

    #[test]
    fn test_evaluate_number() {
        assert_eq!(eval("42"), Ok(42.0));
        assert_eq!(eval("2.5e9"), Ok(2.5e9));
        assert_eq!(eval("(((7)))"), Ok(7.0));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2"), Ok(3.0));
        assert_eq!(eval("1+2*3"), Ok(7.0));
        assert_eq!(eval("2*3+4"), Ok(10.0));
        assert_eq!(eval("(5 * 2) + 8"), Ok(18.0));
        assert_eq!(eval("2*(3+4)"), Ok(14.0));
        assert_eq!(eval("(1+2)*(3+4)"), Ok(21.0));
        assert_eq!(eval("12/(2+4)/2"), Ok(1.0));
    }

    #[test]
    fn test_evaluate_left_to_right() {
        assert_eq!(eval("8-3-2"), Ok(3.0));
        assert_eq!(eval("8-3+2"), Ok(7.0));
        assert_eq!(eval("16/4/2"), Ok(2.0));
        assert_eq!(eval("16/4*2"), Ok(8.0));
        assert_eq!(eval("10-2*3-1"), Ok(3.0));
        assert_eq!(eval("1-(2-3)"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_variables() {
        let formula = Formula::new("x*y-2+35/9").unwrap();
        let vars = Variables::new().with("x", 2.0).with("y", 3.0);
        let value = evaluate(&formula, &vars).unwrap();
        assert!((value - (2.0 * 3.0 - 2.0 + 35.0 / 9.0)).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(eval("5/0"), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("5/(2-2)"), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("0/5"), Ok(0.0));

        let formula = Formula::new("1/z").unwrap();
        let vars = Variables::new().with("z", 0.0);
        assert_eq!(
            evaluate(&formula, &vars),
            Err(EvaluationError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluate_undefined_variable() {
        assert_eq!(
            eval("5+x"),
            Err(EvaluationError::UndefinedVariable("x".into()))
        );

        // The first unresolved variable stops evaluation
        let seen = std::cell::RefCell::new(Vec::new());
        let lookup = |name: &str| {
            seen.borrow_mut().push(name.to_string());
            Err::<f64, _>(UndefinedVariable::new(name))
        };
        let formula = Formula::new("a + b").unwrap();
        assert_eq!(
            evaluate(&formula, &lookup),
            Err(EvaluationError::UndefinedVariable("a".into()))
        );
        assert_eq!(*seen.borrow(), vec!["a".to_string()]);
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let formula = Formula::new("a/b + (c - 1) * 3").unwrap();
        let vars = Variables::new().with("a", 7.0).with("b", 2.0).with("c", 4.0);
        let first = evaluate(&formula, &vars).unwrap();
        let second = evaluate(&formula, &vars).unwrap();
        assert_eq!(first, 12.5);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
