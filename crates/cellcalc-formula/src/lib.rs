//! # cellcalc-formula
//!
//! Infix arithmetic formulas for the cellcalc spreadsheet engine.
//!
//! This crate provides:
//! - Tokenizing formula text (numbers, variables, `+ - * /`, parentheses)
//! - Syntax validation into an immutable [`Formula`]
//! - Two-stack evaluation with caller-supplied variable [`Lookup`]
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_formula::{Formula, Variables};
//!
//! let formula = Formula::new("x * (y + 1)")?;
//! let vars = Variables::new().with("x", 2.0).with("y", 3.0);
//! assert_eq!(formula.evaluate(&vars)?, 8.0);
//! # Ok::<(), cellcalc_formula::FormulaError>(())
//! ```

pub mod error;
pub mod evaluator;
pub mod formula;
pub mod lookup;
pub mod token;
pub mod validator;

pub use error::{EvaluationError, FormatError, FormulaError, FormulaResult, UndefinedVariable};
pub use evaluator::evaluate;
pub use formula::Formula;
pub use lookup::{Lookup, NoVariables, Variables};
pub use token::{Operator, Token};

/// Parse and evaluate formula text in one step
///
/// # Example
/// ```rust
/// use cellcalc_formula::{calculate, NoVariables};
///
/// assert_eq!(calculate("8-3-2", &NoVariables).unwrap(), 3.0);
/// assert!(calculate("5/0", &NoVariables).is_err());
/// ```
pub fn calculate<L>(formula: &str, lookup: &L) -> FormulaResult<f64>
where
    L: Lookup + ?Sized,
{
    let formula = Formula::new(formula)?;
    Ok(formula.evaluate(lookup)?)
}
