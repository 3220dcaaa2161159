//! Formula syntax validation
//!
//! Turns the tokenizer's lexemes into [`Token`]s, checking the grammar:
//!
//! - at least one token
//! - first token is a number, variable or '('; last is a number, variable or ')'
//! - every lexeme is a recognized token
//! - after a number, variable or ')' comes an operator or ')';
//!   after an operator or '(' comes a number, variable or '('
//! - parentheses never close more than have been opened, and balance at the end

use crate::error::FormatError;
use crate::token::{Lexeme, Token};

/// Validate a lexeme sequence, returning the equivalent tokens
///
/// The whole sequence is checked; the first violation found is reported.
pub fn validate(lexemes: &[Lexeme<'_>]) -> Result<Vec<Token>, FormatError> {
    let (first, last) = match (lexemes.first(), lexemes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(FormatError::Empty),
    };

    if !matches!(
        first,
        Lexeme::Number(_) | Lexeme::Variable(_) | Lexeme::LeftParen
    ) {
        return Err(FormatError::InvalidFirstToken {
            token: first.text().to_string(),
        });
    }
    if !matches!(
        last,
        Lexeme::Number(_) | Lexeme::Variable(_) | Lexeme::RightParen
    ) {
        return Err(FormatError::InvalidLastToken {
            token: last.text().to_string(),
        });
    }

    let mut tokens: Vec<Token> = Vec::with_capacity(lexemes.len());
    let mut open = 0usize;
    let mut close = 0usize;

    for (position, lexeme) in lexemes.iter().enumerate() {
        let token = to_token(lexeme, position)?;

        if let Some(previous) = tokens.last() {
            check_sequence(previous, &token, position)?;
        }

        match token {
            Token::LeftParen => open += 1,
            Token::RightParen => {
                close += 1;
                if close > open {
                    return Err(FormatError::MissingLeftParenthesis { position });
                }
            }
            _ => {}
        }

        tokens.push(token);
    }

    if open != close {
        return Err(FormatError::UnbalancedParentheses { open, close });
    }

    Ok(tokens)
}

/// Convert one lexeme, rejecting unrecognized text
fn to_token(lexeme: &Lexeme<'_>, position: usize) -> Result<Token, FormatError> {
    let token = match *lexeme {
        Lexeme::LeftParen => Token::LeftParen,
        Lexeme::RightParen => Token::RightParen,
        Lexeme::Operator(op) => Token::Operator(op),
        Lexeme::Variable(name) => Token::Variable(name.to_string()),
        Lexeme::Number(literal) => {
            let value = literal
                .parse::<f64>()
                .map_err(|_| FormatError::InvalidNumber {
                    literal: literal.to_string(),
                })?;
            Token::Number(value)
        }
        Lexeme::Invalid(text) => {
            return Err(FormatError::InvalidCharacter {
                token: text.to_string(),
                position,
            })
        }
    };
    Ok(token)
}

/// Check that `current` may directly follow `previous`
fn check_sequence(previous: &Token, current: &Token, position: usize) -> Result<(), FormatError> {
    let allowed = if previous.ends_operand() {
        matches!(current, Token::Operator(_) | Token::RightParen)
    } else {
        current.starts_operand()
    };

    if allowed {
        Ok(())
    } else {
        Err(FormatError::InvalidSequence {
            previous: previous.to_string(),
            current: current.to_string(),
            position,
        })
    }
}
