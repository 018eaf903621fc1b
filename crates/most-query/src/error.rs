// File: src/error.rs
// Purpose: Errors raised while compiling query expressions

use thiserror::Error;

use crate::expression::ExpressionKind;
use crate::operator::Operator;

/// Errors produced by [`Expression::compile`](crate::Expression::compile).
///
/// These are programmer/input errors: an expression tree that cannot be
/// expressed as a filter document. Nothing here is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A required operand (the left side of an arithmetic or comparison) is absent
    #[error("expected left operand for {0} expression")]
    MissingOperand(ExpressionKind),

    /// The operator does not belong to the set allowed for this expression kind
    #[error("invalid {kind} operator: {operator}")]
    InvalidOperator {
        kind: ExpressionKind,
        operator: Operator,
    },

    /// Operator text that names no known operator
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// Logical expression without arguments
    #[error("logical expression arguments cannot be empty")]
    EmptyArguments,

    /// Method call without arguments
    #[error("unsupported method expression: method arguments cannot be empty")]
    EmptyMethodArguments,

    /// Method call whose first argument is not a field reference
    #[error("unsupported method expression: first argument must be a member expression, found {0}")]
    MethodSubjectNotMember(ExpressionKind),

    /// Comparison whose left side cannot carry a comparison
    #[error("unsupported comparison: left operand cannot be a {0} expression")]
    UnsupportedComparisonLeft(ExpressionKind),

    /// Left side of an arithmetic expression did not compile to a field name
    #[error("arithmetic left operand must compile to a field name, got {0}")]
    InvalidFieldName(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
