// File: src/operator.rs
// Purpose: Query operators and the per-kind sets they belong to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Operator symbol of an arithmetic, comparison or logical expression
///
/// Each variant renders as its `$`-prefixed document key (`Add` → `"$add"`).
/// Which variants an expression accepts is checked when it compiles.
///
/// # Examples
///
/// ```
/// use most_query::Operator;
///
/// let op: Operator = "$gte".parse().unwrap();
/// assert_eq!(op, Operator::Gte);
/// assert!(op.is_comparison());
/// assert_eq!(op.as_str(), "$gte");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Nin,
    // Logical
    And,
    Or,
    Not,
    Nor,
}

impl Operator {
    /// Document key for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "$add",
            Operator::Sub => "$sub",
            Operator::Mul => "$mul",
            Operator::Div => "$div",
            Operator::Mod => "$mod",
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::And => "$and",
            Operator::Or => "$or",
            Operator::Not => "$not",
            Operator::Nor => "$nor",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Mod
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Ne
                | Operator::Lt
                | Operator::Lte
                | Operator::Gt
                | Operator::Gte
                | Operator::In
                | Operator::Nin
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            Operator::And | Operator::Or | Operator::Not | Operator::Nor
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    /// Parses the `$`-prefixed form; the prefix is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('$').unwrap_or(s);
        let op = match name {
            "add" => Operator::Add,
            "sub" => Operator::Sub,
            "mul" => Operator::Mul,
            "div" => Operator::Div,
            "mod" => Operator::Mod,
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "in" => Operator::In,
            "nin" => Operator::Nin,
            "and" => Operator::And,
            "or" => Operator::Or,
            "not" => Operator::Not,
            "nor" => Operator::Nor,
            _ => return Err(QueryError::UnknownOperator(s.to_string())),
        };
        Ok(op)
    }
}

impl TryFrom<String> for Operator {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_prefix() {
        assert_eq!("$add".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!("nin".parse::<Operator>().unwrap(), Operator::Nin);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "$like".parse::<Operator>(),
            Err(QueryError::UnknownOperator("$like".to_string()))
        );
    }

    #[test]
    fn test_operator_sets_are_disjoint() {
        let all = [
            Operator::Add,
            Operator::Sub,
            Operator::Mul,
            Operator::Div,
            Operator::Mod,
            Operator::Eq,
            Operator::Ne,
            Operator::Lt,
            Operator::Lte,
            Operator::Gt,
            Operator::Gte,
            Operator::In,
            Operator::Nin,
            Operator::And,
            Operator::Or,
            Operator::Not,
            Operator::Nor,
        ];
        for op in all {
            let memberships = [op.is_arithmetic(), op.is_comparison(), op.is_logical()]
                .iter()
                .filter(|m| **m)
                .count();
            assert_eq!(memberships, 1, "{op} belongs to exactly one set");
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_serde_uses_document_key() {
        let json = serde_json::to_string(&Operator::Lte).unwrap();
        assert_eq!(json, "\"$lte\"");
        let op: Operator = serde_json::from_str("\"$or\"").unwrap();
        assert_eq!(op, Operator::Or);
    }
}
