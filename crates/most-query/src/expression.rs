// File: src/expression.rs
// Purpose: Query expression tree and its compilation into filter documents

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{QueryError, Result};
use crate::operator::Operator;

/// Kind tag of an [`Expression`], used in error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Literal,
    Member,
    Arithmetic,
    Logical,
    Comparison,
    MethodCall,
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpressionKind::Literal => "literal",
            ExpressionKind::Member => "member",
            ExpressionKind::Arithmetic => "arithmetic",
            ExpressionKind::Logical => "logical",
            ExpressionKind::Comparison => "comparison",
            ExpressionKind::MethodCall => "method call",
        };
        f.write_str(name)
    }
}

/// A node of a query predicate
///
/// A parent exclusively owns its operands. Compiling walks the tree and
/// produces a plain nested JSON document in MongoDB-like filter syntax.
///
/// # Examples
///
/// ```
/// use most_query::{Expression, Operator};
/// use serde_json::json;
///
/// let expr = Expression::comparison(
///     Expression::member("price"),
///     Operator::Gt,
///     Expression::literal(500),
/// );
/// assert_eq!(expr.compile().unwrap(), json!({ "price": { "$gt": 500 } }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralExpression),
    Member(MemberExpression),
    Arithmetic(ArithmeticExpression),
    Logical(LogicalExpression),
    Comparison(ComparisonExpression),
    MethodCall(MethodCallExpression),
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(LiteralExpression::new(value))
    }

    pub fn member(name: impl Into<String>) -> Self {
        Expression::Member(MemberExpression::new(name))
    }

    pub fn arithmetic(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::Arithmetic(ArithmeticExpression::new(left, operator, right))
    }

    pub fn comparison(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::Comparison(ComparisonExpression::new(left, operator, right))
    }

    pub fn logical(operator: Operator, args: Vec<Expression>) -> Self {
        Expression::Logical(LogicalExpression::new(operator, args))
    }

    pub fn method_call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::MethodCall(MethodCallExpression::new(name, args))
    }

    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Literal(_) => ExpressionKind::Literal,
            Expression::Member(_) => ExpressionKind::Member,
            Expression::Arithmetic(_) => ExpressionKind::Arithmetic,
            Expression::Logical(_) => ExpressionKind::Logical,
            Expression::Comparison(_) => ExpressionKind::Comparison,
            Expression::MethodCall(_) => ExpressionKind::MethodCall,
        }
    }

    /// Compiles this expression into a filter document
    pub fn compile(&self) -> Result<Value> {
        match self {
            Expression::Literal(expr) => Ok(expr.compile()),
            Expression::Member(expr) => Ok(expr.compile()),
            Expression::Arithmetic(expr) => expr.compile(),
            Expression::Logical(expr) => expr.compile(),
            Expression::Comparison(expr) => expr.compile(),
            Expression::MethodCall(expr) => expr.compile(),
        }
    }
}

/// Builds `{ key: value }`
fn single(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.into(), value);
    Value::Object(map)
}

/// Compiles an optional operand, absent operands become `null`
fn compile_operand(operand: Option<&Expression>) -> Result<Value> {
    operand.map_or(Ok(Value::Null), Expression::compile)
}

fn compile_all(args: &[Expression]) -> Result<Vec<Value>> {
    args.iter().map(Expression::compile).collect()
}

// ============================================================================
// Leaves
// ============================================================================

/// A constant value
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpression {
    pub value: Value,
}

impl LiteralExpression {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn compile(&self) -> Value {
        self.value.clone()
    }
}

/// A field reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberExpression {
    pub name: String,
}

impl MemberExpression {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn compile(&self) -> Value {
        Value::String(self.name.clone())
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

/// `left <op> right` where op is one of `$add`, `$sub`, `$mul`, `$div`, `$mod`
///
/// Compiles to `{ <left>: { <op>: [ <right> ] } }`. A field reference on the
/// right is written as `{ "$name": <field> }` so it is not read as a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpression {
    pub left: Option<Box<Expression>>,
    pub operator: Operator,
    pub right: Option<Box<Expression>>,
}

impl ArithmeticExpression {
    pub fn new(left: Expression, operator: Operator, right: Expression) -> Self {
        Self {
            left: Some(Box::new(left)),
            operator,
            right: Some(Box::new(right)),
        }
    }

    pub fn compile(&self) -> Result<Value> {
        let left = self
            .left
            .as_deref()
            .ok_or(QueryError::MissingOperand(ExpressionKind::Arithmetic))?;

        if !self.operator.is_arithmetic() {
            return Err(QueryError::InvalidOperator {
                kind: ExpressionKind::Arithmetic,
                operator: self.operator,
            });
        }

        let field = field_name(left.compile()?)?;
        let right = match self.right.as_deref() {
            Some(Expression::Member(member)) => single("$name", member.compile()),
            other => compile_operand(other)?,
        };

        Ok(single(
            field,
            single(self.operator.as_str(), Value::Array(vec![right])),
        ))
    }
}

fn field_name(value: Value) -> Result<String> {
    match value {
        Value::String(name) => Ok(name),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(QueryError::InvalidFieldName(other.to_string())),
    }
}

// ============================================================================
// Logical
// ============================================================================

/// `$and`, `$or`, `$not` or `$nor` over an ordered argument list
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: Operator,
    pub args: Vec<Expression>,
}

impl LogicalExpression {
    pub fn new(operator: Operator, args: Vec<Expression>) -> Self {
        Self { operator, args }
    }

    pub fn compile(&self) -> Result<Value> {
        if !self.operator.is_logical() {
            return Err(QueryError::InvalidOperator {
                kind: ExpressionKind::Logical,
                operator: self.operator,
            });
        }
        if self.args.is_empty() {
            return Err(QueryError::EmptyArguments);
        }

        Ok(single(
            self.operator.as_str(),
            Value::Array(compile_all(&self.args)?),
        ))
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// `left <op> right` where op is one of `$eq`, `$ne`, `$lt`, `$lte`, `$gt`,
/// `$gte`, `$in`, `$nin`
///
/// The output shape depends on what the left side is:
///
/// - member: `{ field: value }` for `$eq`, `{ field: { op: value } }` otherwise
/// - method call: the comparison becomes the method's last argument
/// - arithmetic: the comparison is appended to the arithmetic argument list
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpression {
    pub left: Option<Box<Expression>>,
    pub operator: Operator,
    pub right: Option<Box<Expression>>,
}

impl ComparisonExpression {
    pub fn new(left: Expression, operator: Operator, right: Expression) -> Self {
        Self {
            left: Some(Box::new(left)),
            operator,
            right: Some(Box::new(right)),
        }
    }

    pub fn compile(&self) -> Result<Value> {
        let left = self
            .left
            .as_deref()
            .ok_or(QueryError::MissingOperand(ExpressionKind::Comparison))?;

        if !self.operator.is_comparison() {
            return Err(QueryError::InvalidOperator {
                kind: ExpressionKind::Comparison,
                operator: self.operator,
            });
        }

        let fragment = self.fragment(compile_operand(self.right.as_deref())?);

        match left {
            Expression::Member(member) => Ok(single(member.name.clone(), fragment)),
            Expression::MethodCall(method) => method
                .clone()
                .with_arg(Expression::Literal(LiteralExpression::new(fragment)))
                .compile(),
            Expression::Arithmetic(arithmetic) => {
                let mut compiled = arithmetic.compile()?;
                let args = compiled
                    .as_object_mut()
                    .and_then(|fields| fields.values_mut().next())
                    .and_then(|ops| ops.get_mut(arithmetic.operator.as_str()))
                    .and_then(Value::as_array_mut);
                if let Some(args) = args {
                    args.push(fragment);
                }
                Ok(compiled)
            }
            other => Err(QueryError::UnsupportedComparisonLeft(other.kind())),
        }
    }

    /// `value` for `$eq`, `{ op: value }` for the rest
    fn fragment(&self, value: Value) -> Value {
        if self.operator == Operator::Eq {
            value
        } else {
            single(self.operator.as_str(), value)
        }
    }
}

// ============================================================================
// Method call
// ============================================================================

/// A function applied to a field, e.g. `year(orderDate)`
///
/// The first argument is the subject field; the rest are compiled into the
/// method's argument list: `{ orderDate: { "$year": [ ... ] } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCallExpression {
    pub name: String,
    pub args: Vec<Expression>,
}

impl MethodCallExpression {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Returns this call with one more trailing argument
    pub fn with_arg(mut self, arg: Expression) -> Self {
        self.args.push(arg);
        self
    }

    pub fn compile(&self) -> Result<Value> {
        let (subject, rest) = self
            .args
            .split_first()
            .ok_or(QueryError::EmptyMethodArguments)?;

        let Expression::Member(member) = subject else {
            return Err(QueryError::MethodSubjectNotMember(subject.kind()));
        };

        Ok(single(
            member.name.clone(),
            single(format!("${}", self.name), Value::Array(compile_all(rest)?)),
        ))
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<LiteralExpression> for Expression {
    fn from(expr: LiteralExpression) -> Self {
        Expression::Literal(expr)
    }
}

impl From<MemberExpression> for Expression {
    fn from(expr: MemberExpression) -> Self {
        Expression::Member(expr)
    }
}

impl From<ArithmeticExpression> for Expression {
    fn from(expr: ArithmeticExpression) -> Self {
        Expression::Arithmetic(expr)
    }
}

impl From<LogicalExpression> for Expression {
    fn from(expr: LogicalExpression) -> Self {
        Expression::Logical(expr)
    }
}

impl From<ComparisonExpression> for Expression {
    fn from(expr: ComparisonExpression) -> Self {
        Expression::Comparison(expr)
    }
}

impl From<MethodCallExpression> for Expression {
    fn from(expr: MethodCallExpression) -> Self {
        Expression::MethodCall(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_compiles_to_name() {
        assert_eq!(Expression::member("price").compile().unwrap(), json!("price"));
    }

    #[test]
    fn test_null_literal() {
        assert_eq!(Expression::literal(Value::Null).compile().unwrap(), Value::Null);
    }

    #[test]
    fn test_arithmetic_missing_right_is_null() {
        let expr = ArithmeticExpression {
            left: Some(Box::new(Expression::member("price"))),
            operator: Operator::Mul,
            right: None,
        };
        assert_eq!(expr.compile().unwrap(), json!({ "price": { "$mul": [null] } }));
    }

    #[test]
    fn test_arithmetic_rejects_object_field() {
        let expr = Expression::arithmetic(
            Expression::literal(json!({ "a": 1 })),
            Operator::Add,
            Expression::literal(1),
        );
        assert!(matches!(expr.compile(), Err(QueryError::InvalidFieldName(_))));
    }

    #[test]
    fn test_method_call_comparison_leaves_call_untouched() {
        let method = MethodCallExpression::new("year", vec![Expression::member("orderDate")]);
        let comparison = Expression::comparison(
            Expression::MethodCall(method.clone()),
            Operator::Eq,
            Expression::literal(2024),
        );

        assert_eq!(
            comparison.compile().unwrap(),
            json!({ "orderDate": { "$year": [2024] } })
        );
        // compiling twice yields the same document
        assert_eq!(
            comparison.compile().unwrap(),
            json!({ "orderDate": { "$year": [2024] } })
        );
        assert_eq!(method.args.len(), 1);
    }
}
