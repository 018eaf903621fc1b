// File: src/builder.rs
// Purpose: Fluent filter builder over the expression tree

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::expression::Expression;
use crate::operator::Operator;

/// Fluent filter: `where_(field).<comparison>(value)` chained with `and`/`or`
///
/// Builder methods consume `self` and return the next state, so a filter is
/// assembled in one expression and compiled at the end.
///
/// # Examples
///
/// ```
/// use most_query::Filter;
/// use serde_json::json;
///
/// let filter = Filter::where_("category")
///     .equal("Laptops")
///     .and("price")
///     .greater_than(500);
///
/// assert_eq!(
///     filter.compile().unwrap(),
///     json!({ "$and": [ { "category": "Laptops" }, { "price": { "$gt": 500 } } ] })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    expression: Option<Expression>,
}

impl Filter {
    /// Creates an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a filter with a condition on `field`
    pub fn where_(field: impl Into<String>) -> FilterField {
        Filter::new().join(Operator::And, field)
    }

    /// Adds a condition joined with `$and`
    pub fn and(self, field: impl Into<String>) -> FilterField {
        self.join(Operator::And, field)
    }

    /// Adds a condition joined with `$or`
    pub fn or(self, field: impl Into<String>) -> FilterField {
        self.join(Operator::Or, field)
    }

    fn join(self, join: Operator, field: impl Into<String>) -> FilterField {
        FilterField {
            filter: self,
            left: Expression::member(field),
            join,
        }
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }

    pub fn into_expression(self) -> Option<Expression> {
        self.expression
    }

    pub fn is_empty(&self) -> bool {
        self.expression.is_none()
    }

    /// Compiles the filter; an empty filter compiles to `null`
    pub fn compile(&self) -> Result<Value> {
        let compiled = match &self.expression {
            Some(expr) => expr.compile()?,
            None => Value::Null,
        };
        debug!(filter = %compiled, "compiled filter");
        Ok(compiled)
    }

    /// Appends a condition; same-operator chains stay flat
    fn append(mut self, join: Operator, condition: Expression) -> Self {
        self.expression = Some(match self.expression.take() {
            None => condition,
            Some(Expression::Logical(mut logical)) if logical.operator == join => {
                logical.args.push(condition);
                Expression::Logical(logical)
            }
            Some(current) => Expression::logical(join, vec![current, condition]),
        });
        self
    }
}

/// A pending condition: the left side is known, the comparison is not
#[derive(Debug, Clone)]
#[must_use = "a field without a comparison adds nothing to the filter"]
pub struct FilterField {
    filter: Filter,
    left: Expression,
    join: Operator,
}

impl FilterField {
    fn compare(self, operator: Operator, value: impl Into<Value>) -> Filter {
        let condition =
            Expression::comparison(self.left, operator, Expression::literal(value));
        self.filter.append(self.join, condition)
    }

    pub fn equal(self, value: impl Into<Value>) -> Filter {
        self.compare(Operator::Eq, value)
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Filter {
        self.compare(Operator::Ne, value)
    }

    pub fn greater_than(self, value: impl Into<Value>) -> Filter {
        self.compare(Operator::Gt, value)
    }

    pub fn greater_or_equal(self, value: impl Into<Value>) -> Filter {
        self.compare(Operator::Gte, value)
    }

    pub fn lower_than(self, value: impl Into<Value>) -> Filter {
        self.compare(Operator::Lt, value)
    }

    pub fn lower_or_equal(self, value: impl Into<Value>) -> Filter {
        self.compare(Operator::Lte, value)
    }

    pub fn in_<I, V>(self, values: I) -> Filter
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.compare(Operator::In, values)
    }

    pub fn not_in<I, V>(self, values: I) -> Filter
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.compare(Operator::Nin, values)
    }

    /// `left >= low and left <= high`
    pub fn between(self, low: impl Into<Value>, high: impl Into<Value>) -> Filter {
        let condition = Expression::logical(
            Operator::And,
            vec![
                Expression::comparison(self.left.clone(), Operator::Gte, Expression::literal(low)),
                Expression::comparison(self.left, Operator::Lte, Expression::literal(high)),
            ],
        );
        self.filter.append(self.join, condition)
    }

    // ------------------------------------------------------------------------
    // Left side transforms
    // ------------------------------------------------------------------------

    fn arithmetic(mut self, operator: Operator, value: impl Into<Value>) -> Self {
        self.left = Expression::arithmetic(self.left, operator, Expression::literal(value));
        self
    }

    pub fn add(self, value: impl Into<Value>) -> Self {
        self.arithmetic(Operator::Add, value)
    }

    pub fn subtract(self, value: impl Into<Value>) -> Self {
        self.arithmetic(Operator::Sub, value)
    }

    pub fn multiply(self, value: impl Into<Value>) -> Self {
        self.arithmetic(Operator::Mul, value)
    }

    pub fn divide(self, value: impl Into<Value>) -> Self {
        self.arithmetic(Operator::Div, value)
    }

    pub fn modulo(self, value: impl Into<Value>) -> Self {
        self.arithmetic(Operator::Mod, value)
    }

    /// Wraps the left side in a method call; only valid on a plain field
    fn method(mut self, name: &str) -> Self {
        self.left = Expression::method_call(name, vec![self.left]);
        self
    }

    pub fn year(self) -> Self {
        self.method("year")
    }

    pub fn month(self) -> Self {
        self.method("month")
    }

    pub fn day(self) -> Self {
        self.method("day")
    }

    pub fn hour(self) -> Self {
        self.method("hour")
    }

    pub fn minute(self) -> Self {
        self.method("minute")
    }

    pub fn second(self) -> Self {
        self.method("second")
    }

    pub fn date(self) -> Self {
        self.method("date")
    }

    pub fn to_lower_case(self) -> Self {
        self.method("toLower")
    }

    pub fn to_upper_case(self) -> Self {
        self.method("toUpper")
    }

    pub fn trim(self) -> Self {
        self.method("trim")
    }

    pub fn length(self) -> Self {
        self.method("length")
    }
}
