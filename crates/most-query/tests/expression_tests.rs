//! Integration tests for most-query
//!
//! Covers:
//! - Comparison on members, method calls and arithmetic
//! - Logical grouping
//! - Operator validation per expression kind
//! - Method call argument rules
//! - Fluent filter builder

use most_query::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

// ========================================================================
// Comparison on members
// ========================================================================

#[test]
fn test_member_equal_is_shorthand() {
    let expr = Expression::comparison(
        Expression::member("name"),
        Operator::Eq,
        Expression::literal("Alice"),
    );
    assert_eq!(expr.compile().unwrap(), json!({ "name": "Alice" }));
}

#[rstest]
#[case(Operator::Ne, "$ne")]
#[case(Operator::Lt, "$lt")]
#[case(Operator::Lte, "$lte")]
#[case(Operator::Gt, "$gt")]
#[case(Operator::Gte, "$gte")]
fn test_member_comparison_wraps_operator(#[case] op: Operator, #[case] key: &str) {
    let expr = Expression::comparison(Expression::member("price"), op, Expression::literal(10));
    assert_eq!(expr.compile().unwrap(), json!({ "price": { key: 10 } }));
}

#[test]
fn test_member_in_list() {
    let expr = Expression::comparison(
        Expression::member("status"),
        Operator::In,
        Expression::literal(json!(["open", "pending"])),
    );
    assert_eq!(
        expr.compile().unwrap(),
        json!({ "status": { "$in": ["open", "pending"] } })
    );
}

#[test]
fn test_member_compared_with_missing_right() {
    let expr = ComparisonExpression {
        left: Some(Box::new(Expression::member("deletedAt"))),
        operator: Operator::Eq,
        right: None,
    };
    assert_eq!(expr.compile().unwrap(), json!({ "deletedAt": null }));
}

#[test]
fn test_member_compared_with_member() {
    let expr = Expression::comparison(
        Expression::member("shippedDate"),
        Operator::Gt,
        Expression::member("orderDate"),
    );
    assert_eq!(
        expr.compile().unwrap(),
        json!({ "shippedDate": { "$gt": "orderDate" } })
    );
}

// ========================================================================
// Comparison on method calls
// ========================================================================

#[test]
fn test_method_call_without_extra_arguments() {
    let expr = Expression::method_call("year", vec![Expression::member("orderDate")]);
    assert_eq!(expr.compile().unwrap(), json!({ "orderDate": { "$year": [] } }));
}

#[test]
fn test_method_call_equal_appends_value() {
    let expr = Expression::comparison(
        Expression::method_call("year", vec![Expression::member("orderDate")]),
        Operator::Eq,
        Expression::literal(2020),
    );
    assert_eq!(
        expr.compile().unwrap(),
        json!({ "orderDate": { "$year": [2020] } })
    );
}

#[test]
fn test_method_call_comparison_appends_fragment() {
    let expr = Expression::comparison(
        Expression::method_call(
            "indexOf",
            vec![Expression::member("name"), Expression::literal("an")],
        ),
        Operator::Gte,
        Expression::literal(0),
    );
    assert_eq!(
        expr.compile().unwrap(),
        json!({ "name": { "$indexOf": ["an", { "$gte": 0 }] } })
    );
}

#[test]
fn test_method_call_requires_arguments() {
    let expr = Expression::method_call("year", vec![]);
    assert_eq!(expr.compile(), Err(QueryError::EmptyMethodArguments));
}

#[test]
fn test_method_call_requires_member_subject() {
    let expr = Expression::method_call("year", vec![Expression::literal("orderDate")]);
    assert_eq!(
        expr.compile(),
        Err(QueryError::MethodSubjectNotMember(ExpressionKind::Literal))
    );
}

// ========================================================================
// Arithmetic
// ========================================================================

#[test]
fn test_arithmetic_with_literal() {
    let expr = Expression::arithmetic(
        Expression::member("price"),
        Operator::Add,
        Expression::literal(5),
    );
    assert_eq!(expr.compile().unwrap(), json!({ "price": { "$add": [5] } }));
}

#[test]
fn test_arithmetic_with_member_right_is_named() {
    let expr = Expression::arithmetic(
        Expression::member("price"),
        Operator::Mul,
        Expression::member("quantity"),
    );
    assert_eq!(
        expr.compile().unwrap(),
        json!({ "price": { "$mul": [ { "$name": "quantity" } ] } })
    );
}

#[test]
fn test_arithmetic_comparison_extends_argument_list() {
    let arithmetic = Expression::arithmetic(
        Expression::member("price"),
        Operator::Sub,
        Expression::literal(10),
    );

    let gt = Expression::comparison(arithmetic.clone(), Operator::Gt, Expression::literal(100));
    assert_eq!(
        gt.compile().unwrap(),
        json!({ "price": { "$sub": [10, { "$gt": 100 }] } })
    );

    let eq = Expression::comparison(arithmetic, Operator::Eq, Expression::literal(90));
    assert_eq!(eq.compile().unwrap(), json!({ "price": { "$sub": [10, 90] } }));
}

#[test]
fn test_arithmetic_missing_left() {
    let expr = ArithmeticExpression {
        left: None,
        operator: Operator::Add,
        right: Some(Box::new(Expression::literal(1))),
    };
    assert_eq!(
        expr.compile(),
        Err(QueryError::MissingOperand(ExpressionKind::Arithmetic))
    );
}

// ========================================================================
// Logical
// ========================================================================

#[rstest]
#[case(Operator::And, 1)]
#[case(Operator::And, 3)]
#[case(Operator::Or, 2)]
#[case(Operator::Or, 4)]
fn test_logical_keeps_argument_count(#[case] op: Operator, #[case] count: usize) {
    let args: Vec<Expression> = (0..count)
        .map(|i| {
            Expression::comparison(
                Expression::member(format!("field{i}")),
                Operator::Eq,
                Expression::literal(i as u64),
            )
        })
        .collect();

    let compiled = Expression::logical(op, args).compile().unwrap();
    let object = compiled.as_object().unwrap();

    assert_eq!(object.len(), 1);
    assert_eq!(object.get(op.as_str()).unwrap().as_array().unwrap().len(), count);
}

#[test]
fn test_logical_passes_null_arguments_through() {
    let expr = Expression::logical(
        Operator::Or,
        vec![Expression::literal(Value::Null), Expression::member("active")],
    );
    assert_eq!(expr.compile().unwrap(), json!({ "$or": [null, "active"] }));
}

#[test]
fn test_logical_rejects_empty_arguments() {
    let expr = Expression::logical(Operator::And, vec![]);
    assert_eq!(expr.compile(), Err(QueryError::EmptyArguments));
}

#[test]
fn test_nested_logical() {
    let expr = Expression::logical(
        Operator::Nor,
        vec![Expression::logical(
            Operator::And,
            vec![Expression::comparison(
                Expression::member("a"),
                Operator::Eq,
                Expression::literal(true),
            )],
        )],
    );
    assert_eq!(
        expr.compile().unwrap(),
        json!({ "$nor": [ { "$and": [ { "a": true } ] } ] })
    );
}

// ========================================================================
// Operator validation
// ========================================================================

#[test]
fn test_arithmetic_rejects_comparison_operator() {
    let expr = Expression::arithmetic(
        Expression::member("price"),
        Operator::Eq,
        Expression::literal(1),
    );
    assert_eq!(
        expr.compile(),
        Err(QueryError::InvalidOperator {
            kind: ExpressionKind::Arithmetic,
            operator: Operator::Eq,
        })
    );
}

#[test]
fn test_comparison_rejects_logical_operator() {
    let expr = Expression::comparison(
        Expression::member("price"),
        Operator::And,
        Expression::literal(1),
    );
    assert!(matches!(
        expr.compile(),
        Err(QueryError::InvalidOperator {
            kind: ExpressionKind::Comparison,
            ..
        })
    ));
}

#[test]
fn test_logical_rejects_arithmetic_operator() {
    let expr = Expression::logical(Operator::Add, vec![Expression::member("a")]);
    assert!(matches!(
        expr.compile(),
        Err(QueryError::InvalidOperator {
            kind: ExpressionKind::Logical,
            ..
        })
    ));
}

#[test]
fn test_comparison_missing_left() {
    let expr = ComparisonExpression {
        left: None,
        operator: Operator::Eq,
        right: Some(Box::new(Expression::literal(1))),
    };
    assert_eq!(
        expr.compile(),
        Err(QueryError::MissingOperand(ExpressionKind::Comparison))
    );
}

#[test]
fn test_comparison_rejects_unsupported_left() {
    let left = Expression::logical(Operator::And, vec![Expression::member("a")]);
    let expr = Expression::comparison(left, Operator::Eq, Expression::literal(1));
    assert_eq!(
        expr.compile(),
        Err(QueryError::UnsupportedComparisonLeft(ExpressionKind::Logical))
    );

    let expr = Expression::comparison(Expression::literal(1), Operator::Eq, Expression::literal(1));
    assert_eq!(
        expr.compile(),
        Err(QueryError::UnsupportedComparisonLeft(ExpressionKind::Literal))
    );
}

// ========================================================================
// Fluent filter
// ========================================================================

#[test]
fn test_filter_and_chain_is_flat() {
    let filter = Filter::where_("category")
        .equal("Laptops")
        .and("price")
        .lower_or_equal(1500)
        .and("stock")
        .greater_than(0);

    assert_eq!(
        filter.compile().unwrap(),
        json!({ "$and": [
            { "category": "Laptops" },
            { "price": { "$lte": 1500 } },
            { "stock": { "$gt": 0 } }
        ] })
    );
}

#[test]
fn test_filter_method_and_arithmetic() {
    let filter = Filter::where_("orderDate")
        .year()
        .equal(2019)
        .and("price")
        .multiply(0.8)
        .lower_than(100);

    assert_eq!(
        filter.compile().unwrap(),
        json!({ "$and": [
            { "orderDate": { "$year": [2019] } },
            { "price": { "$mul": [0.8, { "$lt": 100 }] } }
        ] })
    );
}

#[test]
fn test_filter_in_and_not_in() {
    let filter = Filter::where_("status")
        .in_(["open", "pending"])
        .or("priority")
        .not_in([1, 2]);

    assert_eq!(
        filter.compile().unwrap(),
        json!({ "$or": [
            { "status": { "$in": ["open", "pending"] } },
            { "priority": { "$nin": [1, 2] } }
        ] })
    );
}

#[test]
fn test_filter_between() {
    let filter = Filter::where_("price").between(10, 20);
    assert_eq!(
        filter.compile().unwrap(),
        json!({ "$and": [ { "price": { "$gte": 10 } }, { "price": { "$lte": 20 } } ] })
    );
}

#[test]
fn test_filter_string_methods() {
    let filter = Filter::where_("email").to_lower_case().equal("a@b.c");
    assert_eq!(
        filter.compile().unwrap(),
        json!({ "email": { "$toLower": ["a@b.c"] } })
    );
}

#[test]
fn test_filter_expression_is_reusable() {
    let filter = Filter::where_("id").not_equal(1);
    let expr = filter.clone().into_expression().unwrap();
    assert_eq!(expr.compile().unwrap(), filter.compile().unwrap());
    assert_eq!(expr.kind(), ExpressionKind::Comparison);
}
