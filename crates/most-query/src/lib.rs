//! # MOST Query
//!
//! Composable query expressions that compile into storage-agnostic filter
//! documents in MongoDB-like syntax:
//!
//! - Field references and literals (`price`, `500`)
//! - Arithmetic (`$add`, `$sub`, `$mul`, `$div`, `$mod`)
//! - Comparison (`$eq`, `$ne`, `$lt`, `$lte`, `$gt`, `$gte`, `$in`, `$nin`)
//! - Logical (`$and`, `$or`, `$not`, `$nor`)
//! - Method calls on fields (`$year`, `$toLower`, ...)
//!
//! Expression construction is decoupled from the document format, so a
//! fluent API ([`Filter`]) can assemble a tree in any order and a downstream
//! query executor only ever sees plain JSON.
//!
//! ## Example
//!
//! ```
//! use most_query::{Expression, Operator};
//! use serde_json::json;
//!
//! let year = Expression::method_call("year", vec![Expression::member("orderDate")]);
//! let expr = Expression::logical(
//!     Operator::And,
//!     vec![
//!         Expression::comparison(year, Operator::Eq, Expression::literal(2024)),
//!         Expression::comparison(
//!             Expression::member("status"),
//!             Operator::Ne,
//!             Expression::literal("cancelled"),
//!         ),
//!     ],
//! );
//!
//! assert_eq!(
//!     expr.compile().unwrap(),
//!     json!({ "$and": [
//!         { "orderDate": { "$year": [2024] } },
//!         { "status": { "$ne": "cancelled" } }
//!     ] })
//! );
//! ```

pub mod builder;
pub mod error;
pub mod expression;
pub mod operator;

pub use builder::{Filter, FilterField};
pub use error::{QueryError, Result};
pub use expression::{
    ArithmeticExpression, ComparisonExpression, Expression, ExpressionKind, LiteralExpression,
    LogicalExpression, MemberExpression, MethodCallExpression,
};
pub use operator::Operator;
