//! Linear expressions for optimization modeling.
//!
//! - `core`      : Expr: ordered terms + constant + optional relation
//! - `constraint`: ComparisonSense, Relation, scalar-on-the-left comparisons
//! - `ops`       : Operator overloads
//! - `builders`  : quicksum helpers
//! - `error`     : Expression and handle errors

pub mod builders;
pub mod constraint;
pub mod core;
pub mod error;
mod ops;

pub use builders::{quicksum, quicksum_if};
pub use constraint::{ComparisonSense, Relation, ScalarRelation};
pub use core::Expr;
pub use error::ExprError;
