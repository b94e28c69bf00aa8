pub mod expr;
pub mod ids;
pub mod var;

pub use expr::{
    ComparisonSense, Expr, ExprError, Relation, ScalarRelation, quicksum, quicksum_if,
};
pub use ids::{ConstraintId, VariableId};
pub use var::{Var, VariableArena, VariableRecord};
