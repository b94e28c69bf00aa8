//! lpmodel core: model store with lazy row-wise compilation.

pub mod compiled;
pub mod constraint;
pub mod model;
pub mod solver;
pub mod types;

pub use compiled::{CompiledModel, RowMatrix};
pub use constraint::{Constr, ConstraintRecord};
pub use model::{Model, ModelError};
pub use solver::{
    ModelFile, Presolve, Solution, Solver, SolverConfig, SolverError, SolverStatus,
};
pub use types::{Bounds, Sense, Variable};

pub use lpmodel_expr::{
    ComparisonSense, Expr, ExprError, Relation, ScalarRelation, Var, quicksum, quicksum_if,
};
