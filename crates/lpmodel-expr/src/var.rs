//! Variable records, the arena that owns them, and the `Var` handle.
//!
//! A [`Var`] shares ownership of one [`VariableRecord`] with the
//! [`VariableArena`] that created it. Handles compare by record identity,
//! never by index or name, so two arenas can hand out handles with the same
//! index without them being confused.

use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::expr::{ComparisonSense, Expr, ExprError, Relation};
use crate::ids::VariableId;

/// Stored metadata of a decision variable.
#[derive(Debug)]
pub struct VariableRecord {
    index: usize,
    name: String,
    lower: f64,
    upper: f64,
    is_integer: bool,
}

impl VariableRecord {
    /// Position of the record in its arena.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn is_integer(&self) -> bool {
        self.is_integer
    }

    pub fn id(&self) -> VariableId {
        VariableId::new(self.index)
    }
}

/// Handle to a variable record.
///
/// Cloning is cheap: every clone points at the same record. A default handle
/// is unbound and only answers [`Var::index`] (with `None`) and identity
/// checks; everything that needs the record fails with
/// [`ExprError::Unbound`].
#[derive(Clone, Default)]
pub struct Var {
    record: Option<Rc<VariableRecord>>,
}

impl Var {
    /// A handle that refers to no record.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.record.is_some()
    }

    /// Column index of the backing record, `None` when unbound.
    pub fn index(&self) -> Option<usize> {
        self.record.as_ref().map(|record| record.index)
    }

    pub fn id(&self) -> Option<VariableId> {
        self.index().map(VariableId::new)
    }

    /// Identity comparison: true iff both handles share the same record.
    ///
    /// Two unbound handles are the same (both refer to nothing).
    pub fn same_as(&self, other: &Var) -> bool {
        match (&self.record, &other.record) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn record(&self) -> Option<&VariableRecord> {
        self.record.as_deref()
    }

    pub fn name(&self) -> Result<&str, ExprError> {
        self.bound_record().map(VariableRecord::name)
    }

    pub fn lower(&self) -> Result<f64, ExprError> {
        self.bound_record().map(VariableRecord::lower)
    }

    pub fn upper(&self) -> Result<f64, ExprError> {
        self.bound_record().map(VariableRecord::upper)
    }

    /// `(lower, upper)` as stored.
    pub fn bounds(&self) -> Result<(f64, f64), ExprError> {
        self.bound_record().map(|record| (record.lower, record.upper))
    }

    pub fn is_integer(&self) -> Result<bool, ExprError> {
        self.bound_record().map(VariableRecord::is_integer)
    }

    /// Removing a variable is not supported; this always fails.
    pub fn remove(&self) -> Result<(), ExprError> {
        warn!(
            component = "expr",
            operation = "remove_variable",
            status = "error",
            index = ?self.index(),
            "Variable removal is not implemented"
        );
        Err(ExprError::NotImplemented {
            operation: "remove_variable",
        })
    }

    /// `self <= rhs` as a fresh constraint expression.
    pub fn leq(&self, rhs: f64) -> Expr {
        Expr::from(self).with_relation(Relation::new(ComparisonSense::LessEqual, rhs))
    }

    /// `self >= rhs` as a fresh constraint expression.
    pub fn geq(&self, rhs: f64) -> Expr {
        Expr::from(self).with_relation(Relation::new(ComparisonSense::GreaterEqual, rhs))
    }

    /// `self == rhs` as a fresh constraint expression.
    pub fn equals(&self, rhs: f64) -> Expr {
        Expr::from(self).with_relation(Relation::new(ComparisonSense::Equal, rhs))
    }

    fn bound_record(&self) -> Result<&VariableRecord, ExprError> {
        self.record.as_deref().ok_or(ExprError::Unbound)
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some(record) => f
                .debug_struct("Var")
                .field("index", &record.index)
                .field("name", &record.name)
                .finish(),
            None => f.write_str("Var(unbound)"),
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some(record) if record.name.is_empty() => write!(f, "x{}", record.index),
            Some(record) => f.write_str(&record.name),
            None => f.write_str("<unbound>"),
        }
    }
}

/// Append-only owner of variable records.
///
/// The arena is the only place that mints bound [`Var`] handles, and a
/// record's index always equals its position here.
#[derive(Debug, Default)]
pub struct VariableArena {
    records: Vec<Rc<VariableRecord>>,
}

impl VariableArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the next index and return a handle to it.
    ///
    /// Bounds are stored as given; `lower > upper` is left for the solver
    /// to reject.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        is_integer: bool,
    ) -> Var {
        let record = Rc::new(VariableRecord {
            index: self.records.len(),
            name: name.into(),
            lower,
            upper,
            is_integer,
        });
        trace!(
            component = "expr",
            operation = "push_variable",
            status = "success",
            index = record.index,
            lower,
            upper,
            is_integer,
            "Allocated variable record"
        );
        self.records.push(Rc::clone(&record));
        Var {
            record: Some(record),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Handle to the record at `index`.
    pub fn get(&self, index: usize) -> Option<Var> {
        self.records.get(index).map(|record| Var {
            record: Some(Rc::clone(record)),
        })
    }

    /// True iff `var` is bound to a record owned by this arena.
    pub fn contains(&self, var: &Var) -> bool {
        match &var.record {
            Some(record) => self
                .records
                .get(record.index)
                .is_some_and(|owned| Rc::ptr_eq(owned, record)),
            None => false,
        }
    }

    /// Records in index order.
    pub fn records(&self) -> impl Iterator<Item = &VariableRecord> {
        self.records.iter().map(|record| record.as_ref())
    }

    /// Handles in index order.
    pub fn handles(&self) -> impl Iterator<Item = Var> + '_ {
        self.records.iter().map(|record| Var {
            record: Some(Rc::clone(record)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{Var, VariableArena};
    use crate::expr::{ComparisonSense, ExprError};

    #[test]
    fn push_assigns_sequential_indices() {
        let mut arena = VariableArena::new();
        let x = arena.push("x", 0.0, 4.0, false);
        let y = arena.push("y", 1.0, 7.0, true);

        assert_eq!(x.index(), Some(0));
        assert_eq!(y.index(), Some(1));
        assert_eq!(arena.len(), 2);
        assert_eq!(y.lower().unwrap(), 1.0);
        assert_eq!(y.bounds().unwrap(), (1.0, 7.0));
        assert_eq!(y.id().map(|id| id.inner()), Some(1));
        assert!(y.is_integer().unwrap());
    }

    #[test]
    fn handles_compare_by_record_not_index() {
        let mut first = VariableArena::new();
        let mut second = VariableArena::new();
        let a = first.push("a", 0.0, 1.0, false);
        let b = second.push("a", 0.0, 1.0, false);

        assert_eq!(a.index(), b.index());
        assert!(!a.same_as(&b));
        assert!(a.same_as(&a.clone()));
        assert!(a.same_as(&first.get(0).unwrap()));
    }

    #[test]
    fn unbound_handle_reports_sentinel_and_errors() {
        let var = Var::unbound();
        assert!(!var.is_bound());
        assert_eq!(var.index(), None);
        assert_eq!(var.name(), Err(ExprError::Unbound));
        assert_eq!(var.bounds(), Err(ExprError::Unbound));
        assert_eq!(var.id(), None);
        assert!(var.same_as(&Var::default()));
        assert_eq!(var.to_string(), "<unbound>");
    }

    #[test]
    fn contains_rejects_foreign_handles() {
        let mut first = VariableArena::new();
        let mut second = VariableArena::new();
        let a = first.push("a", 0.0, 1.0, false);
        let b = second.push("b", 0.0, 1.0, false);

        assert!(first.contains(&a));
        assert!(!first.contains(&b));
        assert!(!first.contains(&Var::unbound()));
    }

    #[test]
    fn remove_is_not_implemented() {
        let mut arena = VariableArena::new();
        let x = arena.push("x", 0.0, 1.0, false);
        assert_eq!(
            x.remove(),
            Err(ExprError::NotImplemented {
                operation: "remove_variable"
            })
        );
        assert_eq!(arena.len(), 1);
        assert!(x.is_bound());
    }

    #[test]
    fn display_falls_back_to_index() {
        let mut arena = VariableArena::new();
        let named = arena.push("flow", 0.0, 1.0, false);
        let anonymous = arena.push("", 0.0, 1.0, false);
        assert_eq!(named.to_string(), "flow");
        assert_eq!(anonymous.to_string(), "x1");
    }

    #[test]
    fn var_comparisons_build_tagged_expressions() {
        let mut arena = VariableArena::new();
        let x = arena.push("x", 0.0, 1.0, false);

        let le = x.leq(3.0);
        let relation = le.relation().unwrap();
        assert_eq!(relation.sense, ComparisonSense::LessEqual);
        assert_eq!(relation.rhs, 3.0);
        assert_eq!(le.len(), 1);

        assert_eq!(
            x.geq(1.0).relation().unwrap().sense,
            ComparisonSense::GreaterEqual
        );
        assert_eq!(x.equals(2.0).relation().unwrap().sense, ComparisonSense::Equal);
    }
}
