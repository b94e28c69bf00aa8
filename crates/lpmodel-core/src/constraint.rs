//! Constraint records and the `Constr` handle.

use std::fmt;
use std::rc::Rc;

use lpmodel_expr::ids::ConstraintId;
use lpmodel_expr::{Expr, Relation};

use crate::model::ModelError;

/// Stored constraint: position, display name and the tagged expression.
#[derive(Debug)]
pub struct ConstraintRecord {
    index: usize,
    name: String,
    expr: Expr,
}

impl ConstraintRecord {
    pub(crate) fn new(index: usize, name: String, expr: Expr) -> Self {
        Self { index, name, expr }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> ConstraintId {
        ConstraintId::new(self.index)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn relation(&self) -> Option<Relation> {
        self.expr.relation()
    }
}

/// Handle to a constraint record, minted by [`crate::Model::add_constraint`].
///
/// Clones share the record. Identity is record identity, so handles from
/// two models never compare equal even when their indices match.
#[derive(Clone, Default)]
pub struct Constr {
    record: Option<Rc<ConstraintRecord>>,
}

impl Constr {
    pub(crate) fn new(record: Rc<ConstraintRecord>) -> Self {
        Self {
            record: Some(record),
        }
    }

    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.record.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.record.as_ref().map(|record| record.index)
    }

    pub fn id(&self) -> Option<ConstraintId> {
        self.index().map(ConstraintId::new)
    }

    pub fn same_as(&self, other: &Constr) -> bool {
        match (&self.record, &other.record) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// True iff this handle points at exactly `record`.
    pub(crate) fn refers_to(&self, record: &Rc<ConstraintRecord>) -> bool {
        self.record.as_ref().is_some_and(|own| Rc::ptr_eq(own, record))
    }

    pub fn record(&self) -> Option<&ConstraintRecord> {
        self.record.as_deref()
    }

    pub fn name(&self) -> Result<&str, ModelError> {
        self.bound_record().map(ConstraintRecord::name)
    }

    /// The expression the constraint was created from, relation included.
    pub fn expr(&self) -> Result<&Expr, ModelError> {
        self.bound_record().map(ConstraintRecord::expr)
    }

    /// Removing a constraint is not supported; this always fails.
    pub fn remove(&self) -> Result<(), ModelError> {
        tracing::warn!(
            component = "model",
            operation = "remove_constraint",
            status = "error",
            index = ?self.index(),
            "Constraint removal is not implemented"
        );
        Err(ModelError::NotImplemented {
            operation: "remove_constraint",
        })
    }

    fn bound_record(&self) -> Result<&ConstraintRecord, ModelError> {
        self.record.as_deref().ok_or(ModelError::Unbound)
    }
}

impl PartialEq for Constr {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Constr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some(record) => f
                .debug_struct("Constr")
                .field("index", &record.index)
                .field("name", &record.name)
                .finish(),
            None => f.write_str("Constr(unbound)"),
        }
    }
}

impl fmt::Display for Constr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some(record) if record.name.is_empty() => write!(f, "c{}", record.index),
            Some(record) => f.write_str(&record.name),
            None => f.write_str("<unbound>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Constr;
    use crate::model::ModelError;

    #[test]
    fn unbound_handle_fails_record_access() {
        let constr = Constr::unbound();
        assert!(!constr.is_bound());
        assert_eq!(constr.index(), None);
        assert_eq!(constr.id(), None);
        assert_eq!(constr.name(), Err(ModelError::Unbound));
        assert!(constr.expr().is_err());
        assert_eq!(constr, Constr::default());
        assert_eq!(constr.to_string(), "<unbound>");
    }

    #[test]
    fn remove_is_not_implemented_even_when_unbound() {
        assert_eq!(
            Constr::unbound().remove(),
            Err(ModelError::NotImplemented {
                operation: "remove_constraint"
            })
        );
    }
}
