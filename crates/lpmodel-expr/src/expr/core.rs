//! Core expression type: ordered linear terms, a constant, and an optional relation.
//!
//! Terms are stored exactly as they were added. Duplicates of the same
//! variable are kept side by side and zero coefficients are not dropped;
//! merging is an explicit step ([`Expr::normalized_terms`]).

use std::collections::BTreeMap;
use std::fmt;

use crate::expr::constraint::{ComparisonSense, Relation};
use crate::expr::error::ExprError;
use crate::ids::VariableId;
use crate::var::Var;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    terms: Vec<(Var, f64)>,
    relation: Option<Relation>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression: no terms, zero constant, no relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Default::default()
        }
    }

    /// Single term `coeff * var`. A zero coefficient is stored as given.
    pub fn term(var: &Var, coeff: f64) -> Self {
        Self {
            terms: vec![(var.clone(), coeff)],
            ..Default::default()
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var: &Var) -> Self {
        Self::term(var, 1.0)
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term_at(&self, index: usize) -> Option<&(Var, f64)> {
        self.terms.get(index)
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    // ── In-place composition ────────────────────────────────

    /// `self += m * other`, ignoring any relation on `other`.
    ///
    /// `m == 0` leaves `self` untouched; `m == 1` appends the terms unscaled.
    #[allow(clippy::float_cmp)]
    pub fn combine(&mut self, m: f64, other: &Expr) {
        if m == 0.0 {
            return;
        }
        self.terms.reserve(other.terms.len());
        if m == 1.0 {
            self.terms.extend(other.terms.iter().cloned());
            self.constant += other.constant;
        } else {
            self.terms
                .extend(other.terms.iter().map(|(var, coeff)| (var.clone(), coeff * m)));
            self.constant += m * other.constant;
        }
    }

    /// `self += m * self`, evaluated against a snapshot of the current terms.
    pub fn combine_self(&mut self, m: f64) {
        let snapshot = Expr {
            constant: self.constant,
            terms: self.terms.clone(),
            relation: None,
        };
        self.absorb(m, snapshot);
    }

    /// Owned form of [`Expr::combine`]; reuses the term buffer when unscaled.
    #[allow(clippy::float_cmp)]
    pub(crate) fn absorb(&mut self, m: f64, other: Expr) {
        if m == 0.0 {
            return;
        }
        if m == 1.0 {
            if self.terms.is_empty() {
                self.terms = other.terms;
            } else {
                self.terms.extend(other.terms);
            }
            self.constant += other.constant;
        } else {
            self.terms
                .extend(other.terms.into_iter().map(|(var, coeff)| (var, coeff * m)));
            self.constant += m * other.constant;
        }
    }

    /// Multiply the constant and every coefficient by `by`.
    pub(crate) fn scale_in_place(&mut self, by: f64) {
        self.constant *= by;
        for (_, coeff) in &mut self.terms {
            *coeff *= by;
        }
    }

    pub(crate) fn divide_in_place(&mut self, by: f64) {
        self.constant /= by;
        for (_, coeff) in &mut self.terms {
            *coeff /= by;
        }
    }

    /// Append `(var, coeff)` pairs in iteration order.
    pub fn add_terms<I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = (Var, f64)>,
    {
        self.terms.extend(terms);
    }

    pub fn add_term(&mut self, var: &Var, coeff: f64) {
        self.terms.push((var.clone(), coeff));
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    /// Drop all terms and the constant. The relation stays.
    pub fn clear(&mut self) {
        self.terms.clear();
        self.constant = 0.0;
    }

    pub fn remove_at(&mut self, index: usize) -> Result<(Var, f64), ExprError> {
        if index >= self.terms.len() {
            return Err(ExprError::TermOutOfRange {
                index,
                len: self.terms.len(),
            });
        }
        Ok(self.terms.remove(index))
    }

    /// Remove every term on `var` (identity match). Returns whether any was found.
    pub fn remove_var(&mut self, var: &Var) -> bool {
        let mut removed = false;
        let mut i = self.terms.len();
        while i > 0 {
            i -= 1;
            if self.terms[i].0.same_as(var) {
                self.terms.remove(i);
                removed = true;
            }
        }
        removed
    }

    // ── Derived views ───────────────────────────────────────

    /// Terms merged by variable index with zero sums dropped.
    ///
    /// Unbound terms are skipped. The stored terms are not modified.
    #[allow(clippy::float_cmp)]
    pub fn normalized_terms(&self) -> Vec<(VariableId, f64)> {
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var, coeff) in &self.terms {
            if *coeff == 0.0 {
                continue;
            }
            if let Some(id) = var.id() {
                *merged.entry(id).or_insert(0.0) += *coeff;
            }
        }
        merged.into_iter().filter(|(_, c)| *c != 0.0).collect()
    }

    /// `constant + Σ coeff * values[index]`; `None` if a term cannot be resolved.
    pub fn evaluate(&self, values: &[f64]) -> Option<f64> {
        self.terms.iter().try_fold(self.constant, |acc, (var, coeff)| {
            let value = values.get(var.index()?)?;
            Some(acc + coeff * value)
        })
    }

    // ── Relations ───────────────────────────────────────────

    /// Tag this expression with `sense rhs`. A relation can be set only once.
    pub fn set_relation(&mut self, sense: ComparisonSense, rhs: f64) -> Result<(), ExprError> {
        if let Some(existing) = self.relation {
            return Err(ExprError::AlreadyConstrained {
                sense: existing.sense,
            });
        }
        self.relation = Some(Relation::new(sense, rhs));
        Ok(())
    }

    pub fn relate(mut self, sense: ComparisonSense, rhs: f64) -> Result<Expr, ExprError> {
        self.set_relation(sense, rhs)?;
        Ok(self)
    }

    /// `self <= rhs`.
    pub fn leq(self, rhs: f64) -> Result<Expr, ExprError> {
        self.relate(ComparisonSense::LessEqual, rhs)
    }

    /// `self >= rhs`.
    pub fn geq(self, rhs: f64) -> Result<Expr, ExprError> {
        self.relate(ComparisonSense::GreaterEqual, rhs)
    }

    /// `self == rhs`.
    pub fn equals(self, rhs: f64) -> Result<Expr, ExprError> {
        self.relate(ComparisonSense::Equal, rhs)
    }

    /// Attach a relation to an expression known to be untagged.
    pub(crate) fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
        self
    }
}

impl fmt::Display for Expr {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (var, coeff) in &self.terms {
            let magnitude = coeff.abs();
            if first {
                if *coeff < 0.0 {
                    f.write_str("-")?;
                }
            } else if *coeff < 0.0 {
                f.write_str(" - ")?;
            } else {
                f.write_str(" + ")?;
            }
            if magnitude == 1.0 {
                write!(f, "{var}")?;
            } else {
                write!(f, "{magnitude} {var}")?;
            }
            first = false;
        }
        if first {
            write!(f, "{}", self.constant)?;
        } else if self.constant > 0.0 {
            write!(f, " + {}", self.constant)?;
        } else if self.constant < 0.0 {
            write!(f, " - {}", -self.constant)?;
        }
        if let Some(relation) = self.relation {
            write!(f, " {} {}", relation.sense.symbol(), relation.rhs)?;
        }
        Ok(())
    }
}
