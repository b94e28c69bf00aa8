//! Builder functions for summing many terms at once.

use crate::expr::core::Expr;
use crate::var::Var;

/// Sum of the given items, folded left to right with `+=`.
///
/// The result is identical to writing the additions out by hand: terms keep
/// their order and duplicates are not merged. An empty input gives an empty
/// expression.
pub fn quicksum<I, T>(items: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    let mut total = Expr::new();
    for item in items {
        total += item;
    }
    total
}

/// Sum of the variables for which `keep` returns true, in iteration order.
pub fn quicksum_if<'a, I, F>(vars: I, mut keep: F) -> Expr
where
    I: IntoIterator<Item = &'a Var>,
    F: FnMut(&Var) -> bool,
{
    let mut total = Expr::new();
    for var in vars {
        if keep(var) {
            total += var;
        }
    }
    total
}
