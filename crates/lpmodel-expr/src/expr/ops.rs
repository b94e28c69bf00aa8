//! Operator overloads for [`Expr`] and [`Var`].
//!
//! Every binary operator produces a new expression and leaves its operands
//! untouched. The relation of the left operand, if any, is carried over;
//! the relation of the right operand is ignored.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::expr::core::Expr;
use crate::var::Var;

// ── Conversions ─────────────────────────────────────────────

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::from_constant(value)
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        let mut expr = Expr::new();
        expr.add_terms(std::iter::once((var, 1.0)));
        expr
    }
}

impl From<&Var> for Expr {
    fn from(var: &Var) -> Self {
        Expr::var(var)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

// ── Compound assignment ─────────────────────────────────────

impl<T: Into<Expr>> AddAssign<T> for Expr {
    fn add_assign(&mut self, rhs: T) {
        self.absorb(1.0, rhs.into());
    }
}

impl<T: Into<Expr>> SubAssign<T> for Expr {
    fn sub_assign(&mut self, rhs: T) {
        self.absorb(-1.0, rhs.into());
    }
}

impl MulAssign<f64> for Expr {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_in_place(rhs);
    }
}

impl DivAssign<f64> for Expr {
    fn div_assign(&mut self, rhs: f64) {
        self.divide_in_place(rhs);
    }
}

// ── Binary operators with an expression-like left operand ───

macro_rules! impl_expr_like_ops {
    ($lhs:ty, $to_expr:expr) => {
        impl<T: Into<Expr>> Add<T> for $lhs {
            type Output = Expr;

            fn add(self, rhs: T) -> Expr {
                let mut out: Expr = $to_expr(self);
                out += rhs;
                out
            }
        }

        impl<T: Into<Expr>> Sub<T> for $lhs {
            type Output = Expr;

            fn sub(self, rhs: T) -> Expr {
                let mut out: Expr = $to_expr(self);
                out -= rhs;
                out
            }
        }

        impl Mul<f64> for $lhs {
            type Output = Expr;

            fn mul(self, rhs: f64) -> Expr {
                let mut out: Expr = $to_expr(self);
                out *= rhs;
                out
            }
        }

        impl Div<f64> for $lhs {
            type Output = Expr;

            fn div(self, rhs: f64) -> Expr {
                let mut out: Expr = $to_expr(self);
                out /= rhs;
                out
            }
        }

        impl Neg for $lhs {
            type Output = Expr;

            fn neg(self) -> Expr {
                let mut out: Expr = $to_expr(self);
                out *= -1.0;
                out
            }
        }

        impl Add<$lhs> for f64 {
            type Output = Expr;

            fn add(self, rhs: $lhs) -> Expr {
                let mut out = Expr::from_constant(self);
                out += rhs;
                out
            }
        }

        impl Sub<$lhs> for f64 {
            type Output = Expr;

            fn sub(self, rhs: $lhs) -> Expr {
                let mut out = Expr::from_constant(self);
                out -= rhs;
                out
            }
        }

        impl Mul<$lhs> for f64 {
            type Output = Expr;

            fn mul(self, rhs: $lhs) -> Expr {
                let mut out: Expr = $to_expr(rhs);
                out *= self;
                out
            }
        }
    };
}

impl_expr_like_ops!(Expr, |e: Expr| e);
impl_expr_like_ops!(&Expr, |e: &Expr| e.clone());
impl_expr_like_ops!(Var, Expr::from);
impl_expr_like_ops!(&Var, Expr::var);

impl<T: Into<Expr>> Sum<T> for Expr {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Expr::new(), |mut acc, item| {
            acc += item;
            acc
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::expr::{ComparisonSense, Expr, ScalarRelation};
    use crate::var::{Var, VariableArena};

    fn pair() -> (VariableArena, Var, Var) {
        let mut arena = VariableArena::new();
        let x = arena.push("x", 0.0, 4.0, false);
        let y = arena.push("y", 1.0, 7.0, false);
        (arena, x, y)
    }

    #[test]
    fn addition_preserves_term_order_and_duplicates() {
        let (_arena, x, y) = pair();
        let e = &x + &y + &x;
        let order: Vec<_> = e.terms().iter().map(|(v, _)| v.index()).collect();
        assert_eq!(order, vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn operands_are_unchanged() {
        let (_arena, x, y) = pair();
        let a = Expr::var(&x) + 1.0;
        let b = Expr::term(&y, 2.0);
        let c = &a - &b;
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(c.len(), 2);
        assert_eq!(c.term_at(1).unwrap().1, -2.0);
        assert_eq!(c.constant(), 1.0);
    }

    #[test]
    fn scalar_on_the_left() {
        let (_arena, x, _) = pair();
        let e = 10.0 - 2.0 * &x;
        assert_eq!(e.constant(), 10.0);
        assert_eq!(e.term_at(0).unwrap().1, -2.0);

        let f = 1.0 + x.clone();
        assert_eq!(f.constant(), 1.0);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn scaling_and_division_touch_constant_and_coefficients() {
        let (_arena, x, y) = pair();
        let mut e = 2.0 * &x + 4.0 * &y + 6.0;
        e /= 2.0;
        assert_eq!(e.constant(), 3.0);
        assert_eq!(e.term_at(0).unwrap().1, 1.0);
        assert_eq!(e.term_at(1).unwrap().1, 2.0);

        e *= -1.0;
        assert_eq!(e.constant(), -3.0);

        let negated = -&e;
        assert_eq!(negated.constant(), 3.0);
    }

    #[test]
    fn division_by_zero_propagates_ieee_values() {
        let (_arena, x, _) = pair();
        let e = (Expr::var(&x) + 1.0) / 0.0;
        assert!(e.constant().is_infinite());
        assert!(e.term_at(0).unwrap().1.is_infinite());
    }

    #[test]
    fn in_place_ops_accept_any_operand() {
        let (_arena, x, y) = pair();
        let mut e = Expr::new();
        e += &x;
        e += y.clone();
        e -= 3.0;
        e += Expr::term(&x, 5.0);
        assert_eq!(e.len(), 3);
        assert_eq!(e.constant(), -3.0);
    }

    #[test]
    fn arithmetic_keeps_left_relation() {
        let (_arena, x, y) = pair();
        let tagged = x.leq(4.0);
        let shifted = tagged + &y;
        assert_eq!(
            shifted.relation().unwrap().sense,
            ComparisonSense::LessEqual
        );

        let untagged = Expr::var(&y) + x.geq(1.0);
        assert!(untagged.relation().is_none());
    }

    #[test]
    fn var_and_scalar_comparisons_mirror() {
        let (_arena, x, _) = pair();
        let direct = x.leq(5.0);
        let mirrored = 5.0_f64.geq(&x).unwrap();
        assert_eq!(direct, mirrored);

        let lower = 5.0_f64.leq(&x).unwrap();
        assert_eq!(lower.relation().unwrap().sense, ComparisonSense::GreaterEqual);
        assert_eq!(lower.relation().unwrap().rhs, 5.0);

        let eq = 2.0_f64.equals(Expr::var(&x) * 3.0).unwrap();
        assert_eq!(eq.relation().unwrap().sense, ComparisonSense::Equal);
    }

    #[test]
    fn scalar_comparison_rejects_tagged_expression() {
        let (_arena, x, _) = pair();
        assert!(6.0_f64.leq(x.geq(1.0)).is_err());
    }

    #[test]
    fn sum_folds_like_repeated_addition() {
        let (_arena, x, y) = pair();
        let summed: Expr = [&x, &y, &x].into_iter().sum();
        let manual = &x + &y + &x;
        assert_eq!(summed, manual);
    }
}
