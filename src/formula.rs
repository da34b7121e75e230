//! Formula pairs and the expression grammar they are written in.
//!
//! Every image starts from two expressions, one per plot axis. An expression
//! is a closed tree over the sweep inputs `x` and `y`: constants, a handful
//! of unary functions, the four arithmetic operators, integer powers, and a
//! `Rand` coefficient that draws a fresh uniform value from the image RNG on
//! every evaluation. The hand-written table below ships five pairs; callers
//! that want endless variety synthesize random trees instead.

use std::fmt;

use rand::Rng;

use crate::error::ArtError;

/// Tree depth used when synthesizing random expressions.
pub const SYNTHESIS_DEPTH: u32 = 3;

/// One node of a formula expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Pi,
    /// First sweep input.
    X,
    /// Second sweep input.
    Y,
    /// Uniform draw from [-1, 1) taken at evaluation time.
    Rand,
    Neg(Box<Expr>),
    Abs(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Exp(Box<Expr>),
    Pow(Box<Expr>, i32),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn num(value: f64) -> Expr {
        Expr::Const(value)
    }

    pub fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }

    pub fn abs(self) -> Expr {
        Expr::Abs(Box::new(self))
    }

    pub fn sin(self) -> Expr {
        Expr::Sin(Box::new(self))
    }

    pub fn cos(self) -> Expr {
        Expr::Cos(Box::new(self))
    }

    pub fn exp(self) -> Expr {
        Expr::Exp(Box::new(self))
    }

    pub fn pow(self, exponent: i32) -> Expr {
        Expr::Pow(Box::new(self), exponent)
    }

    pub fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs))
    }

    pub fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }

    pub fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }

    pub fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs))
    }

    /// Evaluates the tree at one sweep point.
    ///
    /// Every node result is checked: the first NaN or infinity anywhere in
    /// the tree aborts evaluation with [`ArtError::NonFinite`] instead of
    /// leaking into the point cloud.
    pub fn eval(&self, x: f64, y: f64, rng: &mut impl Rng) -> Result<f64, ArtError> {
        let value = match self {
            Expr::Const(v) => *v,
            Expr::Pi => std::f64::consts::PI,
            Expr::X => x,
            Expr::Y => y,
            Expr::Rand => rng.gen_range(-1.0..1.0),
            Expr::Neg(e) => -e.eval(x, y, rng)?,
            Expr::Abs(e) => e.eval(x, y, rng)?.abs(),
            Expr::Sin(e) => e.eval(x, y, rng)?.sin(),
            Expr::Cos(e) => e.eval(x, y, rng)?.cos(),
            Expr::Exp(e) => e.eval(x, y, rng)?.exp(),
            Expr::Pow(e, n) => e.eval(x, y, rng)?.powi(*n),
            Expr::Add(a, b) => a.eval(x, y, rng)? + b.eval(x, y, rng)?,
            Expr::Sub(a, b) => a.eval(x, y, rng)? - b.eval(x, y, rng)?,
            Expr::Mul(a, b) => a.eval(x, y, rng)? * b.eval(x, y, rng)?,
            Expr::Div(a, b) => a.eval(x, y, rng)? / b.eval(x, y, rng)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ArtError::NonFinite { x, y })
        }
    }

    /// Builds a random expression tree seeded by `rng`.
    ///
    /// The result always carries exactly one `Rand` coefficient up front, so
    /// repeated evaluations of the same tree still vary. Synthesis sticks to
    /// bounded operators (no `exp`, no division), which keeps every tree
    /// finite over any finite sweep.
    pub fn synthesize(rng: &mut impl Rng, depth: u32) -> Expr {
        Expr::Rand
            .mul(random_node(rng, depth))
            .add(random_node(rng, depth.saturating_sub(1)))
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(..) => 3,
            Expr::Pow(..) => 4,
            _ => 5,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        let wrap = self.precedence() < parent;
        if wrap {
            write!(f, "(")?;
        }
        match self {
            Expr::Const(v) => write!(f, "{v}")?,
            Expr::Pi => write!(f, "pi")?,
            Expr::X => write!(f, "x")?,
            Expr::Y => write!(f, "y")?,
            Expr::Rand => write!(f, "rand")?,
            Expr::Neg(e) => {
                write!(f, "-")?;
                e.fmt_prec(f, 3)?;
            }
            Expr::Abs(e) => {
                write!(f, "abs(")?;
                e.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
            Expr::Sin(e) => {
                write!(f, "sin(")?;
                e.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
            Expr::Cos(e) => {
                write!(f, "cos(")?;
                e.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
            Expr::Exp(e) => {
                write!(f, "exp(")?;
                e.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
            Expr::Pow(e, n) => {
                e.fmt_prec(f, 5)?;
                write!(f, "^{n}")?;
            }
            Expr::Add(a, b) => {
                a.fmt_prec(f, 1)?;
                write!(f, " + ")?;
                b.fmt_prec(f, 1)?;
            }
            Expr::Sub(a, b) => {
                a.fmt_prec(f, 1)?;
                write!(f, " - ")?;
                b.fmt_prec(f, 2)?;
            }
            Expr::Mul(a, b) => {
                a.fmt_prec(f, 2)?;
                write!(f, " * ")?;
                b.fmt_prec(f, 2)?;
            }
            Expr::Div(a, b) => {
                a.fmt_prec(f, 2)?;
                write!(f, " / ")?;
                b.fmt_prec(f, 3)?;
            }
        }
        if wrap {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

fn random_node(rng: &mut impl Rng, depth: u32) -> Expr {
    if depth == 0 {
        return match rng.gen_range(0..3) {
            0 => Expr::X,
            1 => Expr::Y,
            _ => Expr::Const(rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI)),
        };
    }
    match rng.gen_range(0..8) {
        0 => random_node(rng, depth - 1).sin(),
        1 => random_node(rng, depth - 1).cos(),
        2 => random_node(rng, depth - 1).abs(),
        3 => random_node(rng, depth - 1).neg(),
        4 => random_node(rng, depth - 1).pow(rng.gen_range(2..=3)),
        5 => random_node(rng, depth - 1).add(random_node(rng, depth - 1)),
        6 => random_node(rng, depth - 1).sub(random_node(rng, depth - 1)),
        _ => random_node(rng, depth - 1).mul(random_node(rng, depth - 1)),
    }
}

/// A hand-written pair of expressions, one per plot axis.
#[derive(Debug, Clone)]
pub struct FormulaPair {
    pub index: usize,
    pub first: Expr,
    pub second: Expr,
}

impl FormulaPair {
    fn new(index: usize, first: Expr, second: Expr) -> Self {
        Self {
            index,
            first,
            second,
        }
    }

    /// The full table of curated formula pairs.
    pub fn table() -> Vec<FormulaPair> {
        use Expr::{Pi, Rand, X, Y};
        vec![
            FormulaPair::new(
                0,
                Rand.mul(X.pow(2)).sub(Y.pow(2).sin()).add(Y.sub(X).abs()),
                Rand.mul(Y.pow(3))
                    .sub(X.pow(2).cos())
                    .add(Expr::num(2.0).mul(X)),
            ),
            FormulaPair::new(
                1,
                Rand.mul(X.sin()).sub(Y.cos().mul(X.sin())).sub(Pi),
                Rand.mul(Y.cos()).sub(X.sin().mul(X.cos())).add(Pi),
            ),
            FormulaPair::new(
                2,
                Rand.mul(X.pow(2)).add(Y.pow(2).sin()).add(X.sub(Y).abs()),
                Rand.mul(Y.pow(2)).sub(X.pow(2).cos()).add(Y.sub(X).abs()),
            ),
            FormulaPair::new(
                3,
                Rand.mul(X.sin().sub(X.sin().mul(Y.cos())))
                    .mul(X.sin().add(Y.exp()))
                    .add(X),
                Rand.mul(Y.sin().sub(Y.cos().mul(X.sin())))
                    .mul(Y.cos().add(X.exp()))
                    .add(Y),
            ),
            FormulaPair::new(
                4,
                Rand.mul(X.sin().sub(Y.cos()))
                    .mul(X.sub(Y).abs())
                    .add(X.cos()),
                Rand.mul(Y.sin().sub(X.cos()))
                    .mul(Y.sub(X).abs())
                    .add(Y.sin()),
            ),
        ]
    }

    /// Draws one pair from the table at random.
    pub fn pick(rng: &mut impl Rng) -> FormulaPair {
        let mut table = Self::table();
        table.swap_remove(rng.gen_range(0..table.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rand_coefficient_varies_between_evaluations() {
        let pair = &FormulaPair::table()[0];
        let mut rng = StdRng::seed_from_u64(7);
        let a = pair.first.eval(1.5, -0.5, &mut rng).expect("finite");
        let b = pair.first.eval(1.5, -0.5, &mut rng).expect("finite");
        assert_ne!(a, b);
    }

    #[test]
    fn evaluation_is_reproducible_for_equal_seeds() {
        let pair = &FormulaPair::table()[1];
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = pair.second.eval(0.25, 2.0, &mut rng_a).expect("finite");
        let b = pair.second.eval(0.25, 2.0, &mut rng_b).expect("finite");
        assert_eq!(a, b);
    }

    #[test]
    fn expressions_without_rand_are_deterministic() {
        let expr = Expr::X.sin().add(Expr::Y.pow(2));
        let mut rng = StdRng::seed_from_u64(3);
        let a = expr.eval(1.0, 2.0, &mut rng).expect("finite");
        let b = expr.eval(1.0, 2.0, &mut rng).expect("finite");
        assert_eq!(a, b);
        assert!((a - (1.0f64.sin() + 4.0)).abs() < 1e-12);
    }

    #[test]
    fn overflow_propagates_as_error() {
        let expr = Expr::num(1000.0).exp();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            expr.eval(0.0, 0.0, &mut rng),
            Err(ArtError::NonFinite { .. })
        ));
    }

    #[test]
    fn division_by_zero_propagates_as_error() {
        let expr = Expr::X.div(Expr::num(0.0));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            expr.eval(1.0, 0.0, &mut rng),
            Err(ArtError::NonFinite { .. })
        ));
    }

    #[test]
    fn table_holds_five_indexed_pairs() {
        let table = FormulaPair::table();
        assert_eq!(table.len(), 5);
        for (i, pair) in table.iter().enumerate() {
            assert_eq!(pair.index, i);
        }
    }

    #[test]
    fn pick_follows_the_rng_stream() {
        let mut rng_a = StdRng::seed_from_u64(11);
        let mut rng_b = StdRng::seed_from_u64(11);
        assert_eq!(
            FormulaPair::pick(&mut rng_a).index,
            FormulaPair::pick(&mut rng_b).index
        );
    }

    #[test]
    fn display_renders_readable_math() {
        let pair = &FormulaPair::table()[0];
        assert_eq!(
            pair.first.to_string(),
            "rand * x^2 - sin(y^2) + abs(y - x)"
        );
        let grouped = Expr::X.add(Expr::Y).mul(Expr::num(2.0));
        assert_eq!(grouped.to_string(), "(x + y) * 2");
    }

    #[test]
    fn synthesized_trees_stay_finite_over_a_sweep() {
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let expr = Expr::synthesize(&mut rng, SYNTHESIS_DEPTH);
            for i in -10..=10 {
                for j in -10..=10 {
                    let x = f64::from(i) * 0.5;
                    let y = f64::from(j) * 0.5;
                    expr.eval(x, y, &mut rng).expect("synthesized trees are finite");
                }
            }
        }
    }
}
