//! Plot projections from normalized data space onto the unit canvas.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Supported plot projections.
///
/// The map projections (`Aitoff`, `Hammer`, `Mollweide`) treat the
/// horizontal input as longitude over the full turn and the vertical input
/// as latitude, then scale the ellipse back into the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    Rectilinear,
    Polar,
    Aitoff,
    Hammer,
    Mollweide,
}

impl Projection {
    pub const ALL: [Projection; 5] = [
        Projection::Rectilinear,
        Projection::Polar,
        Projection::Aitoff,
        Projection::Hammer,
        Projection::Mollweide,
    ];

    /// Draws one projection at random.
    pub fn choose(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Maps a normalized point `(u, v)` in `[0, 1]^2` to unit canvas
    /// coordinates, `(0, 0)` bottom-left.
    pub fn to_canvas(&self, u: f64, v: f64) -> (f64, f64) {
        match self {
            Projection::Rectilinear => (u, v),
            Projection::Polar => {
                let theta = u * 2.0 * PI;
                let r = v;
                (0.5 + 0.5 * r * theta.cos(), 0.5 + 0.5 * r * theta.sin())
            }
            Projection::Aitoff => {
                let (lambda, phi) = lonlat(u, v);
                let alpha = (phi.cos() * (lambda / 2.0).cos()).clamp(-1.0, 1.0).acos();
                let sinc = if alpha.abs() < 1e-12 {
                    1.0
                } else {
                    alpha.sin() / alpha
                };
                let x = 2.0 * phi.cos() * (lambda / 2.0).sin() / sinc;
                let y = phi.sin() / sinc;
                (0.5 + x / (2.0 * PI), 0.5 + y / PI)
            }
            Projection::Hammer => {
                let (lambda, phi) = lonlat(u, v);
                let d = (1.0 + phi.cos() * (lambda / 2.0).cos()).sqrt();
                let x = 2.0 * SQRT_2 * phi.cos() * (lambda / 2.0).sin() / d;
                let y = SQRT_2 * phi.sin() / d;
                ellipse_to_canvas(x, y)
            }
            Projection::Mollweide => {
                let (lambda, phi) = lonlat(u, v);
                let theta = mollweide_theta(phi);
                let x = 2.0 * SQRT_2 / PI * lambda * theta.cos();
                let y = SQRT_2 * theta.sin();
                ellipse_to_canvas(x, y)
            }
        }
    }
}

fn lonlat(u: f64, v: f64) -> (f64, f64) {
    ((u - 0.5) * 2.0 * PI, (v - 0.5) * PI)
}

fn ellipse_to_canvas(x: f64, y: f64) -> (f64, f64) {
    (0.5 + x / (4.0 * SQRT_2), 0.5 + y / (2.0 * SQRT_2))
}

/// Solves `2t + sin(2t) = pi * sin(phi)` for the Mollweide parameter.
///
/// The Newton denominator vanishes at the poles, so latitudes within a hair
/// of them take the closed-form answer directly.
fn mollweide_theta(phi: f64) -> f64 {
    if FRAC_PI_2 - phi.abs() < 1e-9 {
        return phi.signum() * FRAC_PI_2;
    }
    let target = PI * phi.sin();
    let mut theta = phi;
    for _ in 0..50 {
        let residual = 2.0 * theta + (2.0 * theta).sin() - target;
        if residual.abs() < 1e-10 {
            break;
        }
        let slope = 2.0 + 2.0 * (2.0 * theta).cos();
        if slope.abs() < 1e-12 {
            break;
        }
        theta = (theta - residual / slope).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
    theta
}
