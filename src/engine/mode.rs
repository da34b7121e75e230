//! Generation modes: how evaluated samples land on the two data axes.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Assignment of formula outputs, sweep inputs, and the running point index
/// to the vertical (`data1`) and horizontal (`data2`) axes.
///
/// The naming reads `<data1> vs <data2>`: `F1VsX2` puts the first formula on
/// the vertical axis against the second sweep input on the horizontal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateMode {
    F1VsF2,
    F2VsF1,
    F1VsIndex,
    F2VsIndex,
    IndexVsF1,
    IndexVsF2,
    F1VsX1,
    F1VsX2,
    F2VsX1,
    F2VsX2,
    X1VsF1,
    X1VsF2,
    X2VsF1,
    X2VsF2,
}

impl GenerateMode {
    pub const ALL: [GenerateMode; 14] = [
        GenerateMode::F1VsF2,
        GenerateMode::F2VsF1,
        GenerateMode::F1VsIndex,
        GenerateMode::F2VsIndex,
        GenerateMode::IndexVsF1,
        GenerateMode::IndexVsF2,
        GenerateMode::F1VsX1,
        GenerateMode::F1VsX2,
        GenerateMode::F2VsX1,
        GenerateMode::F2VsX2,
        GenerateMode::X1VsF1,
        GenerateMode::X1VsF2,
        GenerateMode::X2VsF1,
        GenerateMode::X2VsF2,
    ];

    /// Draws one mode at random.
    pub fn choose(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Maps one evaluated sample onto `(data1, data2)`.
    pub fn assign(&self, f1: f64, f2: f64, x1: f64, x2: f64, index: f64) -> (f64, f64) {
        match self {
            GenerateMode::F1VsF2 => (f1, f2),
            GenerateMode::F2VsF1 => (f2, f1),
            GenerateMode::F1VsIndex => (f1, index),
            GenerateMode::F2VsIndex => (f2, index),
            GenerateMode::IndexVsF1 => (index, f1),
            GenerateMode::IndexVsF2 => (index, f2),
            GenerateMode::F1VsX1 => (f1, x1),
            GenerateMode::F1VsX2 => (f1, x2),
            GenerateMode::F2VsX1 => (f2, x1),
            GenerateMode::F2VsX2 => (f2, x2),
            GenerateMode::X1VsF1 => (x1, f1),
            GenerateMode::X1VsF2 => (x1, f2),
            GenerateMode::X2VsF1 => (x2, f1),
            GenerateMode::X2VsF2 => (x2, f2),
        }
    }
}
