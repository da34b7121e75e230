//! Arabesque - generative art from randomized mathematical formula pairs.
//!
//! Each image sweeps a pair of expression trees over a float grid and
//! rasterizes the projected point cloud into a WEBP gallery. A seed is
//! recorded per image so any piece can be regenerated.

pub mod config;
pub mod engine;
pub mod error;
pub mod formula;
pub mod gallery;
pub mod workflow;

pub use config::ArabesqueConfig;
pub use engine::GenerativeImage;
pub use error::ArtError;
pub use formula::{Expr, FormulaPair};
