//! Art engine - turns formula pairs into rasterized images.

pub mod image;
pub mod mode;
pub mod palette;
pub mod projection;

pub use self::image::{Fill, GenerativeImage, PlotOptions, Sweep};
pub use self::mode::GenerateMode;
pub use self::palette::{Color, Colormap};
pub use self::projection::Projection;
