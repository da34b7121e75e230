//! The generative image engine: point synthesis, layout, and rasterization.

use std::path::Path;

use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::engine::mode::GenerateMode;
use crate::engine::palette::{Color, Colormap};
use crate::engine::projection::Projection;
use crate::error::ArtError;
use crate::formula::Expr;

/// The float range swept for both formula inputs. Points are the cartesian
/// product of the range with itself.
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Sweep {
    pub fn values(&self) -> Vec<f64> {
        let mut out = Vec::new();
        if self.step <= 0.0 {
            return out;
        }
        let mut x = self.start;
        while x < self.stop {
            out.push(x);
            x += self.step;
        }
        out
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            start: -5.0,
            stop: 3.0,
            step: 0.01,
        }
    }
}

/// How plotted points are colored.
#[derive(Debug, Clone)]
pub enum Fill {
    /// Every point in one named color.
    Single(Color),
    /// Gradient sampled per point over the normalized horizontal data axis.
    Gradient(Colormap),
}

/// Layout and paint choices consumed by [`GenerativeImage::plot`].
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub projection: Projection,
    pub fill: Fill,
    pub background: Color,
    pub alpha: f64,
    pub spot_size: f64,
}

struct RenderPlan {
    /// Unit canvas position and color per point.
    points: Vec<(f64, f64, [u8; 3])>,
    background: [u8; 3],
    alpha: f64,
    spot_size: f64,
}

/// A single piece of art, from raw data to a saved raster.
///
/// `generate` fills the two data columns by sweeping the formulas. `plot`
/// projects and colors them. `save_png` rasterizes the result at a
/// depth-scaled resolution.
pub struct GenerativeImage {
    pub width: u32,
    pub height: u32,
    pub data1: Vec<f64>,
    pub data2: Vec<f64>,
    plan: Option<RenderPlan>,
}

impl GenerativeImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data1: Vec::new(),
            data2: Vec::new(),
            plan: None,
        }
    }

    /// Sweeps both formulas over the input grid and fills the data columns.
    ///
    /// Both formulas are evaluated at every point regardless of mode, so the
    /// RNG stream (and with it reproducibility per seed) does not depend on
    /// the mode drawn. The first non-finite result aborts the image.
    pub fn generate(
        &mut self,
        f1: &Expr,
        f2: &Expr,
        sweep: &Sweep,
        mode: GenerateMode,
        rng: &mut impl Rng,
    ) -> Result<(), ArtError> {
        let values = sweep.values();
        self.data1.clear();
        self.data2.clear();
        self.data1.reserve(values.len() * values.len());
        self.data2.reserve(values.len() * values.len());
        self.plan = None;

        let mut index = 0usize;
        for &x1 in &values {
            for &x2 in &values {
                let f1_value = f1.eval(x1, x2, rng)?;
                let f2_value = f2.eval(x1, x2, rng)?;
                let (d1, d2) = mode.assign(f1_value, f2_value, x1, x2, index as f64);
                self.data1.push(d1);
                self.data2.push(d2);
                index += 1;
            }
        }
        Ok(())
    }

    /// Projects the point cloud onto the unit canvas and assigns colors.
    pub fn plot(&mut self, options: &PlotOptions) -> Result<(), ArtError> {
        if self.data1.is_empty() {
            return Err(ArtError::EmptyPointCloud);
        }
        // data2 runs along the horizontal axis, data1 along the vertical.
        let horizontal = normalize(&self.data2);
        let vertical = normalize(&self.data1);

        let mut points = Vec::with_capacity(horizontal.len());
        for i in 0..horizontal.len() {
            let (px, py) = options.projection.to_canvas(horizontal[i], vertical[i]);
            let rgb = match &options.fill {
                Fill::Single(color) => color.rgb,
                Fill::Gradient(map) => map.sample(horizontal[i]),
            };
            points.push((px, py, rgb));
        }
        self.plan = Some(RenderPlan {
            points,
            background: options.background.rgb,
            alpha: options.alpha.clamp(0.0, 1.0),
            spot_size: options.spot_size,
        });
        Ok(())
    }

    /// Rasterizes the plotted points and writes a PNG.
    ///
    /// `depth` multiplies the base canvas size, so the same plot saved at
    /// depth 5 comes out at five times the configured resolution.
    pub fn save_png(&self, path: &Path, depth: u32) -> Result<(), ArtError> {
        let plan = self.plan.as_ref().ok_or(ArtError::MissingPlot)?;
        let depth = depth.max(1);
        let width = self.width.max(1) * depth;
        let height = self.height.max(1) * depth;

        let [r, g, b] = plan.background;
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0xff]));
        let radius = (plan.spot_size * f64::from(depth)).max(0.5);
        for &(px, py, rgb) in &plan.points {
            stamp(&mut canvas, px, py, radius, rgb, plan.alpha);
        }
        canvas.save(path)?;
        Ok(())
    }
}

impl Default for GenerativeImage {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

/// Rescales values linearly into `[0, 1]`. A constant column collapses to
/// the midline rather than dividing by zero.
fn normalize(values: &[f64]) -> Vec<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let span = max - min;
    if span <= 0.0 {
        return vec![0.5; values.len()];
    }
    values.iter().map(|v| (v - min) / span).collect()
}

/// Alpha-blends one filled spot onto the canvas. The unit y axis points up,
/// raster rows grow downward.
fn stamp(canvas: &mut RgbaImage, px: f64, py: f64, radius: f64, rgb: [u8; 3], alpha: f64) {
    let width = canvas.width();
    let height = canvas.height();
    let cx = px.clamp(0.0, 1.0) * f64::from(width - 1);
    let cy = (1.0 - py.clamp(0.0, 1.0)) * f64::from(height - 1);

    let x_lo = (cx - radius).floor().max(0.0) as u32;
    let x_hi = (cx + radius).ceil().min(f64::from(width - 1)) as u32;
    let y_lo = (cy - radius).floor().max(0.0) as u32;
    let y_hi = (cy + radius).ceil().min(f64::from(height - 1)) as u32;

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x, y);
            for channel in 0..3 {
                let blended = f64::from(pixel[channel]) * (1.0 - alpha)
                    + f64::from(rgb[channel]) * alpha;
                pixel[channel] = blended.round() as u8;
            }
        }
    }
}
