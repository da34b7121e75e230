//! The generation pipeline: output folders, the batch loop, WEBP
//! conversion, and run metadata.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::{ArabesqueConfig, OutputConfig};
use crate::engine::{
    palette, Colormap, Fill, GenerateMode, GenerativeImage, PlotOptions, Projection,
};
use crate::error::ArtError;
use crate::formula::{Expr, FormulaPair, SYNTHESIS_DEPTH};

/// Caller knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub total: u32,
    pub single_color: bool,
    pub using_formula: bool,
    pub save_data: bool,
    pub seed: u64,
}

/// One finished image: the name it was saved under and the seed that made it.
#[derive(Debug, Clone)]
pub struct GenerationRecord {
    pub uuid: Uuid,
    pub seed: u64,
}

/// What a whole run produced.
#[derive(Debug)]
pub struct BatchSummary {
    pub requested: u32,
    pub records: Vec<GenerationRecord>,
}

impl BatchSummary {
    pub fn generated(&self) -> usize {
        self.records.len()
    }
}

/// JSON sidecar saved under the data folder when the caller asks for it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageSidecar {
    pub uuid: Uuid,
    pub seed: u64,
    pub formula_1: String,
    pub formula_2: String,
    pub mode: GenerateMode,
    pub projection: Projection,
}

/// Creates the output folder tree. Safe to call repeatedly.
pub fn create_folders(output: &OutputConfig) -> Result<(), ArtError> {
    for dir in [
        output.root().to_path_buf(),
        output.data_dir(),
        output.images_dir(),
    ] {
        fs::create_dir_all(&dir).map_err(|err| ArtError::io(&dir, err))?;
    }
    Ok(())
}

/// Runs a whole generation batch.
///
/// Each image gets its own seed drawn from the run RNG, so a run is fully
/// reproducible from one `--seed` value. A failed image is logged and
/// skipped; the batch carries on. The uuid-to-seed map of everything that
/// survived is flushed to the log at the end so any image can be traced back
/// to the seed that made it.
pub fn generate_batch(
    config: &ArabesqueConfig,
    options: &GenerateOptions,
) -> Result<BatchSummary, ArtError> {
    create_folders(&config.output)?;

    let mut run_rng = StdRng::seed_from_u64(options.seed);
    let pair = if options.using_formula {
        let pair = FormulaPair::pick(&mut run_rng);
        info!("using formula pair {} from the table", pair.index);
        Some(pair)
    } else {
        None
    };

    let mut records = Vec::new();
    for _ in 0..options.total {
        let uuid = Uuid::new_v4();
        let image_seed = run_rng.gen::<u64>();
        match generate_one(config, options, pair.as_ref(), uuid, image_seed) {
            Ok(record) => records.push(record),
            Err(err) => error!("error generating image {uuid}: {err}"),
        }
    }

    for record in &records {
        info!("UUID: {} - Seed: {}", record.uuid, record.seed);
    }

    Ok(BatchSummary {
        requested: options.total,
        records,
    })
}

fn generate_one(
    config: &ArabesqueConfig,
    options: &GenerateOptions,
    pair: Option<&FormulaPair>,
    uuid: Uuid,
    seed: u64,
) -> Result<GenerationRecord, ArtError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let (first, second) = match pair {
        Some(pair) => (pair.first.clone(), pair.second.clone()),
        None => (
            Expr::synthesize(&mut rng, SYNTHESIS_DEPTH),
            Expr::synthesize(&mut rng, SYNTHESIS_DEPTH),
        ),
    };
    let mode = GenerateMode::choose(&mut rng);
    let projection = Projection::choose(&mut rng);
    let fill = if options.single_color {
        Fill::Single(palette::pick(&mut rng))
    } else {
        Fill::Gradient(Colormap::random(&mut rng, 10))
    };
    let background = palette::lookup(&config.render.background)
        .ok_or_else(|| ArtError::UnknownColor(config.render.background.clone()))?;

    debug!("image {uuid}: seed {seed}, mode {mode:?}, projection {projection:?}");

    let mut image = GenerativeImage::new(config.render.width, config.render.height);
    image.generate(&first, &second, &config.sweep.sweep(), mode, &mut rng)?;
    image.plot(&PlotOptions {
        projection,
        fill,
        background,
        alpha: config.render.alpha,
        spot_size: config.render.spot_size,
    })?;

    let png_path = config.output.images_dir().join(format!("{uuid}.png"));
    image.save_png(&png_path, config.render.depth)?;

    let webp_path = png_path.with_extension("webp");
    convert_to_webp(&png_path, &webp_path)?;
    fs::remove_file(&png_path).map_err(|err| ArtError::io(&png_path, err))?;
    info!("generated image {}", webp_path.display());

    if options.save_data {
        let sidecar = ImageSidecar {
            uuid,
            seed,
            formula_1: first.to_string(),
            formula_2: second.to_string(),
            mode,
            projection,
        };
        let data_path = config.output.data_dir().join(format!("{uuid}.json"));
        let json = serde_json::to_string_pretty(&sidecar)?;
        fs::write(&data_path, json).map_err(|err| ArtError::io(&data_path, err))?;
    }

    Ok(GenerationRecord { uuid, seed })
}

/// Re-encodes a saved PNG as WEBP. The PNG itself is left for the caller to
/// remove once the conversion has succeeded.
fn convert_to_webp(png_path: &Path, webp_path: &Path) -> Result<(), ArtError> {
    let img = image::open(png_path)?;
    img.to_rgb8().save(webp_path)?;
    Ok(())
}
