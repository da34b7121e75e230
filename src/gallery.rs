//! Gallery upkeep: deleting generated images and rebuilding the README.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use tracing::{error, info, warn};

use crate::config::OutputConfig;
use crate::error::ArtError;

/// Outcome of a delete request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub removed: usize,
    pub missing: usize,
}

/// Removes generated images (and their data sidecars) by base name.
///
/// A missing file is only worth a warning; one bad name never aborts the
/// rest of the request.
pub fn delete_images(output: &OutputConfig, names: &[String]) -> DeleteSummary {
    let mut summary = DeleteSummary::default();
    for name in names {
        let image_path = output.images_dir().join(format!("{name}.webp"));
        if image_path.exists() {
            match fs::remove_file(&image_path) {
                Ok(()) => {
                    info!("deleted image file: {}", image_path.display());
                    summary.removed += 1;
                }
                Err(err) => error!("error deleting {}: {err}", image_path.display()),
            }
        } else {
            warn!("image file not found: {}", image_path.display());
            summary.missing += 1;
        }

        let data_path = output.data_dir().join(format!("{name}.json"));
        if data_path.exists() {
            match fs::remove_file(&data_path) {
                Ok(()) => info!("deleted data file: {}", data_path.display()),
                Err(err) => error!("error deleting {}: {err}", data_path.display()),
            }
        }
    }
    summary
}

/// Overwrites the README with a gallery of the images folder.
///
/// With `display_latest` the README features only the most recently
/// modified image, centered and large; otherwise every image lands in a
/// responsive grid, sorted by filename. Returns how many images were
/// embedded.
pub fn write_readme(
    output: &OutputConfig,
    readme_path: &Path,
    display_latest: bool,
) -> Result<usize, ArtError> {
    let images_dir = output.images_dir();
    let mut names = list_images(&images_dir)?;

    let (snippet, count) = if display_latest {
        let latest = newest_image(&images_dir, &names)?;
        let snippet = format!(
            "<div align=\"center\">\n  <img src=\"{dir}/{latest}\" alt=\"{latest}\" width=\"350\">\n</div>\n",
            dir = images_dir.display(),
        );
        (snippet, 1)
    } else {
        names.sort();
        let mut tags = String::new();
        for name in &names {
            tags.push_str(&format!(
                "  <img src=\"{dir}/{name}\" alt=\"{name}\" width=\"150\">\n",
                dir = images_dir.display(),
            ));
        }
        let snippet = format!(
            "<div style=\"display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 10px;\" align=\"center\">\n{tags}</div>\n"
        );
        (snippet, names.len())
    };

    let content = format!("\n<h1 align='center'>Generative Art</h1>\n{snippet}");
    fs::write(readme_path, &content).map_err(|err| ArtError::io(readme_path, err))?;
    info!("added {count} images to the gallery in {}", readme_path.display());
    Ok(count)
}

fn list_images(images_dir: &Path) -> Result<Vec<String>, ArtError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(images_dir).map_err(|err| ArtError::io(images_dir, err))? {
        let entry = entry.map_err(|err| ArtError::io(images_dir, err))?;
        let file_type = entry
            .file_type()
            .map_err(|err| ArtError::io(entry.path(), err))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Picks the most recently modified image, keeping the first on mtime ties.
fn newest_image(images_dir: &Path, names: &[String]) -> Result<String, ArtError> {
    let mut newest: Option<(SystemTime, &String)> = None;
    for name in names {
        let path = images_dir.join(name);
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|err| ArtError::io(&path, err))?;
        let replace = match &newest {
            Some((best, _)) => modified > *best,
            None => true,
        };
        if replace {
            newest = Some((modified, name));
        }
    }
    newest
        .map(|(_, name)| name.clone())
        .ok_or_else(|| ArtError::EmptyGallery(images_dir.to_path_buf()))
}
