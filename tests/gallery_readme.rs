//! Delete and README behavior against a real filesystem.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use arabesque::config::ArabesqueConfig;
use arabesque::error::ArtError;
use arabesque::gallery::{delete_images, write_readme, DeleteSummary};
use arabesque::workflow::create_folders;

fn test_config(root: &Path) -> ArabesqueConfig {
    let mut config = ArabesqueConfig::default();
    config.output.directory = root.join("output").to_string_lossy().into_owned();
    config.readme.path = root.join("README.md").to_string_lossy().into_owned();
    create_folders(&config.output).expect("create folders");
    config
}

/// Drops a placeholder image whose mtime lies `age` in the past.
fn place_image(config: &ArabesqueConfig, name: &str, age: Duration) {
    let path = config.output.images_dir().join(name);
    fs::write(&path, b"webp bytes").expect("write image");
    let file = fs::File::options().write(true).open(&path).expect("open");
    file.set_modified(SystemTime::now() - age).expect("set mtime");
}

#[test]
fn delete_removes_image_and_sidecar() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    place_image(&config, "keeper.webp", Duration::ZERO);
    place_image(&config, "goner.webp", Duration::ZERO);
    let sidecar = config.output.data_dir().join("goner.json");
    fs::write(&sidecar, b"{}").expect("write sidecar");

    let summary = delete_images(&config.output, &["goner".to_string()]);

    assert_eq!(
        summary,
        DeleteSummary {
            removed: 1,
            missing: 0
        }
    );
    assert!(!config.output.images_dir().join("goner.webp").exists());
    assert!(!sidecar.exists());
    assert!(config.output.images_dir().join("keeper.webp").exists());
}

#[test]
fn deleting_missing_names_warns_but_never_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    place_image(&config, "real.webp", Duration::ZERO);

    let summary = delete_images(
        &config.output,
        &["ghost".to_string(), "real".to_string(), "phantom".to_string()],
    );

    assert_eq!(
        summary,
        DeleteSummary {
            removed: 1,
            missing: 2
        }
    );
}

#[test]
fn readme_features_only_the_latest_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    place_image(&config, "old.webp", Duration::from_secs(300));
    place_image(&config, "older.webp", Duration::from_secs(600));
    place_image(&config, "fresh.webp", Duration::from_secs(30));

    let count = write_readme(&config.output, Path::new(&config.readme.path), true)
        .expect("write readme");
    assert_eq!(count, 1);

    let content = fs::read_to_string(&config.readme.path).expect("read readme");
    assert!(content.starts_with("\n<h1 align='center'>Generative Art</h1>\n"));
    assert_eq!(content.matches("<img").count(), 1);
    assert!(content.contains("fresh.webp"));
    assert!(content.contains("width=\"350\""));
    assert!(!content.contains("older.webp"));
}

#[test]
fn readme_grid_lists_every_image_sorted_by_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    place_image(&config, "cherry.webp", Duration::from_secs(10));
    place_image(&config, "apple.webp", Duration::from_secs(20));
    place_image(&config, "banana.webp", Duration::from_secs(30));

    let count = write_readme(&config.output, Path::new(&config.readme.path), false)
        .expect("write readme");
    assert_eq!(count, 3);

    let content = fs::read_to_string(&config.readme.path).expect("read readme");
    assert_eq!(content.matches("<img").count(), 3);
    assert!(content.contains("grid-template-columns"));
    assert!(content.contains("width=\"150\""));

    let tag_lines = content
        .lines()
        .filter(|line| line.starts_with("  <img"))
        .count();
    assert_eq!(tag_lines, 3);

    let apple = content.find("apple.webp").expect("apple listed");
    let banana = content.find("banana.webp").expect("banana listed");
    let cherry = content.find("cherry.webp").expect("cherry listed");
    assert!(apple < banana && banana < cherry);
}

#[test]
fn readme_latest_fails_on_an_empty_gallery() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());

    let result = write_readme(&config.output, Path::new(&config.readme.path), true);
    assert!(matches!(result, Err(ArtError::EmptyGallery(_))));
}

#[test]
fn readme_grid_with_an_empty_gallery_writes_an_empty_div() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());

    let count = write_readme(&config.output, Path::new(&config.readme.path), false)
        .expect("write readme");
    assert_eq!(count, 0);

    // The div closes right after it opens, with no stray blank line.
    let content = fs::read_to_string(&config.readme.path).expect("read readme");
    assert_eq!(
        content,
        "\n<h1 align='center'>Generative Art</h1>\n\
         <div style=\"display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 10px;\" align=\"center\">\n\
         </div>\n"
    );
}
