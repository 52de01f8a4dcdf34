use crate::error::Result;
use chrono::Local;
use image::{DynamicImage, GenericImageView};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// Folder used when no output path is given.
pub const DEFAULT_OUTPUT_FOLDER: &str = "test_outputs";

/**
    Reads and decodes the reference image at `path`.
*/
pub fn read_reference<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let image = image::open(path.as_ref())?;
    tracing::info!(
        path = %path.as_ref().display(),
        width = image.width(),
        height = image.height(),
        "reference loaded"
    );
    Ok(image)
}

/// `<local date>_<local time>_output.png`, e.g. `20240131_235959_output.png`
pub fn default_file_name() -> String {
    format!("{}_output.png", Local::now().format("%Y%m%d_%H%M%S"))
}

/**
    Resolves where the drawing gets written and makes sure the parent folder exists.

    An explicit path is used as is, otherwise a timestamped file inside `folder`.
*/
pub fn prepare_output_path(explicit: Option<&Path>, folder: &Path) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => folder.join(default_file_name()),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            create_dir_all(parent)?;
        }
    }

    Ok(path)
}

#[test]
fn test_default_file_name() {
    let name = default_file_name();
    let stamp = name.strip_suffix("_output.png").unwrap();
    let (date, time) = stamp.split_once('_').unwrap();

    assert_eq!(date.len(), 8);
    assert_eq!(time.len(), 6);
    assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));
    assert!(date.starts_with("20"));
}

#[test]
fn test_prepare_output_path_creates_folder() {
    let folder = std::env::temp_dir().join(format!("spiral-draw-test-{}", std::process::id()));
    let path = prepare_output_path(None, &folder.join("nested")).unwrap();

    assert!(folder.join("nested").is_dir());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

    let explicit = folder.join("explicit.png");
    assert_eq!(prepare_output_path(Some(&explicit), &folder).unwrap(), explicit);

    std::fs::remove_dir_all(&folder).unwrap();
}

#[test]
fn test_read_missing_reference() {
    assert!(read_reference("definitely/not/here.png").is_err());
}
