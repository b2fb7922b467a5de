//! Image decoding into per-channel pixel grids.
//!
//! The container codec is the `image` crate; this module only maps its
//! failures onto the pipeline's error taxonomy and forces the result into
//! the three-channel form the filter expects. Decoding is synchronous and
//! CPU-bound, so callers run it under `spawn_blocking`.

use std::path::Path;

use image::ImageReader;

use crate::error::PipelineError;

use super::grid::PixelGrid;

/// Decode the image at `path` into a three-channel pixel grid.
///
/// Failures to open or read the file are transient I/O errors; a file
/// that opens but does not parse as an image is a structural decode
/// error.
pub fn decode(path: &Path) -> Result<PixelGrid, PipelineError> {
    let reader = ImageReader::open(path)
        .map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let image = reader.decode().map_err(|e| PipelineError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Alpha is dropped and grayscale expanded; the pipeline always
    // carries exactly three channels.
    Ok(PixelGrid::from_rgb(&image.to_rgb8()))
}
