//! Re-encoding filtered channels into an image container on disk.

use std::path::Path;

use crate::error::PipelineError;

use super::grid::PixelGrid;

/// Interleave the grid's channels and persist them at `path`.
///
/// The container format is chosen from the output extension, so an input
/// named `photo.png` is written back as PNG under the output root. An
/// unrecognized extension is an encode error; failing to write the bytes
/// is a transient I/O error.
pub fn encode(grid: &PixelGrid, path: &Path) -> Result<(), PipelineError> {
    let image = grid.to_rgb();

    image.save(path).map_err(|e| match e {
        image::ImageError::IoError(source) => PipelineError::Write {
            path: path.to_path_buf(),
            source,
        },
        other => PipelineError::Encode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}
