//! Per-item transform pipeline.
//!
//! Stages, in the order a consumer runs them:
//! - **discovery**: find work items under the input root (producer side)
//! - **decode**: image container → per-channel pixel grids
//! - **filter**: box-blur each channel independently
//! - **encode**: re-interleave and persist under the output root
//! - **processor**: orchestrates decode → filter → encode per item

pub mod decode;
pub mod discovery;
pub mod encode;
pub mod filter;
pub mod grid;
pub mod processor;

// Re-exports for convenient access
pub use discovery::discover;
pub use filter::box_blur;
pub use grid::{Channel, PixelGrid, NUM_CHANNELS};
pub use processor::ItemProcessor;
