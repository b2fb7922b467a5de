//! Box-blur averaging filter for a single channel.
//!
//! [`box_blur`] replaces each interior sample with the arithmetic mean of
//! its `window_size × window_size` neighborhood. Samples within
//! `window_size / 2` of any edge are copied through unchanged; there is
//! no clamping and no wraparound sampling. The function is pure: it never
//! mutates its input, so concurrent callers with distinct channels never
//! interfere.

use super::grid::Channel;

/// Apply a square averaging window to one channel, returning a new
/// channel of the same shape.
///
/// `window_size` must be odd; the configuration layer enforces odd sizes
/// of at least 3 before a run starts. Accumulation is in `f32`, truncated
/// on store.
///
/// When the channel is so small that no interior pixel exists (the window
/// overhangs every position), the entire grid counts as border and is
/// returned unchanged.
pub fn box_blur(input: &Channel, window_size: usize) -> Channel {
    debug_assert!(window_size % 2 == 1, "window size must be odd");

    let width = input.width();
    let height = input.height();
    let pad = window_size / 2;

    // Border copy also prefills the interior; interior samples are
    // overwritten below.
    let mut output = input.clone();

    if height <= 2 * pad || width <= 2 * pad {
        return output;
    }

    let norm = (window_size * window_size) as f32;
    for row in pad..height - pad {
        for col in pad..width - pad {
            let mut sum = 0.0f32;
            for k_row in row - pad..=row + pad {
                for k_col in col - pad..=col + pad {
                    sum += f32::from(input.get(k_row, k_col));
                }
            }
            output.set(row, col, (sum / norm) as u8);
        }
    }

    output
}
