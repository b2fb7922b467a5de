//! In-memory pixel grids the filter kernel operates on.
//!
//! A decoded image is held as three same-shaped single-channel grids
//! rather than an interleaved buffer, so the kernel can treat each color
//! channel as an independent 2-D array of samples. Splitting and
//! re-interleaving happen at the codec boundary only.

use image::RgbImage;

/// Number of color channels carried through the pipeline.
pub const NUM_CHANNELS: usize = 3;

/// A single color channel: `height × width` 8-bit samples, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Channel {
    /// Create a zero-filled channel.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0; width * height],
        }
    }

    /// Create a channel from an existing row-major sample buffer.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != width * height`.
    pub fn from_samples(width: usize, height: usize, samples: Vec<u8>) -> Self {
        assert_eq!(
            samples.len(),
            width * height,
            "sample buffer does not match channel dimensions"
        );
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.samples[row * self.width + col]
    }

    /// Overwrite the sample at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.samples[row * self.width + col] = value;
    }
}

/// Three same-shaped channels (red, green, blue) for one image.
///
/// Built by decode, consumed by the filter (which produces new channels
/// rather than mutating these), then re-interleaved by encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub channels: [Channel; NUM_CHANNELS],
}

impl PixelGrid {
    /// Split an interleaved RGB image into per-channel grids.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;

        let channels = std::array::from_fn(|c| {
            let mut samples = Vec::with_capacity(width * height);
            for pixel in image.pixels() {
                samples.push(pixel.0[c]);
            }
            Channel::from_samples(width, height, samples)
        });

        Self { channels }
    }

    /// Re-interleave the channels into an RGB image for encoding.
    pub fn to_rgb(&self) -> RgbImage {
        let width = self.channels[0].width();
        let height = self.channels[0].height();

        let mut data = Vec::with_capacity(width * height * NUM_CHANNELS);
        for row in 0..height {
            for col in 0..width {
                for channel in &self.channels {
                    data.push(channel.get(row, col));
                }
            }
        }

        RgbImage::from_raw(width as u32, height as u32, data)
            .expect("interleaved buffer matches image dimensions")
    }

    pub fn width(&self) -> usize {
        self.channels[0].width()
    }

    pub fn height(&self) -> usize {
        self.channels[0].height()
    }
}
