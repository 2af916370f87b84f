use std::fmt;
use std::path::Path;

use crate::settings::Settings;

use super::error::ImageError;
use super::fits_io;
use super::model::{Pixel, PixelBuffer, Shape};

// ---------------------------------------------------------------------------
// PixelStats – summary over defined pixels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStats {
    pub defined: usize,
    pub undefined: usize,
    /// `None` when every pixel is undefined.
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl PixelStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let mut stats = PixelStats {
            defined: 0,
            undefined: 0,
            min: None,
            max: None,
            mean: None,
        };
        let mut sum = 0.0;
        for v in values {
            if v.is_nan() {
                stats.undefined += 1;
                continue;
            }
            stats.defined += 1;
            sum += v;
            stats.min = Some(stats.min.map_or(v, |m| m.min(v)));
            stats.max = Some(stats.max.map_or(v, |m| m.max(v)));
        }
        if stats.defined > 0 {
            stats.mean = Some(sum / stats.defined as f64);
        }
        stats
    }
}

impl fmt::Display for PixelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max, self.mean) {
            (Some(min), Some(max), Some(mean)) => write!(
                f,
                "min {min:.6e}  max {max:.6e}  mean {mean:.6e}  ({} undefined)",
                self.undefined
            ),
            _ => write!(f, "all {} pixels undefined", self.undefined),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageDriver – the type-erased handle
// ---------------------------------------------------------------------------

/// A loaded image whose pixel precision and rank were decided at load time.
///
/// Obtained from [`crate::data::loader::from_image`]; there is no other way
/// to construct one.
pub trait ImageDriver {
    fn settings(&self) -> &Settings;

    /// Axis lengths in FITS order (NAXIS1 first).
    fn extents(&self) -> Vec<usize>;

    fn size(&self) -> usize;

    /// `"32-bit floats"` or `"64-bit floats"`.
    fn type_descr(&self) -> &'static str;

    /// Pixel at flat `index` widened to `f64`; NaN for undefined pixels.
    fn value_at(&self, index: usize) -> Option<f64>;

    fn stats(&self) -> PixelStats;

    /// Store the image in a new FITS file with its original precision.
    fn write_image(&self, path: &Path) -> Result<(), ImageError>;
}

/// Concrete driver for one `(precision, rank)` pairing.
pub(crate) struct Driver<T, S> {
    settings: Settings,
    image: PixelBuffer<T, S>,
}

impl<T: Pixel, S: Shape> Driver<T, S> {
    pub(crate) fn new(settings: Settings, image: PixelBuffer<T, S>) -> Self {
        Self { settings, image }
    }
}

impl<T: Pixel, S: Shape> ImageDriver for Driver<T, S> {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn extents(&self) -> Vec<usize> {
        self.image.shape().extents()
    }

    fn size(&self) -> usize {
        self.image.size()
    }

    fn type_descr(&self) -> &'static str {
        T::PRECISION.descr()
    }

    fn value_at(&self, index: usize) -> Option<f64> {
        self.image.get(index).map(T::to_f64)
    }

    fn stats(&self) -> PixelStats {
        PixelStats::from_values(self.image.as_slice().iter().map(|v| v.to_f64()))
    }

    fn write_image(&self, path: &Path) -> Result<(), ImageError> {
        fits_io::write_image(path, &self.image)
    }
}
