//! Load and store 1-D and 2-D floating point FITS images.
//!
//! [`from_image`] inspects a file, picks the pixel precision and rank it
//! finds there, and hands back a [`ImageDriver`] that hides both.

pub mod data;
pub mod settings;

pub use data::driver::{ImageDriver, PixelStats};
pub use data::error::{HduKind, ImageError};
pub use data::fits_io::{read_image_data, write_image};
pub use data::loader::from_image;
pub use data::model::{Dim1, Dim2, Image1D, Image2D, Pixel, PixelBuffer, Precision, Shape};
pub use settings::{Settings, SettingsError};
