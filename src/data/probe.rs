use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::FitsFile;

use super::error::{HduKind, ImageError};
use super::model::{Dim1, Dim2};

/// Flat buffer indices are carried in a signed 32-bit integer downstream,
/// so every image must have strictly fewer elements than this.
pub const MAX_PIXELS: i64 = i32::MAX as i64;

// ---------------------------------------------------------------------------
// Raw header values
// ---------------------------------------------------------------------------

/// The metadata of the selected unit that decides how it gets loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    pub kind: HduKind,
    /// BITPIX keyword; 0 when the unit is not an image.
    pub bitpix: i64,
    /// NAXISn values in FITS order (NAXIS1 first).
    pub naxes: Vec<i64>,
}

impl ImageHeader {
    pub fn naxis(&self) -> usize {
        self.naxes.len()
    }
}

/// Read kind, BITPIX and axis extents of `hdu`.
pub fn read_header(file: &mut FitsFile, hdu: &FitsHdu) -> Result<ImageHeader, ImageError> {
    match &hdu.info {
        HduInfo::ImageInfo { shape, .. } => {
            let bitpix: i64 = hdu.read_key(file, "BITPIX")?;
            // fitsio reports the shape slowest axis first
            let naxes = shape.iter().rev().map(|&n| n as i64).collect();
            Ok(ImageHeader {
                kind: HduKind::Image,
                bitpix,
                naxes,
            })
        }
        HduInfo::TableInfo { .. } => {
            let xtension: String = hdu.read_key(file, "XTENSION")?;
            let kind = match xtension.trim() {
                "TABLE" => HduKind::AsciiTable,
                "BINTABLE" => HduKind::BinaryTable,
                _ => HduKind::Unknown,
            };
            Ok(ImageHeader {
                kind,
                bitpix: 0,
                naxes: Vec::new(),
            })
        }
        _ => Ok(ImageHeader {
            kind: HduKind::Unknown,
            bitpix: 0,
            naxes: Vec::new(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// Only image units carry pixels.
pub fn check_kind(kind: HduKind) -> Result<(), ImageError> {
    match kind {
        HduKind::Image => Ok(()),
        other => Err(ImageError::NotAnImage(other)),
    }
}

/// Validated rank together with its extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    One(Dim1),
    Two(Dim2),
}

impl Rank {
    pub fn from_naxes(naxes: &[i64]) -> Result<Self, ImageError> {
        match naxes.len() {
            1 => verify_dim_1d(naxes[0]).map(Rank::One),
            2 => verify_dim_2d(naxes[0], naxes[1]).map(Rank::Two),
            other => Err(ImageError::UnsupportedRank(other)),
        }
    }
}

pub fn verify_dim_1d(x: i64) -> Result<Dim1, ImageError> {
    if x < 1 {
        return Err(ImageError::DimensionTooSmall { x });
    }
    if x >= MAX_PIXELS {
        return Err(ImageError::DimensionTooLarge { x });
    }
    Ok(Dim1 { x: x as usize })
}

pub fn verify_dim_2d(x: i64, y: i64) -> Result<Dim2, ImageError> {
    if x < 1 || y < 1 {
        return Err(ImageError::DimensionsTooSmall { x, y });
    }
    if x.saturating_mul(y) >= MAX_PIXELS {
        return Err(ImageError::DimensionsTooLarge { x, y });
    }
    Ok(Dim2 {
        x: x as usize,
        y: y as usize,
    })
}
