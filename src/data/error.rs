use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// HduKind – what the first data unit of a file turned out to be
// ---------------------------------------------------------------------------

/// Structural type of a header/data unit, named the way CFITSIO names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HduKind {
    Image,
    AsciiTable,
    BinaryTable,
    /// Anything the library could not classify.
    Unknown,
}

impl fmt::Display for HduKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HduKind::Image => write!(f, "IMAGE_HDU"),
            HduKind::AsciiTable => write!(f, "ASCII_TBL"),
            HduKind::BinaryTable => write!(f, "BINARY_TBL"),
            HduKind::Unknown => write!(f, "unknown HDU type"),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageError
// ---------------------------------------------------------------------------

/// Every way loading or storing an image can fail.
///
/// None of these are recoverable by the library: they describe data the rest
/// of the program cannot safely consume. Binaries report them and exit.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("expected IMAGE_HDU, got {0}")]
    NotAnImage(HduKind),

    #[error("unexpected data type: {}", describe_bitpix(.bitpix))]
    UnsupportedPrecision { bitpix: i64 },

    #[error("expected 1-dimensional or 2-dimensional data, got {0}-dimensional data")]
    UnsupportedRank(usize),

    #[error("image dimension {x} too small")]
    DimensionTooSmall { x: i64 },

    #[error("image dimension {x} too large")]
    DimensionTooLarge { x: i64 },

    #[error("image dimensions {x}x{y} too small")]
    DimensionsTooSmall { x: i64, y: i64 },

    #[error("image dimensions {x}x{y} too large")]
    DimensionsTooLarge { x: i64, y: i64 },

    #[error("pixel buffer is already allocated")]
    AlreadyAllocated,

    #[error("pixel buffer is not allocated")]
    Unallocated,

    #[error("expected {expected} pixels, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Fits(String),
}

// fitsio's error type is not guaranteed to be Send + Sync, so only its
// rendered message crosses into ImageError.
impl From<fitsio::errors::Error> for ImageError {
    fn from(err: fitsio::errors::Error) -> Self {
        ImageError::Fits(err.to_string())
    }
}

/// Human-readable description of a BITPIX tag: negative tags are IEEE floats,
/// the rest are integers.
fn describe_bitpix(bitpix: &i64) -> String {
    let bitpix = *bitpix;
    if bitpix < 0 {
        format!("{}-bit floats", -bitpix)
    } else {
        format!("{bitpix}-bit integers")
    }
}
