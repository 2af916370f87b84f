use std::fmt;

use fitsio::hdu::FitsHdu;
use fitsio::images::ImageType;
use fitsio::FitsFile;

use super::error::ImageError;

// ---------------------------------------------------------------------------
// Precision – the closed set of supported pixel types
// ---------------------------------------------------------------------------

/// Floating point storage precision of a FITS image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    F32,
    F64,
}

impl Precision {
    /// Map a BITPIX header value onto a supported precision.
    pub fn from_bitpix(bitpix: i64) -> Result<Self, ImageError> {
        match bitpix {
            -32 => Ok(Precision::F32),
            -64 => Ok(Precision::F64),
            other => Err(ImageError::UnsupportedPrecision { bitpix: other }),
        }
    }

    pub fn bitpix(self) -> i64 {
        match self {
            Precision::F32 => -32,
            Precision::F64 => -64,
        }
    }

    /// Storage type handed to the FITS library when creating an image.
    pub fn image_type(self) -> ImageType {
        match self {
            Precision::F32 => ImageType::Float,
            Precision::F64 => ImageType::Double,
        }
    }

    pub fn descr(self) -> &'static str {
        match self {
            Precision::F32 => "32-bit floats",
            Precision::F64 => "64-bit floats",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descr())
    }
}

// ---------------------------------------------------------------------------
// Pixel – element types a PixelBuffer can hold
// ---------------------------------------------------------------------------

/// A pixel type with a FITS storage tag and a NaN sentinel for undefined
/// pixels. Implemented for `f32` and `f64` only.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug + 'static {
    const PRECISION: Precision;

    /// Quiet NaN marking an undefined pixel.
    fn null_value() -> Self;

    fn is_undefined(self) -> bool;

    fn to_f64(self) -> f64;

    /// Read every pixel of the image unit `hdu` in one call.
    fn read_all(hdu: &FitsHdu, file: &mut FitsFile) -> Result<Vec<Self>, fitsio::errors::Error>;

    /// Write `data` as the full pixel array of `hdu` in one call.
    fn write_all(
        hdu: &FitsHdu,
        file: &mut FitsFile,
        data: &[Self],
    ) -> Result<(), fitsio::errors::Error>;
}

macro_rules! impl_pixel {
    ($ty:ty, $precision:expr) => {
        impl Pixel for $ty {
            const PRECISION: Precision = $precision;

            fn null_value() -> Self {
                <$ty>::NAN
            }

            fn is_undefined(self) -> bool {
                self.is_nan()
            }

            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            fn read_all(
                hdu: &FitsHdu,
                file: &mut FitsFile,
            ) -> Result<Vec<Self>, fitsio::errors::Error> {
                hdu.read_image::<Vec<$ty>>(file)
            }

            fn write_all(
                hdu: &FitsHdu,
                file: &mut FitsFile,
                data: &[Self],
            ) -> Result<(), fitsio::errors::Error> {
                hdu.write_image(file, data)
            }
        }
    };
}

impl_pixel!(f32, Precision::F32);
impl_pixel!(f64, Precision::F64);

// ---------------------------------------------------------------------------
// Shape – 1-D and 2-D extents
// ---------------------------------------------------------------------------

/// Extents of an image of fixed rank.
pub trait Shape: Copy + PartialEq + fmt::Debug + 'static {
    const RANK: usize;

    /// Number of elements, `x` or `x*y`, saturating at `usize::MAX`.
    fn size(&self) -> usize;

    /// Axis lengths in FITS order (NAXIS1 first).
    fn extents(&self) -> Vec<usize>;

    /// Axis lengths in the row-major order `fitsio` expects (slowest axis
    /// first), i.e. [`Shape::extents`] reversed.
    fn row_major(&self) -> Vec<usize> {
        let mut dims = self.extents();
        dims.reverse();
        dims
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dim1 {
    pub x: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dim2 {
    pub x: usize,
    pub y: usize,
}

impl Shape for Dim1 {
    const RANK: usize = 1;

    fn size(&self) -> usize {
        self.x
    }

    fn extents(&self) -> Vec<usize> {
        vec![self.x]
    }
}

impl Shape for Dim2 {
    const RANK: usize = 2;

    fn size(&self) -> usize {
        self.x.saturating_mul(self.y)
    }

    fn extents(&self) -> Vec<usize> {
        vec![self.x, self.y]
    }
}

impl fmt::Display for Dim1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.x)
    }
}

impl fmt::Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// PixelBuffer – flat owned pixel storage
// ---------------------------------------------------------------------------

/// Flat pixel storage for an image of shape `S`.
///
/// Starts unallocated; storage is materialized exactly once, either zeroed by
/// [`PixelBuffer::alloc`] or from pixels read off disk by
/// [`PixelBuffer::alloc_from`]. 2-D data is stored with `x` varying fastest,
/// matching FITS.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T, S> {
    shape: S,
    data: Option<Box<[T]>>,
}

pub type Image1D<T> = PixelBuffer<T, Dim1>;
pub type Image2D<T> = PixelBuffer<T, Dim2>;

impl<T: Pixel, S: Shape> PixelBuffer<T, S> {
    /// Record the extents without allocating.
    pub fn new(shape: S) -> Self {
        Self { shape, data: None }
    }

    /// Build an allocated buffer around existing pixels.
    pub fn from_vec(shape: S, data: Vec<T>) -> Result<Self, ImageError> {
        let mut buffer = Self::new(shape);
        buffer.alloc_from(data)?;
        Ok(buffer)
    }

    /// Allocate `size()` zeroed pixels.
    pub fn alloc(&mut self) -> Result<(), ImageError> {
        if self.data.is_some() {
            return Err(ImageError::AlreadyAllocated);
        }
        self.data = Some(vec![T::default(); self.size()].into_boxed_slice());
        Ok(())
    }

    /// Take ownership of `data` as this buffer's storage.
    pub fn alloc_from(&mut self, data: Vec<T>) -> Result<(), ImageError> {
        if self.data.is_some() {
            return Err(ImageError::AlreadyAllocated);
        }
        if data.len() != self.size() {
            return Err(ImageError::LengthMismatch {
                expected: self.size(),
                actual: data.len(),
            });
        }
        self.data = Some(data.into_boxed_slice());
        Ok(())
    }

    pub fn shape(&self) -> S {
        self.shape
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    pub fn is_allocated(&self) -> bool {
        self.data.is_some()
    }

    /// Pixels in storage order; empty while unallocated.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_deref_mut().unwrap_or(&mut [])
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).copied()
    }
}

impl<T: Pixel> Image2D<T> {
    /// Pixel at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.shape.x || y >= self.shape.y {
            return None;
        }
        self.get(y * self.shape.x + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_unallocated() {
        let img: Image2D<f32> = PixelBuffer::new(Dim2 { x: 4, y: 3 });
        assert!(!img.is_allocated());
        assert_eq!(img.size(), 12);
        assert!(img.as_slice().is_empty());
    }

    #[test]
    fn test_alloc_sizes_buffer_exactly() {
        let mut img: Image1D<f64> = PixelBuffer::new(Dim1 { x: 7 });
        img.alloc().unwrap();
        assert!(img.is_allocated());
        assert_eq!(img.as_slice().len(), 7);
        assert!(img.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_double_alloc_is_rejected() {
        let mut img: Image2D<f32> = PixelBuffer::new(Dim2 { x: 2, y: 2 });
        img.alloc().unwrap();
        assert!(matches!(img.alloc(), Err(ImageError::AlreadyAllocated)));
        assert!(matches!(
            img.alloc_from(vec![0.0; 4]),
            Err(ImageError::AlreadyAllocated)
        ));
    }

    #[test]
    fn test_alloc_from_checks_length() {
        let mut img: Image2D<f32> = PixelBuffer::new(Dim2 { x: 3, y: 2 });
        let err = img.alloc_from(vec![1.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::LengthMismatch {
                expected: 6,
                actual: 5
            }
        ));
        assert!(!img.is_allocated());
    }

    #[test]
    fn test_at_indexes_x_fastest() {
        let data: Vec<f32> = (0..6).map(|v| v as f32).collect();
        let img = PixelBuffer::from_vec(Dim2 { x: 3, y: 2 }, data).unwrap();
        assert_eq!(img.at(0, 0), Some(0.0));
        assert_eq!(img.at(2, 0), Some(2.0));
        assert_eq!(img.at(0, 1), Some(3.0));
        assert_eq!(img.at(3, 0), None);
    }

    #[test]
    fn test_unvalidated_huge_shape_does_not_overflow() {
        let mut img: Image2D<f32> = PixelBuffer::new(Dim2 { x: usize::MAX, y: 2 });
        assert_eq!(img.size(), usize::MAX);
        assert!(matches!(
            img.alloc_from(vec![0.0; 4]),
            Err(ImageError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_row_major_reverses_extents() {
        let dim = Dim2 { x: 100, y: 50 };
        assert_eq!(dim.extents(), vec![100, 50]);
        assert_eq!(dim.row_major(), vec![50, 100]);
    }

    #[test]
    fn test_precision_from_bitpix() {
        assert_eq!(Precision::from_bitpix(-32).unwrap(), Precision::F32);
        assert_eq!(Precision::from_bitpix(-64).unwrap(), Precision::F64);
        assert!(Precision::from_bitpix(32).is_err());
        assert!(Precision::from_bitpix(8).is_err());
        assert_eq!(<f64 as Pixel>::PRECISION.bitpix(), -64);
    }

    #[test]
    fn test_null_value_is_nan() {
        assert!(f32::null_value().is_undefined());
        assert!(f64::null_value().is_undefined());
        assert!(!1.5f32.is_undefined());
    }
}
