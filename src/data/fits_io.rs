use std::path::Path;

use fitsio::hdu::FitsHdu;
use fitsio::images::ImageDescription;
use fitsio::FitsFile;

use super::error::ImageError;
use super::model::{Pixel, PixelBuffer, Shape};

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Read the full pixel array of `hdu` into a freshly allocated buffer.
///
/// `shape` must already have passed the probe's dimension gates. Takes the
/// file by value: the handle is closed when this returns, on success or
/// failure.
pub fn read_image_data<T: Pixel, S: Shape>(
    mut file: FitsFile,
    hdu: &FitsHdu,
    shape: S,
) -> Result<PixelBuffer<T, S>, ImageError> {
    let pixels = T::read_all(hdu, &mut file)?;

    let mut img = PixelBuffer::new(shape);
    img.alloc_from(pixels)?;

    // Undefined pixels already hold the NaN sentinel; only note how many.
    let undefined = img.as_slice().iter().filter(|v| v.is_undefined()).count();
    if undefined > 0 {
        log::debug!("{undefined} of {} pixels are undefined", img.size());
    }

    drop(file);
    Ok(img)
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Write `img` as the primary image of a new FITS file at `path`.
///
/// Never overwrites: an existing `path` is an error. Undefined pixels are
/// written as the NaN sentinel of `T`.
pub fn write_image<T: Pixel, S: Shape>(
    path: &Path,
    img: &PixelBuffer<T, S>,
) -> Result<(), ImageError> {
    if !img.is_allocated() {
        return Err(ImageError::Unallocated);
    }

    let dimensions = img.shape().row_major();
    let description = ImageDescription {
        data_type: T::PRECISION.image_type(),
        dimensions: &dimensions,
    };

    let mut file = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()?;
    let hdu = file.primary_hdu()?;
    T::write_all(&hdu, &mut file, img.as_slice())?;
    drop(file);

    log::info!(
        "wrote {:?} {} image to {}",
        img.shape().extents(),
        T::PRECISION,
        path.display()
    );
    Ok(())
}
