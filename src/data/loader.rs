use std::fmt;
use std::path::Path;

use fitsio::hdu::FitsHdu;
use fitsio::FitsFile;

use crate::settings::Settings;

use super::driver::{Driver, ImageDriver};
use super::error::ImageError;
use super::fits_io::read_image_data;
use super::model::{Pixel, Precision, Shape};
use super::probe::{self, ImageHeader, Rank};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the image named by `settings.source`.
///
/// The pixel precision and rank are read from the file; the returned driver
/// owns a buffer of exactly that `(precision, rank)` pairing.
///
/// Supported data:
/// * the selected HDU must be an image (tables are rejected)
/// * `BITPIX` −32 (`f32`) or −64 (`f64`)
/// * `NAXIS` 1 or 2, fewer than 2^31 − 1 pixels in total
pub fn from_image(settings: Settings) -> Result<Box<dyn ImageDriver>, ImageError> {
    let (file, hdu, header) = open_image_for_reading(&settings.source)?;

    match Precision::from_bitpix(header.bitpix)? {
        Precision::F32 => from_image_helper::<f32>(settings, file, &hdu, &header.naxes),
        Precision::F64 => from_image_helper::<f64>(settings, file, &hdu, &header.naxes),
    }
}

/// Open `path` read-only and make sure the unit it selects holds an image.
///
/// The path may carry a CFITSIO extension selector (`frame.fits[1]`,
/// `frame.fits[EVENTS]`); without one the primary unit is used.
fn open_image_for_reading(path: &Path) -> Result<(FitsFile, FitsHdu, ImageHeader), ImageError> {
    let mut file = FitsFile::open(path)?;
    let hdu = file.current_hdu()?;
    let header = probe::read_header(&mut file, &hdu)?;
    probe::check_kind(header.kind)?;
    log::debug!(
        "{}: BITPIX {} NAXIS {} {:?}",
        path.display(),
        header.bitpix,
        header.naxis(),
        header.naxes
    );
    Ok((file, hdu, header))
}

fn from_image_helper<T: Pixel>(
    settings: Settings,
    file: FitsFile,
    hdu: &FitsHdu,
    naxes: &[i64],
) -> Result<Box<dyn ImageDriver>, ImageError> {
    match Rank::from_naxes(naxes)? {
        Rank::One(shape) => load::<T, _>(settings, file, hdu, shape),
        Rank::Two(shape) => load::<T, _>(settings, file, hdu, shape),
    }
}

fn load<T: Pixel, S: Shape + fmt::Display>(
    settings: Settings,
    file: FitsFile,
    hdu: &FitsHdu,
    shape: S,
) -> Result<Box<dyn ImageDriver>, ImageError> {
    let img = read_image_data::<T, S>(file, hdu, shape)?;
    log::info!(
        "loaded {} image of {} from {}",
        shape,
        T::PRECISION,
        settings.source.display()
    );
    Ok(Box::new(Driver::new(settings, img)))
}
