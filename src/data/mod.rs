//! Data layer: pixel containers, header probing, FITS I/O and dispatch.
//!
//! Architecture:
//! ```text
//!   .fits (primary HDU)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  probe    │  HDU kind, BITPIX, NAXISn → Precision × Rank
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  match precision, match rank → read_image_data::<T, S>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ Driver<T, S>      │  owns PixelBuffer<T, S>, seen as dyn ImageDriver
//!   └──────────────────┘
//! ```

pub mod driver;
pub mod error;
pub mod fits_io;
pub mod loader;
pub mod model;
pub mod probe;
