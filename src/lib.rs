//! Native library for reading and rendering [Himawari Standard
//! Data](https://www.data.jma.go.jp/mscweb/en/himawari89/space_segment/spsg_sample.html)
//! (HSD), the binary distribution format of the JMA Himawari-8/9 geostationary
//! weather satellites.
//!
//! A full-disk observation is distributed as a set of segment files (typically
//! ten), each a horizontal band of the image. Every segment begins with eleven
//! metadata blocks followed by a rectangular grid of 16-bit pixel counts. The
//! byte order of the file is declared inside the file itself, by a flag in the
//! first block.
//!
//! # Reading pixels
//!
//! Use a `Reader` to decode the header of one segment and read raw counts:
//!
//! ```
//! use std::io::Cursor;
//! use hsd::{Endian, Reader};
//!
//! let mut header = hsd::raw::Header::default();
//! header.data.number_of_columns = 2;
//! header.data.number_of_lines = 1;
//! let mut bytes = Vec::new();
//! header.write_to(&mut bytes, Endian::Little).unwrap();
//! bytes.extend([42, 0, 43, 0]);
//!
//! let mut reader = Reader::new(Cursor::new(bytes)).unwrap();
//! assert_eq!(2, reader.header().columns());
//! assert_eq!(42, reader.read_pixel().unwrap());
//! ```
//!
//! # Rendering an observation
//!
//! A `SegmentSet` collects the segments of one observation, and a `Renderer`
//! composes them into a grayscale raster:
//!
//! ```no_run
//! use hsd::{Renderer, SegmentSet};
//!
//! let segments = SegmentSet::from_paths(vec![
//!     "HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT",
//!     "HS_H09_20231031_1340_B02_FLDK_R10_S0210.DAT",
//! ]).unwrap();
//! let image = Renderer::new(8).render(segments).unwrap();
//! image.save("full-disk.png").unwrap();
//! ```
//!
//! The renderer reads each segment with a forward-only cursor, skipping past
//! the pixels the downsample stride never touches, so high downsample factors
//! never materialize the full grid in memory.

#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

pub mod raw;
pub mod utils;

mod endian;
mod error;
mod filename;
mod header;
mod reader;
mod render;
mod segment;

pub use crate::{
    endian::Endian,
    error::Error,
    filename::FileName,
    header::Header,
    reader::{PixelCursor, Pixels, Reader},
    render::Renderer,
    segment::SegmentSet,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
