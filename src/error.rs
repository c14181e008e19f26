//! Crate-specific errors.

use std::{io, str};
use thiserror::Error;

/// Crate-specific errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A block did not begin with the expected block number.
    ///
    /// The block numbers 1 through 11 serve as structural checkpoints while
    /// decoding the header.
    #[error("expected block number {expected}, got {got}")]
    BlockOrder {
        /// The block number that should have been next.
        expected: u8,
        /// The block number that was actually read.
        got: u8,
    },

    /// The caller's cancellation flag was set.
    ///
    /// Cancellation is observed at segment boundaries only.
    #[error("render cancelled")]
    Cancelled,

    /// Two segments claim the same sequence number.
    #[error("duplicate segment {0}")]
    DuplicateSegment(u8),

    /// A pixel read was attempted after the last pixel of the grid.
    #[error("read past the end of the pixel grid")]
    Eof,

    /// A segment disagrees with the first segment on a header field that must
    /// be identical across an observation.
    #[error("segment {segment} disagrees on {field}")]
    InconsistentSegments {
        /// The name of the mismatched field.
        field: &'static str,
        /// The sequence number of the offending segment.
        segment: u8,
    },

    /// The downsample factor was zero.
    #[error("downsample factor must be at least 1")]
    InvalidDownsample,

    /// A file name did not follow the HSD naming convention.
    #[error("invalid HSD file name: {0}")]
    InvalidFileName(String),

    /// The segment sequence number falls outside `1..=segment_total_number`.
    #[error("segment sequence number {sequence} is not in 1..={total}")]
    InvalidSegmentNumber {
        /// The sequence number of this segment.
        sequence: u8,
        /// The declared total number of segments.
        total: u8,
    },

    /// The valid bits per pixel exceed the stored bits per pixel.
    #[error("valid bits per pixel ({valid}) exceed stored bits per pixel ({stored})")]
    InvalidValidBits {
        /// The declared number of meaningful bits.
        valid: u16,
        /// The declared storage width.
        stored: u16,
    },

    /// Wraps `std::io::Error`.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A sequence number in `1..=segment_total_number` has no segment.
    #[error("missing segment {0}")]
    MissingSegment(u8),

    /// The stream ended in the middle of a header field.
    #[error("unexpected end of stream while decoding the header")]
    UnexpectedEof,

    /// The stored bits per pixel are not supported.
    ///
    /// Only 16-bit pixel data can be read; other widths are parsed into the
    /// header but cannot be cursored over.
    #[error("unsupported bits per pixel: {0}")]
    UnsupportedPixelWidth(u16),

    /// Wraps `std::str::Utf8Error`.
    #[error(transparent)]
    Utf8(#[from] str::Utf8Error),
}
