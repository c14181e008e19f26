//! A [Header] describes one segment file of an HSD observation.
//!
//! A [Reader](crate::Reader) decodes a raw header and wraps it in a [Header]
//! to expose metadata:
//!
//! ```no_run
//! use hsd::Reader;
//! let reader = Reader::from_path("HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT").unwrap();
//! let header = reader.header();
//! println!("Segment {} of {}", header.segment_number(), header.total_segments());
//! ```
//!
//! The raw blocks stay available through [Header::raw] for callers that need
//! every field; the methods here cover the values the rest of the crate
//! works with, plus presentation conversions (NUL-trimmed strings, MJD
//! timestamps as [DateTime]).

use crate::{raw, utils::ToHsdStr, Endian, Error, Result};
use chrono::{DateTime, Utc};

/// Metadata describing the layout, provenance, and calibration of one
/// segment's pixel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    raw: raw::Header,
    endian: Endian,
}

impl Header {
    /// Creates a header from a raw header and the byte order it was decoded
    /// with.
    ///
    /// Hard validation: the valid bits per pixel must not exceed the stored
    /// bits per pixel, and the segment sequence number must fall in
    /// `1..=segment_total_number`. The declared total data length is checked
    /// softly against `columns × lines × bits / 8` — real files are known to
    /// disagree, so a mismatch only logs a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::{raw, Endian, Header};
    /// let header = Header::new(raw::Header::default(), Endian::Little).unwrap();
    /// assert_eq!(16, header.bits_per_pixel());
    /// ```
    pub fn new(raw: raw::Header, endian: Endian) -> Result<Header> {
        let valid = raw.calibration.valid_number_of_bits_per_pixel;
        let stored = raw.data.number_of_bits_per_pixel;
        if valid > stored {
            return Err(Error::InvalidValidBits { valid, stored });
        }
        let sequence = raw.segment.segment_sequence_number;
        let total = raw.segment.segment_total_number;
        if sequence < 1 || sequence > total {
            return Err(Error::InvalidSegmentNumber { sequence, total });
        }
        let expected = u64::from(raw.data.number_of_columns)
            * u64::from(raw.data.number_of_lines)
            * u64::from(stored / 8);
        if expected != u64::from(raw.basic.total_data_length) {
            log::warn!(
                "declared total data length is {} but the pixel grid occupies {} bytes",
                raw.basic.total_data_length,
                expected
            );
        }
        Ok(Header { raw, endian })
    }

    /// Returns the byte order of the file this header came from.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns a reference to the raw header blocks.
    pub fn raw(&self) -> &raw::Header {
        &self.raw
    }

    /// Converts this header back into its raw blocks.
    pub fn into_raw(self) -> raw::Header {
        self.raw
    }

    /// Returns the satellite name, e.g. `Himawari-9`.
    pub fn satellite(&self) -> Result<&str> {
        self.raw.basic.satellite.to_hsd_str()
    }

    /// Returns the processing center, e.g. `MSC`.
    pub fn processing_center(&self) -> Result<&str> {
        self.raw.basic.processing_center.to_hsd_str()
    }

    /// Returns the observation area code, e.g. `FLDK`.
    pub fn observation_area(&self) -> Result<&str> {
        self.raw.basic.observation_area.to_hsd_str()
    }

    /// Returns the file format version, e.g. `1.3`.
    pub fn file_format_version(&self) -> Result<&str> {
        self.raw.basic.file_format_version.to_hsd_str()
    }

    /// Returns the name this file was distributed under.
    pub fn file_name(&self) -> Result<&str> {
        self.raw.basic.file_name.to_hsd_str()
    }

    /// Returns the observation timeline as HHMM.
    pub fn observation_timeline(&self) -> u16 {
        self.raw.basic.observation_timeline
    }

    /// Returns the observation start time.
    ///
    /// `None` if the stored MJD is outside the representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::{raw, Endian, Header};
    /// let mut raw = raw::Header::default();
    /// raw.basic.observation_start_time = 60248.56968491159;
    /// let header = Header::new(raw, Endian::Little).unwrap();
    /// assert!(header.observation_start().is_some());
    /// ```
    pub fn observation_start(&self) -> Option<DateTime<Utc>> {
        crate::utils::mjd_to_datetime(self.raw.basic.observation_start_time)
    }

    /// Returns the observation end time.
    pub fn observation_end(&self) -> Option<DateTime<Utc>> {
        crate::utils::mjd_to_datetime(self.raw.basic.observation_end_time)
    }

    /// Returns the time this file was created.
    pub fn file_creation(&self) -> Option<DateTime<Utc>> {
        crate::utils::mjd_to_datetime(self.raw.basic.file_creation_time)
    }

    /// Returns the number of pixel columns in this segment.
    pub fn columns(&self) -> u16 {
        self.raw.data.number_of_columns
    }

    /// Returns the number of pixel lines in this segment.
    pub fn lines(&self) -> u16 {
        self.raw.data.number_of_lines
    }

    /// Returns the storage width of each pixel in bits.
    pub fn bits_per_pixel(&self) -> u16 {
        self.raw.data.number_of_bits_per_pixel
    }

    /// Returns the number of low-order bits that carry observation data.
    pub fn valid_bits_per_pixel(&self) -> u16 {
        self.raw.calibration.valid_number_of_bits_per_pixel
    }

    /// Returns the band number, 1 through 16.
    pub fn band_number(&self) -> u16 {
        self.raw.calibration.band_number
    }

    /// Returns the raw count reserved to mean "error pixel".
    pub fn error_pixel_count(&self) -> u16 {
        self.raw.calibration.count_value_of_error_pixels
    }

    /// Returns the raw count reserved to mean "outside the scan area".
    pub fn outside_scan_count(&self) -> u16 {
        self.raw.calibration.count_value_of_pixels_outside_scan_area
    }

    /// Returns this segment's 1-indexed sequence number.
    pub fn segment_number(&self) -> u8 {
        self.raw.segment.segment_sequence_number
    }

    /// Returns how many segments compose this observation.
    pub fn total_segments(&self) -> u8 {
        self.raw.segment.segment_total_number
    }

    /// Returns the number of pixels in this segment's grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::{raw, Endian, Header};
    /// let mut raw = raw::Header::default();
    /// raw.data.number_of_columns = 11000;
    /// raw.data.number_of_lines = 1100;
    /// let header = Header::new(raw, Endian::Little).unwrap();
    /// assert_eq!(12_100_000, header.number_of_pixels());
    /// ```
    pub fn number_of_pixels(&self) -> u64 {
        u64::from(self.raw.data.number_of_columns) * u64::from(self.raw.data.number_of_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FromHsdStr;

    #[test]
    fn string_accessors_trim_padding() {
        let mut raw = raw::Header::default();
        raw.basic.satellite.from_hsd_str("Himawari-9");
        raw.basic.observation_area.from_hsd_str("FLDK");
        let header = Header::new(raw, Endian::Little).unwrap();
        assert_eq!("Himawari-9", header.satellite().unwrap());
        assert_eq!("FLDK", header.observation_area().unwrap());
    }

    #[test]
    fn valid_bits_must_fit_in_stored_bits() {
        let mut raw = raw::Header::default();
        raw.calibration.valid_number_of_bits_per_pixel = 17;
        match Header::new(raw, Endian::Little) {
            Err(Error::InvalidValidBits { valid, stored }) => {
                assert_eq!(17, valid);
                assert_eq!(16, stored);
            }
            other => panic!("expected an invalid valid bits error, got {other:?}"),
        }
    }

    #[test]
    fn segment_number_must_be_in_range() {
        let mut raw = raw::Header::default();
        raw.segment.segment_sequence_number = 3;
        raw.segment.segment_total_number = 2;
        assert!(matches!(
            Header::new(raw, Endian::Little),
            Err(Error::InvalidSegmentNumber {
                sequence: 3,
                total: 2
            })
        ));

        let mut raw = raw::Header::default();
        raw.segment.segment_sequence_number = 0;
        assert!(Header::new(raw, Endian::Little).is_err());
    }

    #[test]
    fn observation_start_converts_mjd() {
        use chrono::{Datelike, Timelike};

        let mut raw = raw::Header::default();
        raw.basic.observation_start_time = 60248.56968491159;
        let header = Header::new(raw, Endian::Little).unwrap();
        let datetime = header.observation_start().unwrap();
        assert_eq!(2023, datetime.year());
        assert_eq!(10, datetime.month());
        assert_eq!(31, datetime.day());
        assert_eq!(13, datetime.hour());
        assert_eq!(40, datetime.minute());
    }
}
