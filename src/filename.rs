//! The HSD file naming convention.
//!
//! Distributed segment files are named
//! `HS_<sat>_<YYYYMMDD>_<HHMM>_B<band>_<area>_<resolution>_S<NN><total>.DAT`,
//! optionally with a `.bz2` suffix when compressed. The zero-padded segment
//! sequence number means a lexical sort of the files of one observation
//! yields ascending segment order, which is how callers assemble a
//! [SegmentSet](crate::SegmentSet) from a directory listing.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

/// The fields encoded in an HSD file name.
///
/// # Examples
///
/// ```
/// use hsd::FileName;
/// let name = FileName::parse("HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT").unwrap();
/// assert_eq!("H09", name.satellite);
/// assert_eq!(2, name.band);
/// assert_eq!(1, name.segment_number);
/// assert_eq!(10, name.total_segments);
/// assert!(!name.compressed);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileName {
    /// The satellite code, e.g. `H09`.
    pub satellite: String,

    /// The observation date.
    pub date: NaiveDate,

    /// The observation timeline.
    pub time: NaiveTime,

    /// The band number, 1 through 16.
    pub band: u16,

    /// The observation area code, e.g. `FLDK`.
    pub observation_area: String,

    /// The resolution code, e.g. `R10`.
    pub resolution: String,

    /// This file's 1-indexed segment sequence number.
    pub segment_number: u8,

    /// How many segments compose the observation.
    pub total_segments: u8,

    /// Whether the name carries a `.bz2` suffix.
    pub compressed: bool,
}

impl FileName {
    /// Parses an HSD file name.
    ///
    /// The argument is a bare file name, not a path; strip any directory
    /// components first.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::FileName;
    /// assert!(FileName::parse("HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT.bz2").is_ok());
    /// assert!(FileName::parse("GOES-east.jpg").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<FileName> {
        let err = || Error::InvalidFileName(name.to_string());
        let base = name.strip_suffix(".bz2").unwrap_or(name);
        let compressed = base.len() != name.len();
        let stem = base.strip_suffix(".DAT").ok_or_else(err)?;
        let mut parts = stem.split('_');
        if parts.next() != Some("HS") {
            return Err(err());
        }
        let satellite = parts.next().ok_or_else(err)?.to_string();
        let date = parts
            .next()
            .and_then(|part| NaiveDate::parse_from_str(part, "%Y%m%d").ok())
            .ok_or_else(err)?;
        let time = parts
            .next()
            .and_then(|part| NaiveTime::parse_from_str(part, "%H%M").ok())
            .ok_or_else(err)?;
        let band = parts
            .next()
            .and_then(|part| part.strip_prefix('B'))
            .and_then(|part| part.parse().ok())
            .ok_or_else(err)?;
        let observation_area = parts.next().ok_or_else(err)?.to_string();
        let resolution = parts.next().ok_or_else(err)?.to_string();
        let segment = parts
            .next()
            .and_then(|part| part.strip_prefix('S'))
            .ok_or_else(err)?;
        if parts.next().is_some() || segment.len() != 4 || !segment.is_ascii() {
            return Err(err());
        }
        let segment_number = segment[..2].parse().map_err(|_| err())?;
        let total_segments = segment[2..].parse().map_err(|_| err())?;
        Ok(FileName {
            satellite,
            date,
            time,
            band,
            observation_area,
            resolution,
            segment_number,
            total_segments,
            compressed,
        })
    }
}

impl FromStr for FileName {
    type Err = Error;

    fn from_str(s: &str) -> Result<FileName> {
        FileName::parse(s)
    }
}
