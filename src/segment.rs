//! Collect the segment files of one observation.
//!
//! A full-disk observation is split into segments, each a horizontal band of
//! the composed image. A [SegmentSet] holds one reader per segment, ordered
//! by segment sequence number, and guarantees that the members agree on
//! every field the composition depends on.

use crate::{Error, Header, Reader, Result};
use std::path::{Path, PathBuf};

fn check<T: PartialEq>(field: &'static str, expected: T, got: T, segment: u8) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(Error::InconsistentSegments { field, segment })
    }
}

/// The segments of one observation, ordered by sequence number.
#[derive(Debug)]
pub struct SegmentSet {
    segments: Vec<Reader>,
}

impl SegmentSet {
    /// Creates a segment set from readers, in any order.
    ///
    /// The readers are sorted by their segment sequence number — composition
    /// placement never depends on the order they were passed in. Validation
    /// requires that every member agree on the grid and calibration fields,
    /// and that the sequence numbers cover `1..=segment_total_number`
    /// exactly once each.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use hsd::{Endian, Reader, SegmentSet};
    ///
    /// let mut bytes = Vec::new();
    /// hsd::raw::Header::default().write_to(&mut bytes, Endian::Little).unwrap();
    /// let reader = Reader::new(Cursor::new(bytes)).unwrap();
    /// let segments = SegmentSet::new(vec![reader]).unwrap();
    /// assert_eq!(1, segments.len());
    /// ```
    pub fn new(mut segments: Vec<Reader>) -> Result<SegmentSet> {
        if segments.is_empty() {
            return Err(Error::MissingSegment(1));
        }
        segments.sort_by_key(|segment| segment.header().segment_number());
        for (index, segment) in segments.iter().enumerate() {
            let sequence = usize::from(segment.header().segment_number());
            if sequence < index + 1 {
                return Err(Error::DuplicateSegment(sequence as u8));
            }
            if sequence > index + 1 {
                return Err(Error::MissingSegment((index + 1) as u8));
            }
        }
        let total = segments[0].header().total_segments();
        if segments.len() < usize::from(total) {
            return Err(Error::MissingSegment(segments.len() as u8 + 1));
        }
        let first = &segments[0];
        for segment in &segments[1..] {
            let header = segment.header();
            let reference = first.header();
            let sequence = header.segment_number();
            check("columns", reference.columns(), header.columns(), sequence)?;
            check("lines", reference.lines(), header.lines(), sequence)?;
            check(
                "bits_per_pixel",
                reference.bits_per_pixel(),
                header.bits_per_pixel(),
                sequence,
            )?;
            check(
                "valid_bits_per_pixel",
                reference.valid_bits_per_pixel(),
                header.valid_bits_per_pixel(),
                sequence,
            )?;
            check(
                "segment_total_number",
                reference.total_segments(),
                header.total_segments(),
                sequence,
            )?;
            check(
                "band_number",
                reference.band_number(),
                header.band_number(),
                sequence,
            )?;
            check(
                "count_value_of_error_pixels",
                reference.error_pixel_count(),
                header.error_pixel_count(),
                sequence,
            )?;
            check(
                "count_value_of_pixels_outside_scan_area",
                reference.outside_scan_count(),
                header.outside_scan_count(),
                sequence,
            )?;
        }
        Ok(SegmentSet { segments })
    }

    /// Creates a segment set by opening files.
    ///
    /// The paths are sorted lexically first. HSD file names end in
    /// `S<NN><total>` with a zero-padded sequence number, so the segments of
    /// one observation sort into ascending segment order — this is the
    /// documented discovery rule for assembling an observation from a
    /// directory listing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hsd::SegmentSet;
    /// let segments = SegmentSet::from_paths(vec![
    ///     "HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT",
    ///     "HS_H09_20231031_1340_B02_FLDK_R10_S0210.DAT",
    /// ]).unwrap();
    /// ```
    pub fn from_paths<P, I>(paths: I) -> Result<SegmentSet>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|path| path.as_ref().to_path_buf())
            .collect();
        paths.sort();
        let segments = paths
            .iter()
            .map(Reader::from_path)
            .collect::<Result<Vec<_>>>()?;
        SegmentSet::new(segments)
    }

    /// Returns the header of the first segment.
    ///
    /// The fields the composition depends on are identical across members,
    /// so the first segment's header speaks for the whole set.
    pub fn header(&self) -> &Header {
        self.segments[0].header()
    }

    /// Returns the number of segments in this set.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns false; a segment set always holds at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consumes the set, returning the readers in ascending segment order.
    pub fn into_segments(self) -> Vec<Reader> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raw, Endian};
    use std::io::Cursor;

    fn segment(sequence: u8, total: u8, band: u16) -> Reader {
        let mut header = raw::Header::default();
        header.data.number_of_columns = 4;
        header.data.number_of_lines = 2;
        header.basic.total_data_length = 16;
        header.calibration.band_number = band;
        header.segment.segment_sequence_number = sequence;
        header.segment.segment_total_number = total;
        let mut bytes = Vec::new();
        header.write_to(&mut bytes, Endian::Little).unwrap();
        bytes.extend([0; 16]);
        Reader::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn sorts_by_sequence_number() {
        let set = SegmentSet::new(vec![
            segment(3, 3, 2),
            segment(1, 3, 2),
            segment(2, 3, 2),
        ])
        .unwrap();
        let sequences: Vec<u8> = set
            .into_segments()
            .iter()
            .map(|segment| segment.header().segment_number())
            .collect();
        assert_eq!(vec![1, 2, 3], sequences);
    }

    #[test]
    fn empty_set() {
        assert!(matches!(
            SegmentSet::new(Vec::new()),
            Err(Error::MissingSegment(1))
        ));
    }

    #[test]
    fn missing_segment() {
        assert!(matches!(
            SegmentSet::new(vec![segment(1, 3, 2), segment(3, 3, 2)]),
            Err(Error::MissingSegment(2))
        ));
    }

    #[test]
    fn missing_tail_segment() {
        assert!(matches!(
            SegmentSet::new(vec![segment(1, 3, 2), segment(2, 3, 2)]),
            Err(Error::MissingSegment(3))
        ));
    }

    #[test]
    fn duplicate_segment() {
        assert!(matches!(
            SegmentSet::new(vec![segment(1, 2, 2), segment(1, 2, 2)]),
            Err(Error::DuplicateSegment(1))
        ));
    }

    #[test]
    fn inconsistent_band() {
        match SegmentSet::new(vec![segment(1, 2, 2), segment(2, 2, 3)]) {
            Err(Error::InconsistentSegments { field, segment }) => {
                assert_eq!("band_number", field);
                assert_eq!(2, segment);
            }
            other => panic!("expected an inconsistent segments error, got {other:?}"),
        }
    }

    #[test]
    fn single_segment_observation() {
        let set = SegmentSet::new(vec![segment(1, 1, 2)]).unwrap();
        assert_eq!(1, set.len());
        assert_eq!(4, set.header().columns());
    }
}
