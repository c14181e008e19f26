//! Raw file metadata, mapping byte-for-byte onto the HSD header blocks.
//!
//! Every multi-byte field of an HSD file uses the byte order declared by the
//! basic information block, so all reads and writes in this module take an
//! [Endian](crate::Endian) value. The structs here hold exactly what is in
//! the file; interpretation (NUL trimming, MJD conversion, validation) lives
//! in [Header](crate::Header).

pub mod header;

pub use header::{
    Band, BasicInformation, CalibrationInformation, DataInformation, ErrorInformation,
    ErrorRecord, Header, InfraredBand, InterCalibrationInformation, NavigationCorrection,
    NavigationCorrectionInformation, NavigationInformation, ObservationTime,
    ObservationTimeInformation, Position, ProjectionInformation, SegmentInformation, Spare,
    VisibleBand,
};
