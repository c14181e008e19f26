//! Raw file metadata.
//!
//! An HSD header is a fixed sequence of eleven blocks. Every block begins
//! with a one-byte block number and a two-byte block length (block 10 uses a
//! four-byte length); the block numbers 1 through 11 are checked as
//! structural checkpoints during decoding.
//!
//! Blocks 8, 9, and 10 carry variable-length record arrays. Their decoders
//! trust the record count rather than the declared block length, and warn
//! through the `log` facade when the two disagree; real HSD files are known
//! to contain such quirks.

use crate::{
    utils::{read_bytes, skip_bytes},
    Endian, Error, Result,
};
use std::io::{Chain, Cursor, Read, Write};

/// Bytes of the calibration block consumed before the band branch.
const CALIBRATION_COMMON_LEN: u16 = 35;

fn read_block_number<R: Read>(read: &mut R, endian: Endian, expected: u8) -> Result<()> {
    let got = endian.read_u8(read)?;
    if got == expected {
        Ok(())
    } else {
        Err(Error::BlockOrder { expected, got })
    }
}

/// An HSD header: the eleven metadata blocks that precede the pixel grid.
///
/// The documentation for the fields follows the wording of the JMA HSD user's
/// guide where the guide names them.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// Block 1.
    pub basic: BasicInformation,
    /// Block 2.
    pub data: DataInformation,
    /// Block 3.
    pub projection: ProjectionInformation,
    /// Block 4.
    pub navigation: NavigationInformation,
    /// Block 5.
    pub calibration: CalibrationInformation,
    /// Block 6.
    pub inter_calibration: InterCalibrationInformation,
    /// Block 7.
    pub segment: SegmentInformation,
    /// Block 8.
    pub navigation_correction: NavigationCorrectionInformation,
    /// Block 9.
    pub observation_time: ObservationTimeInformation,
    /// Block 10.
    pub error_information: ErrorInformation,
    /// Block 11.
    pub spare: Spare,
}

impl Header {
    /// Reads a raw header from a `Read`, resolving the file's byte order.
    ///
    /// The first five bytes of the file precede the byte-order flag, so they
    /// are buffered into a small scratch area, the flag is inspected, and the
    /// scratch is replayed through the typed decoder under the resolved
    /// order. No seeking is required; the source only needs to read forward.
    ///
    /// On success the source is positioned at the first pixel byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::{raw, Endian};
    /// use std::io::Cursor;
    ///
    /// let mut cursor = Cursor::new(Vec::new());
    /// raw::Header::default().write_to(&mut cursor, Endian::Little).unwrap();
    /// cursor.set_position(0);
    /// let (header, endian) = raw::Header::read_from(cursor).unwrap();
    /// assert_eq!(Endian::Little, endian);
    /// assert_eq!(11, header.basic.total_header_blocks);
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<(Header, Endian)> {
        let prologue: [u8; 6] = read_bytes(&mut read)?;
        let endian = Endian::from_flag(prologue[5]);
        let mut read = Cursor::new(prologue).chain(read);
        Header::read_blocks(&mut read, endian).map(|header| (header, endian))
    }

    fn read_blocks<R: Read>(read: &mut Chain<Cursor<[u8; 6]>, R>, endian: Endian) -> Result<Header> {
        Ok(Header {
            basic: BasicInformation::read_from(read, endian)?,
            data: DataInformation::read_from(read, endian)?,
            projection: ProjectionInformation::read_from(read, endian)?,
            navigation: NavigationInformation::read_from(read, endian)?,
            calibration: CalibrationInformation::read_from(read, endian)?,
            inter_calibration: InterCalibrationInformation::read_from(read, endian)?,
            segment: SegmentInformation::read_from(read, endian)?,
            navigation_correction: NavigationCorrectionInformation::read_from(read, endian)?,
            observation_time: ObservationTimeInformation::read_from(read, endian)?,
            error_information: ErrorInformation::read_from(read, endian)?,
            spare: Spare::read_from(read, endian)?,
        })
    }

    /// Writes this raw header to a `Write` under the given byte order.
    ///
    /// The basic block's byte-order flag is written exactly as stored; when
    /// serializing under a different order than the header was read with,
    /// update [BasicInformation::byte_order] first or the output will
    /// describe itself incorrectly.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::{raw, Endian};
    /// let mut bytes = Vec::new();
    /// raw::Header::default().write_to(&mut bytes, Endian::Little).unwrap();
    /// assert_eq!(1463, bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W, endian: Endian) -> Result<()> {
        self.basic.write_to(&mut write, endian)?;
        self.data.write_to(&mut write, endian)?;
        self.projection.write_to(&mut write, endian)?;
        self.navigation.write_to(&mut write, endian)?;
        self.calibration.write_to(&mut write, endian)?;
        self.inter_calibration.write_to(&mut write, endian)?;
        self.segment.write_to(&mut write, endian)?;
        self.navigation_correction.write_to(&mut write, endian)?;
        self.observation_time.write_to(&mut write, endian)?;
        self.error_information.write_to(&mut write, endian)?;
        self.spare.write_to(&mut write, endian)
    }

    /// Returns the sum of the declared block lengths.
    ///
    /// For a conforming file this equals
    /// [BasicInformation::total_header_length].
    pub fn total_block_length(&self) -> u32 {
        u32::from(self.basic.block_length)
            + u32::from(self.data.block_length)
            + u32::from(self.projection.block_length)
            + u32::from(self.navigation.block_length)
            + u32::from(self.calibration.block_length)
            + u32::from(self.inter_calibration.block_length)
            + u32::from(self.segment.block_length)
            + u32::from(self.navigation_correction.block_length)
            + u32::from(self.observation_time.block_length)
            + self.error_information.block_length
            + u32::from(self.spare.block_length)
    }
}

impl Default for Header {
    fn default() -> Header {
        let mut header = Header {
            basic: Default::default(),
            data: Default::default(),
            projection: Default::default(),
            navigation: Default::default(),
            calibration: Default::default(),
            inter_calibration: Default::default(),
            segment: Default::default(),
            navigation_correction: Default::default(),
            observation_time: Default::default(),
            error_information: Default::default(),
            spare: Default::default(),
        };
        header.basic.total_header_length = header.total_block_length();
        header
    }
}

/// Block 1 — basic information (282 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct BasicInformation {
    /// The block number, always 1.
    pub block_number: u8,

    /// The length of this block in bytes, 282.
    pub block_length: u16,

    /// The total number of header blocks, 11.
    pub total_header_blocks: u16,

    /// The byte-order flag: 0 for little-endian, otherwise big-endian.
    ///
    /// This single byte governs every multi-byte field in the file,
    /// including the three fields that precede it.
    pub byte_order: u8,

    /// The satellite name, e.g. `Himawari-9`, NUL-padded ASCII.
    pub satellite: [u8; 16],

    /// The processing center, e.g. `MSC`.
    pub processing_center: [u8; 16],

    /// The observation area code, e.g. `FLDK` for a full disk.
    pub observation_area: [u8; 4],

    #[allow(missing_docs)]
    pub observation_area_info: [u8; 2],

    /// The observation timeline as HHMM, e.g. 1340.
    pub observation_timeline: u16,

    /// The observation start time, as a Modified Julian Date with fractional
    /// day.
    pub observation_start_time: f64,

    #[allow(missing_docs)]
    pub observation_end_time: f64,

    #[allow(missing_docs)]
    pub file_creation_time: f64,

    /// The total length of all header blocks in bytes.
    pub total_header_length: u32,

    /// The total length of the pixel data in bytes.
    ///
    /// Nominally `columns × lines × bits_per_pixel / 8`, but files in the
    /// wild have been observed to disagree, so this is checked softly.
    pub total_data_length: u32,

    #[allow(missing_docs)]
    pub quality_flag_1: u8,
    #[allow(missing_docs)]
    pub quality_flag_2: u8,
    #[allow(missing_docs)]
    pub quality_flag_3: u8,
    #[allow(missing_docs)]
    pub quality_flag_4: u8,

    /// The file format version, e.g. `1.3`.
    pub file_format_version: [u8; 32],

    /// The name this file was distributed under.
    pub file_name: [u8; 128],

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl BasicInformation {
    /// Reads a basic information block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<BasicInformation> {
        read_block_number(read, endian, 1)?;
        Ok(BasicInformation {
            block_number: 1,
            block_length: endian.read_u16(read)?,
            total_header_blocks: endian.read_u16(read)?,
            byte_order: endian.read_u8(read)?,
            satellite: read_bytes(read)?,
            processing_center: read_bytes(read)?,
            observation_area: read_bytes(read)?,
            observation_area_info: read_bytes(read)?,
            observation_timeline: endian.read_u16(read)?,
            observation_start_time: endian.read_f64(read)?,
            observation_end_time: endian.read_f64(read)?,
            file_creation_time: endian.read_f64(read)?,
            total_header_length: endian.read_u32(read)?,
            total_data_length: endian.read_u32(read)?,
            quality_flag_1: endian.read_u8(read)?,
            quality_flag_2: endian.read_u8(read)?,
            quality_flag_3: endian.read_u8(read)?,
            quality_flag_4: endian.read_u8(read)?,
            file_format_version: read_bytes(read)?,
            file_name: read_bytes(read)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_u16(write, self.total_header_blocks)?;
        endian.write_u8(write, self.byte_order)?;
        write.write_all(&self.satellite)?;
        write.write_all(&self.processing_center)?;
        write.write_all(&self.observation_area)?;
        write.write_all(&self.observation_area_info)?;
        endian.write_u16(write, self.observation_timeline)?;
        endian.write_f64(write, self.observation_start_time)?;
        endian.write_f64(write, self.observation_end_time)?;
        endian.write_f64(write, self.file_creation_time)?;
        endian.write_u32(write, self.total_header_length)?;
        endian.write_u32(write, self.total_data_length)?;
        endian.write_u8(write, self.quality_flag_1)?;
        endian.write_u8(write, self.quality_flag_2)?;
        endian.write_u8(write, self.quality_flag_3)?;
        endian.write_u8(write, self.quality_flag_4)?;
        write.write_all(&self.file_format_version)?;
        write.write_all(&self.file_name)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for BasicInformation {
    fn default() -> BasicInformation {
        BasicInformation {
            block_number: 1,
            block_length: 282,
            total_header_blocks: 11,
            byte_order: Endian::Little.to_flag(),
            satellite: [0; 16],
            processing_center: [0; 16],
            observation_area: [0; 4],
            observation_area_info: [0; 2],
            observation_timeline: 0,
            observation_start_time: 0.,
            observation_end_time: 0.,
            file_creation_time: 0.,
            total_header_length: 0,
            total_data_length: 0,
            quality_flag_1: 0,
            quality_flag_2: 0,
            quality_flag_3: 0,
            quality_flag_4: 0,
            file_format_version: [0; 32],
            file_name: [0; 128],
            spare: [0; 40],
        }
    }
}

/// Block 2 — data information (50 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct DataInformation {
    /// The block number, always 2.
    pub block_number: u8,

    /// The length of this block in bytes, 50.
    pub block_length: u16,

    /// The storage width of each pixel in bits.
    ///
    /// Only 16 is supported by the pixel cursor; the valid dynamic range is
    /// narrower, see
    /// [CalibrationInformation::valid_number_of_bits_per_pixel].
    pub number_of_bits_per_pixel: u16,

    /// The number of pixel columns in this segment.
    pub number_of_columns: u16,

    /// The number of pixel lines in this segment.
    pub number_of_lines: u16,

    /// Nonzero when the pixel data is compressed.
    pub compression_flag: u8,

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl DataInformation {
    /// Reads a data information block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<DataInformation> {
        read_block_number(read, endian, 2)?;
        Ok(DataInformation {
            block_number: 2,
            block_length: endian.read_u16(read)?,
            number_of_bits_per_pixel: endian.read_u16(read)?,
            number_of_columns: endian.read_u16(read)?,
            number_of_lines: endian.read_u16(read)?,
            compression_flag: endian.read_u8(read)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_u16(write, self.number_of_bits_per_pixel)?;
        endian.write_u16(write, self.number_of_columns)?;
        endian.write_u16(write, self.number_of_lines)?;
        endian.write_u8(write, self.compression_flag)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for DataInformation {
    fn default() -> DataInformation {
        DataInformation {
            block_number: 2,
            block_length: 50,
            number_of_bits_per_pixel: 16,
            number_of_columns: 0,
            number_of_lines: 0,
            compression_flag: 0,
            spare: [0; 40],
        }
    }
}

/// Block 3 — projection information (127 bytes).
///
/// Describes the normalized geostationary projection of the image. The
/// coefficients are parsed and surfaced but never applied; georeferencing is
/// out of scope.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionInformation {
    /// The block number, always 3.
    pub block_number: u8,

    /// The length of this block in bytes, 127.
    pub block_length: u16,

    /// The sub-satellite longitude in degrees.
    pub sub_lon: f64,

    /// The column scaling factor.
    pub cfac: u32,

    /// The line scaling factor.
    pub lfac: u32,

    /// The column offset of the image center.
    pub coff: f32,

    /// The line offset of the image center.
    pub loff: f32,

    /// The distance from the Earth's center to the virtual satellite, in km.
    pub distance_from_earth_center: f64,

    /// The Earth's equatorial radius in km.
    pub earth_equatorial_radius: f64,

    /// The Earth's polar radius in km.
    pub earth_polar_radius: f64,

    /// `(req² − rpol²) / req²`.
    pub ratio_diff: f64,

    /// `rpol² / req²`.
    pub ratio_polar: f64,

    /// `req² / rpol²`.
    pub ratio_equatorial: f64,

    /// The coefficient for the sd(Rs) equation.
    pub sd_coefficient: f64,

    #[allow(missing_docs)]
    pub resampling_types: u16,
    #[allow(missing_docs)]
    pub resampling_size: u16,
    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl ProjectionInformation {
    /// Reads a projection information block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<ProjectionInformation> {
        read_block_number(read, endian, 3)?;
        Ok(ProjectionInformation {
            block_number: 3,
            block_length: endian.read_u16(read)?,
            sub_lon: endian.read_f64(read)?,
            cfac: endian.read_u32(read)?,
            lfac: endian.read_u32(read)?,
            coff: endian.read_f32(read)?,
            loff: endian.read_f32(read)?,
            distance_from_earth_center: endian.read_f64(read)?,
            earth_equatorial_radius: endian.read_f64(read)?,
            earth_polar_radius: endian.read_f64(read)?,
            ratio_diff: endian.read_f64(read)?,
            ratio_polar: endian.read_f64(read)?,
            ratio_equatorial: endian.read_f64(read)?,
            sd_coefficient: endian.read_f64(read)?,
            resampling_types: endian.read_u16(read)?,
            resampling_size: endian.read_u16(read)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_f64(write, self.sub_lon)?;
        endian.write_u32(write, self.cfac)?;
        endian.write_u32(write, self.lfac)?;
        endian.write_f32(write, self.coff)?;
        endian.write_f32(write, self.loff)?;
        endian.write_f64(write, self.distance_from_earth_center)?;
        endian.write_f64(write, self.earth_equatorial_radius)?;
        endian.write_f64(write, self.earth_polar_radius)?;
        endian.write_f64(write, self.ratio_diff)?;
        endian.write_f64(write, self.ratio_polar)?;
        endian.write_f64(write, self.ratio_equatorial)?;
        endian.write_f64(write, self.sd_coefficient)?;
        endian.write_u16(write, self.resampling_types)?;
        endian.write_u16(write, self.resampling_size)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for ProjectionInformation {
    fn default() -> ProjectionInformation {
        ProjectionInformation {
            block_number: 3,
            block_length: 127,
            sub_lon: 0.,
            cfac: 0,
            lfac: 0,
            coff: 0.,
            loff: 0.,
            distance_from_earth_center: 0.,
            earth_equatorial_radius: 0.,
            earth_polar_radius: 0.,
            ratio_diff: 0.,
            ratio_polar: 0.,
            ratio_equatorial: 0.,
            sd_coefficient: 0.,
            resampling_types: 0,
            resampling_size: 0,
            spare: [0; 40],
        }
    }
}

/// An x, y, z position, used for the Sun and Moon ephemerides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub z: f64,
}

impl Position {
    fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<Position> {
        Ok(Position {
            x: endian.read_f64(read)?,
            y: endian.read_f64(read)?,
            z: endian.read_f64(read)?,
        })
    }

    fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_f64(write, self.x)?;
        endian.write_f64(write, self.y)?;
        endian.write_f64(write, self.z)
    }
}

/// Block 4 — navigation information (139 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationInformation {
    /// The block number, always 4.
    pub block_number: u8,

    /// The length of this block in bytes, 139.
    pub block_length: u16,

    /// The time these navigation values apply to, as an MJD.
    pub navigation_time: f64,

    /// The sub-satellite point longitude in degrees.
    pub ssp_longitude: f64,

    /// The sub-satellite point latitude in degrees.
    pub ssp_latitude: f64,

    /// The distance from the Earth's center to the satellite, in km.
    pub distance_from_earth_to_satellite: f64,

    #[allow(missing_docs)]
    pub nadir_longitude: f64,
    #[allow(missing_docs)]
    pub nadir_latitude: f64,

    /// The Sun's position in Earth-fixed coordinates, in km.
    pub sun_position: Position,

    /// The Moon's position in Earth-fixed coordinates, in km.
    pub moon_position: Position,

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl NavigationInformation {
    /// Reads a navigation information block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<NavigationInformation> {
        read_block_number(read, endian, 4)?;
        Ok(NavigationInformation {
            block_number: 4,
            block_length: endian.read_u16(read)?,
            navigation_time: endian.read_f64(read)?,
            ssp_longitude: endian.read_f64(read)?,
            ssp_latitude: endian.read_f64(read)?,
            distance_from_earth_to_satellite: endian.read_f64(read)?,
            nadir_longitude: endian.read_f64(read)?,
            nadir_latitude: endian.read_f64(read)?,
            sun_position: Position::read_from(read, endian)?,
            moon_position: Position::read_from(read, endian)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_f64(write, self.navigation_time)?;
        endian.write_f64(write, self.ssp_longitude)?;
        endian.write_f64(write, self.ssp_latitude)?;
        endian.write_f64(write, self.distance_from_earth_to_satellite)?;
        endian.write_f64(write, self.nadir_longitude)?;
        endian.write_f64(write, self.nadir_latitude)?;
        self.sun_position.write_to(write, endian)?;
        self.moon_position.write_to(write, endian)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for NavigationInformation {
    fn default() -> NavigationInformation {
        NavigationInformation {
            block_number: 4,
            block_length: 139,
            navigation_time: 0.,
            ssp_longitude: 0.,
            ssp_latitude: 0.,
            distance_from_earth_to_satellite: 0.,
            nadir_longitude: 0.,
            nadir_latitude: 0.,
            sun_position: Default::default(),
            moon_position: Default::default(),
            spare: [0; 40],
        }
    }
}

/// The band-specific tail of the calibration block.
///
/// Bands 1 through 6 are visible and near-infrared channels calibrated to
/// albedo; bands 7 and up are infrared channels calibrated to brightness
/// temperature. Which sub-block is present is determined at decode time by
/// [CalibrationInformation::band_number].
#[derive(Clone, Debug, PartialEq)]
pub enum Band {
    /// The visible and near-infrared sub-block, bands 1 through 6.
    Visible(VisibleBand),
    /// The infrared sub-block, bands 7 and up.
    Infrared(InfraredBand),
}

impl Default for Band {
    fn default() -> Band {
        Band::Visible(Default::default())
    }
}

/// Calibration coefficients for a visible or near-infrared band.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleBand {
    /// The coefficient converting radiance to albedo.
    pub albedo: f64,

    /// The time the calibrated coefficients were updated, as an MJD.
    pub update_time: f64,

    #[allow(missing_docs)]
    pub calibrated_slope: f64,
    #[allow(missing_docs)]
    pub calibrated_intercept: f64,
    #[allow(missing_docs)]
    pub spare: [u8; 80],
}

impl VisibleBand {
    fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<VisibleBand> {
        Ok(VisibleBand {
            albedo: endian.read_f64(read)?,
            update_time: endian.read_f64(read)?,
            calibrated_slope: endian.read_f64(read)?,
            calibrated_intercept: endian.read_f64(read)?,
            spare: read_bytes(read)?,
        })
    }

    fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_f64(write, self.albedo)?;
        endian.write_f64(write, self.update_time)?;
        endian.write_f64(write, self.calibrated_slope)?;
        endian.write_f64(write, self.calibrated_intercept)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for VisibleBand {
    fn default() -> VisibleBand {
        VisibleBand {
            albedo: 0.,
            update_time: 0.,
            calibrated_slope: 0.,
            calibrated_intercept: 0.,
            spare: [0; 80],
        }
    }
}

/// Calibration constants for an infrared band.
///
/// No infrared file has been available to verify this layout against, so the
/// decoder never populates it: the sub-block is skipped by declared length
/// and these constants are left at zero. The layout is kept for the day a
/// band-7-or-up file is ingested.
#[derive(Clone, Debug, PartialEq)]
pub struct InfraredBand {
    #[allow(missing_docs)]
    pub brightness_temperature_c0: f64,
    #[allow(missing_docs)]
    pub brightness_temperature_c1: f64,
    #[allow(missing_docs)]
    pub brightness_temperature_c2: f64,
    #[allow(missing_docs)]
    pub radiance_c0: f64,
    #[allow(missing_docs)]
    pub radiance_c1: f64,
    #[allow(missing_docs)]
    pub radiance_c2: f64,
    /// The speed of light, in m/s.
    pub speed_of_light: f64,
    /// The Planck constant.
    pub planck_constant: f64,
    /// The Boltzmann constant.
    pub boltzmann_constant: f64,
    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl InfraredBand {
    fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_f64(write, self.brightness_temperature_c0)?;
        endian.write_f64(write, self.brightness_temperature_c1)?;
        endian.write_f64(write, self.brightness_temperature_c2)?;
        endian.write_f64(write, self.radiance_c0)?;
        endian.write_f64(write, self.radiance_c1)?;
        endian.write_f64(write, self.radiance_c2)?;
        endian.write_f64(write, self.speed_of_light)?;
        endian.write_f64(write, self.planck_constant)?;
        endian.write_f64(write, self.boltzmann_constant)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for InfraredBand {
    fn default() -> InfraredBand {
        InfraredBand {
            brightness_temperature_c0: 0.,
            brightness_temperature_c1: 0.,
            brightness_temperature_c2: 0.,
            radiance_c0: 0.,
            radiance_c1: 0.,
            radiance_c2: 0.,
            speed_of_light: 0.,
            planck_constant: 0.,
            boltzmann_constant: 0.,
            spare: [0; 40],
        }
    }
}

/// Block 5 — calibration information (variable, 147 bytes in practice).
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationInformation {
    /// The block number, always 5.
    pub block_number: u8,

    /// The length of this block in bytes.
    pub block_length: u16,

    /// The band number, 1 through 16.
    pub band_number: u16,

    /// The central wavelength of this band, in µm.
    pub central_wave_length: f64,

    /// The number of low-order bits of each stored pixel that carry
    /// observation data.
    ///
    /// This defines the dynamic range used during rendering; it is at most
    /// [DataInformation::number_of_bits_per_pixel].
    pub valid_number_of_bits_per_pixel: u16,

    /// The raw count reserved to mean "error pixel".
    pub count_value_of_error_pixels: u16,

    /// The raw count reserved to mean "outside the scan area".
    pub count_value_of_pixels_outside_scan_area: u16,

    /// The slope of the count-to-radiance equation.
    pub slope_for_count_radiance: f64,

    /// The intercept of the count-to-radiance equation.
    pub intercept_for_count_radiance: f64,

    /// The band-specific sub-block.
    pub band: Band,
}

impl CalibrationInformation {
    /// Reads a calibration information block.
    ///
    /// Bands below 7 decode the visible sub-block in full. For bands 7 and
    /// up the remainder of the block, as declared by the block length, is
    /// consumed in one skip so the stream stays aligned, and the infrared
    /// constants are left at their zeroed defaults.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<CalibrationInformation> {
        read_block_number(read, endian, 5)?;
        let block_length = endian.read_u16(read)?;
        let band_number = endian.read_u16(read)?;
        let central_wave_length = endian.read_f64(read)?;
        let valid_number_of_bits_per_pixel = endian.read_u16(read)?;
        let count_value_of_error_pixels = endian.read_u16(read)?;
        let count_value_of_pixels_outside_scan_area = endian.read_u16(read)?;
        let slope_for_count_radiance = endian.read_f64(read)?;
        let intercept_for_count_radiance = endian.read_f64(read)?;
        let band = if band_number < 7 {
            Band::Visible(VisibleBand::read_from(read, endian)?)
        } else {
            let remainder = block_length.saturating_sub(CALIBRATION_COMMON_LEN);
            skip_bytes(read, u64::from(remainder))?;
            Band::Infrared(Default::default())
        };
        Ok(CalibrationInformation {
            block_number: 5,
            block_length,
            band_number,
            central_wave_length,
            valid_number_of_bits_per_pixel,
            count_value_of_error_pixels,
            count_value_of_pixels_outside_scan_area,
            slope_for_count_radiance,
            intercept_for_count_radiance,
            band,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_u16(write, self.band_number)?;
        endian.write_f64(write, self.central_wave_length)?;
        endian.write_u16(write, self.valid_number_of_bits_per_pixel)?;
        endian.write_u16(write, self.count_value_of_error_pixels)?;
        endian.write_u16(write, self.count_value_of_pixels_outside_scan_area)?;
        endian.write_f64(write, self.slope_for_count_radiance)?;
        endian.write_f64(write, self.intercept_for_count_radiance)?;
        match self.band {
            Band::Visible(ref band) => band.write_to(write, endian),
            Band::Infrared(ref band) => band.write_to(write, endian),
        }
    }
}

impl Default for CalibrationInformation {
    fn default() -> CalibrationInformation {
        CalibrationInformation {
            block_number: 5,
            block_length: 147,
            band_number: 1,
            central_wave_length: 0.,
            valid_number_of_bits_per_pixel: 11,
            count_value_of_error_pixels: 65535,
            count_value_of_pixels_outside_scan_area: 65534,
            slope_for_count_radiance: 0.,
            intercept_for_count_radiance: 0.,
            band: Default::default(),
        }
    }
}

/// Block 6 — inter-calibration information (259 bytes).
///
/// GSICS coefficients for cross-satellite calibration. Unavailable
/// coefficients are stored as -10000000000.0 by the ground segment.
#[derive(Clone, Debug, PartialEq)]
pub struct InterCalibrationInformation {
    /// The block number, always 6.
    pub block_number: u8,

    /// The length of this block in bytes, 259.
    pub block_length: u16,

    #[allow(missing_docs)]
    pub gsics_intercept: f64,
    #[allow(missing_docs)]
    pub gsics_slope: f64,
    #[allow(missing_docs)]
    pub gsics_quadratic: f64,
    #[allow(missing_docs)]
    pub radiance_bias: f64,
    #[allow(missing_docs)]
    pub radiance_uncertainty: f64,
    #[allow(missing_docs)]
    pub radiance_standard_scene: f64,

    /// The start of the GSICS correction validity period, as an MJD.
    pub gsics_correction_start: f64,

    /// The end of the GSICS correction validity period, as an MJD.
    pub gsics_correction_end: f64,

    #[allow(missing_docs)]
    pub gsics_calibration_upper_limit: f32,
    #[allow(missing_docs)]
    pub gsics_calibration_lower_limit: f32,

    /// The name of the GSICS correction file.
    pub gsics_file_name: [u8; 128],

    #[allow(missing_docs)]
    pub spare: [u8; 56],
}

impl InterCalibrationInformation {
    /// Reads an inter-calibration information block.
    pub fn read_from<R: Read>(
        read: &mut R,
        endian: Endian,
    ) -> Result<InterCalibrationInformation> {
        read_block_number(read, endian, 6)?;
        Ok(InterCalibrationInformation {
            block_number: 6,
            block_length: endian.read_u16(read)?,
            gsics_intercept: endian.read_f64(read)?,
            gsics_slope: endian.read_f64(read)?,
            gsics_quadratic: endian.read_f64(read)?,
            radiance_bias: endian.read_f64(read)?,
            radiance_uncertainty: endian.read_f64(read)?,
            radiance_standard_scene: endian.read_f64(read)?,
            gsics_correction_start: endian.read_f64(read)?,
            gsics_correction_end: endian.read_f64(read)?,
            gsics_calibration_upper_limit: endian.read_f32(read)?,
            gsics_calibration_lower_limit: endian.read_f32(read)?,
            gsics_file_name: read_bytes(read)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_f64(write, self.gsics_intercept)?;
        endian.write_f64(write, self.gsics_slope)?;
        endian.write_f64(write, self.gsics_quadratic)?;
        endian.write_f64(write, self.radiance_bias)?;
        endian.write_f64(write, self.radiance_uncertainty)?;
        endian.write_f64(write, self.radiance_standard_scene)?;
        endian.write_f64(write, self.gsics_correction_start)?;
        endian.write_f64(write, self.gsics_correction_end)?;
        endian.write_f32(write, self.gsics_calibration_upper_limit)?;
        endian.write_f32(write, self.gsics_calibration_lower_limit)?;
        write.write_all(&self.gsics_file_name)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for InterCalibrationInformation {
    fn default() -> InterCalibrationInformation {
        InterCalibrationInformation {
            block_number: 6,
            block_length: 259,
            gsics_intercept: 0.,
            gsics_slope: 0.,
            gsics_quadratic: 0.,
            radiance_bias: 0.,
            radiance_uncertainty: 0.,
            radiance_standard_scene: 0.,
            gsics_correction_start: 0.,
            gsics_correction_end: 0.,
            gsics_calibration_upper_limit: 0.,
            gsics_calibration_lower_limit: 0.,
            gsics_file_name: [0; 128],
            spare: [0; 56],
        }
    }
}

/// Block 7 — segment information (47 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentInformation {
    /// The block number, always 7.
    pub block_number: u8,

    /// The length of this block in bytes, 47.
    pub block_length: u16,

    /// How many segments compose this observation, typically 10.
    pub segment_total_number: u8,

    /// This segment's 1-indexed sequence number.
    pub segment_sequence_number: u8,

    /// The first line of the composed image covered by this segment.
    pub first_line_number: u16,

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl SegmentInformation {
    /// Reads a segment information block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<SegmentInformation> {
        read_block_number(read, endian, 7)?;
        Ok(SegmentInformation {
            block_number: 7,
            block_length: endian.read_u16(read)?,
            segment_total_number: endian.read_u8(read)?,
            segment_sequence_number: endian.read_u8(read)?,
            first_line_number: endian.read_u16(read)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_u8(write, self.segment_total_number)?;
        endian.write_u8(write, self.segment_sequence_number)?;
        endian.write_u16(write, self.first_line_number)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for SegmentInformation {
    fn default() -> SegmentInformation {
        SegmentInformation {
            block_number: 7,
            block_length: 47,
            segment_total_number: 1,
            segment_sequence_number: 1,
            first_line_number: 1,
            spare: [0; 40],
        }
    }
}

/// One navigation correction record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigationCorrection {
    /// The line number this correction applies to, after rotation.
    pub line_number_after_rotation: u16,

    /// The column shift in pixels.
    pub shift_amount_for_column: f32,

    /// The line shift in pixels.
    pub shift_amount_for_line: f32,
}

impl NavigationCorrection {
    fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<NavigationCorrection> {
        Ok(NavigationCorrection {
            line_number_after_rotation: endian.read_u16(read)?,
            shift_amount_for_column: endian.read_f32(read)?,
            shift_amount_for_line: endian.read_f32(read)?,
        })
    }

    fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u16(write, self.line_number_after_rotation)?;
        endian.write_f32(write, self.shift_amount_for_column)?;
        endian.write_f32(write, self.shift_amount_for_line)
    }
}

/// Block 8 — navigation correction information (variable length).
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationCorrectionInformation {
    /// The block number, always 8.
    pub block_number: u8,

    /// The length of this block in bytes, `61 + 10 × corrections`.
    pub block_length: u16,

    #[allow(missing_docs)]
    pub center_column_of_rotation: f32,
    #[allow(missing_docs)]
    pub center_line_of_rotation: f32,

    /// The rotational correction in microradians.
    pub amount_of_rotational_correction: f64,

    /// The correction records.
    pub corrections: Vec<NavigationCorrection>,

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl NavigationCorrectionInformation {
    /// Reads a navigation correction information block.
    ///
    /// The record count is trusted over the declared block length; a
    /// disagreement between the two is logged as a warning.
    pub fn read_from<R: Read>(
        read: &mut R,
        endian: Endian,
    ) -> Result<NavigationCorrectionInformation> {
        read_block_number(read, endian, 8)?;
        let block_length = endian.read_u16(read)?;
        let center_column_of_rotation = endian.read_f32(read)?;
        let center_line_of_rotation = endian.read_f32(read)?;
        let amount_of_rotational_correction = endian.read_f64(read)?;
        let count = endian.read_u16(read)?;
        let mut corrections = Vec::with_capacity(count.into());
        for _ in 0..count {
            corrections.push(NavigationCorrection::read_from(read, endian)?);
        }
        let block = NavigationCorrectionInformation {
            block_number: 8,
            block_length,
            center_column_of_rotation,
            center_line_of_rotation,
            amount_of_rotational_correction,
            corrections,
            spare: read_bytes(read)?,
        };
        if block.len() != block.block_length {
            log::warn!(
                "navigation correction block declares {} bytes but contains {}",
                block.block_length,
                block.len()
            );
        }
        Ok(block)
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_f32(write, self.center_column_of_rotation)?;
        endian.write_f32(write, self.center_line_of_rotation)?;
        endian.write_f64(write, self.amount_of_rotational_correction)?;
        endian.write_u16(write, self.corrections.len() as u16)?;
        for correction in &self.corrections {
            correction.write_to(write, endian)?;
        }
        write.write_all(&self.spare)?;
        Ok(())
    }

    /// Returns the byte length implied by the record count.
    pub fn len(&self) -> u16 {
        61 + 10 * self.corrections.len() as u16
    }

    /// Returns false; the fixed fields make this block nonempty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for NavigationCorrectionInformation {
    fn default() -> NavigationCorrectionInformation {
        NavigationCorrectionInformation {
            block_number: 8,
            block_length: 61,
            center_column_of_rotation: 0.,
            center_line_of_rotation: 0.,
            amount_of_rotational_correction: 0.,
            corrections: Vec::new(),
            spare: [0; 40],
        }
    }
}

/// One observation time record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObservationTime {
    /// The line number this record applies to.
    pub line_number: u16,

    /// The time that line was observed, as an MJD.
    pub observation_time: f64,
}

impl ObservationTime {
    fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<ObservationTime> {
        Ok(ObservationTime {
            line_number: endian.read_u16(read)?,
            observation_time: endian.read_f64(read)?,
        })
    }

    fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u16(write, self.line_number)?;
        endian.write_f64(write, self.observation_time)
    }
}

/// Block 9 — observation time information (variable length).
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationTimeInformation {
    /// The block number, always 9.
    pub block_number: u8,

    /// The length of this block in bytes, `45 + 10 × observation times`.
    pub block_length: u16,

    /// The per-line observation time records.
    pub observation_times: Vec<ObservationTime>,

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl ObservationTimeInformation {
    /// Reads an observation time information block.
    pub fn read_from<R: Read>(
        read: &mut R,
        endian: Endian,
    ) -> Result<ObservationTimeInformation> {
        read_block_number(read, endian, 9)?;
        let block_length = endian.read_u16(read)?;
        let count = endian.read_u16(read)?;
        let mut observation_times = Vec::with_capacity(count.into());
        for _ in 0..count {
            observation_times.push(ObservationTime::read_from(read, endian)?);
        }
        let block = ObservationTimeInformation {
            block_number: 9,
            block_length,
            observation_times,
            spare: read_bytes(read)?,
        };
        if block.len() != block.block_length {
            log::warn!(
                "observation time block declares {} bytes but contains {}",
                block.block_length,
                block.len()
            );
        }
        Ok(block)
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        endian.write_u16(write, self.observation_times.len() as u16)?;
        for observation_time in &self.observation_times {
            observation_time.write_to(write, endian)?;
        }
        write.write_all(&self.spare)?;
        Ok(())
    }

    /// Returns the byte length implied by the record count.
    pub fn len(&self) -> u16 {
        45 + 10 * self.observation_times.len() as u16
    }

    /// Returns false; the fixed fields make this block nonempty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for ObservationTimeInformation {
    fn default() -> ObservationTimeInformation {
        ObservationTimeInformation {
            block_number: 9,
            block_length: 45,
            observation_times: Vec::new(),
            spare: [0; 40],
        }
    }
}

/// One error record: a line and how many of its pixels are erroneous.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ErrorRecord {
    /// The line number this record applies to.
    pub line_number: u16,

    /// The number of error pixels in that line.
    pub number_of_pixels: u16,
}

impl ErrorRecord {
    fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<ErrorRecord> {
        Ok(ErrorRecord {
            line_number: endian.read_u16(read)?,
            number_of_pixels: endian.read_u16(read)?,
        })
    }

    fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u16(write, self.line_number)?;
        endian.write_u16(write, self.number_of_pixels)
    }
}

/// Block 10 — error information (variable length).
///
/// The only block with a four-byte block length.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorInformation {
    /// The block number, always 10.
    pub block_number: u8,

    /// The length of this block in bytes, `47 + 4 × errors`.
    pub block_length: u32,

    /// The per-line error records.
    pub errors: Vec<ErrorRecord>,

    #[allow(missing_docs)]
    pub spare: [u8; 40],
}

impl ErrorInformation {
    /// Reads an error information block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<ErrorInformation> {
        read_block_number(read, endian, 10)?;
        let block_length = endian.read_u32(read)?;
        let count = endian.read_u16(read)?;
        let mut errors = Vec::with_capacity(count.into());
        for _ in 0..count {
            errors.push(ErrorRecord::read_from(read, endian)?);
        }
        let block = ErrorInformation {
            block_number: 10,
            block_length,
            errors,
            spare: read_bytes(read)?,
        };
        if block.len() != block.block_length {
            log::warn!(
                "error information block declares {} bytes but contains {}",
                block.block_length,
                block.len()
            );
        }
        Ok(block)
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u32(write, self.block_length)?;
        endian.write_u16(write, self.errors.len() as u16)?;
        for error in &self.errors {
            error.write_to(write, endian)?;
        }
        write.write_all(&self.spare)?;
        Ok(())
    }

    /// Returns the byte length implied by the record count.
    pub fn len(&self) -> u32 {
        47 + 4 * self.errors.len() as u32
    }

    /// Returns false; the fixed fields make this block nonempty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for ErrorInformation {
    fn default() -> ErrorInformation {
        ErrorInformation {
            block_number: 10,
            block_length: 47,
            errors: Vec::new(),
            spare: [0; 40],
        }
    }
}

/// Block 11 — spare (259 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct Spare {
    /// The block number, always 11.
    pub block_number: u8,

    /// The length of this block in bytes, 259.
    pub block_length: u16,

    #[allow(missing_docs)]
    pub spare: [u8; 256],
}

impl Spare {
    /// Reads a spare block.
    pub fn read_from<R: Read>(read: &mut R, endian: Endian) -> Result<Spare> {
        read_block_number(read, endian, 11)?;
        Ok(Spare {
            block_number: 11,
            block_length: endian.read_u16(read)?,
            spare: read_bytes(read)?,
        })
    }

    /// Writes this block.
    pub fn write_to<W: Write>(&self, write: &mut W, endian: Endian) -> Result<()> {
        endian.write_u8(write, self.block_number)?;
        endian.write_u16(write, self.block_length)?;
        write.write_all(&self.spare)?;
        Ok(())
    }
}

impl Default for Spare {
    fn default() -> Spare {
        Spare {
            block_number: 11,
            block_length: 259,
            spare: [0; 256],
        }
    }
}
