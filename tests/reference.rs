//! End-to-end scenarios against a synthesized copy of the reference segment
//! `HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT`.
//!
//! The header is built field-for-field from the values of the real file, so
//! decoding it exercises the same layout a distributed segment has — without
//! shipping 24 MB of pixel data in the repository.

use hsd::{
    raw::{self, NavigationCorrection, ObservationTime},
    utils::FromHsdStr,
    Endian, Error, Reader,
};
use std::io::Cursor;

const COLUMNS: u16 = 11000;
const LINES: u16 = 1100;
const PIXELS: u64 = 12_100_000;

/// The header of the reference segment, value for value.
fn reference_header() -> raw::Header {
    let mut header = raw::Header::default();

    header.basic.byte_order = Endian::Little.to_flag();
    header.basic.satellite.from_hsd_str("Himawari-9");
    header.basic.processing_center.from_hsd_str("MSC");
    header.basic.observation_area.from_hsd_str("FLDK");
    header.basic.observation_area_info.from_hsd_str("RT");
    header.basic.observation_timeline = 1340;
    header.basic.observation_start_time = 60248.56968491159;
    header.basic.observation_end_time = 60248.57007103656;
    header.basic.file_creation_time = 60248.57473379629;
    header.basic.total_data_length = 24_200_000;
    header.basic.quality_flag_3 = 77;
    header.basic.quality_flag_4 = 1;
    header.basic.file_format_version.from_hsd_str("1.3");
    header
        .basic
        .file_name
        .from_hsd_str("HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT");

    header.data.number_of_bits_per_pixel = 16;
    header.data.number_of_columns = COLUMNS;
    header.data.number_of_lines = LINES;
    header.data.compression_flag = 0;

    header.projection.sub_lon = 140.7;
    header.projection.cfac = 40_932_549;
    header.projection.lfac = 40_932_549;
    header.projection.coff = 5500.5;
    header.projection.loff = 5500.5;
    header.projection.distance_from_earth_center = 42164.;
    header.projection.earth_equatorial_radius = 6378.137;
    header.projection.earth_polar_radius = 6356.7523;
    header.projection.ratio_diff = 0.0066943844;
    header.projection.ratio_polar = 0.993305616;
    header.projection.ratio_equatorial = 1.006739501;
    header.projection.sd_coefficient = 1_737_122_264.;
    header.projection.resampling_size = 4;

    header.navigation.navigation_time = 60248.56964875857;
    header.navigation.ssp_longitude = 140.7714266029078;
    header.navigation.ssp_latitude = 0.0005093745779982038;
    header.navigation.distance_from_earth_to_satellite = 42167.43974992831;
    header.navigation.nadir_longitude = 140.70940097119754;
    header.navigation.nadir_latitude = -0.18059667277279684;
    header.navigation.sun_position = raw::header::Position {
        x: -117_768_009.68104868,
        y: -83_032_296.6181277,
        z: -35_994_351.16214465,
    };
    header.navigation.moon_position = raw::header::Position {
        x: 115_780.14199159983,
        y: 323_216.6892999755,
        z: 168_523.58232513716,
    };

    header.calibration.band_number = 2;
    header.calibration.central_wave_length = 0.509930;
    header.calibration.valid_number_of_bits_per_pixel = 11;
    header.calibration.count_value_of_error_pixels = 65535;
    header.calibration.count_value_of_pixels_outside_scan_area = 65534;
    header.calibration.slope_for_count_radiance = 0.35414147058823525;
    header.calibration.intercept_for_count_radiance = -7.082829411764705;
    header.calibration.band = raw::header::Band::Visible(raw::header::VisibleBand {
        albedo: 0.00166101782189072,
        update_time: 57822.,
        calibrated_slope: 0.354141470588,
        calibrated_intercept: -7.082829411765,
        spare: [0; 80],
    });

    header.inter_calibration.gsics_intercept = -10_000_000_000.;
    header.inter_calibration.gsics_slope = -10_000_000_000.;
    header.inter_calibration.gsics_quadratic = -10_000_000_000.;
    header.inter_calibration.radiance_bias = -10_000_000_000.;
    header.inter_calibration.radiance_uncertainty = -10_000_000_000.;
    header.inter_calibration.radiance_standard_scene = -10_000_000_000.;
    header.inter_calibration.gsics_correction_start = -10_000_000_000.;
    header.inter_calibration.gsics_correction_end = -10_000_000_000.;
    header.inter_calibration.gsics_calibration_upper_limit = -10_000_000_000.;
    header.inter_calibration.gsics_calibration_lower_limit = -10_000_000_000.;

    header.segment.segment_total_number = 10;
    header.segment.segment_sequence_number = 1;
    header.segment.first_line_number = 1;

    header.navigation_correction.block_length = 81;
    header.navigation_correction.center_column_of_rotation = 1.;
    header.navigation_correction.center_line_of_rotation = 1.;
    header.navigation_correction.corrections = vec![
        NavigationCorrection {
            line_number_after_rotation: 1,
            shift_amount_for_column: 0.,
            shift_amount_for_line: 0.,
        },
        NavigationCorrection {
            line_number_after_rotation: 1100,
            shift_amount_for_column: 0.,
            shift_amount_for_line: 0.,
        },
    ];

    header.observation_time.block_length = 85;
    header.observation_time.observation_times = vec![
        ObservationTime {
            line_number: 1,
            observation_time: 60248.56968491159,
        },
        ObservationTime {
            line_number: 383,
            observation_time: 60248.56988264495,
        },
        ObservationTime {
            line_number: 875,
            observation_time: 60248.57007103656,
        },
        ObservationTime {
            line_number: 1100,
            observation_time: 60248.57007103656,
        },
    ];

    header.basic.total_header_length = header.total_block_length();
    header
}

/// The reference segment serialized: header plus pixel grid, with the first
/// pixel outside the scan area and everything else zero.
fn reference_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    reference_header()
        .write_to(&mut bytes, Endian::Little)
        .unwrap();
    let header_len = bytes.len();
    bytes.resize(header_len + PIXELS as usize * 2, 0);
    bytes[header_len..header_len + 2].copy_from_slice(&65534u16.to_le_bytes());
    bytes
}

#[test]
fn basic_information() {
    let reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    let header = reader.header();
    let basic = &header.raw().basic;
    assert_eq!(1, basic.block_number);
    assert_eq!(282, basic.block_length);
    assert_eq!(11, basic.total_header_blocks);
    assert_eq!(Endian::Little, header.endian());
    assert_eq!("Himawari-9", header.satellite().unwrap());
    assert_eq!("MSC", header.processing_center().unwrap());
    assert_eq!("FLDK", header.observation_area().unwrap());
    assert_eq!(1340, header.observation_timeline());
    assert_eq!(60248.56968491159, basic.observation_start_time);
    assert_eq!(1523, basic.total_header_length);
    assert_eq!(24_200_000, basic.total_data_length);
    assert_eq!("1.3", header.file_format_version().unwrap());
}

#[test]
fn data_information() {
    let reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    let data = &reader.header().raw().data;
    assert_eq!(2, data.block_number);
    assert_eq!(50, data.block_length);
    assert_eq!(16, data.number_of_bits_per_pixel);
    assert_eq!(11000, data.number_of_columns);
    assert_eq!(1100, data.number_of_lines);
    assert_eq!(0, data.compression_flag);
}

#[test]
fn projection_information() {
    let reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    let projection = &reader.header().raw().projection;
    assert_eq!(3, projection.block_number);
    assert_eq!(140.7, projection.sub_lon);
    assert_eq!(40_932_549, projection.cfac);
    assert_eq!(40_932_549, projection.lfac);
    assert_eq!(5500.5, projection.coff);
    assert_eq!(5500.5, projection.loff);
    assert_eq!(6378.137, projection.earth_equatorial_radius);
    assert_eq!(6356.7523, projection.earth_polar_radius);
}

#[test]
fn calibration_branches_on_band() {
    let reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    let calibration = &reader.header().raw().calibration;
    assert_eq!(2, calibration.band_number);
    assert_eq!(11, calibration.valid_number_of_bits_per_pixel);
    assert_eq!(65535, calibration.count_value_of_error_pixels);
    assert_eq!(65534, calibration.count_value_of_pixels_outside_scan_area);
    match calibration.band {
        raw::header::Band::Visible(ref visible) => {
            assert_eq!(0.00166101782189072, visible.albedo);
        }
        raw::header::Band::Infrared(_) => panic!("band 2 must decode the visible sub-block"),
    }
}

#[test]
fn navigation_correction_records() {
    let reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    let correction = &reader.header().raw().navigation_correction;
    assert_eq!(2, correction.corrections.len());
    assert_eq!(1, correction.corrections[0].line_number_after_rotation);
    assert_eq!(0., correction.corrections[0].shift_amount_for_column);
    assert_eq!(0., correction.corrections[0].shift_amount_for_line);
    assert_eq!(1100, correction.corrections[1].line_number_after_rotation);
}

#[test]
fn block_lengths_sum_to_total_header_length() {
    let reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    let raw = reader.header().raw();
    assert_eq!(raw.basic.total_header_length, raw.total_block_length());
}

#[test]
fn pixel_enumeration() {
    let mut reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    assert_eq!(PIXELS, reader.remaining());
    assert_eq!(65534, reader.read_pixel().unwrap());
    for _ in 1..PIXELS {
        reader.read_pixel().unwrap();
    }
    assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
}

#[test]
fn skip_to_last() {
    let mut reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    assert_eq!(65534, reader.read_pixel().unwrap());
    reader.skip(PIXELS - 1).unwrap();
    assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
    assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
}

#[test]
fn full_skip() {
    let mut reader = Reader::new(Cursor::new(reference_bytes())).unwrap();
    reader.skip(PIXELS).unwrap();
    assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
}

#[test]
fn header_roundtrip_is_byte_identical() {
    let bytes = reference_bytes();
    let reader = Reader::new(Cursor::new(bytes.clone())).unwrap();
    let header = reader.header().clone();
    let total_header_length = header.raw().basic.total_header_length as usize;
    let mut rewritten = Vec::new();
    header
        .into_raw()
        .write_to(&mut rewritten, Endian::Little)
        .unwrap();
    assert_eq!(total_header_length, rewritten.len());
    assert_eq!(&bytes[..total_header_length], rewritten.as_slice());
}
