//! Compose an observation into a grayscale raster.
//!
//! The renderer walks each segment's pixel cursor with a nearest-neighbor
//! stride: read one pixel, skip `downsample − 1` columns, and after each
//! output row skip `downsample − 1` full input rows. At high downsample
//! factors most of the pixel stream is never decoded at all.
//!
//! Segments are independent, so they are rendered in parallel, one task per
//! segment. The output buffer is allocated up front and partitioned into
//! disjoint horizontal bands, one per segment, so the tasks never share
//! memory.
//!
//! ```no_run
//! use hsd::{Renderer, SegmentSet};
//!
//! let segments = SegmentSet::from_paths(vec![
//!     "HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT",
//! ]).unwrap();
//! let image = Renderer::new(8).with_brightness(1.2).render(segments).unwrap();
//! ```

use crate::{Error, Reader, Result, SegmentSet};
use image::{DynamicImage, GrayImage, RgbaImage};
use rayon::prelude::*;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Maps raw counts to grayscale intensities.
///
/// The two sentinel counts render black. Everything else is scaled by the
/// band's valid dynamic range: `2^valid_bits − 2`, the `−2` because the two
/// sentinels occupy the top of the raw count space.
#[derive(Clone, Copy)]
struct Shade {
    valid_bits: u16,
    error_pixel: u16,
    outside_scan: u16,
    brightness: f64,
}

impl Shade {
    fn shade(&self, raw: u16) -> u8 {
        if raw == self.error_pixel || raw == self.outside_scan {
            return 0;
        }
        let range = f64::from(1u32 << self.valid_bits) - 2.;
        let coef = f64::from(raw) / range;
        (coef * 255. * self.brightness).min(255.) as u8
    }
}

/// Renders a [SegmentSet] into an 8-bit grayscale image.
#[derive(Clone, Debug)]
pub struct Renderer {
    downsample: u32,
    brightness: f64,
    cancel: Option<Arc<AtomicBool>>,
}

impl Renderer {
    /// Creates a renderer with the given downsample factor.
    ///
    /// A factor of 1 renders at full resolution. Zero is rejected by
    /// [Renderer::render].
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::Renderer;
    /// let renderer = Renderer::new(8);
    /// ```
    pub fn new(downsample: u32) -> Renderer {
        Renderer {
            downsample,
            brightness: 1.,
            cancel: None,
        }
    }

    /// Sets the brightness multiplier, 1.0 by default.
    ///
    /// Intensities saturate at white, so a multiplier above 1.0 brightens
    /// dim bands at the cost of clipping the top of the range.
    pub fn with_brightness(mut self, brightness: f64) -> Renderer {
        self.brightness = brightness;
        self
    }

    /// Sets a cancellation flag.
    ///
    /// The flag is checked at segment boundaries; once set, the render
    /// returns [Error::Cancelled] and the partial raster is discarded.
    /// In-flight per-pixel work within a segment is not interrupted.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Renderer {
        self.cancel = Some(cancel);
        self
    }

    /// Renders the segments into a single grayscale image.
    ///
    /// The output is `(columns / downsample)` pixels wide and
    /// `(lines / downsample) × segment_total_number` pixels tall; segment
    /// `s` occupies the band of rows starting at
    /// `(s − 1) × lines / downsample`. Segments are decoded in parallel,
    /// each task writing to its own band of the pre-allocated buffer.
    ///
    /// Any per-pixel error aborts that segment's task; the render waits for
    /// the outstanding tasks and returns the first error reported.
    pub fn render(&self, segments: SegmentSet) -> Result<GrayImage> {
        if self.downsample == 0 {
            return Err(Error::InvalidDownsample);
        }
        let header = segments.header();
        let columns = u32::from(header.columns());
        let scaled_width = columns / self.downsample;
        let scaled_height = u32::from(header.lines()) / self.downsample;
        let total_segments = u32::from(header.total_segments());
        let shade = Shade {
            valid_bits: header.valid_bits_per_pixel(),
            error_pixel: header.error_pixel_count(),
            outside_scan: header.outside_scan_count(),
            brightness: self.brightness,
        };
        let band_len = scaled_width as usize * scaled_height as usize;
        let mut data = vec![0; band_len * total_segments as usize];
        if band_len > 0 {
            data.par_chunks_mut(band_len)
                .zip(segments.into_segments())
                .try_for_each(|(band, mut segment)| {
                    self.render_segment(&mut segment, band, scaled_width, scaled_height, columns, shade)
                })?;
        }
        let image = GrayImage::from_raw(scaled_width, scaled_height * total_segments, data)
            .expect("band partitioning matches the image dimensions");
        Ok(image)
    }

    /// Renders the segments into an RGBA image.
    ///
    /// The grayscale intensity is replicated across the R, G, and B
    /// channels, with A at 255.
    pub fn render_rgba(&self, segments: SegmentSet) -> Result<RgbaImage> {
        self.render(segments)
            .map(|image| DynamicImage::ImageLuma8(image).to_rgba8())
    }

    fn render_segment(
        &self,
        segment: &mut Reader,
        band: &mut [u8],
        scaled_width: u32,
        scaled_height: u32,
        columns: u32,
        shade: Shade,
    ) -> Result<()> {
        if let Some(cancel) = &self.cancel {
            if cancel.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
        }
        let stride = u64::from(self.downsample) - 1;
        let mut index = 0;
        for _ in 0..scaled_height {
            for _ in 0..scaled_width {
                let raw = segment.read_pixel()?;
                band[index] = shade.shade(raw);
                index += 1;
                segment.skip(stride)?;
            }
            // The row stride may clamp at the end of the segment.
            segment.skip(u64::from(columns) * stride)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raw, Endian, SegmentSet};
    use std::io::Cursor;

    fn segment(sequence: u8, total: u8, columns: u16, lines: u16, pixels: &[u16]) -> Reader {
        assert_eq!(usize::from(columns) * usize::from(lines), pixels.len());
        let mut header = raw::Header::default();
        header.data.number_of_columns = columns;
        header.data.number_of_lines = lines;
        header.basic.total_data_length = u32::from(columns) * u32::from(lines) * 2;
        header.calibration.band_number = 2;
        header.segment.segment_sequence_number = sequence;
        header.segment.segment_total_number = total;
        let mut bytes = Vec::new();
        header.write_to(&mut bytes, Endian::Little).unwrap();
        for &pixel in pixels {
            bytes.extend(pixel.to_le_bytes());
        }
        Reader::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn zero_downsample() {
        let set = SegmentSet::new(vec![segment(1, 1, 2, 2, &[0; 4])]).unwrap();
        assert!(matches!(
            Renderer::new(0).render(set),
            Err(Error::InvalidDownsample)
        ));
    }

    #[test]
    fn geometry_over_downsample_range() {
        for downsample in 1..=6u32 {
            let set = SegmentSet::new(vec![segment(1, 1, 6, 6, &[0; 36])]).unwrap();
            let image = Renderer::new(downsample).render(set).unwrap();
            assert_eq!(6 / downsample, image.width());
            assert_eq!(6 / downsample, image.height());
        }
    }

    #[test]
    fn downsample_larger_than_grid() {
        let set = SegmentSet::new(vec![segment(1, 1, 4, 4, &[0; 16])]).unwrap();
        let image = Renderer::new(5).render(set).unwrap();
        assert_eq!(0, image.width());
        assert_eq!(0, image.height());
    }

    #[test]
    fn sentinels_render_black() {
        let set = SegmentSet::new(vec![segment(1, 1, 2, 1, &[65535, 65534])]).unwrap();
        let image = Renderer::new(1).render(set).unwrap();
        assert_eq!(0, image.get_pixel(0, 0).0[0]);
        assert_eq!(0, image.get_pixel(1, 0).0[0]);
    }

    #[test]
    fn count_scaling() {
        // With 11 valid bits the dynamic range is 2^11 - 2 = 2046.
        let set = SegmentSet::new(vec![segment(1, 1, 4, 1, &[0, 1023, 2045, 2046])]).unwrap();
        let image = Renderer::new(1).render(set).unwrap();
        assert_eq!(0, image.get_pixel(0, 0).0[0]);
        assert_eq!(127, image.get_pixel(1, 0).0[0]);
        assert_eq!(254, image.get_pixel(2, 0).0[0]);
        assert_eq!(255, image.get_pixel(3, 0).0[0]);
    }

    #[test]
    fn brightness_scales_and_clips() {
        let set = SegmentSet::new(vec![segment(1, 1, 2, 1, &[1023, 2046])]).unwrap();
        let image = Renderer::new(1).with_brightness(2.).render(set).unwrap();
        assert_eq!(255, image.get_pixel(0, 0).0[0]);
        assert_eq!(255, image.get_pixel(1, 0).0[0]);

        let set = SegmentSet::new(vec![segment(1, 1, 2, 1, &[1023, 2046])]).unwrap();
        let image = Renderer::new(1).with_brightness(0.5).render(set).unwrap();
        assert_eq!(63, image.get_pixel(0, 0).0[0]);
        assert_eq!(127, image.get_pixel(1, 0).0[0]);
    }

    #[test]
    fn nearest_neighbor_stride() {
        let mut pixels = [0u16; 16];
        pixels[0] = 100;
        pixels[2] = 200;
        pixels[8] = 800;
        pixels[10] = 1000;
        let set = SegmentSet::new(vec![segment(1, 1, 4, 4, &pixels)]).unwrap();
        let image = Renderer::new(2).render(set).unwrap();
        assert_eq!(2, image.width());
        assert_eq!(2, image.height());
        // floor(raw / 2046 * 255) for the four sampled positions.
        assert_eq!(12, image.get_pixel(0, 0).0[0]);
        assert_eq!(24, image.get_pixel(1, 0).0[0]);
        assert_eq!(99, image.get_pixel(0, 1).0[0]);
        assert_eq!(124, image.get_pixel(1, 1).0[0]);
    }

    #[test]
    fn segments_compose_by_sequence_number() {
        // Passed in reverse order; placement must follow sequence numbers.
        let second = segment(2, 2, 2, 2, &[2046; 4]);
        let first = segment(1, 2, 2, 2, &[0; 4]);
        let set = SegmentSet::new(vec![second, first]).unwrap();
        let image = Renderer::new(1).render(set).unwrap();
        assert_eq!(2, image.width());
        assert_eq!(4, image.height());
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(0, image.get_pixel(x, y).0[0]);
                assert_eq!(255, image.get_pixel(x, y + 2).0[0]);
            }
        }
    }

    #[test]
    fn rgba_replicates_gray() {
        let set = SegmentSet::new(vec![segment(1, 1, 1, 1, &[1023])]).unwrap();
        let image = Renderer::new(1).render_rgba(set).unwrap();
        assert_eq!([127, 127, 127, 255], image.get_pixel(0, 0).0);
    }

    #[test]
    fn cancelled_before_any_segment() {
        let cancel = Arc::new(AtomicBool::new(true));
        let set = SegmentSet::new(vec![segment(1, 1, 2, 2, &[0; 4])]).unwrap();
        assert!(matches!(
            Renderer::new(1).with_cancel_flag(cancel).render(set),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn truncated_segment_aborts_render() {
        let mut header = raw::Header::default();
        header.data.number_of_columns = 2;
        header.data.number_of_lines = 2;
        header.basic.total_data_length = 8;
        let mut bytes = Vec::new();
        header.write_to(&mut bytes, Endian::Little).unwrap();
        bytes.extend([0, 0]); // one pixel instead of four
        let reader = Reader::new(Cursor::new(bytes)).unwrap();
        let set = SegmentSet::new(vec![reader]).unwrap();
        assert!(matches!(
            Renderer::new(1).render(set),
            Err(Error::Io(_))
        ));
    }
}
