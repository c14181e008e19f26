//! Read HSD pixel counts.
//!
//! A [Reader] decodes the header of one segment file and exposes a
//! forward-only cursor over its 16-bit pixel grid. The cursor never seeks,
//! so it works over any byte source — a file, a decompression stream, or an
//! in-memory buffer:
//!
//! ```no_run
//! use hsd::Reader;
//!
//! let mut reader = Reader::from_path("HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT").unwrap();
//! let first = reader.read_pixel().unwrap();
//! ```
//!
//! `skip` discards pixels without decoding them, which is what makes
//! downsampled rendering cheap: a render at stride 8 skips past seven of
//! every eight pixels and seven of every eight rows.
//!
//! If you're reading any significant number of pixels from a `File`, wrap it
//! in a `BufReader` (`Reader::from_path` does this for you).

use crate::{raw, Endian, Error, Header, Result};
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// A forward-only cursor over a segment's pixel grid.
///
/// The cursor tracks how many pixels remain; reading past the end yields
/// [Error::Eof], while skipping past the end clamps silently, which matches
/// the way a render loop reads the last pixel of a row and then issues a
/// row-end skip.
pub struct PixelCursor {
    read: Box<dyn Read + Send>,
    endian: Endian,
    remaining: u64,
}

impl std::fmt::Debug for PixelCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelCursor")
            .field("read", &"Box<dyn Read + Send>")
            .field("endian", &self.endian)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl PixelCursor {
    pub(crate) fn new(
        read: Box<dyn Read + Send>,
        header: &Header,
    ) -> Result<PixelCursor> {
        let bits = header.bits_per_pixel();
        if bits != 16 {
            return Err(Error::UnsupportedPixelWidth(bits));
        }
        Ok(PixelCursor {
            read,
            endian: header.endian(),
            remaining: header.number_of_pixels(),
        })
    }

    /// Reads the next raw count.
    ///
    /// Returns [Error::Eof] once `columns × lines` pixels have been
    /// consumed. I/O failures from the underlying source surface as
    /// [Error::Io].
    pub fn read_pixel(&mut self) -> Result<u16> {
        if self.remaining == 0 {
            return Err(Error::Eof);
        }
        let mut bytes = [0; 2];
        self.read.read_exact(&mut bytes)?;
        self.remaining -= 1;
        Ok(self.endian.u16(bytes))
    }

    /// Advances the cursor by `n` pixels, clamping at the end of the grid.
    ///
    /// Skipping past the end is not an error.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let n = n.min(self.remaining);
        let bytes = n * 2;
        let copied = io::copy(&mut self.read.by_ref().take(bytes), &mut io::sink())?;
        if copied < bytes {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        self.remaining -= n;
        Ok(())
    }

    /// Returns the number of pixels left in the grid.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

/// An iterator over the pixels in a [Reader].
///
/// This struct is generally created by calling `pixels()` on [Reader].
#[allow(missing_debug_implementations)]
pub struct Pixels<'a> {
    cursor: &'a mut PixelCursor,
}

impl Iterator for Pixels<'_> {
    type Item = Result<u16>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.remaining() == 0 {
            None
        } else {
            Some(self.cursor.read_pixel())
        }
    }
}

/// Reads one HSD segment file: a decoded header and a cursor over its
/// pixels.
#[derive(Debug)]
pub struct Reader {
    header: Header,
    cursor: PixelCursor,
}

impl Reader {
    /// Creates a new reader, decoding the header from the front of the byte
    /// source.
    ///
    /// The source only needs to read forward; no seeking is required, so a
    /// decompression stream works as well as a file. This does *not* wrap
    /// the source in a `BufRead` — do that yourself if you care about
    /// per-pixel read performance, or use [Reader::from_path].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use hsd::{Endian, Reader};
    ///
    /// let mut header = hsd::raw::Header::default();
    /// header.data.number_of_columns = 1;
    /// header.data.number_of_lines = 1;
    /// let mut bytes = Vec::new();
    /// header.write_to(&mut bytes, Endian::Little).unwrap();
    /// bytes.extend([0xfe, 0xff]);
    ///
    /// let mut reader = Reader::new(Cursor::new(bytes)).unwrap();
    /// assert_eq!(65534, reader.read_pixel().unwrap());
    /// ```
    pub fn new<R: Read + Send + 'static>(mut read: R) -> Result<Reader> {
        let (raw, endian) = raw::Header::read_from(&mut read)?;
        let header = Header::new(raw, endian)?;
        let cursor = PixelCursor::new(Box::new(read), &header)?;
        Ok(Reader { header, cursor })
    }

    /// Creates a new reader from a path.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance
    /// reasons.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hsd::Reader;
    /// let reader = Reader::from_path("HS_H09_20231031_1340_B02_FLDK_R10_S0110.DAT").unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader> {
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| Reader::new(BufReader::new(file)))
    }

    /// Returns a reference to this reader's header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next raw count.
    ///
    /// See [PixelCursor::read_pixel].
    pub fn read_pixel(&mut self) -> Result<u16> {
        self.cursor.read_pixel()
    }

    /// Advances the cursor by `n` pixels, clamping at the end of the grid.
    ///
    /// See [PixelCursor::skip].
    pub fn skip(&mut self, n: u64) -> Result<()> {
        self.cursor.skip(n)
    }

    /// Returns the number of pixels left in the grid.
    pub fn remaining(&self) -> u64 {
        self.cursor.remaining()
    }

    /// Returns an iterator over this reader's remaining pixels.
    ///
    /// The iterator ends cleanly at the last pixel of the grid instead of
    /// yielding [Error::Eof].
    pub fn pixels(&mut self) -> Pixels<'_> {
        Pixels {
            cursor: &mut self.cursor,
        }
    }

    /// Consumes this reader, returning its header and pixel cursor.
    pub fn into_parts(self) -> (Header, PixelCursor) {
        (self.header, self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_bytes(columns: u16, lines: u16, pixels: &[u16]) -> Vec<u8> {
        let mut header = raw::Header::default();
        header.data.number_of_columns = columns;
        header.data.number_of_lines = lines;
        header.basic.total_data_length = u32::from(columns) * u32::from(lines) * 2;
        let mut bytes = Vec::new();
        header.write_to(&mut bytes, Endian::Little).unwrap();
        for &pixel in pixels {
            bytes.extend(pixel.to_le_bytes());
        }
        bytes
    }

    fn reader(columns: u16, lines: u16, pixels: &[u16]) -> Reader {
        Reader::new(io::Cursor::new(segment_bytes(columns, lines, pixels))).unwrap()
    }

    #[test]
    fn read_every_pixel_then_eof() {
        let pixels: Vec<u16> = (0..12).collect();
        let mut reader = reader(4, 3, &pixels);
        for expected in 0..12 {
            assert_eq!(expected, reader.read_pixel().unwrap());
        }
        assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
    }

    #[test]
    fn skip_then_read_tail() {
        let pixels: Vec<u16> = (0..12).collect();
        for k in 0..=12u64 {
            let mut reader = reader(4, 3, &pixels);
            reader.skip(k).unwrap();
            for expected in k..12 {
                assert_eq!(expected as u16, reader.read_pixel().unwrap());
            }
            assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
        }
    }

    #[test]
    fn skip_past_end_clamps() {
        let pixels: Vec<u16> = (0..12).collect();
        let mut reader = reader(4, 3, &pixels);
        reader.skip(100).unwrap();
        assert_eq!(0, reader.remaining());
        assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
    }

    #[test]
    fn skip_to_last_pixel() {
        let pixels: Vec<u16> = (0..12).collect();
        let mut reader = reader(4, 3, &pixels);
        assert_eq!(0, reader.read_pixel().unwrap());
        reader.skip(11).unwrap();
        assert!(matches!(reader.read_pixel(), Err(Error::Eof)));
    }

    #[test]
    fn pixels_iterator_ends_cleanly() {
        let pixels: Vec<u16> = (0..12).collect();
        let mut reader = reader(4, 3, &pixels);
        let read: Vec<u16> = reader.pixels().map(|pixel| pixel.unwrap()).collect();
        assert_eq!(pixels, read);
    }

    #[test]
    fn big_endian_pixels() {
        let mut header = raw::Header::default();
        header.basic.byte_order = Endian::Big.to_flag();
        header.data.number_of_columns = 1;
        header.data.number_of_lines = 1;
        header.basic.total_data_length = 2;
        let mut bytes = Vec::new();
        header.write_to(&mut bytes, Endian::Big).unwrap();
        bytes.extend(513u16.to_be_bytes());
        let mut reader = Reader::new(io::Cursor::new(bytes)).unwrap();
        assert_eq!(513, reader.read_pixel().unwrap());
    }

    #[test]
    fn unsupported_pixel_width() {
        let mut header = raw::Header::default();
        header.data.number_of_bits_per_pixel = 8;
        header.calibration.valid_number_of_bits_per_pixel = 8;
        let mut bytes = Vec::new();
        header.write_to(&mut bytes, Endian::Little).unwrap();
        assert!(matches!(
            Reader::new(io::Cursor::new(bytes)),
            Err(Error::UnsupportedPixelWidth(8))
        ));
    }

    #[test]
    fn truncated_pixel_stream_is_io() {
        let mut bytes = segment_bytes(4, 3, &[0; 2]);
        bytes.truncate(bytes.len() - 1);
        let mut reader = Reader::new(io::Cursor::new(bytes)).unwrap();
        assert_eq!(0, reader.read_pixel().unwrap());
        assert!(matches!(reader.read_pixel(), Err(Error::Io(_))));
    }
}
