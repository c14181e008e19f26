//! The byte order of an HSD file.
//!
//! HSD files declare their own byte order: a one-byte flag near the start of
//! the basic information block governs every multi-byte field that follows,
//! including the fields that precede the flag itself, which must be
//! re-interpreted once it is known. Because of that, none of the raw block
//! types commit to a byte order; an [Endian] value is threaded through every
//! decode and encode instead.

use crate::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// The byte order used for all multi-byte fields of one file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    /// Little-endian, declared by a byte-order flag of zero.
    #[default]
    Little,
    /// Big-endian, declared by any nonzero byte-order flag.
    Big,
}

impl Endian {
    /// Returns the byte order declared by a byte-order flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use hsd::Endian;
    /// assert_eq!(Endian::Little, Endian::from_flag(0));
    /// assert_eq!(Endian::Big, Endian::from_flag(1));
    /// ```
    pub fn from_flag(flag: u8) -> Endian {
        if flag == 0 {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Returns the value this byte order writes into the byte-order flag.
    pub fn to_flag(self) -> u8 {
        match self {
            Endian::Little => 0,
            Endian::Big => 1,
        }
    }

    /// Decodes a `u16` from two bytes.
    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(&bytes),
            Endian::Big => BigEndian::read_u16(&bytes),
        }
    }

    pub(crate) fn read_u8<R: Read>(self, read: &mut R) -> Result<u8> {
        read.read_u8().map_err(eof)
    }

    pub(crate) fn read_u16<R: Read>(self, read: &mut R) -> Result<u16> {
        match self {
            Endian::Little => read.read_u16::<LittleEndian>(),
            Endian::Big => read.read_u16::<BigEndian>(),
        }
        .map_err(eof)
    }

    pub(crate) fn read_u32<R: Read>(self, read: &mut R) -> Result<u32> {
        match self {
            Endian::Little => read.read_u32::<LittleEndian>(),
            Endian::Big => read.read_u32::<BigEndian>(),
        }
        .map_err(eof)
    }

    pub(crate) fn read_f32<R: Read>(self, read: &mut R) -> Result<f32> {
        match self {
            Endian::Little => read.read_f32::<LittleEndian>(),
            Endian::Big => read.read_f32::<BigEndian>(),
        }
        .map_err(eof)
    }

    pub(crate) fn read_f64<R: Read>(self, read: &mut R) -> Result<f64> {
        match self {
            Endian::Little => read.read_f64::<LittleEndian>(),
            Endian::Big => read.read_f64::<BigEndian>(),
        }
        .map_err(eof)
    }

    pub(crate) fn write_u8<W: Write>(self, write: &mut W, n: u8) -> Result<()> {
        write.write_u8(n).map_err(Error::from)
    }

    pub(crate) fn write_u16<W: Write>(self, write: &mut W, n: u16) -> Result<()> {
        match self {
            Endian::Little => write.write_u16::<LittleEndian>(n),
            Endian::Big => write.write_u16::<BigEndian>(n),
        }
        .map_err(Error::from)
    }

    pub(crate) fn write_u32<W: Write>(self, write: &mut W, n: u32) -> Result<()> {
        match self {
            Endian::Little => write.write_u32::<LittleEndian>(n),
            Endian::Big => write.write_u32::<BigEndian>(n),
        }
        .map_err(Error::from)
    }

    pub(crate) fn write_f32<W: Write>(self, write: &mut W, n: f32) -> Result<()> {
        match self {
            Endian::Little => write.write_f32::<LittleEndian>(n),
            Endian::Big => write.write_f32::<BigEndian>(n),
        }
        .map_err(Error::from)
    }

    pub(crate) fn write_f64<W: Write>(self, write: &mut W, n: f64) -> Result<()> {
        match self {
            Endian::Little => write.write_f64::<LittleEndian>(n),
            Endian::Big => write.write_f64::<BigEndian>(n),
        }
        .map_err(Error::from)
    }
}

/// Maps a short read onto the dedicated header-truncation error.
fn eof(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flag() {
        assert_eq!(Endian::Little, Endian::from_flag(0));
        assert_eq!(Endian::Big, Endian::from_flag(1));
        assert_eq!(Endian::Big, Endian::from_flag(255));
    }

    #[test]
    fn flag_roundtrip() {
        assert_eq!(Endian::Little, Endian::from_flag(Endian::Little.to_flag()));
        assert_eq!(Endian::Big, Endian::from_flag(Endian::Big.to_flag()));
    }

    #[test]
    fn u16() {
        assert_eq!(0x0102, Endian::Big.u16([1, 2]));
        assert_eq!(0x0201, Endian::Little.u16([1, 2]));
    }

    #[test]
    fn short_read_is_unexpected_eof() {
        let mut read = io::Cursor::new(vec![0u8; 3]);
        assert!(matches!(
            Endian::Little.read_f64(&mut read),
            Err(Error::UnexpectedEof)
        ));
    }
}
