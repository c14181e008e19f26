//! General-use structs and methods.

use crate::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::io::{self, Read};

/// Converts bytes into a string, following HSD rules.
///
/// HSD string fields are fixed-length, ASCII, and NUL-padded. The raw header
/// keeps them as byte arrays; trimming at the first NUL is a presentation
/// concern, handled by this trait.
pub trait ToHsdStr {
    /// Interprets the bytes up to the first NUL as a `&str`.
    ///
    /// # Examples
    ///
    /// `[u8]` implements `ToHsdStr`.
    ///
    /// ```
    /// use hsd::utils::ToHsdStr;
    /// assert_eq!("FLDK", [70, 76, 68, 75, 0, 0].to_hsd_str().unwrap());
    /// ```
    fn to_hsd_str(&self) -> Result<&str>;
}

impl ToHsdStr for [u8] {
    fn to_hsd_str(&self) -> Result<&str> {
        if let Some(idx) = self.iter().position(|&n| n == 0) {
            std::str::from_utf8(&self[0..idx])
        } else {
            std::str::from_utf8(self)
        }
        .map_err(Error::from)
    }
}

/// Converts a string into bytes, NUL-filling the remainder.
pub trait FromHsdStr {
    /// Modifies `self` to hold the provided str.
    ///
    /// # Examples
    ///
    /// `[u8; N]` implements `FromHsdStr`:
    ///
    /// ```
    /// use hsd::utils::FromHsdStr;
    /// let mut bytes = [1; 5];
    /// bytes.from_hsd_str("MSC");
    /// assert_eq!([77, 83, 67, 0, 0], bytes);
    /// ```
    fn from_hsd_str(&mut self, s: &str);
}

impl<T: AsMut<[u8]>> FromHsdStr for T {
    fn from_hsd_str(&mut self, s: &str) {
        for (a, b) in self
            .as_mut()
            .iter_mut()
            .zip(s.bytes().chain(std::iter::repeat(0)))
        {
            *a = b;
        }
    }
}

/// Converts a Modified Julian Date with fractional day into a UTC datetime.
///
/// HSD stores every timestamp this way. Returns `None` for values that fall
/// outside chrono's representable range.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, Timelike};
/// use hsd::utils::mjd_to_datetime;
/// let datetime = mjd_to_datetime(60248.56968491159).unwrap();
/// assert_eq!(2023, datetime.year());
/// assert_eq!(13, datetime.hour());
/// assert_eq!(40, datetime.minute());
/// ```
pub fn mjd_to_datetime(mjd: f64) -> Option<DateTime<Utc>> {
    if !mjd.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1858, 11, 17)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    let microseconds = mjd * 86_400_000_000.;
    if microseconds.abs() >= i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::microseconds(microseconds as i64))
}

/// Reads exactly `N` bytes.
pub(crate) fn read_bytes<const N: usize, R: Read>(read: &mut R) -> Result<[u8; N]> {
    let mut bytes = [0; N];
    read.read_exact(&mut bytes).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(err)
        }
    })?;
    Ok(bytes)
}

/// Reads and discards `bytes` bytes without seeking.
pub(crate) fn skip_bytes<R: Read>(read: &mut R, bytes: u64) -> Result<()> {
    let copied = io::copy(&mut read.by_ref().take(bytes), &mut io::sink())?;
    if copied < bytes {
        Err(Error::UnexpectedEof)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn to_hsd_str_empty() {
        let buf = [0; 0];
        assert_eq!("", buf.to_hsd_str().unwrap());
    }

    #[test]
    fn to_hsd_str_trims_at_first_nul() {
        let buf = [72, 0, 33];
        assert_eq!("H", buf.to_hsd_str().unwrap());
    }

    #[test]
    fn to_hsd_str_unpadded() {
        let buf = [70, 76, 68, 75];
        assert_eq!("FLDK", buf.to_hsd_str().unwrap());
    }

    #[test]
    fn from_hsd_str_fills_with_nul() {
        let mut bytes = [1; 4];
        bytes.from_hsd_str("RT");
        assert_eq!([82, 84, 0, 0], bytes);
    }

    #[test]
    fn mjd_epoch() {
        let datetime = mjd_to_datetime(0.).unwrap();
        assert_eq!(1858, datetime.year());
        assert_eq!(11, datetime.month());
        assert_eq!(17, datetime.day());
    }

    #[test]
    fn mjd_reference_observation() {
        let datetime = mjd_to_datetime(60248.56968491159).unwrap();
        assert_eq!(2023, datetime.year());
        assert_eq!(10, datetime.month());
        assert_eq!(31, datetime.day());
        assert_eq!(13, datetime.hour());
        assert_eq!(40, datetime.minute());
        assert_eq!(20, datetime.second());
    }

    #[test]
    fn mjd_out_of_range() {
        assert_eq!(None, mjd_to_datetime(f64::NAN));
        assert_eq!(None, mjd_to_datetime(f64::INFINITY));
        assert_eq!(None, mjd_to_datetime(1e30));
    }

    #[test]
    fn skip_bytes_short_stream() {
        let mut read = io::Cursor::new(vec![0u8; 3]);
        assert!(matches!(
            skip_bytes(&mut read, 4),
            Err(Error::UnexpectedEof)
        ));
    }
}
