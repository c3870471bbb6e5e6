//! The label table of a domain name.
//!
//! Every name operation that needs to find a particular label goes through
//! the position of each label’s length octet within the name’s octets. These
//! positions can either be cached with the name or recomputed on demand.

use super::error::NameError;
use super::label::{Label, SplitLabelError};
use core::ops;

//------------ Limits --------------------------------------------------------

/// The maximum length of a domain name in wire format.
pub const MAX_NAME_LEN: usize = 255;

/// The maximum number of labels in a domain name, including the root label.
pub const MAX_LABEL_COUNT: usize = 127;

//------------ Offsets -------------------------------------------------------

/// The cached label offsets of a name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Offsets {
    /// The offsets of all labels in order.
    Cached(Vec<u8>),

    /// Nothing cached, offsets are recomputed whenever needed.
    #[default]
    None,
}

impl Offsets {
    /// Returns whether offsets have been cached.
    pub fn is_cached(&self) -> bool {
        matches!(self, Offsets::Cached(_))
    }
}

//------------ LabelTable ----------------------------------------------------

/// The offsets of the labels of a name computed by scanning its octets.
#[derive(Clone, Copy, Debug)]
pub struct LabelTable {
    offsets: [u8; MAX_LABEL_COUNT],
    count: u8,
    absolute: bool,
}

impl LabelTable {
    /// Scans an octets slice and checks that it is a valid name.
    ///
    /// The slice has to contain exactly one uncompressed name in wire
    /// format. This may be a relative name in which case it simply ends
    /// after the last label.
    pub fn scan(slice: &[u8]) -> Result<Self, NameError> {
        if slice.len() > MAX_NAME_LEN {
            return Err(NameError::NameTooLong);
        }
        let mut res = LabelTable::empty();
        let mut pos = 0;
        while pos < slice.len() {
            if usize::from(res.count) == MAX_LABEL_COUNT {
                return Err(NameError::NameTooLong);
            }
            let (label, _) = Label::split_from(&slice[pos..])?;
            res.offsets[usize::from(res.count)] = pos as u8;
            res.count += 1;
            pos += label.wire_len();
            if label.is_root() {
                if pos != slice.len() {
                    return Err(NameError::TrailingData);
                }
                res.absolute = true;
            }
        }
        Ok(res)
    }

    /// Scans the octets of a name that are known to be valid.
    ///
    /// If the slice isn’t valid after all, the table ends at the first
    /// offending label.
    pub fn scan_unchecked(slice: &[u8]) -> Self {
        let mut res = LabelTable::empty();
        let mut pos = 0;
        while pos < slice.len() && usize::from(res.count) < MAX_LABEL_COUNT {
            let label = match Label::split_from(&slice[pos..]) {
                Ok((label, _)) => label,
                Err(SplitLabelError::Pointer(_))
                | Err(SplitLabelError::BadType(_))
                | Err(SplitLabelError::ShortInput) => break,
            };
            res.offsets[usize::from(res.count)] = pos as u8;
            res.count += 1;
            pos += label.wire_len();
            if label.is_root() {
                res.absolute = true;
                break;
            }
        }
        res
    }

    fn empty() -> Self {
        LabelTable {
            offsets: [0; MAX_LABEL_COUNT],
            count: 0,
            absolute: false,
        }
    }

    /// Returns the number of labels.
    pub fn count(&self) -> usize {
        usize::from(self.count)
    }

    /// Returns whether the last label is the root label.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns the offsets as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.offsets[..usize::from(self.count)]
    }
}

//------------ LabelOffsets --------------------------------------------------

/// The label offsets of a name, either borrowed from a cache or computed.
#[derive(Clone, Copy, Debug)]
pub enum LabelOffsets<'a> {
    Cached(&'a [u8]),
    Computed(LabelTable),
}

impl<'a> ops::Deref for LabelOffsets<'a> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match *self {
            LabelOffsets::Cached(slice) => slice,
            LabelOffsets::Computed(ref table) => table.as_slice(),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets_default() {
        assert_eq!(Offsets::default(), Offsets::None);
        assert!(!Offsets::default().is_cached());
        assert!(Offsets::Cached(vec![0]).is_cached());
    }

    #[test]
    fn scan() {
        let table = LabelTable::scan(b"\x03www\x07example\x03com\0").unwrap();
        assert_eq!(table.as_slice(), &[0, 4, 12, 16]);
        assert!(table.is_absolute());

        let table = LabelTable::scan(b"\x03www\x07example").unwrap();
        assert_eq!(table.as_slice(), &[0, 4]);
        assert!(!table.is_absolute());

        let table = LabelTable::scan(b"").unwrap();
        assert_eq!(table.count(), 0);
        assert!(!table.is_absolute());
    }

    #[test]
    fn scan_errors() {
        assert_eq!(
            LabelTable::scan(b"\x03www\0\x03com").unwrap_err(),
            NameError::TrailingData
        );
        assert_eq!(
            LabelTable::scan(b"\x03www\xc0\x0c").unwrap_err(),
            NameError::CompressedName
        );
        assert_eq!(
            LabelTable::scan(b"\x03www\x07exa").unwrap_err(),
            NameError::UnexpectedEnd
        );
        assert_eq!(
            LabelTable::scan(b"\x43www").unwrap_err(),
            NameError::BadLabelType
        );
        assert_eq!(
            LabelTable::scan(&[0u8; 256]).unwrap_err(),
            NameError::NameTooLong
        );

        // 127 single octet labels plus the root label.
        let mut many = Vec::new();
        for _ in 0..127 {
            many.extend_from_slice(b"\x01a");
        }
        many.push(0);
        assert_eq!(many.len(), 255);
        assert_eq!(
            LabelTable::scan(&many).unwrap_err(),
            NameError::NameTooLong
        );
        assert_eq!(LabelTable::scan(&many[2..]).unwrap().count(), 127);
    }

    #[test]
    fn scan_unchecked() {
        let table = LabelTable::scan_unchecked(b"\x03www\0\x03com");
        assert_eq!(table.as_slice(), &[0, 4]);
        assert!(table.is_absolute());

        let table = LabelTable::scan_unchecked(b"\x03www\xc0\x0c");
        assert_eq!(table.as_slice(), &[0]);
    }

    #[test]
    fn label_offsets() {
        let cached = [0u8, 4];
        assert_eq!(&*LabelOffsets::Cached(&cached), &[0, 4]);
        let table = LabelTable::scan(b"\x01a\0").unwrap();
        assert_eq!(&*LabelOffsets::Computed(table), &[0, 2]);
    }
}
