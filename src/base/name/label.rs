//! Single labels of a domain name.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::dname::Name;
use super::error::NameError;
use super::to_text::write_label;
use core::{borrow, cmp, fmt, hash, iter, mem, ops, slice, str};
use octseq::builder::OctetsBuilder;

//------------ Label ---------------------------------------------------------

/// The content of a single label.
///
/// A label is an unsized type atop the octets of some name. It holds the
/// content only, the length octet preceding it on the wire is not part of
/// it. Only normal labels of at most 63 octets exist. All other label types
/// are rejected when a label is split off a name.
///
/// Labels compare and hash ignoring ASCII case.
#[repr(transparent)]
pub struct Label([u8]);

impl Label {
    /// The maximum length of a label’s content.
    pub const MAX_LEN: usize = 63;

    /// Creates a label atop a slice without checking its length.
    ///
    /// # Safety
    ///
    /// The `slice` must be at most 63 octets long.
    pub(super) unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Label is repr(transparent) over [u8].
        mem::transmute(slice)
    }

    /// Creates a label from its content.
    pub fn from_slice(slice: &[u8]) -> Result<&Self, LongLabelError> {
        if slice.len() > Label::MAX_LEN {
            return Err(LongLabelError(()));
        }
        // SAFETY: The length has just been checked.
        Ok(unsafe { Self::from_slice_unchecked(slice) })
    }

    /// Takes the label in wire format off the start of `slice`.
    ///
    /// Returns the label and whatever is left of the slice.
    pub fn split_from(
        slice: &[u8],
    ) -> Result<(&Self, &[u8]), SplitLabelError> {
        let (&head, tail) =
            slice.split_first().ok_or(SplitLabelError::ShortInput)?;
        match head {
            0..=0x3F => {
                let len = usize::from(head);
                if tail.len() < len {
                    return Err(SplitLabelError::ShortInput);
                }
                let (content, tail) = tail.split_at(len);
                // SAFETY: The length octet is at most 63.
                Ok((unsafe { Self::from_slice_unchecked(content) }, tail))
            }
            0x40..=0x7F => Err(LabelTypeError::Extended(head).into()),
            0x80..=0xBF => Err(LabelTypeError::Undefined.into()),
            _ => match tail.first() {
                Some(&low) => Err(SplitLabelError::Pointer(
                    (u16::from(head & 0x3F) << 8) | u16::from(low),
                )),
                None => Err(SplitLabelError::ShortInput),
            },
        }
    }

    /// Returns the content of the label.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns an iterator over the octets of the label.
    pub fn iter(&self) -> iter::Copied<slice::Iter<'_, u8>> {
        self.0.iter().copied()
    }

    /// Returns the length of the content.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the length of the label in wire format.
    pub fn wire_len(&self) -> usize {
        self.0.len() + 1
    }

    /// Returns whether the label is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether this is the root label.
    ///
    /// The root label is the only empty label.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether this is the wildcard label `*`.
    pub fn is_wildcard(&self) -> bool {
        &self.0 == b"*"
    }

    /// Appends the label in wire format with all letters lowercased.
    pub fn compose_canonical<Builder: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Builder,
    ) -> Result<(), Builder::AppendError> {
        let mut owned = OwnedLabel::from_label(self);
        owned.0[1..].make_ascii_lowercase();
        target.append_slice(owned.as_wire_slice())
    }
}

//--- AsRef

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

//--- PartialEq, Eq, PartialOrd, and Ord

impl<T: AsRef<[u8]> + ?Sized> PartialEq<T> for Label {
    fn eq(&self, other: &T) -> bool {
        self.0.eq_ignore_ascii_case(other.as_ref())
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    /// Compares the octets of the labels with ASCII letters lowercased.
    ///
    /// This is the label order of section 6.1 of RFC 4034.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.iter()
            .map(|ch| ch.to_ascii_lowercase())
            .cmp(other.iter().map(|ch| ch.to_ascii_lowercase()))
    }
}

//--- Hash

impl hash::Hash for Label {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // The length keeps the labels of a name apart.
        state.write_u8(self.len() as u8);
        for ch in self.iter() {
            state.write_u8(ch.to_ascii_lowercase())
        }
    }
}

//--- Display and Debug

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_label(&self.0, false, f)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Label({})", self)
    }
}

//------------ OwnedLabel ----------------------------------------------------

/// A label that owns its octets.
///
/// The label is kept in wire format in an array large enough for the
/// longest label, so creating one never allocates. It serves as the key
/// of the tree in [`TreeCompressor`][super::TreeCompressor].
#[derive(Clone, Copy)]
pub struct OwnedLabel([u8; 64]);

impl OwnedLabel {
    /// Copies a label.
    pub fn from_label(label: &Label) -> Self {
        let mut octets = [0; 64];
        octets[0] = label.len() as u8;
        octets[1..label.wire_len()].copy_from_slice(label.as_slice());
        OwnedLabel(octets)
    }

    /// Returns a reference to the label.
    pub fn as_label(&self) -> &Label {
        // SAFETY: The length octet came from a label and is at most 63.
        unsafe { Label::from_slice_unchecked(&self.as_wire_slice()[1..]) }
    }

    /// Returns the label in wire format, length octet included.
    pub fn as_wire_slice(&self) -> &[u8] {
        &self.0[..=usize::from(self.0[0])]
    }
}

impl<'a> From<&'a Label> for OwnedLabel {
    fn from(label: &'a Label) -> Self {
        Self::from_label(label)
    }
}

impl ops::Deref for OwnedLabel {
    type Target = Label;

    fn deref(&self) -> &Label {
        self.as_label()
    }
}

impl borrow::Borrow<Label> for OwnedLabel {
    fn borrow(&self) -> &Label {
        self.as_label()
    }
}

impl PartialEq for OwnedLabel {
    fn eq(&self, other: &Self) -> bool {
        self.as_label() == other.as_label()
    }
}

impl Eq for OwnedLabel {}

impl hash::Hash for OwnedLabel {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_label().hash(state)
    }
}

impl fmt::Display for OwnedLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_label().fmt(f)
    }
}

impl fmt::Debug for OwnedLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OwnedLabel({})", self)
    }
}

impl str::FromStr for OwnedLabel {
    type Err = NameError;

    /// Parses a single label in presentation format.
    ///
    /// A lone dot results in the root label. Text containing more than one
    /// label is rejected with [`NameError::TrailingData`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = Name::from_text(s, None, false)?;
        if name.is_root() || (!name.is_absolute() && name.label_count() == 1)
        {
            Ok(name.label(0).into())
        } else if name.is_empty() {
            Err(NameError::UnexpectedEnd)
        } else {
            Err(NameError::TrailingData)
        }
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for OwnedLabel {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_newtype_struct(
                "OwnedLabel",
                &format_args!("{}", self),
            )
        } else {
            serializer.serialize_newtype_struct(
                "OwnedLabel",
                &octseq::serde::SerializeOctets::as_serialized_octets(
                    self.as_label().as_slice(),
                ),
            )
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OwnedLabel {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use serde::de::Error;
        use std::str::FromStr;

        struct InnerVisitor;

        impl<'de> serde::de::Visitor<'de> for InnerVisitor {
            type Value = OwnedLabel;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name label")
            }

            fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
                OwnedLabel::from_str(v).map_err(E::custom)
            }

            fn visit_bytes<E: Error>(
                self,
                value: &[u8],
            ) -> Result<Self::Value, E> {
                Label::from_slice(value)
                    .map(OwnedLabel::from_label)
                    .map_err(E::custom)
            }
        }

        struct NewtypeVisitor;

        impl<'de> serde::de::Visitor<'de> for NewtypeVisitor {
            type Value = OwnedLabel;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name label")
            }

            fn visit_newtype_struct<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(InnerVisitor)
                } else {
                    deserializer.deserialize_bytes(InnerVisitor)
                }
            }
        }

        deserializer.deserialize_newtype_struct("OwnedLabel", NewtypeVisitor)
    }
}

//============ Error Types ===================================================

//------------ LabelTypeError ------------------------------------------------

/// A length octet announced a label type other than a normal label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelTypeError {
    /// The type bits were `0b10` which has never been assigned.
    Undefined,

    /// An extended label type (RFC 6891) with the given length octet.
    Extended(u8),
}

impl fmt::Display for LabelTypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LabelTypeError::Undefined => f.write_str("undefined label type"),
            LabelTypeError::Extended(value) => {
                write!(f, "extended label type 0x{:02x}", value)
            }
        }
    }
}

impl std::error::Error for LabelTypeError {}

//------------ LongLabelError ------------------------------------------------

/// A label’s content was longer than 63 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongLabelError(());

impl fmt::Display for LongLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("label exceeds 63 octets")
    }
}

impl std::error::Error for LongLabelError {}

//------------ SplitLabelError -----------------------------------------------

/// Taking a label off the start of a slice failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitLabelError {
    /// Instead of a label there was a pointer to the given position.
    Pointer(u16),

    /// The length octet had an unsupported label type.
    BadType(LabelTypeError),

    /// The slice ended inside the label.
    ShortInput,
}

impl From<LabelTypeError> for SplitLabelError {
    fn from(err: LabelTypeError) -> SplitLabelError {
        SplitLabelError::BadType(err)
    }
}

impl fmt::Display for SplitLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SplitLabelError::Pointer(pos) => {
                write!(f, "compression pointer to {}", pos)
            }
            SplitLabelError::BadType(err) => err.fmt(f),
            SplitLabelError::ShortInput => f.write_str("short label"),
        }
    }
}

impl std::error::Error for SplitLabelError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn label(slice: &[u8]) -> &Label {
        Label::from_slice(slice).unwrap()
    }

    #[test]
    fn from_slice() {
        assert_eq!(label(&[b'x'; 63]).len(), 63);
        assert!(label(b"").is_root());
        assert!(label(b"*").is_wildcard());
        assert!(!label(b"**").is_wildcard());
        assert!(Label::from_slice(&[b'x'; 64]).is_err());
    }

    #[test]
    fn split_from() {
        let (www, tail) = Label::split_from(b"\x03www\x03com\0").unwrap();
        assert_eq!(www.as_slice(), b"www");
        assert_eq!(www.wire_len(), 4);
        assert_eq!(tail, b"\x03com\0");

        let (root, tail) = Label::split_from(b"\0rest").unwrap();
        assert!(root.is_root());
        assert_eq!(tail, b"rest");

        assert_eq!(
            Label::split_from(b"\x03ww"),
            Err(SplitLabelError::ShortInput)
        );
        assert_eq!(Label::split_from(b""), Err(SplitLabelError::ShortInput));
        assert_eq!(
            Label::split_from(b"\xc1\x05"),
            Err(SplitLabelError::Pointer(0x105))
        );
        assert_eq!(
            Label::split_from(b"\xc0"),
            Err(SplitLabelError::ShortInput)
        );
        assert_eq!(
            Label::split_from(b"\x9afoo"),
            Err(LabelTypeError::Undefined.into())
        );
        assert_eq!(
            Label::split_from(b"\x41foo"),
            Err(LabelTypeError::Extended(0x41).into())
        );
    }

    #[test]
    fn compose_canonical() {
        let mut buf = Vec::new();
        let res = label(b"WwW-1").compose_canonical(&mut buf);
        octseq::builder::infallible(res);
        assert_eq!(buf, b"\x05www-1");
    }

    #[test]
    fn eq_and_cmp() {
        use core::cmp::Ordering;

        assert_eq!(label(b"example"), label(b"eXAMple"));
        assert_ne!(label(b"example"), label(b"e4ample"));

        let ordered = [
            label(b""),
            label(b"\x01"),
            label(b"*"),
            label(b"Z"),
            label(b"za"),
            label(b"\xc8"),
        ];
        for (i, left) in ordered.iter().enumerate() {
            for (j, right) in ordered.iter().enumerate() {
                assert_eq!(left.cmp(right), i.cmp(&j));
            }
        }
        assert_eq!(label(b"ABC").cmp(label(b"abc")), Ordering::Equal);
    }

    #[test]
    fn hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut s1 = DefaultHasher::new();
        let mut s2 = DefaultHasher::new();
        label(b"example").hash(&mut s1);
        OwnedLabel::from_label(label(b"eXAMple")).hash(&mut s2);
        assert_eq!(s1.finish(), s2.finish());
    }

    #[test]
    fn owned_label() {
        let owned = OwnedLabel::from_label(label(b"FoO"));
        assert_eq!(owned.as_wire_slice(), b"\x03FoO");
        assert_eq!(owned.as_label(), label(b"foo"));
        assert_eq!(owned, OwnedLabel::from(label(b"FOO")));
        assert_eq!(format!("{:?}", owned), "OwnedLabel(FoO)");

        let long = OwnedLabel::from_label(label(&[b'x'; 63]));
        assert_eq!(long.as_wire_slice().len(), 64);
    }

    #[test]
    fn owned_label_from_str() {
        let owned = OwnedLabel::from_str("a\\.b").unwrap();
        assert_eq!(owned.as_wire_slice(), b"\x03a.b");
        assert!(OwnedLabel::from_str(".").unwrap().is_root());
        assert_eq!(
            OwnedLabel::from_str("a.b"),
            Err(NameError::TrailingData)
        );
        assert_eq!(
            OwnedLabel::from_str("a."),
            Err(NameError::TrailingData)
        );
        assert_eq!(OwnedLabel::from_str(""), Err(NameError::UnexpectedEnd));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn owned_label_ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        let owned = OwnedLabel::from_str("fo\\.o").unwrap();
        assert_tokens(
            &owned.compact(),
            &[
                Token::NewtypeStruct { name: "OwnedLabel" },
                Token::BorrowedBytes(b"fo.o"),
            ],
        );
        assert_tokens(
            &owned.readable(),
            &[
                Token::NewtypeStruct { name: "OwnedLabel" },
                Token::Str("fo\\.o"),
            ],
        );
    }

    #[test]
    fn display() {
        assert_eq!(label(b"a.b\\c").to_string(), "a\\.b\\\\c");
        assert_eq!(label(b"\x07 x").to_string(), "\\007\\032x");
        assert_eq!(label(b"@$").to_string(), "@$");
        assert_eq!(format!("{:?}", label(b"www")), "Label(www)");
    }
}
