//! Domain names.
//!
//! This module provides the [`Name`] type and everything needed to convert
//! it from and into its presentation and wire formats and to compare names.
//!
//! Domain names are a sequence of *labels* which are in turn a sequence of
//! up to 63 octets. While they are limited to a subset of ASCII by
//! convention, all octet values are allowed. In their wire-format
//! representation labels are prefixed with an octet containing the the number
//! of octets in the label. The labels in a domain name are nominally arranged
//! backwards. That is, the ‘most significant’ label is the last one. In an
//! *absolute* domain name, this last label is an empty label, called the
//! *root label* and indicating the root of the domain name tree. Only
//! absolute names can appear inside DNS messages.
//!
//! A [`Name`] can hold both absolute and relative names. It is generic over
//! the octets sequence it lives in, so that views of parts of a name can
//! borrow the octets of the name instead of copying them.
//!
//! In order to save space in DNS messages, a name can end in a pointer to
//! another name stored earlier in the message. The decoder in
//! [`Name::from_wire`] follows these pointers while making sure that they
//! can’t form a loop. When writing names, [`Name::to_wire`] uses a
//! [`CompressionContext`] to find earlier occurrences of a name’s suffixes.
//! [`TreeCompressor`] is a context that keeps these in a tree of labels.
//!
//! The presentation format, i.e., the text form of a name, follows section
//! 5.1 of [RFC 1035]. Names are read via [`Name::from_text`] or the
//! [`FromStr`][core::str::FromStr] trait and written via the
//! [`Display`][core::fmt::Display] trait or, for more control, via
//! [`Name::to_text`].
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

pub use self::compress::{CompressionContext, NoCompression, TreeCompressor};
pub use self::dname::{Mode, Name, NameIter, SuffixIter};
pub use self::error::NameError;
pub use self::from_wire::FromWireConfig;
pub use self::label::{
    Label, LabelTypeError, LongLabelError, OwnedLabel, SplitLabelError,
};
pub use self::offsets::Offsets;
pub use self::relation::NameRelation;
pub use self::to_text::{DisplayName, TextFilter, ToTextConfig};

mod compress;
mod dname;
mod error;
mod from_text;
mod from_wire;
mod label;
mod offsets;
mod relation;
mod to_text;
mod to_wire;
