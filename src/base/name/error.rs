//! Errors of the name codec.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::super::wire::{FormError, ParseError};
use super::label::{LabelTypeError, LongLabelError, SplitLabelError};
use core::fmt;
use octseq::builder::ShortBuf;
use octseq::parse::ShortInput;
use std::collections::TryReserveError;

//------------ NameError -----------------------------------------------------

/// Creating, decoding, or encoding a domain name failed.
///
/// All variants describe bad input or a short buffer and are recoverable
/// by the caller. Misuse of the API, such as comparing an absolute with a
/// relative name, is not reported through this type but panics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label other than the root label was empty.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LabelTooLong,

    /// A `\DDD` escape sequence was malformed or out of range.
    BadEscape,

    /// An unsupported label type was encountered.
    ///
    /// This covers the obsolete binary labels in presentation format as
    /// well as the reserved and extended label types on the wire.
    BadLabelType,

    /// The input ended before the name was complete.
    UnexpectedEnd,

    /// The name would be longer than 255 octets.
    NameTooLong,

    /// The target buffer was too short.
    NoSpace,

    /// A compression pointer did not point strictly backwards.
    BadPointer,

    /// A compression pointer was found where none is allowed.
    CompressedName,

    /// There was data after the root label.
    TrailingData,
}

//--- From

impl From<ShortBuf> for NameError {
    fn from(_: ShortBuf) -> Self {
        NameError::NoSpace
    }
}

impl From<ShortInput> for NameError {
    fn from(_: ShortInput) -> Self {
        NameError::UnexpectedEnd
    }
}

impl From<TryReserveError> for NameError {
    fn from(_: TryReserveError) -> Self {
        NameError::NoSpace
    }
}

impl From<LabelTypeError> for NameError {
    fn from(_: LabelTypeError) -> Self {
        NameError::BadLabelType
    }
}

impl From<LongLabelError> for NameError {
    fn from(_: LongLabelError) -> Self {
        NameError::LabelTooLong
    }
}

impl From<SplitLabelError> for NameError {
    fn from(err: SplitLabelError) -> Self {
        match err {
            SplitLabelError::Pointer(_) => NameError::CompressedName,
            SplitLabelError::BadType(_) => NameError::BadLabelType,
            SplitLabelError::ShortInput => NameError::UnexpectedEnd,
        }
    }
}

impl From<NameError> for FormError {
    fn from(err: NameError) -> FormError {
        FormError::new(err.as_str())
    }
}

impl From<NameError> for ParseError {
    fn from(err: NameError) -> ParseError {
        match err {
            NameError::UnexpectedEnd => ParseError::ShortInput,
            _ => ParseError::Form(err.into()),
        }
    }
}

impl NameError {
    fn as_str(self) -> &'static str {
        match self {
            NameError::EmptyLabel => "empty label",
            NameError::LabelTooLong => "label longer than 63 octets",
            NameError::BadEscape => "bad escape sequence",
            NameError::BadLabelType => "unsupported label type",
            NameError::UnexpectedEnd => "unexpected end of input",
            NameError::NameTooLong => "domain name longer than 255 octets",
            NameError::NoSpace => "buffer too short",
            NameError::BadPointer => "bad compression pointer",
            NameError::CompressedName => "compressed domain name",
            NameError::TrailingData => "trailing data after root label",
        }
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================
