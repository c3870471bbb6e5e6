//! Reading and writing DNS messages.
//!
//! Names are the only DNS data this crate handles, so this module only
//! carries what name encoding and decoding share with the rest of a
//! message: the [`Composer`] a message is built in, the [`Parse`] trait for
//! values read from a message, and the errors of reading.

use core::fmt;
use octseq::builder::{OctetsBuilder, Truncate};
use octseq::parse::{Parser, ShortInput};

//------------ Composer ------------------------------------------------------

/// An octets builder holding a DNS message under construction.
///
/// The length of the builder is the position where the next value goes.
/// Compression pointers refer to these positions. A value that only fits
/// partially is removed again by truncating the builder.
pub trait Composer:
    OctetsBuilder + AsRef<[u8]> + AsMut<[u8]> + Truncate
{
}

impl Composer for Vec<u8> {}

impl<const N: usize> Composer for octseq::array::Array<N> {}

#[cfg(feature = "bytes")]
impl Composer for bytes::BytesMut {}

//------------ Parse ---------------------------------------------------------

/// A value that can be read from a message through a parser.
///
/// The parser spans the whole message and is positioned at the start of
/// the value. This allows following compression pointers back to earlier
/// parts of the message.
pub trait Parse<'a, Octs: ?Sized>: Sized {
    /// Reads a value and advances the parser past it.
    ///
    /// After an error, the position of the parser is unspecified.
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError>;

    /// Advances the parser past a value without keeping it.
    fn skip(parser: &mut Parser<'a, Octs>) -> Result<(), ParseError>;
}

//============ Error Types ===================================================

//------------ ParseError ----------------------------------------------------

/// Reading a value from a message failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The message ended before the value did.
    ShortInput,

    /// The value was malformed.
    Form(FormError),
}

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("short message"),
            ParseError::Form(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A value in a message was malformed.
///
/// The error only carries a static description of the problem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a form error with the given description.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================
