//! Decoding names from DNS messages.
//!
//! Names in messages may end in a compression pointer referring to a name
//! stored earlier in the message (RFC 1035, section 4.1.4). Every pointer
//! followed while decoding a name has to point to a position before the
//! target of the previous one. This guarantees that decoding ends even for
//! hostile messages.

use super::super::wire::{Parse, ParseError};
use super::dname::{Name, NameBuf};
use super::error::NameError;
use octseq::builder::{FreezeBuilder, OctetsBuilder};
use octseq::parse::Parser;
use tracing::{debug, trace};

//------------ FromWireConfig ------------------------------------------------

/// Configuration for decoding names.
#[derive(Clone, Copy, Debug)]
pub struct FromWireConfig {
    /// Whether compression pointers are followed.
    allow_compression: bool,

    /// Whether ASCII letters are converted to lowercase.
    downcase: bool,
}

impl FromWireConfig {
    /// Creates a new config with default values.
    ///
    /// The defaults are to follow compression pointers and to keep the
    /// case of letters.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns whether compression pointers are followed.
    pub fn allow_compression(&self) -> bool {
        self.allow_compression
    }

    /// Sets whether compression pointers are followed.
    ///
    /// If disabled, a compressed name results in
    /// [`NameError::CompressedName`].
    pub fn set_allow_compression(&mut self, value: bool) {
        self.allow_compression = value
    }

    /// Returns whether ASCII letters are converted to lowercase.
    pub fn downcase(&self) -> bool {
        self.downcase
    }

    /// Sets whether ASCII letters are converted to lowercase.
    pub fn set_downcase(&mut self, value: bool) {
        self.downcase = value
    }
}

impl Default for FromWireConfig {
    fn default() -> Self {
        Self {
            allow_compression: true,
            downcase: false,
        }
    }
}

//------------ State ---------------------------------------------------------

#[derive(Clone, Copy, Debug)]
enum State {
    /// Expecting a label type octet.
    Start,

    /// Inside the normal label starting at the given position with the
    /// given number of octets left.
    Ordinary(usize, u8),

    /// Read the first octet of a pointer with the given upper bits.
    FollowPointer(u16),
}

//------------ Name ----------------------------------------------------------

/// # Decoding from the Wire Format
///
impl Name<Vec<u8>> {
    /// Decodes a name starting at `pos` in the message `source`.
    ///
    /// Returns the name and the number of octets the name occupies at
    /// `pos`. If the name is compressed, this ends after the first pointer.
    pub fn from_wire(
        source: &[u8],
        pos: usize,
        config: &FromWireConfig,
    ) -> Result<(Self, usize), NameError> {
        let (res, consumed) = decode(source, pos, config)?;
        Ok((res.to_vec_name()?, consumed))
    }
}

impl<Octs> Name<Octs> {
    /// Decodes a name into the given builder.
    ///
    /// This is the same as [`from_wire`][Name::from_wire] but writes the name
    /// into `target` which is expected to be empty. If the name doesn’t fit,
    /// [`NameError::NoSpace`] is returned.
    pub fn from_wire_in<Builder>(
        source: &[u8],
        pos: usize,
        config: &FromWireConfig,
        target: Builder,
    ) -> Result<(Self, usize), NameError>
    where
        Builder: OctetsBuilder + FreezeBuilder<Octets = Octs>,
    {
        let (res, consumed) = decode(source, pos, config)?;
        Ok((res.freeze_into(target)?, consumed))
    }
}

impl Name<Vec<u8>> {
    /// Decodes a name at the current position of a parser.
    ///
    /// Compression pointers are followed within the complete octets of the
    /// parser. On success, the parser is advanced past the name.
    pub fn parse<Src: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Src>,
    ) -> Result<Self, ParseError> {
        let (res, consumed) = Self::from_wire(
            parser.octets_ref().as_ref(),
            parser.pos(),
            &FromWireConfig::default(),
        )?;
        parser.advance(consumed)?;
        Ok(res)
    }
}

impl<'a, Src: AsRef<[u8]> + ?Sized> Parse<'a, Src> for Name<Vec<u8>> {
    fn parse(parser: &mut Parser<'a, Src>) -> Result<Self, ParseError> {
        Self::parse(parser)
    }

    fn skip(parser: &mut Parser<'a, Src>) -> Result<(), ParseError> {
        Self::parse(parser).map(|_| ())
    }
}

/// Decodes the name at `start` into a scratch buffer.
fn decode(
    source: &[u8],
    start: usize,
    config: &FromWireConfig,
) -> Result<(NameBuf, usize), NameError> {
    let mut res = NameBuf::new();
    let mut cursor = start;
    let mut biggest_pointer = start;
    let mut consumed = None;
    let mut state = State::Start;

    loop {
        let octet = *source.get(cursor).ok_or(NameError::UnexpectedEnd)?;
        cursor += 1;
        match state {
            State::Start => match octet {
                0 => {
                    res.push_root()?;
                    break;
                }
                1..=63 => {
                    if res.len() + usize::from(octet) + 1 > Name::MAX_LEN {
                        debug!("rejecting overlong domain name");
                        return Err(NameError::NameTooLong);
                    }
                    state = State::Ordinary(res.open_label()?, octet);
                }
                64..=191 => return Err(NameError::BadLabelType),
                _ => {
                    if !config.allow_compression {
                        return Err(NameError::CompressedName);
                    }
                    let upper = u16::from(octet & 0x3F) << 8;
                    state = State::FollowPointer(upper);
                }
            },
            State::Ordinary(label, left) => {
                let octet = if config.downcase {
                    octet.to_ascii_lowercase()
                } else {
                    octet
                };
                res.push(octet)?;
                state = if left == 1 {
                    res.close_label(label);
                    State::Start
                } else {
                    State::Ordinary(label, left - 1)
                };
            }
            State::FollowPointer(upper) => {
                let target = usize::from(upper | u16::from(octet));
                if target >= biggest_pointer {
                    debug!(
                        "rejecting compression pointer to {} at {}",
                        target,
                        cursor - 2
                    );
                    return Err(NameError::BadPointer);
                }
                trace!("following compression pointer to {}", target);
                biggest_pointer = target;
                if consumed.is_none() {
                    consumed = Some(cursor - start);
                }
                cursor = target;
                state = State::Start;
            }
        }
    }

    Ok((res, consumed.unwrap_or_else(|| cursor - start)))
}

//============ Testing =======================================================
