//! Reading names from their presentation format.
//!
//! The presentation format of a domain name is described in section 5.1 of
//! RFC 1035: labels are separated by dots, a final dot marks an absolute
//! name, and a backslash escapes either the next character or introduces a
//! three digit decimal octet value.

use super::dname::{Name, NameBuf};
use super::error::NameError;
use super::label::Label;
use core::str::FromStr;
use octseq::builder::{
    EmptyBuilder, FreezeBuilder, FromBuilder, OctetsBuilder,
};

//------------ State ---------------------------------------------------------

/// The state of the presentation format parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Nothing has been read yet.
    Init,

    /// A new label starts with the next character.
    LabelStart,

    /// Inside a label.
    Ordinary,

    /// A backslash was the first character of a label.
    InitialEscape,

    /// A backslash was read.
    Escape,

    /// Reading the digits of a `\DDD` escape.
    EscapedDecimal { digits: u8, value: u16 },

    /// The text was a single `@`.
    AtSign,
}

//------------ Name ----------------------------------------------------------

/// # Reading the Presentation Format
///
impl Name<Vec<u8>> {
    /// Creates a name from its presentation format.
    ///
    /// If `text` doesn’t end in a dot and `origin` is given, the labels of
    /// the origin are appended and the result is absolute if the origin is.
    /// A single `@` is the origin itself or the empty name without one. If
    /// `downcase` is `true`, all ASCII letters are converted to lowercase,
    /// including those of the origin.
    ///
    /// ```
    /// use domain_name::base::name::Name;
    ///
    /// let origin: Name<Vec<u8>> = "example.com.".parse().unwrap();
    /// let name = Name::from_text("WWW", Some(origin.clone_ref()), true)
    ///     .unwrap();
    /// assert_eq!(name.to_string(), "www.example.com.");
    /// ```
    pub fn from_text(
        text: &str,
        origin: Option<Name<&[u8]>>,
        downcase: bool,
    ) -> Result<Self, NameError> {
        parse_text(text, origin, downcase)?.to_vec_name()
    }
}

impl<Octs> Name<Octs> {
    /// Creates a name from its presentation format using the given builder.
    ///
    /// This is the same as [`from_text`][Name::from_text] but writes the name
    /// into `target` which is expected to be empty. If the name doesn’t fit,
    /// [`NameError::NoSpace`] is returned.
    pub fn from_text_in<Builder>(
        text: &str,
        origin: Option<Name<&[u8]>>,
        downcase: bool,
        target: Builder,
    ) -> Result<Self, NameError>
    where
        Builder: OctetsBuilder + FreezeBuilder<Octets = Octs>,
    {
        parse_text(text, origin, downcase)?.freeze_into(target)
    }
}

/// Runs the parser over `text`.
///
/// Running out of space in the scratch buffer is reported as
/// [`NameError::NoSpace`] as the name can’t be longer than that anyway.
fn parse_text(
    text: &str,
    origin: Option<Name<&[u8]>>,
    downcase: bool,
) -> Result<NameBuf, NameError> {
    let mut res = NameBuf::new();
    let mut state = State::Init;
    let mut label = 0;
    let mut done = false;

    let mut chars = text.as_bytes().iter().copied().peekable();
    while let Some(ch) = chars.next() {
        let last = chars.peek().is_none();
        loop {
            match state {
                State::Init => {
                    if ch == b'.' {
                        if !last {
                            return Err(NameError::EmptyLabel);
                        }
                        res.push_root().map_err(no_space)?;
                        done = true;
                        break;
                    }
                    if ch == b'@' && last {
                        state = State::AtSign;
                        break;
                    }
                    state = State::LabelStart;
                }
                State::LabelStart => {
                    label = res.open_label().map_err(no_space)?;
                    if ch == b'\\' {
                        state = State::InitialEscape;
                        break;
                    }
                    state = State::Ordinary;
                }
                State::Ordinary => {
                    if ch == b'.' {
                        if res.label_len(label) == 0 {
                            return Err(NameError::EmptyLabel);
                        }
                        res.close_label(label);
                        if last {
                            res.push_root().map_err(no_space)?;
                            done = true;
                        }
                        state = State::LabelStart;
                    } else if ch == b'\\' {
                        state = State::Escape;
                    } else {
                        push_octet(&mut res, label, ch, downcase)?;
                    }
                    break;
                }
                State::InitialEscape => {
                    if ch == b'[' {
                        // Binary labels are not supported.
                        return Err(NameError::BadLabelType);
                    }
                    state = State::Escape;
                }
                State::Escape => {
                    if !ch.is_ascii_digit() {
                        push_octet(&mut res, label, ch, downcase)?;
                        state = State::Ordinary;
                        break;
                    }
                    state = State::EscapedDecimal {
                        digits: 0,
                        value: 0,
                    };
                }
                State::EscapedDecimal { digits, value } => {
                    if !ch.is_ascii_digit() {
                        return Err(NameError::BadEscape);
                    }
                    let value = value * 10 + u16::from(ch - b'0');
                    if digits < 2 {
                        state = State::EscapedDecimal {
                            digits: digits + 1,
                            value,
                        };
                    } else {
                        let octet = u8::try_from(value)
                            .map_err(|_| NameError::BadEscape)?;
                        push_octet(&mut res, label, octet, downcase)?;
                        state = State::Ordinary;
                    }
                    break;
                }
                State::AtSign => break,
            }
        }
    }

    if !done {
        match state {
            State::Ordinary => res.close_label(label),
            State::AtSign => {}
            _ => return Err(NameError::UnexpectedEnd),
        }
        if let Some(origin) = origin {
            res.push_name(&origin, downcase).map_err(no_space)?;
        }
    }
    Ok(res)
}

/// Appends an octet to the current label.
fn push_octet(
    res: &mut NameBuf,
    label: usize,
    octet: u8,
    downcase: bool,
) -> Result<(), NameError> {
    if res.label_len(label) == Label::MAX_LEN {
        return Err(NameError::LabelTooLong);
    }
    let octet = if downcase {
        octet.to_ascii_lowercase()
    } else {
        octet
    };
    res.push(octet).map_err(no_space)
}

fn no_space(_: NameError) -> NameError {
    NameError::NoSpace
}

//--- FromStr

impl<Octs> FromStr for Name<Octs>
where
    Octs: FromBuilder,
    <Octs as FromBuilder>::Builder: EmptyBuilder,
{
    type Err = NameError;

    /// Parses a string into a name.
    ///
    /// There is no origin, so names without a final dot are relative. The
    /// case of letters is retained.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text_in(
            s,
            None,
            false,
            <Octs as FromBuilder>::Builder::empty(),
        )
    }
}

//============ Testing =======================================================
