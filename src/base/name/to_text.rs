//! Rendering names in their presentation format.

use super::dname::{Mode, Name};
use super::error::NameError;
use core::fmt;
use octseq::builder::{OctetsBuilder, Truncate};

//------------ ToTextConfig --------------------------------------------------

/// Configuration for rendering a name as text.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToTextConfig {
    /// Leave out the final dot of absolute names.
    omit_final_dot: bool,

    /// Also escape the characters that are special in master files.
    masterfile: bool,
}

impl ToTextConfig {
    /// Creates a new config with default values.
    ///
    /// The defaults are to keep the final dot and to not escape `@` and `$`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns whether the final dot of absolute names is left out.
    pub fn omit_final_dot(&self) -> bool {
        self.omit_final_dot
    }

    /// Sets whether the final dot of absolute names is left out.
    ///
    /// The root name is always rendered as a single dot.
    pub fn set_omit_final_dot(&mut self, value: bool) {
        self.omit_final_dot = value
    }

    /// Returns whether master file special characters are escaped.
    pub fn masterfile(&self) -> bool {
        self.masterfile
    }

    /// Sets whether master file special characters are escaped.
    ///
    /// If enabled, `@` and `$` are escaped with a backslash.
    pub fn set_masterfile(&mut self, value: bool) {
        self.masterfile = value
    }
}

//------------ TextFilter ----------------------------------------------------

/// A hook that may rewrite the rendered text of a name.
///
/// The filter receives the complete presentation format of the name and
/// can change it in place. It is implemented for all closures of the
/// matching signature.
pub trait TextFilter {
    /// Rewrites the rendered `text`.
    fn filter(&self, text: &mut String) -> Result<(), NameError>;
}

impl<F> TextFilter for F
where
    F: Fn(&mut String) -> Result<(), NameError>,
{
    fn filter(&self, text: &mut String) -> Result<(), NameError> {
        (self)(text)
    }
}

//------------ Name ----------------------------------------------------------

/// # Rendering the Presentation Format
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Returns a value that displays the name using the given config.
    pub fn display(&self, config: ToTextConfig) -> DisplayName<'_, Octs> {
        DisplayName { name: self, config }
    }

    /// Writes the name to a formatter.
    pub fn write_text<W: fmt::Write>(
        &self,
        config: &ToTextConfig,
        target: &mut W,
    ) -> fmt::Result {
        if self.is_empty() {
            return target.write_char('@');
        }
        if self.is_root() {
            return target.write_char('.');
        }
        for (idx, label) in self.iter().enumerate() {
            if label.is_root() {
                break;
            }
            if idx > 0 {
                target.write_char('.')?;
            }
            write_label(label.as_slice(), config.masterfile, target)?;
        }
        if self.is_absolute() && !config.omit_final_dot {
            target.write_char('.')?;
        }
        Ok(())
    }

    /// Returns the presentation format of the name.
    pub fn to_text(&self, config: &ToTextConfig) -> String {
        self.display(*config).to_string()
    }

    /// Returns the presentation format rewritten by an optional filter.
    pub fn to_text_filtered(
        &self,
        config: &ToTextConfig,
        filter: Option<&dyn TextFilter>,
    ) -> Result<String, NameError> {
        let mut res = self.to_text(config);
        if let Some(filter) = filter {
            filter.filter(&mut res)?;
        }
        Ok(res)
    }

    /// Appends the presentation format to an octets builder.
    ///
    /// Returns the number of octets appended. If the text doesn’t fit, the
    /// builder is truncated to its previous length and
    /// [`NameError::NoSpace`] is returned.
    pub fn to_text_in<Target>(
        &self,
        config: &ToTextConfig,
        filter: Option<&dyn TextFilter>,
        target: &mut Target,
    ) -> Result<usize, NameError>
    where
        Target: OctetsBuilder + Truncate + AsRef<[u8]> + ?Sized,
    {
        let text = self.to_text_filtered(config, filter)?;
        let start = target.as_ref().len();
        if target.append_slice(text.as_bytes()).is_err() {
            target.truncate(start);
            return Err(NameError::NoSpace);
        }
        Ok(text.len())
    }

    /// Returns a representation of the name that can be used as a file name.
    ///
    /// ASCII letters are lowercased. Digits, hyphens, and underscores are
    /// kept. Every other octet is written as a percent sign followed by two
    /// lowercase hex digits.
    pub fn to_filename_text(&self, omit_final_dot: bool) -> String {
        if self.is_empty() {
            return "@".into();
        }
        if self.is_root() {
            return ".".into();
        }
        let mut res = String::with_capacity(self.len() * 3);
        for (idx, label) in self.iter().enumerate() {
            if label.is_root() {
                break;
            }
            if idx > 0 {
                res.push('.');
            }
            for ch in label.iter() {
                match ch {
                    b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => {
                        res.push(char::from(ch))
                    }
                    b'A'..=b'Z' => {
                        res.push(char::from(ch.to_ascii_lowercase()))
                    }
                    _ => {
                        res.push('%');
                        res.push(hex_digit(ch >> 4));
                        res.push(hex_digit(ch & 0x0F));
                    }
                }
            }
        }
        if self.is_absolute() && !omit_final_dot {
            res.push('.');
        }
        res
    }
}

fn hex_digit(value: u8) -> char {
    char::from(b"0123456789abcdef"[usize::from(value)])
}

/// Writes the content of a label escaping special characters.
pub(super) fn write_label<W: fmt::Write>(
    label: &[u8],
    masterfile: bool,
    target: &mut W,
) -> fmt::Result {
    for &ch in label {
        match ch {
            b'"' | b'(' | b')' | b'.' | b';' | b'\\' => {
                target.write_char('\\')?;
                target.write_char(char::from(ch))?;
            }
            b'@' | b'$' if masterfile => {
                target.write_char('\\')?;
                target.write_char(char::from(ch))?;
            }
            0x21..=0x7E => target.write_char(char::from(ch))?,
            _ => write!(target, "\\{:03}", ch)?,
        }
    }
    Ok(())
}

//--- Display and Debug

impl<Octs: AsRef<[u8]>> fmt::Display for Name<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_text(&ToTextConfig::default(), f)
    }
}

impl<Octs: AsRef<[u8]>> fmt::Debug for Name<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.mode() == Mode::Invalidated {
            f.write_str("Name(<invalidated>)")
        } else {
            write!(f, "Name({})", self)
        }
    }
}

//------------ DisplayName ---------------------------------------------------

/// A name together with the config used to display it.
pub struct DisplayName<'a, Octs> {
    name: &'a Name<Octs>,
    config: ToTextConfig,
}

impl<'a, Octs: AsRef<[u8]>> fmt::Display for DisplayName<'a, Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.write_text(&self.config, f)
    }
}

//============ Testing =======================================================
