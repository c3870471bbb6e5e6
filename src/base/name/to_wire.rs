//! Encoding names into DNS messages.

use super::super::wire::Composer;
use super::compress::CompressionContext;
use super::dname::{append, Name};
use super::error::NameError;
use octseq::builder::OctetsBuilder;
use tracing::trace;

/// # Encoding into the Wire Format
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Appends the uncompressed name to an octets builder.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.as_slice())
    }

    /// Appends the name in canonical form to an octets builder.
    ///
    /// The canonical form is the uncompressed name with all ASCII letters
    /// in lowercase. This is the form used by DNSSEC.
    pub fn compose_canonical<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        for label in self.iter() {
            label.compose_canonical(target)?;
        }
        Ok(())
    }

    /// Appends the name to a message using compression.
    ///
    /// The current length of `target` is taken as the position of the name
    /// in the message. Returns the number of octets appended.
    ///
    /// # Panics
    ///
    /// The method panics if the name is relative.
    pub fn to_wire<Ctx, Target>(
        &self,
        ctx: &mut Ctx,
        target: &mut Target,
    ) -> Result<usize, NameError>
    where
        Ctx: CompressionContext + ?Sized,
        Target: Composer + ?Sized,
    {
        self.to_wire_with_hint(ctx, target, &mut None)
    }

    /// Appends the name to a message using compression and a position hint.
    ///
    /// If `hint` contains the position of an earlier copy of this very
    /// name, only a pointer to it is written. On success, `hint` is updated
    /// to the position of the name so it can be reused for writing the same
    /// name again.
    ///
    /// If the name doesn’t fit, `target` is truncated to its previous
    /// length and [`NameError::NoSpace`] is returned.
    ///
    /// # Panics
    ///
    /// The method panics if the name is relative.
    pub fn to_wire_with_hint<Ctx, Target>(
        &self,
        ctx: &mut Ctx,
        target: &mut Target,
        hint: &mut Option<u16>,
    ) -> Result<usize, NameError>
    where
        Ctx: CompressionContext + ?Sized,
        Target: Composer + ?Sized,
    {
        assert!(
            self.is_absolute(),
            "relative names cannot be written to the wire"
        );
        let start = target.as_ref().len();
        let compress = ctx.is_enabled() && !self.no_compress();

        if let Some(offset) = *hint {
            if compress && offset < 0x4000 {
                trace!("writing {} as pointer to hint {}", self, offset);
                write_or_truncate(target, start, &[], Some(offset))?;
                return Ok(2);
            }
        }

        let name = self.clone_ref();
        let label_count = name.label_count();
        let found = if compress {
            ctx.find_longest_match(&name).filter(|(suffix, offset)| {
                let prefix_len = name.len() - suffix.len();
                *offset < 0x4000 && prefix_len + 2 < name.len()
            })
        } else {
            None
        };
        let (prefix_labels, pointer) = match found {
            Some((suffix, offset)) => {
                trace!(
                    "compressing {} with pointer to {} at {}",
                    self,
                    suffix,
                    offset
                );
                (label_count - suffix.label_count(), Some(offset))
            }
            None => (label_count, None),
        };
        let prefix = name.label_sequence(0, prefix_labels);
        write_or_truncate(target, start, prefix.as_slice(), pointer)?;

        if ctx.is_enabled() {
            let offsets = name.label_offsets();
            for idx in 0..prefix_labels {
                let pos = start + usize::from(offsets[idx]);
                if pos >= 0x4000 || name.label(idx).is_root() {
                    break;
                }
                ctx.record(
                    &name.label_sequence(idx, label_count - idx),
                    pos as u16,
                );
            }
        }

        *hint = match pointer {
            Some(offset) if prefix_labels == 0 => Some(offset),
            _ if start < 0x4000 => Some(start as u16),
            _ => None,
        };
        Ok(target.as_ref().len() - start)
    }
}

/// Writes a prefix and an optional pointer, undoing everything on failure.
fn write_or_truncate<Target: Composer + ?Sized>(
    target: &mut Target,
    start: usize,
    prefix: &[u8],
    pointer: Option<u16>,
) -> Result<(), NameError> {
    let res = append(target, prefix).and_then(|_| match pointer {
        Some(offset) => append(target, &(0xC000 | offset).to_be_bytes()),
        None => Ok(()),
    });
    if res.is_err() {
        target.truncate(start);
    }
    res
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::super::compress::{NoCompression, TreeCompressor};
    use super::*;
    use octseq::builder::infallible;

    fn name(slice: &'static [u8]) -> Name<&'static [u8]> {
        Name::from_octets(slice).unwrap()
    }

    #[test]
    fn compose() {
        let mut buf = Vec::new();
        infallible(name(b"\x03WwW\x07example\0").compose(&mut buf));
        assert_eq!(buf, b"\x03WwW\x07example\0");

        let mut buf = Vec::new();
        let mixed = name(b"\x03WwW\x07eXample\0");
        infallible(mixed.compose_canonical(&mut buf));
        assert_eq!(buf, b"\x03www\x07example\0");
    }

    #[test]
    fn uncompressed() {
        let mut buf = Vec::new();
        let www = name(b"\x03www\x07example\x03com\0");
        assert_eq!(www.to_wire(&mut NoCompression, &mut buf), Ok(17));
        assert_eq!(www.to_wire(&mut NoCompression, &mut buf), Ok(17));
        assert_eq!(&buf[17..], www.as_slice());
    }

    #[test]
    fn compressed() {
        let mut ctx = TreeCompressor::new();
        let mut buf = b"header".to_vec();
        let www = name(b"\x03www\x07example\x03com\0");
        let mail = name(b"\x04mail\x07EXAMPLE\x03com\0");

        assert_eq!(www.to_wire(&mut ctx, &mut buf), Ok(17));
        assert_eq!(www.to_wire(&mut ctx, &mut buf), Ok(2));
        assert_eq!(&buf[23..], b"\xc0\x06");
        assert_eq!(mail.to_wire(&mut ctx, &mut buf), Ok(7));
        assert_eq!(&buf[25..], b"\x04mail\xc0\x0a");

        // The root name is never compressed.
        assert_eq!(Name::root_ref().to_wire(&mut ctx, &mut buf), Ok(1));
        assert_eq!(&buf[32..], b"\0");

        // All suffixes of the literal part are recorded.
        let x_mail = name(b"\x01x\x04mail\x07example\x03com\0");
        let (suffix, pos) = ctx.find_longest_match(&x_mail).unwrap();
        assert_eq!(suffix.label_count(), 4);
        assert_eq!(pos, 25);
    }

    #[test]
    fn short_names() {
        let mut ctx = TreeCompressor::new();
        let mut buf = Vec::new();
        let com = name(b"\x03com\0");
        assert_eq!(com.to_wire(&mut ctx, &mut buf), Ok(5));
        // A one label name saves three octets.
        assert_eq!(com.to_wire(&mut ctx, &mut buf), Ok(2));
    }

    #[test]
    fn no_compress() {
        let mut ctx = TreeCompressor::new();
        let mut buf = Vec::new();
        let www = name(b"\x03www\x07example\x03com\0");
        assert_eq!(www.to_wire(&mut ctx, &mut buf), Ok(17));

        let mut copy = www.duplicate().unwrap();
        copy.set_no_compress(true);
        assert_eq!(copy.to_wire(&mut ctx, &mut buf), Ok(17));
        assert_eq!(&buf[17..], www.as_slice());
    }

    #[test]
    fn hint() {
        let mut ctx = TreeCompressor::new();
        let mut buf = Vec::new();
        let www = name(b"\x03www\x07example\x03com\0");
        let mut hint = None;
        assert_eq!(
            www.to_wire_with_hint(&mut ctx, &mut buf, &mut hint),
            Ok(17)
        );
        assert_eq!(hint, Some(0));
        assert_eq!(
            www.to_wire_with_hint(&mut ctx, &mut buf, &mut hint),
            Ok(2)
        );
        assert_eq!(&buf[17..], b"\xc0\x00");
        assert_eq!(hint, Some(0));

        // A hint is ignored without compression.
        let mut buf = Vec::new();
        let mut hint = Some(0);
        assert_eq!(
            www.to_wire_with_hint(&mut NoCompression, &mut buf, &mut hint),
            Ok(17)
        );
        assert_eq!(hint, Some(0));
    }

    #[test]
    fn no_space() {
        let mut ctx = TreeCompressor::new();
        let mut buf = octseq::array::Array::<20>::new();
        let www = name(b"\x03www\x07example\x03com\0");
        assert_eq!(www.to_wire(&mut ctx, &mut buf), Ok(17));
        let mail = name(b"\x04mail\x07example\x03com\0");
        assert_eq!(
            mail.to_wire(&mut ctx, &mut buf),
            Err(NameError::NoSpace)
        );
        assert_eq!(buf.as_ref().len(), 17);
        assert_eq!(www.to_wire(&mut ctx, &mut buf), Ok(2));
    }

    #[test]
    #[should_panic]
    fn relative_name() {
        let mut buf = Vec::new();
        let _ = name(b"\x03www").to_wire(&mut NoCompression, &mut buf);
    }
}
