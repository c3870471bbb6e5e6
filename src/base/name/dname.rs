//! The domain name value.
//!
//! This is a private module. Its public types are re-exported by the parent.

use super::error::NameError;
use super::label::Label;
use super::offsets::{
    LabelOffsets, LabelTable, Offsets, MAX_LABEL_COUNT, MAX_NAME_LEN,
};
use super::relation::NameRelation;
#[cfg(feature = "serde")]
use core::fmt;
use core::iter::FusedIterator;
use octseq::builder::{FreezeBuilder, OctetsBuilder};
#[cfg(feature = "serde")]
use octseq::builder::{EmptyBuilder, FromBuilder};
#[cfg(feature = "serde")]
use octseq::serde::{DeserializeOctets, SerializeOctets};

//------------ Mode ----------------------------------------------------------

/// How a name relates to the octets it lives in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// The name is empty or a view borrowed from another name.
    Free,

    /// The name has been written into an octets builder provided by the
    /// caller.
    Bound,

    /// The name is an immutable copy or a static value.
    ReadOnly,

    /// The name owns storage that has been allocated for it.
    Dynamic,

    /// The name has been invalidated and must not be used anymore.
    Invalidated,
}

impl Mode {
    /// Returns whether a name in this mode may be modified.
    pub fn is_mutable(self) -> bool {
        matches!(self, Mode::Free | Mode::Bound | Mode::Dynamic)
    }
}

//------------ Name ----------------------------------------------------------

/// A domain name.
///
/// The type wraps an octets sequence that contains a domain name in
/// uncompressed wire format: a sequence of labels, each preceded by a length
/// octet. An absolute name ends in the empty root label. A relative name
/// simply ends after its last label. The empty name has no labels at all and
/// is rendered as `@` in presentation format.
///
/// Names are generic over the octets sequence holding them. A
/// `Name<Vec<u8>>` owns its octets, whereas a `Name<&[u8]>` is a view into
/// some other name, such as the ones returned by [`clone_ref`] or
/// [`label_sequence`].
///
/// Besides the octets, a name keeps its label count, whether it is
/// absolute, and optionally a cache of the positions of its labels. The
/// [`Mode`] records how the name came about and whether it may be
/// changed.
///
/// You can create a name from its presentation format via
/// [`from_text`][Self::from_text] or the [`FromStr`][core::str::FromStr]
/// trait and from a DNS message via [`from_wire`][Self::from_wire].
///
/// [`clone_ref`]: Self::clone_ref
/// [`label_sequence`]: Self::label_sequence
#[derive(Clone)]
pub struct Name<Octs> {
    octets: Octs,
    label_count: u8,
    absolute: bool,
    no_compress: bool,
    offsets: Offsets,
    mode: Mode,
}

impl Name<()> {
    /// Domain names have a maximum length of 255 octets.
    pub const MAX_LEN: usize = MAX_NAME_LEN;

    /// Domain names have at most 127 labels, including the root label.
    pub const MAX_LABELS: usize = MAX_LABEL_COUNT;
}

/// # Creating Values
///
impl<Octs> Name<Octs> {
    /// Creates a name from its parts.
    ///
    /// The octets must contain a valid name with `label_count` labels.
    pub(super) fn from_parts(
        octets: Octs,
        label_count: usize,
        absolute: bool,
        mode: Mode,
    ) -> Self {
        debug_assert!(label_count <= MAX_LABEL_COUNT);
        Name {
            octets,
            label_count: label_count as u8,
            absolute,
            no_compress: false,
            offsets: Offsets::None,
            mode,
        }
    }

    /// Creates a name from an octets sequence.
    ///
    /// The octets must contain exactly one name in uncompressed wire format.
    /// It can be absolute or relative. Compression pointers are rejected.
    pub fn from_octets(octets: Octs) -> Result<Self, NameError>
    where
        Octs: AsRef<[u8]>,
    {
        let table = LabelTable::scan(octets.as_ref())?;
        Ok(Self::from_parts(
            octets,
            table.count(),
            table.is_absolute(),
            Mode::Bound,
        ))
    }

    /// Creates the empty name.
    ///
    /// The empty name is relative and has no labels.
    #[must_use]
    pub fn empty() -> Self
    where
        Octs: Default,
    {
        Self::from_parts(Octs::default(), 0, false, Mode::Free)
    }

    /// Returns the root name.
    ///
    /// The root name is a read-only name consisting of the root label only.
    #[must_use]
    pub fn root() -> Self
    where
        Octs: From<&'static [u8]>,
    {
        Self::from_parts(b"\0".as_ref().into(), 1, true, Mode::ReadOnly)
    }
}

impl Name<&'static [u8]> {
    /// Returns the root name atop a static slice.
    #[must_use]
    pub fn root_ref() -> Self {
        Self::root()
    }
}

impl Name<Vec<u8>> {
    /// Returns the root name atop a vec.
    #[must_use]
    pub fn root_vec() -> Self {
        Self::from_parts(vec![0], 1, true, Mode::Dynamic)
    }
}

impl<Octs: Default> Default for Name<Octs> {
    fn default() -> Self {
        Self::empty()
    }
}

/// # Properties
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Returns a reference to the underlying octets sequence.
    pub fn as_octets(&self) -> &Octs {
        &self.octets
    }

    /// Converts the name into the underlying octets sequence.
    pub fn into_octets(self) -> Octs {
        self.octets
    }

    /// Returns the wire format octets of the name.
    ///
    /// # Panics
    ///
    /// The method panics if the name has been invalidated.
    pub fn as_slice(&self) -> &[u8] {
        self.assert_usable();
        self.octets.as_ref()
    }

    /// Returns the length of the name in wire format.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns whether this is the empty name.
    pub fn is_empty(&self) -> bool {
        self.label_count == 0
    }

    /// Returns the number of labels, including the root label.
    pub fn label_count(&self) -> usize {
        usize::from(self.label_count)
    }

    /// Returns whether the name ends in the root label.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.absolute && self.label_count == 1
    }

    /// Returns the mode of the name.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns whether the name must never be compressed on the wire.
    pub fn no_compress(&self) -> bool {
        self.no_compress
    }

    /// Marks the name as never to be compressed.
    ///
    /// # Panics
    ///
    /// The method panics if the name is read-only or has been invalidated.
    pub fn set_no_compress(&mut self, value: bool) {
        self.assert_mutable();
        self.no_compress = value
    }

    /// Returns the cached label offsets.
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    /// Makes sure the label offsets are cached with the name.
    ///
    /// Offsets of read-only names are left alone as they cannot be changed.
    pub fn ensure_offsets(&mut self) -> Result<(), NameError> {
        if self.offsets.is_cached() || self.mode == Mode::ReadOnly {
            return Ok(());
        }
        let table = LabelTable::scan_unchecked(self.as_slice());
        let mut offsets = Vec::new();
        offsets.try_reserve_exact(table.count())?;
        offsets.extend_from_slice(table.as_slice());
        self.offsets = Offsets::Cached(offsets);
        Ok(())
    }

    /// Returns the positions of the length octets of all labels.
    pub(super) fn label_offsets(&self) -> LabelOffsets<'_> {
        match self.offsets {
            Offsets::Cached(ref offsets) => LabelOffsets::Cached(offsets),
            Offsets::None => LabelOffsets::Computed(
                LabelTable::scan_unchecked(self.as_slice()),
            ),
        }
    }

    /// Checks all the invariants of the name.
    ///
    /// Returns `false` for an invalidated name.
    pub fn is_valid(&self) -> bool {
        if self.mode == Mode::Invalidated {
            return false;
        }
        let table = match LabelTable::scan(self.octets.as_ref()) {
            Ok(table) => table,
            Err(_) => return false,
        };
        if table.count() != self.label_count()
            || table.is_absolute() != self.absolute
        {
            return false;
        }
        match self.offsets {
            Offsets::Cached(ref offsets) => {
                offsets.as_slice() == table.as_slice()
            }
            Offsets::None => true,
        }
    }

    fn assert_usable(&self) {
        assert!(
            self.mode != Mode::Invalidated,
            "use of an invalidated domain name"
        );
    }

    fn assert_mutable(&self) {
        assert!(
            self.mode.is_mutable(),
            "attempt to modify a {:?} domain name",
            self.mode
        );
    }
}

/// # Copying and Resetting
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Returns a view of the name that borrows its octets.
    pub fn clone_ref(&self) -> Name<&[u8]> {
        Name {
            octets: self.as_slice(),
            label_count: self.label_count,
            absolute: self.absolute,
            no_compress: self.no_compress,
            offsets: Offsets::None,
            mode: Mode::Free,
        }
    }

    /// Returns a copy of the name in freshly allocated storage.
    pub fn duplicate(&self) -> Result<Name<Vec<u8>>, NameError> {
        let mut octets = Vec::new();
        octets.try_reserve_exact(self.len())?;
        octets.extend_from_slice(self.as_slice());
        Ok(Name {
            octets,
            label_count: self.label_count,
            absolute: self.absolute,
            no_compress: self.no_compress,
            offsets: Offsets::None,
            mode: Mode::Dynamic,
        })
    }

    /// Returns an immutable copy of the name with its offsets cached.
    pub fn duplicate_with_offsets(
        &self,
    ) -> Result<Name<Vec<u8>>, NameError> {
        let mut res = self.duplicate()?;
        res.ensure_offsets()?;
        res.mode = Mode::ReadOnly;
        Ok(res)
    }

    /// Resets the name to the empty name.
    ///
    /// # Panics
    ///
    /// The method panics if the name is read-only or has been invalidated.
    pub fn reset(&mut self)
    where
        Octs: Default,
    {
        self.assert_mutable();
        *self = Self::empty();
    }

    /// Invalidates the name.
    ///
    /// The octets are released and any later use of the name that needs
    /// its content panics.
    pub fn invalidate(&mut self)
    where
        Octs: Default,
    {
        *self = Self::empty();
        self.mode = Mode::Invalidated;
    }
}

/// # Working with Labels
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Returns the label at the given index.
    ///
    /// # Panics
    ///
    /// The method panics if `index` isn’t less than the label count.
    pub fn label(&self, index: usize) -> &Label {
        assert!(index < self.label_count(), "label index out of range");
        let offsets = self.label_offsets();
        let start = usize::from(offsets[index]);
        let slice = self.as_slice();
        let len = usize::from(slice[start]);
        // SAFETY: The octets contain a valid name, so the length octet is
        //         at most 63.
        unsafe { Label::from_slice_unchecked(&slice[start + 1..][..len]) }
    }

    /// Returns the first label.
    pub fn first(&self) -> Option<&Label> {
        if self.is_empty() {
            None
        } else {
            Some(self.label(0))
        }
    }

    /// Returns the last label.
    pub fn last(&self) -> Option<&Label> {
        if self.is_empty() {
            None
        } else {
            Some(self.label(self.label_count() - 1))
        }
    }

    /// Returns a view of `count` labels starting at label `first`.
    ///
    /// The view is absolute if it includes the root label. Selecting zero
    /// labels, including at `first == label_count()`, results in the empty
    /// name.
    ///
    /// # Panics
    ///
    /// The method panics if the labels are out of range.
    pub fn label_sequence(&self, first: usize, count: usize) -> Name<&[u8]> {
        let label_count = self.label_count();
        assert!(
            first <= label_count && count <= label_count - first,
            "label sequence out of range"
        );
        let offsets = self.label_offsets();
        let slice = self.as_slice();
        let position = |index: usize| {
            if index == label_count {
                slice.len()
            } else {
                usize::from(offsets[index])
            }
        };
        let start = position(first);
        let end = position(first + count);
        Name::from_parts(
            &slice[start..end],
            count,
            self.absolute && count > 0 && first + count == label_count,
            Mode::Free,
        )
    }

    /// Splits the name into a prefix and a suffix of `suffix_labels`
    /// labels.
    ///
    /// # Panics
    ///
    /// The method panics if the name has fewer than `suffix_labels` labels.
    pub fn split(&self, suffix_labels: usize) -> (Name<&[u8]>, Name<&[u8]>) {
        assert!(
            suffix_labels <= self.label_count(),
            "split beyond the label count"
        );
        let prefix_labels = self.label_count() - suffix_labels;
        (
            self.label_sequence(0, prefix_labels),
            self.label_sequence(prefix_labels, suffix_labels),
        )
    }

    /// Splits off the first label.
    ///
    /// Returns `None` for the empty name and the root name.
    pub fn split_first(&self) -> Option<(&Label, Name<&[u8]>)> {
        if self.is_empty() || self.is_root() {
            return None;
        }
        Some((
            self.label(0),
            self.label_sequence(1, self.label_count() - 1),
        ))
    }

    /// Returns the parent of the name.
    pub fn parent(&self) -> Option<Name<&[u8]>> {
        self.split_first().map(|(_, parent)| parent)
    }

    /// Returns an iterator over the labels of the name.
    pub fn iter(&self) -> NameIter<'_> {
        NameIter::new(self.as_slice())
    }

    /// Returns an iterator over the suffixes of the name.
    ///
    /// The first item is the complete name, every further item has one
    /// label less.
    pub fn iter_suffixes(&self) -> SuffixIter<'_, Octs> {
        SuffixIter {
            name: self,
            first: 0,
        }
    }

    /// Returns whether `base` is a prefix of the name.
    pub fn starts_with<Other: AsRef<[u8]>>(&self, base: &Name<Other>) -> bool {
        if base.label_count() > self.label_count() {
            return false;
        }
        if base.is_absolute() {
            return self.is_absolute()
                && base.label_count() == self.label_count()
                && self.iter().eq(base.iter());
        }
        self.iter().zip(base.iter()).all(|(left, right)| left == right)
    }

    /// Returns whether `base` is a suffix of the name.
    ///
    /// The empty name is a suffix of every name. Otherwise both names need
    /// to be absolute or relative alike.
    pub fn ends_with<Other: AsRef<[u8]>>(&self, base: &Name<Other>) -> bool {
        if base.is_empty() {
            return true;
        }
        if base.is_absolute() != self.is_absolute()
            || base.label_count() > self.label_count()
        {
            return false;
        }
        let skip = self.label_count() - base.label_count();
        self.iter().skip(skip).eq(base.iter())
    }

    /// Concatenates the name and `suffix` into `target`.
    ///
    /// The builder is expected to be empty. The name becomes the prefix of
    /// the result and needs to be relative unless `suffix` is empty.
    ///
    /// # Panics
    ///
    /// The method panics if the name is absolute and `suffix` isn’t empty.
    pub fn concatenate<Other, Builder>(
        &self,
        suffix: &Name<Other>,
        mut target: Builder,
    ) -> Result<Name<Builder::Octets>, NameError>
    where
        Other: AsRef<[u8]>,
        Builder: OctetsBuilder + FreezeBuilder,
    {
        let (label_count, absolute) = self.concatenated_parts(suffix)?;
        append(&mut target, self.as_slice())?;
        append(&mut target, suffix.as_slice())?;
        Ok(Name::from_parts(
            target.freeze(),
            label_count,
            absolute,
            Mode::Bound,
        ))
    }

    /// Concatenates the name and `suffix` into a new vec.
    pub fn concatenate_vec<Other: AsRef<[u8]>>(
        &self,
        suffix: &Name<Other>,
    ) -> Result<Name<Vec<u8>>, NameError> {
        let (label_count, absolute) = self.concatenated_parts(suffix)?;
        let mut octets = Vec::new();
        octets.try_reserve_exact(self.len() + suffix.len())?;
        octets.extend_from_slice(self.as_slice());
        octets.extend_from_slice(suffix.as_slice());
        Ok(Name::from_parts(octets, label_count, absolute, Mode::Dynamic))
    }

    fn concatenated_parts<Other: AsRef<[u8]>>(
        &self,
        suffix: &Name<Other>,
    ) -> Result<(usize, bool), NameError> {
        assert!(
            !self.is_absolute() || suffix.is_empty(),
            "cannot concatenate an absolute prefix with a suffix"
        );
        let label_count = self.label_count() + suffix.label_count();
        if self.len() + suffix.len() > MAX_NAME_LEN
            || label_count > MAX_LABEL_COUNT
        {
            return Err(NameError::NameTooLong);
        }
        Ok((label_count, self.is_absolute() || suffix.is_absolute()))
    }
}

/// # Canonical Form
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Converts all ASCII letters of the name to lowercase in place.
    ///
    /// # Panics
    ///
    /// The method panics if the name is read-only or has been invalidated.
    pub fn make_canonical(&mut self)
    where
        Octs: AsMut<[u8]>,
    {
        self.assert_mutable();
        // Length octets are at most 63 and thus never ASCII letters.
        self.octets.as_mut().make_ascii_lowercase()
    }

    /// Returns a lowercase copy of the name.
    pub fn to_canonical(&self) -> Result<Name<Vec<u8>>, NameError> {
        let mut res = self.duplicate()?;
        res.make_canonical();
        Ok(res)
    }
}

/// # Wildcards and Host Names
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Returns whether the first label is the wildcard label `*`.
    pub fn is_wildcard(&self) -> bool {
        self.first().map(Label::is_wildcard).unwrap_or(false)
    }

    /// Returns whether any label but the first one is a wildcard label.
    pub fn has_internal_wildcard(&self) -> bool {
        self.iter().skip(1).any(Label::is_wildcard)
    }

    /// Returns whether the name is matched by the wildcard name `wild`.
    ///
    /// This is the case if the name is strictly below the parent of the
    /// wildcard.
    ///
    /// # Panics
    ///
    /// The method panics if `wild` isn’t a wildcard name or if the names
    /// differ in absoluteness.
    pub fn matches_wildcard<Other: AsRef<[u8]>>(
        &self,
        wild: &Name<Other>,
    ) -> bool {
        assert!(wild.is_wildcard(), "not a wildcard name");
        let (_, parent) = wild.split(wild.label_count() - 1);
        self.full_compare(&parent).0 == NameRelation::Subdomain
    }

    /// Returns whether the name is a valid host name.
    ///
    /// All labels may only contain letters, digits, and hyphens and must
    /// not start or end with a hyphen. If `allow_wildcard` is `true`, the
    /// first label may also be the wildcard label.
    pub fn is_hostname(&self, allow_wildcard: bool) -> bool {
        let mut labels = self.iter().peekable();
        if allow_wildcard {
            if let Some(label) = labels.peek() {
                if label.is_wildcard() {
                    labels.next();
                }
            }
        }
        labels.all(is_host_label)
    }

    /// Returns whether the name can be used as a mailbox.
    ///
    /// The first label can contain any printable ASCII character. All other
    /// labels have to be host name labels.
    pub fn is_mailbox(&self) -> bool {
        let mut labels = self.iter();
        match labels.next() {
            Some(label) if !label.is_root() => {
                if !label.iter().all(|ch| ch.is_ascii_graphic()) {
                    return false;
                }
            }
            _ => return true,
        }
        labels.all(is_host_label)
    }
}

fn is_host_label(label: &Label) -> bool {
    let slice = label.as_slice();
    match (slice.first(), slice.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && slice
                    .iter()
                    .all(|ch| ch.is_ascii_alphanumeric() || *ch == b'-')
        }
        _ => true,
    }
}

/// Appends a slice to a builder.
pub(super) fn append<Builder: OctetsBuilder + ?Sized>(
    target: &mut Builder,
    slice: &[u8],
) -> Result<(), NameError> {
    target.append_slice(slice).map_err(|_| NameError::NoSpace)
}

//--- AsRef

impl<Octs: AsRef<[u8]>> AsRef<[u8]> for Name<Octs> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- IntoIterator

impl<'a, Octs: AsRef<[u8]>> IntoIterator for &'a Name<Octs> {
    type Item = &'a Label;
    type IntoIter = NameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl<Octs> serde::Serialize for Name<Octs>
where
    Octs: AsRef<[u8]> + SerializeOctets,
{
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer
                .serialize_newtype_struct("Name", &format_args!("{}", self))
        } else {
            serializer.serialize_newtype_struct(
                "Name",
                &self.octets.as_serialized_octets(),
            )
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, Octs> serde::Deserialize<'de> for Name<Octs>
where
    Octs: FromBuilder + DeserializeOctets<'de>,
    <Octs as FromBuilder>::Builder: EmptyBuilder,
{
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use core::marker::PhantomData;

        struct InnerVisitor<'de, T: DeserializeOctets<'de>>(T::Visitor);

        impl<'de, Octs> serde::de::Visitor<'de> for InnerVisitor<'de, Octs>
        where
            Octs: FromBuilder + DeserializeOctets<'de>,
            <Octs as FromBuilder>::Builder: EmptyBuilder,
        {
            type Value = Name<Octs>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_borrowed_bytes<E: serde::de::Error>(
                self,
                value: &'de [u8],
            ) -> Result<Self::Value, E> {
                self.0.visit_borrowed_bytes(value).and_then(|octets| {
                    Name::from_octets(octets).map_err(E::custom)
                })
            }

            fn visit_byte_buf<E: serde::de::Error>(
                self,
                value: Vec<u8>,
            ) -> Result<Self::Value, E> {
                self.0.visit_byte_buf(value).and_then(|octets| {
                    Name::from_octets(octets).map_err(E::custom)
                })
            }
        }

        struct NewtypeVisitor<T>(PhantomData<T>);

        impl<'de, Octs> serde::de::Visitor<'de> for NewtypeVisitor<Octs>
        where
            Octs: FromBuilder + DeserializeOctets<'de>,
            <Octs as FromBuilder>::Builder: EmptyBuilder,
        {
            type Value = Name<Octs>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name")
            }

            fn visit_newtype_struct<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                if deserializer.is_human_readable() {
                    deserializer
                        .deserialize_str(InnerVisitor(Octs::visitor()))
                } else {
                    Octs::deserialize_with_visitor(
                        deserializer,
                        InnerVisitor(Octs::visitor()),
                    )
                }
            }
        }

        deserializer
            .deserialize_newtype_struct("Name", NewtypeVisitor(PhantomData))
    }
}

//------------ NameIter ------------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct NameIter<'a> {
    slice: &'a [u8],
}

impl<'a> NameIter<'a> {
    fn new(slice: &'a [u8]) -> Self {
        NameIter { slice }
    }
}

impl<'a> Iterator for NameIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        let (label, tail) = Label::split_from(self.slice).ok()?;
        self.slice = tail;
        Some(label)
    }
}

impl<'a> FusedIterator for NameIter<'a> {}

//------------ SuffixIter ----------------------------------------------------

/// An iterator over ever shorter suffixes of a name.
#[derive(Clone)]
pub struct SuffixIter<'a, Octs> {
    name: &'a Name<Octs>,
    first: usize,
}

impl<'a, Octs: AsRef<[u8]>> Iterator for SuffixIter<'a, Octs> {
    type Item = Name<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        let label_count = self.name.label_count();
        if self.first >= label_count {
            return None;
        }
        let res = self
            .name
            .label_sequence(self.first, label_count - self.first);
        self.first += 1;
        Some(res)
    }
}

//------------ NameBuf -------------------------------------------------------

/// A scratch buffer for assembling a name.
///
/// Names are built in here while parsing so that the caller’s builder only
/// ever receives a complete name.
pub(super) struct NameBuf {
    octets: [u8; MAX_NAME_LEN],
    len: usize,
    label_count: usize,
    absolute: bool,
}

impl NameBuf {
    pub fn new() -> Self {
        NameBuf {
            octets: [0; MAX_NAME_LEN],
            len: 0,
            label_count: 0,
            absolute: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.octets[..self.len]
    }

    /// Starts a new label and returns the position of its length octet.
    ///
    /// Fails with `NameTooLong` if either octets or labels run out.
    pub fn open_label(&mut self) -> Result<usize, NameError> {
        if self.label_count == MAX_LABEL_COUNT {
            return Err(NameError::NameTooLong);
        }
        let pos = self.len;
        self.push(0)?;
        self.label_count += 1;
        Ok(pos)
    }

    /// Sets the length octet of the label started at `pos`.
    pub fn close_label(&mut self, pos: usize) {
        self.octets[pos] = (self.len - pos - 1) as u8;
    }

    /// Returns the length of the content of the label started at `pos`.
    pub fn label_len(&self, pos: usize) -> usize {
        self.len - pos - 1
    }

    /// Appends the root label, making the name absolute.
    pub fn push_root(&mut self) -> Result<(), NameError> {
        self.open_label()?;
        self.absolute = true;
        Ok(())
    }

    pub fn push(&mut self, octet: u8) -> Result<(), NameError> {
        if self.len == MAX_NAME_LEN {
            return Err(NameError::NameTooLong);
        }
        self.octets[self.len] = octet;
        self.len += 1;
        Ok(())
    }

    /// Appends all labels of `name`.
    pub fn push_name(
        &mut self,
        name: &Name<&[u8]>,
        downcase: bool,
    ) -> Result<(), NameError> {
        if self.len + name.len() > MAX_NAME_LEN
            || self.label_count + name.label_count() > MAX_LABEL_COUNT
        {
            return Err(NameError::NameTooLong);
        }
        let target = &mut self.octets[self.len..][..name.len()];
        target.copy_from_slice(name.as_slice());
        if downcase {
            target.make_ascii_lowercase();
        }
        self.len += name.len();
        self.label_count += name.label_count();
        self.absolute = name.is_absolute();
        Ok(())
    }

    /// Writes the name into an octets builder.
    pub fn freeze_into<Builder>(
        &self,
        mut target: Builder,
    ) -> Result<Name<Builder::Octets>, NameError>
    where
        Builder: OctetsBuilder + FreezeBuilder,
    {
        append(&mut target, self.as_slice())?;
        Ok(Name::from_parts(
            target.freeze(),
            self.label_count,
            self.absolute,
            Mode::Bound,
        ))
    }

    /// Copies the name into newly allocated storage.
    pub fn to_vec_name(&self) -> Result<Name<Vec<u8>>, NameError> {
        let mut octets = Vec::new();
        octets.try_reserve_exact(self.len)?;
        octets.extend_from_slice(self.as_slice());
        Ok(Name::from_parts(
            octets,
            self.label_count,
            self.absolute,
            Mode::Dynamic,
        ))
    }
}

//============ Testing =======================================================
