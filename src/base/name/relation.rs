//! Comparing and hashing names.
//!
//! Names are compared label by label starting from the root, i.e., from
//! the right. Labels are compared as octet sequences ignoring ASCII case.
//! This results in the canonical DNSSEC order defined in section 6.1 of
//! [RFC 4034].
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use super::super::cmp::CanonicalOrd;
use super::dname::Name;
use super::offsets::MAX_NAME_LEN;
use core::cmp::Ordering;
use core::hash::{self, Hasher};
use siphasher::sip::SipHasher24;

//------------ NameRelation --------------------------------------------------

/// How two names relate to each other in the name hierarchy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NameRelation {
    /// Both names are equal.
    Equal,

    /// The first name is below the second.
    Subdomain,

    /// The first name is above the second.
    Contains,

    /// The names share some labels at their end.
    CommonAncestor,

    /// The names have nothing in common.
    Unrelated,
}

//------------ Hash keys -----------------------------------------------------

/// The keys used for the name hashes.
///
/// The hashes need to be the same across runs and processes.
const HASH_KEYS: (u64, u64) = (0x646f_6d61_696e_2d6e, 0x616d_652d_6861_7368);

/// The number of octets considered by [`Name::short_hash`].
const SHORT_HASH_LEN: usize = 16;

//------------ Name ----------------------------------------------------------

/// # Comparing and Hashing
///
impl<Octs: AsRef<[u8]>> Name<Octs> {
    /// Compares the name with another name and determines their relation.
    ///
    /// Returns the relation, the ordering of the two names, and the number
    /// of labels the two names share at their end.
    ///
    /// # Panics
    ///
    /// The method panics if one name is absolute and the other one is not.
    pub fn full_compare<Other: AsRef<[u8]>>(
        &self,
        other: &Name<Other>,
    ) -> (NameRelation, Ordering, usize) {
        assert_eq!(
            self.is_absolute(),
            other.is_absolute(),
            "cannot compare absolute and relative names"
        );
        let left_offsets = self.label_offsets();
        let right_offsets = other.label_offsets();
        let left_slice = self.as_slice();
        let right_slice = other.as_slice();
        let mut left_idx = self.label_count();
        let mut right_idx = other.label_count();
        let mut common = 0;

        while left_idx > 0 && right_idx > 0 {
            left_idx -= 1;
            right_idx -= 1;
            let left = label_at(left_slice, left_offsets[left_idx]);
            let right = label_at(right_slice, right_offsets[right_idx]);
            match cmp_label(left, right) {
                Ordering::Equal => common += 1,
                order => {
                    let relation = if common > 0 {
                        NameRelation::CommonAncestor
                    } else {
                        NameRelation::Unrelated
                    };
                    return (relation, order, common);
                }
            }
        }

        let order = self.label_count().cmp(&other.label_count());
        let relation = match order {
            Ordering::Less => NameRelation::Contains,
            Ordering::Greater => NameRelation::Subdomain,
            Ordering::Equal => NameRelation::Equal,
        };
        (relation, order, common)
    }

    /// Returns the canonical ordering of the name and another name.
    ///
    /// # Panics
    ///
    /// The method panics if one name is absolute and the other one is not.
    pub fn compare<Other: AsRef<[u8]>>(
        &self,
        other: &Name<Other>,
    ) -> Ordering {
        self.full_compare(other).1
    }

    /// Returns whether the name is equal to or below `other`.
    ///
    /// # Panics
    ///
    /// The method panics if one name is absolute and the other one is not.
    pub fn is_subdomain<Other: AsRef<[u8]>>(
        &self,
        other: &Name<Other>,
    ) -> bool {
        matches!(
            self.full_compare(other).0,
            NameRelation::Subdomain | NameRelation::Equal
        )
    }

    /// Returns whether both names are equal ignoring ASCII case.
    pub fn equal<Other: AsRef<[u8]>>(&self, other: &Name<Other>) -> bool {
        self.is_absolute() == other.is_absolute()
            && self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }

    /// Returns whether both names are exactly equal.
    pub fn case_equal<Other: AsRef<[u8]>>(
        &self,
        other: &Name<Other>,
    ) -> bool {
        self.is_absolute() == other.is_absolute()
            && self.as_slice() == other.as_slice()
    }

    /// Compares the wire format of the names octet by octet.
    ///
    /// ASCII letters are compared in lowercase. This is the ordering of
    /// record data containing names.
    pub fn composed_cmp<Other: AsRef<[u8]>>(
        &self,
        other: &Name<Other>,
    ) -> Ordering {
        self.as_slice()
            .iter()
            .map(u8::to_ascii_lowercase)
            .cmp(other.as_slice().iter().map(u8::to_ascii_lowercase))
    }

    /// Returns a hash over the first 16 octets of the name.
    ///
    /// Unless `case_sensitive` is `true`, ASCII letters are hashed in
    /// lowercase so that names equal ignoring case have equal hashes.
    pub fn short_hash(&self, case_sensitive: bool) -> u64 {
        let slice = self.as_slice();
        hash_slice(&slice[..slice.len().min(SHORT_HASH_LEN)], case_sensitive)
    }

    /// Returns a hash over the complete name.
    ///
    /// Unless `case_sensitive` is `true`, ASCII letters are hashed in
    /// lowercase so that names equal ignoring case have equal hashes.
    pub fn full_hash(&self, case_sensitive: bool) -> u64 {
        hash_slice(self.as_slice(), case_sensitive)
    }
}

fn label_at(slice: &[u8], offset: u8) -> &[u8] {
    let start = usize::from(offset);
    let len = usize::from(slice[start]);
    &slice[start + 1..][..len]
}

/// Compares two labels ignoring ASCII case.
///
/// The first differing octet decides. If one label is a prefix of the other,
/// the shorter one sorts first.
fn cmp_label(left: &[u8], right: &[u8]) -> Ordering {
    left.iter()
        .map(u8::to_ascii_lowercase)
        .cmp(right.iter().map(u8::to_ascii_lowercase))
}

fn hash_slice(slice: &[u8], case_sensitive: bool) -> u64 {
    let mut hasher = SipHasher24::new_with_keys(HASH_KEYS.0, HASH_KEYS.1);
    if case_sensitive {
        hasher.write(slice);
    } else {
        let mut buf = [0u8; MAX_NAME_LEN];
        let buf = &mut buf[..slice.len()];
        buf.copy_from_slice(slice);
        buf.make_ascii_lowercase();
        hasher.write(buf);
    }
    hasher.finish()
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<Name<Other>> for Name<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn eq(&self, other: &Name<Other>) -> bool {
        self.equal(other)
    }
}

impl<Octs: AsRef<[u8]>> Eq for Name<Octs> {}

//--- PartialOrd, Ord, and CanonicalOrd

impl<Octs, Other> PartialOrd<Name<Other>> for Name<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    /// Returns the ordering of the names.
    ///
    /// Relative names sort before absolute names.
    fn partial_cmp(&self, other: &Name<Other>) -> Option<Ordering> {
        Some(match self.is_absolute().cmp(&other.is_absolute()) {
            Ordering::Equal => self.compare(other),
            order => order,
        })
    }
}

impl<Octs: AsRef<[u8]>> Ord for Name<Octs> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.is_absolute().cmp(&other.is_absolute()) {
            Ordering::Equal => self.compare(other),
            order => order,
        }
    }
}

impl<Octs, Other> CanonicalOrd<Name<Other>> for Name<Octs>
where
    Octs: AsRef<[u8]>,
    Other: AsRef<[u8]>,
{
    fn canonical_cmp(&self, other: &Name<Other>) -> Ordering {
        self.compare(other)
    }
}

//--- Hash

impl<Octs: AsRef<[u8]>> hash::Hash for Name<Octs> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.is_absolute().hash(state);
        for label in self.iter() {
            label.hash(state)
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn name(slice: &'static [u8]) -> Name<&'static [u8]> {
        Name::from_octets(slice).unwrap()
    }

    #[test]
    fn full_compare() {
        let com = name(b"\x03com\0");
        let example = name(b"\x07example\x03com\0");
        let www = name(b"\x03www\x07example\x03com\0");
        let mail = name(b"\x04mail\x07example\x03com\0");
        let org = name(b"\x03org\0");

        assert_eq!(
            www.full_compare(&example),
            (NameRelation::Subdomain, Ordering::Greater, 3)
        );
        assert_eq!(
            example.full_compare(&www),
            (NameRelation::Contains, Ordering::Less, 3)
        );
        assert_eq!(
            www.full_compare(&name(b"\x03WWW\x07Example\x03com\0")),
            (NameRelation::Equal, Ordering::Equal, 4)
        );
        assert_eq!(
            www.full_compare(&mail),
            (NameRelation::CommonAncestor, Ordering::Greater, 3)
        );
        assert_eq!(
            com.full_compare(&org),
            (NameRelation::CommonAncestor, Ordering::Less, 1)
        );
        assert_eq!(
            name(b"\x03com").full_compare(&name(b"\x03org")),
            (NameRelation::Unrelated, Ordering::Less, 0)
        );
        assert_eq!(
            Name::root_ref().full_compare(&com),
            (NameRelation::Contains, Ordering::Less, 1)
        );
        assert!(www.is_subdomain(&example));
        assert!(www.is_subdomain(&www));
        assert!(!example.is_subdomain(&www));
    }

    #[test]
    #[should_panic]
    fn compare_absolute_with_relative() {
        let _ = name(b"\x03com\0").full_compare(&name(b"\x03com"));
    }

    #[test]
    fn canonical_order() {
        // The example from section 6.1 of RFC 4034.
        let names = [
            name(b"\x07example\0"),
            name(b"\x01a\x07example\0"),
            name(b"\x08yljkjljk\x01a\x07example\0"),
            name(b"\x01Z\x01a\x07example\0"),
            name(b"\x04zABC\x01a\x07EXAMPLE\0"),
            name(b"\x01z\x07example\0"),
            name(b"\x01\x01\x01z\x07example\0"),
            name(b"\x01*\x01z\x07example\0"),
            name(b"\x01\xc8\x01z\x07example\0"),
        ];
        for i in 0..names.len() {
            for j in 0..names.len() {
                let ord = i.cmp(&j);
                assert_eq!(names[i].compare(&names[j]), ord);
                assert_eq!(names[i].canonical_cmp(&names[j]), ord);
                assert_eq!(names[i].partial_cmp(&names[j]), Some(ord));
                assert_eq!(names[i].cmp(&names[j]), ord);
            }
        }
    }

    #[test]
    fn relative_before_absolute() {
        let rel = name(b"\x03zzz");
        let abs = name(b"\x03aaa\0");
        assert_eq!(rel.partial_cmp(&abs), Some(Ordering::Less));
        assert_eq!(abs.cmp(&rel), Ordering::Greater);
    }

    #[test]
    fn equality() {
        let www = name(b"\x03www\x07example\x03com\0");
        let upper = name(b"\x03WWW\x07EXAMPLE\x03COM\0");
        assert!(www.equal(&upper));
        assert!(!www.case_equal(&upper));
        assert!(www.case_equal(&www));
        assert_eq!(www, upper);
        assert_ne!(www, name(b"\x03www\x07example\x03com"));
        assert_eq!(www, www.duplicate().unwrap());
    }

    #[test]
    fn composed_cmp() {
        // Octet-wise, the length octet comes first.
        let short = name(b"\x01z\0");
        let long = name(b"\x02aa\0");
        assert_eq!(short.compare(&long), Ordering::Greater);
        assert_eq!(short.composed_cmp(&long), Ordering::Less);
        assert_eq!(
            name(b"\x01A\0").composed_cmp(&name(b"\x01a\0")),
            Ordering::Equal
        );
    }

    #[test]
    fn hashes() {
        let www = name(b"\x03www\x07example\x03com\0");
        let upper = name(b"\x03WWW\x07EXAMPLE\x03COM\0");
        assert_eq!(www.full_hash(false), upper.full_hash(false));
        assert_ne!(www.full_hash(true), upper.full_hash(true));
        assert_eq!(www.short_hash(false), upper.short_hash(false));
        assert_eq!(www.full_hash(true), www.full_hash(true));

        // Only the first 16 octets count for the short hash.
        let uk = name(b"\x03www\x07example\x03com\x02uk\0");
        let de = name(b"\x03www\x07example\x03com\x02de\0");
        assert_eq!(uk.short_hash(false), de.short_hash(false));
        assert_ne!(uk.full_hash(false), de.full_hash(false));
    }

    #[test]
    fn std_hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hash;

        let mut s1 = DefaultHasher::new();
        let mut s2 = DefaultHasher::new();
        name(b"\x03www\x07example\x03com\0").hash(&mut s1);
        name(b"\x03wWw\x07eXAMPLe\x03com\0").hash(&mut s2);
        assert_eq!(s1.finish(), s2.finish());
    }
}
