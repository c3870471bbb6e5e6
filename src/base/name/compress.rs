//! Keeping track of names for compression.
//!
//! When writing a name into a message, [`Name::to_wire`] asks a
//! [`CompressionContext`] whether some suffix of the name has been written
//! before and, if so, where. This module defines the trait and two
//! implementations: [`TreeCompressor`] remembers names in a tree of labels
//! and [`NoCompression`] doesn’t remember anything at all.

use super::dname::Name;
use super::label::OwnedLabel;
use std::collections::HashMap;

//------------ CompressionContext --------------------------------------------

/// A type remembering the positions of names in a message.
///
/// Positions are offsets from the start of the message. Only positions that
/// can be expressed by a compression pointer, i.e., that are less than
/// `0x4000`, are ever recorded.
pub trait CompressionContext {
    /// Returns whether compression should be attempted at all.
    fn is_enabled(&self) -> bool;

    /// Returns the longest suffix of `name` that has been recorded.
    ///
    /// Returns the suffix as a view into `name` and its position.
    fn find_longest_match<'a>(
        &self,
        name: &'a Name<&[u8]>,
    ) -> Option<(Name<&'a [u8]>, u16)>;

    /// Records that `name` has been written at `offset`.
    fn record(&mut self, name: &Name<&[u8]>, offset: u16);

    /// Forgets all names recorded at or after `offset`.
    ///
    /// This is necessary when the message is truncated.
    fn rollback(&mut self, offset: usize);
}

impl<'c, C: CompressionContext + ?Sized> CompressionContext for &'c mut C {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn find_longest_match<'a>(
        &self,
        name: &'a Name<&[u8]>,
    ) -> Option<(Name<&'a [u8]>, u16)> {
        (**self).find_longest_match(name)
    }

    fn record(&mut self, name: &Name<&[u8]>, offset: u16) {
        (**self).record(name, offset)
    }

    fn rollback(&mut self, offset: usize) {
        (**self).rollback(offset)
    }
}

//------------ NoCompression -------------------------------------------------

/// A compression context that disables compression.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCompression;

impl CompressionContext for NoCompression {
    fn is_enabled(&self) -> bool {
        false
    }

    fn find_longest_match<'a>(
        &self,
        _name: &'a Name<&[u8]>,
    ) -> Option<(Name<&'a [u8]>, u16)> {
        None
    }

    fn record(&mut self, _name: &Name<&[u8]>, _offset: u16) {}

    fn rollback(&mut self, _offset: usize) {}
}

//------------ TreeCompressor ------------------------------------------------

/// A compression context that uses a tree.
///
/// The context stores the position of any absolute name it has been told
/// about in a tree of labels. Labels are compared ignoring ASCII case, so a
/// name can be compressed against an earlier name that only differs in case.
#[derive(Clone, Debug)]
pub struct TreeCompressor {
    /// The topmost node of our tree.
    start: Node,

    /// Whether compression is enabled.
    enabled: bool,
}

/// A node in our tree.
///
/// The tree follows the labels of the domain names from the root towards the
/// left. The root node is for the root label. It contains a map that maps all
/// the labels encountered to the immediate left of the name traced by this
/// path through the tree to a node for the name resulting by adding this
/// label to the name constructed so far.
///
/// Each node also contains the position of that name in the message.
#[derive(Clone, Debug, Default)]
struct Node {
    /// The labels immediately to the left of this name and their nodes.
    parents: HashMap<OwnedLabel, Self>,

    /// The position of this name in the message.
    value: Option<u16>,
}

impl Node {
    fn drop_above(&mut self, len: usize) {
        self.value = match self.value {
            Some(value) if usize::from(value) < len => Some(value),
            _ => None,
        };
        self.parents
            .values_mut()
            .for_each(|node| node.drop_above(len))
    }
}

impl TreeCompressor {
    /// Creates a new, empty compressor.
    pub fn new() -> Self {
        TreeCompressor {
            start: Default::default(),
            enabled: true,
        }
    }

    /// Enables or disables compression.
    ///
    /// A disabled compressor keeps what it has recorded but neither finds
    /// nor records names.
    pub fn set_enabled(&mut self, value: bool) {
        self.enabled = value
    }
}

impl Default for TreeCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionContext for TreeCompressor {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn find_longest_match<'a>(
        &self,
        name: &'a Name<&[u8]>,
    ) -> Option<(Name<&'a [u8]>, u16)> {
        if !self.enabled || !name.is_absolute() {
            return None;
        }
        let label_count = name.label_count();
        let mut node = &self.start;
        let mut found = None;
        for idx in (0..label_count - 1).rev() {
            node = match node.parents.get(name.label(idx)) {
                Some(node) => node,
                None => break,
            };
            if let Some(value) = node.value {
                found = Some((idx, value));
            }
        }
        found.map(|(idx, value)| {
            (name.label_sequence(idx, label_count - idx), value)
        })
    }

    fn record(&mut self, name: &Name<&[u8]>, offset: u16) {
        if !self.enabled
            || !name.is_absolute()
            || name.is_root()
            || offset >= 0x4000
        {
            return;
        }
        let mut node = &mut self.start;
        for idx in (0..name.label_count() - 1).rev() {
            node = node
                .parents
                .entry(name.label(idx).into())
                .or_default();
        }
        // Keep the earliest position.
        if node.value.is_none() {
            node.value = Some(offset)
        }
    }

    fn rollback(&mut self, offset: usize) {
        self.start.drop_above(offset)
    }
}

//============ Testing =======================================================
