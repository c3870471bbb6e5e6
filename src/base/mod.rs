//! Handling of DNS data.
//!
//! This module provides the fundamental types for domain names: the
//! [`Name`] itself in the [`name`] module, the traits and errors shared with
//! the wire format in [`wire`], and the trait for the canonical ordering used
//! by DNSSEC in [`cmp`].

pub use self::cmp::CanonicalOrd;
pub use self::name::{Name, NameError};
pub use self::wire::{Composer, FormError, Parse, ParseError};

pub mod cmp;
pub mod name;
pub mod wire;
