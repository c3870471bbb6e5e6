//! Domain names for the DNS.
//!
//! This crate provides the domain name type of a DNS library together with
//! everything needed to get names in and out of it: parsing and rendering
//! the presentation format, decoding names from messages including
//! compression pointers, encoding names into messages with compression, as
//! well as comparing and hashing names the way the DNS expects.
//!
//! All of it lives in the [base] module. The most important type is
//! [`Name`][base::Name].
//!
//! ```
//! use domain_name::base::name::{Name, NameRelation, ToTextConfig};
//!
//! let name: Name<Vec<u8>> = "www.example.com.".parse().unwrap();
//! let zone: Name<Vec<u8>> = "example.com.".parse().unwrap();
//! assert_eq!(name.full_compare(&zone).0, NameRelation::Subdomain);
//!
//! let mut config = ToTextConfig::new();
//! config.set_omit_final_dot(true);
//! assert_eq!(name.to_text(&config), "www.example.com");
//! ```
//!
//! # Reference of Feature Flags
//!
//! The following is the complete list of the feature flags available.
//!
//! * `bytes`: Enables using the types `Bytes` and `BytesMut` from the
//!    [bytes](https://github.com/tokio-rs/bytes) crate as octet sequences.
//! * `serde`: Enables serde serialization for a number of basic types.
//!
//! The crate logs through [tracing](https://github.com/tokio-rs/tracing).
//! It doesn’t install a subscriber itself.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![allow(clippy::uninlined_format_args)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
