#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
//! The data plane of a [WHATWG URL Standard] implementation: normalized
//! URL storage, a lazy percent-encoding engine with pluggable encode
//! sets, and the code-point classification and validation-error
//! vocabulary that a URL parser operates on.
//!
//! This crate deliberately stops short of the parser state machine,
//! host parsing, and the public setter API. What it provides is the
//! substrate those layers are built on:
//!
//! - [`UrlStorage`] keeps a URL's serialized form in one contiguous
//!   buffer, indexed by a compact structure header, and supports
//!   in-place splicing with copy-on-write value semantics.
//! - [`encoding`] transforms byte sequences to and from their
//!   percent-encoded forms lazily, one byte group at a time, under an
//!   [`EncodeSet`] policy.
//! - [`codepoints`] reproduces the standard's *URL code point* and
//!   *forbidden host code point* classifications bit-exactly.
//! - [`error`] defines the validation errors a parser reports and the
//!   callback contract it reports them through.
//!
//! [WHATWG URL Standard]: https://url.spec.whatwg.org/
//!
//! # Examples
//!
//! ```
//! use fluent_url::encoding::{self, set};
//!
//! let encoded = encoding::encode(b"hello, world", set::COMPONENT);
//! assert_eq!(&*encoded, b"hello%2C%20world");
//!
//! let decoded = encoding::decode(&encoded, set::COMPONENT);
//! assert_eq!(&*decoded, b"hello, world");
//! ```

extern crate alloc;

pub mod codepoints;
pub mod encoding;
pub mod error;
pub mod storage;

pub use encoding::EncodeSet;
pub use error::{ValidationError, ValidationErrorHandler};
pub use storage::{Component, SchemeKind, Sigil, UrlStorage, UrlStructure};
