//! Normalized URL storage.
//!
//! A URL's serialized form lives in one contiguous code-unit buffer,
//! owned by a [`UrlStorage`] together with a structure header
//! ([`UrlStructure`]) from which every component's byte range is
//! derived. The header is stored in one of two footprints, compact
//! (`u8` lengths, buffers up to 255 code units) or wide (`usize`
//! lengths), and every mutation leaves the storage on the optimal
//! footprint for its new length.
//!
//! `UrlStorage` is a copy-on-write value: clones share the buffer, and
//! a mutation through a shared clone reallocates instead of writing in
//! place.

mod replace;
mod structure;

pub use replace::ReplaceCommand;
pub use structure::{
    AuthorityLengths, Component, SchemeKind, Sigil, StructureInt, UrlStructure,
};

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str;

/// Largest buffer a compact header can describe.
const COMPACT_MAX: usize = u8::MAX as usize;

#[derive(Clone, Debug)]
struct Inner<I> {
    structure: UrlStructure<I>,
    code_units: Vec<u8>,
}

#[derive(Clone, Debug)]
enum Repr {
    Compact(Inner<u8>),
    Wide(Inner<usize>),
}

impl Repr {
    fn code_units(&self) -> &[u8] {
        match self {
            Repr::Compact(inner) => &inner.code_units,
            Repr::Wide(inner) => &inner.code_units,
        }
    }

    fn structure(&self) -> UrlStructure {
        match self {
            Repr::Compact(inner) => inner.structure.to_wide(),
            Repr::Wide(inner) => inner.structure,
        }
    }
}

/// Normalized URL storage: a contiguous code-unit buffer indexed by a
/// [`UrlStructure`] header.
///
/// Created by a parser or setter finalizing a layout via [`new`], and
/// mutated through the replacement operations, which preserve the
/// structural invariants and the optimal header footprint. Clones share
/// the buffer until one of them mutates.
///
/// The buffer holds the URL's normalized serialization, which is
/// always ASCII; the structure header is an in-memory index and is not
/// part of the serialized form.
///
/// [`new`]: Self::new
///
/// # Examples
///
/// ```
/// use fluent_url::{Component, UrlStorage, UrlStructure};
///
/// let mut structure = UrlStructure::default();
/// structure.set_length(Component::Scheme, 2);
/// let url = UrlStorage::new(structure, |dest| {
///     dest.copy_from_slice(b"a:");
///     dest.len()
/// });
/// assert_eq!(url.as_str(), "a:");
/// ```
#[derive(Clone)]
pub struct UrlStorage {
    repr: Arc<Repr>,
}

impl UrlStorage {
    /// Creates a storage for the given layout, with `writer` filling
    /// the entire buffer.
    ///
    /// The writer receives a zero-initialized buffer of exactly
    /// [`UrlStructure::url_length`] bytes and must return the number of
    /// bytes it wrote.
    ///
    /// # Panics
    ///
    /// Panics if the writer does not fill the buffer exactly, or if the
    /// structure's invariants do not hold.
    pub fn new(structure: UrlStructure, writer: impl FnOnce(&mut [u8]) -> usize) -> UrlStorage {
        let count = structure.url_length();
        let mut code_units = vec![0; count];
        let written = writer(&mut code_units);
        assert!(
            written == count,
            "writer reported {written} bytes for a {count}-byte buffer"
        );
        UrlStorage {
            repr: Arc::new(Self::build_repr(structure, code_units)),
        }
    }

    fn build_repr(structure: UrlStructure, code_units: Vec<u8>) -> Repr {
        debug_assert!(structure.invariants_hold());
        debug_assert_eq!(structure.url_length(), code_units.len());
        debug_assert!(serialization_agrees(&structure, &code_units));
        if code_units.len() <= COMPACT_MAX {
            Repr::Compact(Inner {
                structure: structure.convert(),
                code_units,
            })
        } else {
            Repr::Wide(Inner {
                structure,
                code_units,
            })
        }
    }

    pub(crate) fn repr_mut(&mut self) -> Option<&mut Repr> {
        Arc::get_mut(&mut self.repr)
    }

    pub(crate) fn install(&mut self, structure: UrlStructure, code_units: Vec<u8>) {
        self.repr = Arc::new(Self::build_repr(structure, code_units));
    }

    /// Returns a copy of the structure header, widened.
    #[must_use]
    pub fn structure(&self) -> UrlStructure {
        self.repr.structure()
    }

    /// Returns the full code-unit buffer.
    #[must_use]
    pub fn code_units(&self) -> &[u8] {
        self.repr.code_units()
    }

    /// Returns the length of the serialized URL in code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code_units().len()
    }

    /// Checks whether the storage is empty. A valid URL never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code_units().is_empty()
    }

    /// Returns the serialized URL as a string slice, zero-copy.
    ///
    /// # Panics
    ///
    /// Panics if a writer callback violated its contract by storing
    /// non-ASCII, non-UTF-8 code units.
    #[must_use]
    pub fn as_str(&self) -> &str {
        str::from_utf8(self.code_units()).expect("URL buffer holds invalid UTF-8")
    }

    /// Returns the byte range of a component, or `None` when the
    /// component is absent.
    ///
    /// The range includes the component's leading separator where one
    /// exists (see [`UrlStructure`]).
    #[must_use]
    pub fn component_bytes(&self, component: Component) -> Option<&[u8]> {
        let range = self.structure().range(component)?;
        Some(&self.code_units()[range])
    }

    /// Returns the whole authority substring and the lengths of its
    /// four subcomponents, or `None` when the URL has no authority.
    #[must_use]
    pub fn authority_bytes(&self) -> Option<(&[u8], AuthorityLengths)> {
        let structure = self.structure();
        let range = structure.authority_range()?;
        Some((&self.code_units()[range], structure.authority_lengths()))
    }

    /// Whether the storage currently uses the compact header footprint.
    ///
    /// Always agrees with the optimal footprint for the current length:
    /// compact iff the buffer holds at most 255 code units.
    #[must_use]
    pub fn uses_compact_header(&self) -> bool {
        matches!(*self.repr, Repr::Compact(_))
    }
}

impl fmt::Display for UrlStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for UrlStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlStorage")
            .field("serialization", &self.as_str())
            .field("structure", &self.structure())
            .finish()
    }
}

impl PartialEq for UrlStorage {
    fn eq(&self, other: &UrlStorage) -> bool {
        self.code_units() == other.code_units()
    }
}

impl Eq for UrlStorage {}

/// Checks that the stored separators agree with the header.
fn serialization_agrees(structure: &UrlStructure, code_units: &[u8]) -> bool {
    let scheme_end = structure.scheme_end();
    if scheme_end < 2 || code_units[scheme_end - 1] != b':' {
        return false;
    }
    if let Some(sigil) = structure.sigil {
        if &code_units[scheme_end..scheme_end + Sigil::LEN] != sigil.as_bytes() {
            return false;
        }
        if sigil == Sigil::Path && !code_units[structure.path_start()..].starts_with(b"//") {
            return false;
        }
    }
    if structure.has_credential_separator()
        && code_units[structure.hostname_start() - 1] != b'@'
    {
        return false;
    }
    let prefixed = [
        (Component::Password, b':'),
        (Component::Port, b':'),
        (Component::Query, b'?'),
        (Component::Fragment, b'#'),
    ];
    for (component, prefix) in prefixed {
        if structure.length(component) > 0
            && code_units[structure.start(component)] != prefix
        {
            return false;
        }
    }
    true
}
