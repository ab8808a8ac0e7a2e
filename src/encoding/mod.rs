//! Lazy percent-encoding and -decoding.
//!
//! Encoding is modeled as a transform over a byte sequence: every
//! source byte yields exactly one [`EncodedByte`] group, which expands
//! to one code unit (passed through or substituted) or three (a `%HH`
//! escape, upper-hex). [`PercentEncoded`] produces the groups lazily
//! and is bidirectional whenever its source is; the buffered drainers
//! flush the expansion through a small stack buffer without heap
//! allocation. [`PercentDecoded`] runs the reverse direction, again one
//! byte at a time.
//!
//! Which bytes escape, and which substitute (form-encoding's
//! space↔plus), is decided by an [`EncodeSet`] policy value; the
//! WHATWG catalogue lives in [`set`].
//!
//! # Round trip
//!
//! For any encode set that escapes `%`, decoding an encoding of a byte
//! sequence yields the original sequence:
//!
//! ```
//! use fluent_url::encoding::{decode, encode, set};
//!
//! let source = b"%40 Polyester";
//! assert_eq!(*decode(&encode(source, set::COMPONENT), set::COMPONENT), *source);
//! ```

mod imp;
pub mod set;

pub use set::EncodeSet;

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use imp::{decode_octet, escape_octet};

/// Size of the drainers' stack buffer.
///
/// Sized like a short string's inline capacity so that sources of up
/// to five bytes always drain in a single flush.
const DRAIN_BUFFER_LEN: usize = 15;

/// A single source byte as it appears in percent-encoded output.
///
/// This is the item type of [`PercentEncoded`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodedByte {
    /// An ASCII byte the encode set neither escapes nor substitutes.
    /// Expands to itself.
    Unchanged(u8),
    /// The substitute for a source byte the encode set substitutes.
    /// Expands to one code unit.
    Substituted(u8),
    /// A source byte the encode set escapes, or any non-ASCII byte.
    /// Carries the original byte and expands to three code units.
    Escaped(u8),
}

impl EncodedByte {
    /// Classifies one source byte under the given encode set.
    #[inline]
    #[must_use]
    pub const fn new(byte: u8, set: &EncodeSet) -> EncodedByte {
        if set.should_escape(byte) {
            EncodedByte::Escaped(byte)
        } else if let Some(sub) = set.substitute(byte) {
            EncodedByte::Substituted(sub)
        } else {
            EncodedByte::Unchanged(byte)
        }
    }

    /// Returns the length of the expanded form in code units: 1, or 3
    /// for an escaped byte.
    #[inline]
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        match self {
            EncodedByte::Escaped(_) => 3,
            _ => 1,
        }
    }

    /// Checks whether the source byte survives encoding unmodified.
    #[inline]
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, EncodedByte::Unchanged(_))
    }

    /// Writes the expanded form into the start of `out` and returns the
    /// number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`encoded_len`](Self::encoded_len).
    pub fn expand_into(&self, out: &mut [u8]) -> usize {
        match *self {
            EncodedByte::Unchanged(x) | EncodedByte::Substituted(x) => {
                out[0] = x;
                1
            }
            EncodedByte::Escaped(x) => {
                out[..3].copy_from_slice(&escape_octet(x));
                3
            }
        }
    }
}

/// A lazy percent-encoding of a byte sequence under an encode set.
///
/// One source byte yields exactly one [`EncodedByte`] group, so the
/// group count equals the source length and the iterator is
/// double-ended and exact-size whenever the source is.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PercentEncoded<I> {
    source: I,
    set: EncodeSet,
}

impl<I: Iterator<Item = u8>> PercentEncoded<I> {
    /// Creates a lazy encoding of `source` under `set`.
    pub fn new<S>(source: S, set: &EncodeSet) -> PercentEncoded<I>
    where
        S: IntoIterator<Item = u8, IntoIter = I>,
    {
        PercentEncoded {
            source: source.into_iter(),
            set: *set,
        }
    }

    /// Drains the encoding front to back through a fixed stack buffer.
    ///
    /// `write` is called with chunks whose concatenation is the full
    /// expansion. The chunk slice is only valid for the duration of the
    /// callback; callers must copy out of it rather than retain it.
    ///
    /// Returns `true` if any group other than an unchanged source byte
    /// was produced, i.e. whether encoding modified the input.
    pub fn write_buffered(mut self, mut write: impl FnMut(&[u8])) -> bool {
        let mut buf = [0; DRAIN_BUFFER_LEN];
        let mut len = 0;
        let mut modified = false;

        while let Some(group) = self.next() {
            if DRAIN_BUFFER_LEN - len < group.encoded_len() {
                write(&buf[..len]);
                len = 0;
            }
            len += group.expand_into(&mut buf[len..]);
            modified |= !group.is_unchanged();
        }
        if len > 0 {
            write(&buf[..len]);
        }
        modified
    }
}

impl<I: DoubleEndedIterator<Item = u8>> PercentEncoded<I> {
    /// Drains the encoding back to front through a fixed stack buffer.
    ///
    /// `write` is called with chunks whose concatenation *in reverse
    /// call order* is the full expansion; each chunk is internally in
    /// forward order. The chunk slice is only valid for the duration of
    /// the callback.
    ///
    /// Returns `true` if encoding modified the input, as
    /// [`write_buffered`](Self::write_buffered) does.
    pub fn write_buffered_from_back(mut self, mut write: impl FnMut(&[u8])) -> bool {
        let mut buf = [0; DRAIN_BUFFER_LEN];
        let mut start = DRAIN_BUFFER_LEN;
        let mut modified = false;

        while let Some(group) = self.next_back() {
            let n = group.encoded_len();
            if start < n {
                write(&buf[start..]);
                start = DRAIN_BUFFER_LEN;
            }
            start -= n;
            group.expand_into(&mut buf[start..]);
            modified |= !group.is_unchanged();
        }
        if start < DRAIN_BUFFER_LEN {
            write(&buf[start..]);
        }
        modified
    }
}

impl<I: Iterator<Item = u8>> Iterator for PercentEncoded<I> {
    type Item = EncodedByte;

    #[inline]
    fn next(&mut self) -> Option<EncodedByte> {
        let set = self.set;
        self.source.next().map(|x| EncodedByte::new(x, &set))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<I: DoubleEndedIterator<Item = u8>> DoubleEndedIterator for PercentEncoded<I> {
    #[inline]
    fn next_back(&mut self) -> Option<EncodedByte> {
        let set = self.set;
        self.source.next_back().map(|x| EncodedByte::new(x, &set))
    }
}

impl<I: ExactSizeIterator<Item = u8>> ExactSizeIterator for PercentEncoded<I> {}

impl<I: FusedIterator<Item = u8>> FusedIterator for PercentEncoded<I> {}

/// A lazy percent-decoding of a byte sequence under an encode set.
///
/// Decoding is infallible: a `%` that is not followed by two hex
/// digits is passed through literally (after unsubstitution, if the
/// set defines one for `%`), and non-ASCII bytes are passed through
/// unchanged.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PercentDecoded<I> {
    source: I,
    set: EncodeSet,
    // Bytes pulled past a `%` that turned out not to be an escape;
    // replayed through the normal rules before the source resumes.
    pending: [u8; 2],
    pending_len: u8,
}

impl<I: Iterator<Item = u8>> PercentDecoded<I> {
    /// Creates a lazy decoding of `source` under `set`.
    pub fn new<S>(source: S, set: &EncodeSet) -> PercentDecoded<I>
    where
        S: IntoIterator<Item = u8, IntoIter = I>,
    {
        PercentDecoded {
            source: source.into_iter(),
            set: *set,
            pending: [0; 2],
            pending_len: 0,
        }
    }

    fn pull(&mut self) -> Option<u8> {
        if self.pending_len > 0 {
            let x = self.pending[0];
            self.pending[0] = self.pending[1];
            self.pending_len -= 1;
            Some(x)
        } else {
            self.source.next()
        }
    }

    fn replay(&mut self, hi: Option<u8>, lo: Option<u8>) {
        debug_assert_eq!(self.pending_len, 0);
        if let Some(hi) = hi {
            self.pending[0] = hi;
            self.pending_len = 1;
        }
        if let Some(lo) = lo {
            self.pending[1] = lo;
            self.pending_len = 2;
        }
    }
}

impl<I: Iterator<Item = u8>> Iterator for PercentDecoded<I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let x = self.pull()?;
        if x == b'%' {
            let hi = self.pull();
            let lo = if hi.is_some() { self.pull() } else { None };
            if let (Some(hi), Some(lo)) = (hi, lo) {
                if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() {
                    return Some(decode_octet(hi, lo));
                }
            }
            self.replay(hi, lo);
            return Some(self.set.unsubstitute(b'%').unwrap_or(b'%'));
        }
        if x.is_ascii() {
            Some(self.set.unsubstitute(x).unwrap_or(x))
        } else {
            Some(x)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.source.size_hint();
        let pending = self.pending_len as usize;
        ((lo + pending + 2) / 3, hi.map(|x| x + pending))
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for PercentDecoded<I> {}

/// Percent-encodes a byte sequence under the given encode set.
///
/// Borrows the input when no byte needs escaping or substitution, in
/// which case the result is guaranteed to be ASCII.
///
/// # Examples
///
/// ```
/// use fluent_url::encoding::{encode, set};
///
/// assert_eq!(&*encode(b"hello, world", set::COMPONENT), b"hello%2C%20world");
/// assert_eq!(
///     &*encode(b"Swift is better than C++", set::FORM_ENCODED),
///     b"Swift+is+better+than+C%2B%2B"
/// );
/// ```
pub fn encode<'a>(source: &'a [u8], set: &EncodeSet) -> Cow<'a, [u8]> {
    // Skip bytes that encoding leaves alone.
    let first = source
        .iter()
        .position(|&x| !EncodedByte::new(x, set).is_unchanged());
    let Some(i) = first else {
        return Cow::Borrowed(source);
    };

    let mut out = Vec::with_capacity(source.len() + 2);
    out.extend_from_slice(&source[..i]);
    PercentEncoded::new(source[i..].iter().copied(), set)
        .write_buffered(|chunk| out.extend_from_slice(chunk));
    Cow::Owned(out)
}

/// Percent-decodes a byte sequence under the given encode set.
///
/// Borrows the input when it contains no `%` and no byte the set
/// unsubstitutes.
///
/// # Examples
///
/// ```
/// use fluent_url::encoding::{decode, set};
///
/// assert_eq!(&*decode(b"hello%2C%20world", set::PASSTHROUGH), b"hello, world");
/// assert_eq!(&*decode(b"a+b", set::FORM_ENCODED), b"a b");
/// ```
pub fn decode<'a>(source: &'a [u8], set: &EncodeSet) -> Cow<'a, [u8]> {
    let first = source
        .iter()
        .position(|&x| x == b'%' || set.unsubstitute(x).is_some());
    let Some(i) = first else {
        return Cow::Borrowed(source);
    };

    let mut out = Vec::with_capacity(source.len());
    out.extend_from_slice(&source[..i]);
    out.extend(PercentDecoded::new(source[i..].iter().copied(), set));
    Cow::Owned(out)
}
