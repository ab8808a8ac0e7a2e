//! Percent-encode sets from the [WHATWG URL Standard].
//!
//! The predefined constants in this module are documented with the
//! wording of the standard; each set is the union of the bytes it
//! names and the sets it extends.
//!
//! [WHATWG URL Standard]: https://url.spec.whatwg.org/#percent-encoded-bytes

/// A percent-encode set: a policy selecting which ASCII bytes must be
/// percent-encoded and, optionally, which are substituted by another
/// ASCII byte instead.
///
/// Non-ASCII bytes are always percent-encoded regardless of the set.
///
/// An `EncodeSet` is a plain value. The membership predicate is a
/// 128-bit bitmap and substitutions are a static pair table, so a set
/// can be built and combined entirely in `const` context.
#[derive(Clone, Copy, Debug)]
pub struct EncodeSet {
    lo: u64,
    hi: u64,
    substitutions: &'static [(u8, u8)],
}

impl EncodeSet {
    /// Creates a set containing exactly the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> EncodeSet {
        let mut set = EncodeSet {
            lo: 0,
            hi: 0,
            substitutions: &[],
        };
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot add non-ASCII byte to encode set");
            if *cur < 64 {
                set.lo |= 1 << *cur;
            } else {
                set.hi |= 1 << (*cur - 64);
            }
            bytes = rem;
        }
        set
    }

    /// Combines two sets into one.
    ///
    /// Returns a new set that escapes every byte escaped by `self` or
    /// by `other`. Substitutions of `self` are kept.
    #[must_use]
    pub const fn or(mut self, other: &EncodeSet) -> EncodeSet {
        self.lo |= other.lo;
        self.hi |= other.hi;
        self
    }

    /// Adds an inclusive range of ASCII bytes to the set.
    ///
    /// # Panics
    ///
    /// Panics if the range is not ASCII or `first > last`.
    #[must_use]
    pub const fn or_range(mut self, first: u8, last: u8) -> EncodeSet {
        assert!(first <= last && last.is_ascii(), "invalid ASCII byte range");
        let mut cur = first;
        loop {
            if cur < 64 {
                self.lo |= 1 << cur;
            } else {
                self.hi |= 1 << (cur - 64);
            }
            if cur == last {
                break;
            }
            cur += 1;
        }
        self
    }

    /// Inverts the set over the ASCII range.
    ///
    /// Returns a new set that escapes exactly the ASCII bytes `self`
    /// does not. Substitutions are kept.
    #[must_use]
    pub const fn complement(mut self) -> EncodeSet {
        self.lo = !self.lo;
        self.hi = !self.hi;
        self
    }

    /// Attaches forward substitution pairs `(from, to)` to the set.
    ///
    /// A substituted byte must not also be escaped by the set, and the
    /// pairs must be invertible (no byte appears twice on either side);
    /// both are required for [`unsubstitute`] to invert [`substitute`].
    ///
    /// [`substitute`]: Self::substitute
    /// [`unsubstitute`]: Self::unsubstitute
    ///
    /// # Panics
    ///
    /// Panics if a pair contains a non-ASCII byte or a `from` byte that
    /// the set escapes.
    #[must_use]
    pub const fn with_substitutions(mut self, pairs: &'static [(u8, u8)]) -> EncodeSet {
        let mut i = 0;
        while i < pairs.len() {
            assert!(
                pairs[i].0.is_ascii() && pairs[i].1.is_ascii(),
                "substitution must be ASCII"
            );
            assert!(
                !self.should_escape(pairs[i].0),
                "cannot substitute an escaped byte"
            );
            i += 1;
        }
        self.substitutions = pairs;
        self
    }

    /// Checks whether the byte must be percent-encoded.
    ///
    /// Always `true` for non-ASCII bytes.
    #[inline]
    #[must_use]
    pub const fn should_escape(&self, byte: u8) -> bool {
        if byte < 64 {
            self.lo >> byte & 1 == 1
        } else if byte < 128 {
            self.hi >> (byte - 64) & 1 == 1
        } else {
            true
        }
    }

    /// Returns the byte substituted for `byte` on encoding, if any.
    #[inline]
    #[must_use]
    pub const fn substitute(&self, byte: u8) -> Option<u8> {
        let mut i = 0;
        while i < self.substitutions.len() {
            if self.substitutions[i].0 == byte {
                return Some(self.substitutions[i].1);
            }
            i += 1;
        }
        None
    }

    /// Returns the byte that `byte` stands in for on decoding, if any.
    ///
    /// This is the inverse of [`substitute`]: wherever both are
    /// defined, `unsubstitute(substitute(b)) == b`.
    ///
    /// [`substitute`]: Self::substitute
    #[inline]
    #[must_use]
    pub const fn unsubstitute(&self, byte: u8) -> Option<u8> {
        let mut i = 0;
        while i < self.substitutions.len() {
            if self.substitutions[i].1 == byte {
                return Some(self.substitutions[i].0);
            }
            i += 1;
        }
        None
    }

    /// Checks whether `other` escapes at least every byte `self` does.
    #[must_use]
    pub const fn is_subset(&self, other: &EncodeSet) -> bool {
        self.lo & !other.lo == 0 && self.hi & !other.hi == 0
    }
}

const fn new(bytes: &[u8]) -> EncodeSet {
    EncodeSet::new(bytes)
}

const ALPHANUMERIC: &EncodeSet = &new(b"")
    .or_range(b'0', b'9')
    .or_range(b'A', b'Z')
    .or_range(b'a', b'z');

/// The C0 control percent-encode set: C0 controls and all bytes greater
/// than U+007E (~).
pub const C0_CONTROL: &EncodeSet = &new(b"\x7f").or_range(0x00, 0x1f);

/// The fragment percent-encode set: [`C0_CONTROL`] and
/// U+0020 SPACE, U+0022 ("), U+003C (<), U+003E (>), and U+0060 (`).
pub const FRAGMENT: &EncodeSet = &C0_CONTROL.or(&new(b" \"<>`"));

/// The query percent-encode set: [`C0_CONTROL`] and
/// U+0020 SPACE, U+0022 ("), U+0023 (#), U+003C (<), and U+003E (>).
///
/// Queries of URLs with a [special scheme] use [`SPECIAL_QUERY`] instead.
///
/// [special scheme]: https://url.spec.whatwg.org/#special-scheme
pub const QUERY: &EncodeSet = &C0_CONTROL.or(&new(b" \"#<>"));

/// The special-query percent-encode set: [`QUERY`] and U+0027 (').
pub const SPECIAL_QUERY: &EncodeSet = &QUERY.or(&new(b"'"));

/// The path percent-encode set: [`FRAGMENT`] and
/// U+003F (?), U+0060 (`), U+007B ({), and U+007D (}).
pub const PATH: &EncodeSet = &FRAGMENT.or(&new(b"?`{}"));

/// The userinfo percent-encode set: [`PATH`] and
/// U+002F (/), U+003A (:), U+003B (;), U+003D (=), U+0040 (@),
/// U+005B ([) to U+005E (^), inclusive, and U+007C (|).
pub const USERINFO: &EncodeSet = &PATH.or(&new(b"/:;=@[\\]^|"));

/// The component percent-encode set: [`USERINFO`] and
/// U+0024 ($), U+0025 (%), U+0026 (&), U+002B (+), and U+002C (,).
pub const COMPONENT: &EncodeSet = &USERINFO.or(&new(b"$%&+,"));

/// The `application/x-www-form-urlencoded` percent-encode set:
/// everything except ASCII alphanumerics, U+002A (*), U+002D (-),
/// U+002E (.), and U+005F (_); U+0020 SPACE is substituted by
/// U+002B (+) rather than escaped.
///
/// This is the only predefined set that performs substitution.
pub const FORM_ENCODED: &EncodeSet = &new(b" *-._")
    .or(ALPHANUMERIC)
    .complement()
    .with_substitutions(&[(b' ', b'+')]);

/// The empty percent-encode set: escapes nothing, substitutes nothing.
///
/// Useful for decoding when substitution is irrelevant.
pub const PASSTHROUGH: &EncodeSet = &new(b"");
