//! The structure header: per-component lengths and derived offsets.

use core::fmt;
use core::ops::Range;

#[allow(unreachable_pub)]
mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for usize {}
}

/// Integer type backing the length fields of a [`UrlStructure`].
///
/// Sealed; implemented for `u8` (compact headers, total length up to
/// 255) and `usize` (wide headers).
pub trait StructureInt: Copy + Eq + fmt::Debug + Default + private::Sealed {
    /// Widens to `usize`.
    fn to_usize(self) -> usize;

    /// Narrows from `usize`, returning `None` when the value does not
    /// fit.
    fn from_usize(value: usize) -> Option<Self>;
}

impl StructureInt for u8 {
    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_usize(value: usize) -> Option<u8> {
        u8::try_from(value).ok()
    }
}

impl StructureInt for usize {
    #[inline]
    fn to_usize(self) -> usize {
        self
    }

    #[inline]
    fn from_usize(value: usize) -> Option<usize> {
        Some(value)
    }
}

/// The two-code-unit marker inserted after the scheme.
///
/// `Authority` marks `//` introducing an authority; `Path` marks `/.`
/// inserted to disambiguate a path beginning with `//` when there is
/// no authority to absorb it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sigil {
    /// `//`
    Authority,
    /// `/.`
    Path,
}

impl Sigil {
    /// Length of a present sigil in code units.
    pub(crate) const LEN: usize = 2;

    /// Returns the sigil's code units.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8; 2] {
        match self {
            Sigil::Authority => b"//",
            Sigil::Path => b"/.",
        }
    }
}

/// Classification of a URL's scheme, driving [special-scheme] behavior.
///
/// [special-scheme]: https://url.spec.whatwg.org/#special-scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SchemeKind {
    /// `http`
    Http,
    /// `https`
    Https,
    /// `ws`
    Ws,
    /// `wss`
    Wss,
    /// `ftp`
    Ftp,
    /// `file`
    File,
    /// Any other scheme.
    #[default]
    Other,
}

impl SchemeKind {
    /// Classifies a scheme name, given without its trailing `:`,
    /// ASCII case-insensitively.
    #[must_use]
    pub fn parse(scheme: &[u8]) -> SchemeKind {
        match scheme.first().map(u8::to_ascii_lowercase) {
            Some(b'h') if scheme.eq_ignore_ascii_case(b"http") => SchemeKind::Http,
            Some(b'h') if scheme.eq_ignore_ascii_case(b"https") => SchemeKind::Https,
            Some(b'w') if scheme.eq_ignore_ascii_case(b"ws") => SchemeKind::Ws,
            Some(b'w') if scheme.eq_ignore_ascii_case(b"wss") => SchemeKind::Wss,
            Some(b'f') if scheme.eq_ignore_ascii_case(b"ftp") => SchemeKind::Ftp,
            Some(b'f') if scheme.eq_ignore_ascii_case(b"file") => SchemeKind::File,
            _ => SchemeKind::Other,
        }
    }

    /// Checks whether the scheme is a [special scheme].
    ///
    /// [special scheme]: https://url.spec.whatwg.org/#special-scheme
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, SchemeKind::Other)
    }

    /// Returns the scheme's default port, if it has one.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            SchemeKind::Http | SchemeKind::Ws => Some(80),
            SchemeKind::Https | SchemeKind::Wss => Some(443),
            SchemeKind::Ftp => Some(21),
            SchemeKind::File | SchemeKind::Other => None,
        }
    }
}

/// A URL component, in serialization order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    /// The scheme, including its trailing `:`.
    Scheme,
    /// The username.
    Username,
    /// The password, including its leading `:`.
    Password,
    /// The hostname.
    Hostname,
    /// The port, including its leading `:`.
    Port,
    /// The path.
    Path,
    /// The query, including its leading `?`.
    Query,
    /// The fragment, including its leading `#`.
    Fragment,
}

/// The lengths of the four authority subcomponents, as yielded by
/// [`UrlStorage::authority_bytes`](super::UrlStorage::authority_bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthorityLengths {
    /// Length of the username.
    pub username_length: usize,
    /// Length of the password, including its leading `:`.
    pub password_length: usize,
    /// Length of the hostname.
    pub hostname_length: usize,
    /// Length of the port, including its leading `:`.
    pub port_length: usize,
}

/// The normalized layout descriptor of a serialized URL.
///
/// Holds every component's length; offsets are derived. A length of 0
/// means the component is absent (no separator is stored either),
/// with one exception: the hostname may be zero-length yet present
/// when the [`Authority`](Sigil::Authority) sigil is set (`file:///p`).
///
/// Lengths include the component's leading separator where one exists:
/// the password's and port's `:`, the query's `?`, and the fragment's
/// `#`. The scheme includes its trailing `:`. The serialized URL is
/// exactly the concatenation of all present components in field order,
/// with the sigil between the scheme and what follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UrlStructure<I = usize> {
    /// Length of the scheme, including its trailing `:`.
    pub scheme_length: I,
    /// Length of the username.
    pub username_length: I,
    /// Length of the password, including its leading `:`.
    pub password_length: I,
    /// Length of the hostname.
    pub hostname_length: I,
    /// Length of the port, including its leading `:`.
    pub port_length: I,
    /// Length of the path.
    pub path_length: I,
    /// Length of the query, including its leading `?`.
    pub query_length: I,
    /// Length of the fragment, including its leading `#`.
    pub fragment_length: I,
    /// The marker following the scheme, if any.
    pub sigil: Option<Sigil>,
    /// Classification of the scheme.
    pub scheme_kind: SchemeKind,
    /// Whether the path is opaque (`mailto:`, `javascript:`) and not
    /// subject to hierarchical relative resolution.
    pub cannot_be_a_base: bool,
}

impl<I: StructureInt> UrlStructure<I> {
    /// Returns the length of the given component in code units.
    #[must_use]
    pub fn length(&self, component: Component) -> usize {
        match component {
            Component::Scheme => self.scheme_length,
            Component::Username => self.username_length,
            Component::Password => self.password_length,
            Component::Hostname => self.hostname_length,
            Component::Port => self.port_length,
            Component::Path => self.path_length,
            Component::Query => self.query_length,
            Component::Fragment => self.fragment_length,
        }
        .to_usize()
    }

    /// Sets the length of the given component.
    ///
    /// # Panics
    ///
    /// Panics if the value does not fit the header's integer type.
    pub fn set_length(&mut self, component: Component, length: usize) {
        let length = I::from_usize(length).expect("component length overflows header");
        *match component {
            Component::Scheme => &mut self.scheme_length,
            Component::Username => &mut self.username_length,
            Component::Password => &mut self.password_length,
            Component::Hostname => &mut self.hostname_length,
            Component::Port => &mut self.port_length,
            Component::Path => &mut self.path_length,
            Component::Query => &mut self.query_length,
            Component::Fragment => &mut self.fragment_length,
        } = length;
    }

    /// Offset of the scheme. Always 0.
    #[inline]
    #[must_use]
    pub fn scheme_start(&self) -> usize {
        0
    }

    /// Offset one past the scheme's trailing `:`.
    #[inline]
    #[must_use]
    pub fn scheme_end(&self) -> usize {
        self.scheme_length.to_usize()
    }

    /// Offset just past the sigil, or [`scheme_end`](Self::scheme_end)
    /// when there is none.
    #[must_use]
    pub fn after_sigil(&self) -> usize {
        self.scheme_end() + if self.sigil.is_some() { Sigil::LEN } else { 0 }
    }

    /// Offset of the username.
    #[must_use]
    pub fn username_start(&self) -> usize {
        self.after_sigil()
    }

    /// Offset of the password.
    #[must_use]
    pub fn password_start(&self) -> usize {
        self.username_start() + self.username_length.to_usize()
    }

    /// Whether a `@` separates the credentials from the hostname.
    #[must_use]
    pub fn has_credential_separator(&self) -> bool {
        self.username_length.to_usize() > 0 || self.password_length.to_usize() > 0
    }

    /// Offset of the hostname.
    #[must_use]
    pub fn hostname_start(&self) -> usize {
        self.password_start()
            + self.password_length.to_usize()
            + usize::from(self.has_credential_separator())
    }

    /// Offset of the port.
    #[must_use]
    pub fn port_start(&self) -> usize {
        self.hostname_start() + self.hostname_length.to_usize()
    }

    /// Offset of the path.
    #[must_use]
    pub fn path_start(&self) -> usize {
        if self.sigil == Some(Sigil::Authority) {
            self.port_start() + self.port_length.to_usize()
        } else {
            self.after_sigil()
        }
    }

    /// Offset of the query.
    #[must_use]
    pub fn query_start(&self) -> usize {
        self.path_start() + self.path_length.to_usize()
    }

    /// Offset of the fragment.
    #[must_use]
    pub fn fragment_start(&self) -> usize {
        self.query_start() + self.query_length.to_usize()
    }

    /// Total length of the serialized URL in code units.
    #[must_use]
    pub fn url_length(&self) -> usize {
        self.fragment_start() + self.fragment_length.to_usize()
    }

    /// Offset at which the given component is, or would be, stored.
    #[must_use]
    pub fn start(&self, component: Component) -> usize {
        match component {
            Component::Scheme => self.scheme_start(),
            Component::Username => self.username_start(),
            Component::Password => self.password_start(),
            Component::Hostname => self.hostname_start(),
            Component::Port => self.port_start(),
            Component::Path => self.path_start(),
            Component::Query => self.query_start(),
            Component::Fragment => self.fragment_start(),
        }
    }

    /// Byte range of the given component, or `None` when it is absent.
    ///
    /// The hostname is present despite a zero length when the
    /// [`Authority`](Sigil::Authority) sigil is set.
    #[must_use]
    pub fn range(&self, component: Component) -> Option<Range<usize>> {
        let present = match component {
            Component::Scheme => true,
            Component::Hostname => {
                self.hostname_length.to_usize() > 0 || self.sigil == Some(Sigil::Authority)
            }
            _ => self.length(component) > 0,
        };
        let start = self.start(component);
        present.then(|| start..start + self.length(component))
    }

    /// Byte range of the component, empty at its insertion point when
    /// the component is absent.
    #[must_use]
    pub fn replacement_range(&self, component: Component) -> Range<usize> {
        let start = self.start(component);
        start..start + self.length(component)
    }

    /// Byte range of the whole authority (username through port), or
    /// `None` when the URL has none.
    #[must_use]
    pub fn authority_range(&self) -> Option<Range<usize>> {
        (self.sigil == Some(Sigil::Authority)).then(|| self.username_start()..self.path_start())
    }

    /// The lengths of the four authority subcomponents.
    #[must_use]
    pub fn authority_lengths(&self) -> AuthorityLengths {
        AuthorityLengths {
            username_length: self.username_length.to_usize(),
            password_length: self.password_length.to_usize(),
            hostname_length: self.hostname_length.to_usize(),
            port_length: self.port_length.to_usize(),
        }
    }

    /// Whether this URL cannot carry credentials or a port: `file:`
    /// URLs, cannot-be-a-base URLs, and URLs without a hostname.
    #[must_use]
    pub fn cannot_have_credentials_or_port(&self) -> bool {
        self.scheme_kind == SchemeKind::File
            || self.cannot_be_a_base
            || self.hostname_length.to_usize() == 0
    }

    /// Converts the length fields to another header integer type.
    ///
    /// # Panics
    ///
    /// Panics if a length does not fit the target type.
    pub(crate) fn convert<J: StructureInt>(&self) -> UrlStructure<J> {
        fn narrow<J: StructureInt>(value: usize) -> J {
            J::from_usize(value).expect("component length overflows header")
        }
        UrlStructure {
            scheme_length: narrow(self.scheme_length.to_usize()),
            username_length: narrow(self.username_length.to_usize()),
            password_length: narrow(self.password_length.to_usize()),
            hostname_length: narrow(self.hostname_length.to_usize()),
            port_length: narrow(self.port_length.to_usize()),
            path_length: narrow(self.path_length.to_usize()),
            query_length: narrow(self.query_length.to_usize()),
            fragment_length: narrow(self.fragment_length.to_usize()),
            sigil: self.sigil,
            scheme_kind: self.scheme_kind,
            cannot_be_a_base: self.cannot_be_a_base,
        }
    }

    /// Widens the length fields to `usize`.
    #[must_use]
    pub fn to_wide(&self) -> UrlStructure<usize> {
        self.convert()
    }

    /// Checks the arithmetic invariants of the layout.
    pub(crate) fn invariants_hold(&self) -> bool {
        if self.scheme_length.to_usize() < 2 {
            return false;
        }
        let has_credentials_or_port =
            self.has_credential_separator() || self.port_length.to_usize() > 0;
        if has_credentials_or_port && self.sigil != Some(Sigil::Authority) {
            return false;
        }
        if self.password_length.to_usize() == 1 || self.port_length.to_usize() == 1 {
            return false;
        }
        if self.sigil == Some(Sigil::Path) && self.path_length.to_usize() < 2 {
            return false;
        }
        if self.cannot_have_credentials_or_port() && has_credentials_or_port {
            return false;
        }
        if self.sigil != Some(Sigil::Authority) && self.hostname_length.to_usize() > 0 {
            return false;
        }
        true
    }
}
