//! Validation errors and the callback contract a parser reports them
//! through.
//!
//! Validation errors are data, not control flow: a parser emits them
//! into a [`ValidationErrorHandler`] as it runs and only a terminal one
//! makes it abandon the input. Three canonical handlers are provided:
//! [`IgnoreValidationErrors`], [`LastValidationError`], and
//! [`CollectedValidationErrors`].

use alloc::vec::Vec;
use core::fmt;

/// An error encountered while validating a URL string.
///
/// Mirrors the [validation errors] of the WHATWG URL Standard, plus a
/// few private-use codes, plus [`HostParserError`] wrapping errors from
/// the nested IP-address parsers.
///
/// Equality is componentwise: two errors are equal iff their codes are
/// equal and, for wrapping codes, the wrapped errors are too.
///
/// [validation errors]: https://url.spec.whatwg.org/#validation-error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The input begins or ends with a C0 control or U+0020 SPACE.
    UnexpectedC0ControlOrSpace,
    /// The input contains an ASCII tab or newline.
    UnexpectedAsciiTabOrNewline,
    /// The first scheme character is not an ASCII alpha.
    InvalidSchemeStart,
    /// A `file:` URL's scheme is not followed by `//`.
    FileSchemeMissingFollowingSolidus,
    /// The scheme contains a character that is not allowed.
    InvalidScheme,
    /// The input has no scheme and the base URL, if any, cannot be used
    /// as a base.
    MissingSchemeNonRelativeUrl,
    /// A relative URL does not begin with a slash where one is needed.
    RelativeUrlMissingBeginningSolidus,
    /// A special URL uses `\` in place of `/`.
    UnexpectedReverseSolidus,
    /// The scheme of a special URL is not followed by `//` before its
    /// authority.
    MissingSolidusBeforeAuthority,
    /// The authority contains `@`.
    UnexpectedCommercialAt,
    /// The input includes credentials but no host.
    UnexpectedCredentialsWithoutHost,
    /// The input includes a port but no host.
    UnexpectedPortWithoutHost,
    /// A URL with a special scheme has an empty host.
    EmptyHostSpecialScheme,
    /// The host could not be parsed.
    InvalidHost,
    /// The port is greater than 65535.
    PortOutOfRange,
    /// The port contains a non-digit character.
    PortInvalid,
    /// A relative `file:` URL starts with a Windows drive letter.
    UnexpectedWindowsDriveLetter,
    /// A `file:` URL's host is a Windows drive letter.
    UnexpectedWindowsDriveLetterHost,
    /// A `file:` URL has a host where none is expected.
    UnexpectedHostFileScheme,
    /// A `file:` URL's path contains an empty segment where none is
    /// expected.
    UnexpectedEmptyPathSegmentFileScheme,
    /// The input contains a code point that is not a URL code point.
    InvalidUrlCodePoint,
    /// A `%` is not followed by two hex digits.
    UnescapedPercentSign,
    /// An IPv6 address is missing its closing `]`.
    UnclosedIpv6Address,
    /// Converting the domain to ASCII failed.
    DomainToAsciiFailure,
    /// Converting the domain to ASCII produced an empty domain.
    DomainToAsciiEmptyDomainFailure,
    /// The host contains a forbidden host code point.
    HostForbiddenCodePoint,
    /// A base URL is required but none was given. Private use.
    BaseUrlRequired,
    /// The input is not valid UTF-8. Private use.
    InvalidUtf8,
    /// An error from a nested IP-address parser.
    HostParserError(HostParserError),
}

/// An error from one of the nested IP-address parsers, as wrapped into
/// [`ValidationError::HostParserError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostParserError {
    /// The IPv4 parser failed.
    Ipv4(Ipv4ParserError),
    /// The IPv6 parser failed.
    Ipv6(Ipv6ParserError),
}

/// Detailed cause of an IPv4 address parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Ipv4ParserError {
    /// A part of the address is empty.
    EmptyPart,
    /// The address has more than four parts.
    TooManyParts,
    /// A part is not numeric.
    NonNumericPart,
    /// A part uses hexadecimal or octal notation.
    NonDecimalPart,
    /// A part exceeds 255.
    OutOfRangePart,
}

/// Detailed cause of an IPv6 address parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Ipv6ParserError {
    /// The address begins with improper compression.
    InvalidCompression,
    /// The address has more than eight pieces.
    TooManyPieces,
    /// The address is compressed in more than one spot.
    MultipleCompression,
    /// A piece contains a character that is neither a hex digit nor
    /// `:`, or the address ends unexpectedly.
    InvalidCodePoint,
    /// An uncompressed address has fewer than eight pieces.
    TooFewPieces,
    /// An embedded IPv4 address leaves more than six IPv6 pieces.
    Ipv4TooManyPieces,
    /// An embedded IPv4 address part is malformed.
    Ipv4InvalidCodePoint,
    /// An embedded IPv4 address part exceeds 255.
    Ipv4OutOfRangePart,
    /// An embedded IPv4 address has too few parts.
    Ipv4TooFewParts,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ValidationError::*;
        let msg = match self {
            UnexpectedC0ControlOrSpace => "leading or trailing C0 control or space",
            UnexpectedAsciiTabOrNewline => "ASCII tab or newline in input",
            InvalidSchemeStart => "scheme does not start with an ASCII alpha",
            FileSchemeMissingFollowingSolidus => "file scheme not followed by \"//\"",
            InvalidScheme => "invalid character in scheme",
            MissingSchemeNonRelativeUrl => "missing scheme with no usable base URL",
            RelativeUrlMissingBeginningSolidus => "relative URL missing leading slash",
            UnexpectedReverseSolidus => "unexpected reverse solidus",
            MissingSolidusBeforeAuthority => "expected \"//\" before authority",
            UnexpectedCommercialAt => "unexpected \"@\" in authority",
            UnexpectedCredentialsWithoutHost => "credentials without host",
            UnexpectedPortWithoutHost => "port without host",
            EmptyHostSpecialScheme => "empty host in URL with special scheme",
            InvalidHost => "invalid host",
            PortOutOfRange => "port out of range",
            PortInvalid => "invalid port",
            UnexpectedWindowsDriveLetter => "unexpected Windows drive letter",
            UnexpectedWindowsDriveLetterHost => "Windows drive letter used as host",
            UnexpectedHostFileScheme => "unexpected host in file URL",
            UnexpectedEmptyPathSegmentFileScheme => "empty path segment in file URL",
            InvalidUrlCodePoint => "code point is not a URL code point",
            UnescapedPercentSign => "\"%\" not followed by two hex digits",
            UnclosedIpv6Address => "IPv6 address missing closing \"]\"",
            DomainToAsciiFailure => "domain to ASCII conversion failed",
            DomainToAsciiEmptyDomainFailure => "domain to ASCII produced an empty domain",
            HostForbiddenCodePoint => "forbidden host code point",
            BaseUrlRequired => "a base URL is required",
            InvalidUtf8 => "input is not valid UTF-8",
            HostParserError(e) => return e.fmt(f),
        };
        f.write_str(msg)
    }
}

impl fmt::Display for HostParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostParserError::Ipv4(e) => write!(f, "invalid IPv4 address: {e}"),
            HostParserError::Ipv6(e) => write!(f, "invalid IPv6 address: {e}"),
        }
    }
}

impl fmt::Display for Ipv4ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Ipv4ParserError::*;
        f.write_str(match self {
            EmptyPart => "empty part",
            TooManyParts => "too many parts",
            NonNumericPart => "non-numeric part",
            NonDecimalPart => "non-decimal part",
            OutOfRangePart => "part out of range",
        })
    }
}

impl fmt::Display for Ipv6ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Ipv6ParserError::*;
        f.write_str(match self {
            InvalidCompression => "invalid compression",
            TooManyPieces => "too many pieces",
            MultipleCompression => "multiple compression",
            InvalidCodePoint => "invalid code point",
            TooFewPieces => "too few pieces",
            Ipv4TooManyPieces => "embedded IPv4 leaves too many pieces",
            Ipv4InvalidCodePoint => "invalid code point in embedded IPv4",
            Ipv4OutOfRangePart => "embedded IPv4 part out of range",
            Ipv4TooFewParts => "embedded IPv4 has too few parts",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

#[cfg(feature = "std")]
impl std::error::Error for HostParserError {}

#[cfg(feature = "std")]
impl std::error::Error for Ipv4ParserError {}

#[cfg(feature = "std")]
impl std::error::Error for Ipv6ParserError {}

impl From<Ipv4ParserError> for ValidationError {
    fn from(e: Ipv4ParserError) -> ValidationError {
        ValidationError::HostParserError(HostParserError::Ipv4(e))
    }
}

impl From<Ipv6ParserError> for ValidationError {
    fn from(e: Ipv6ParserError) -> ValidationError {
        ValidationError::HostParserError(HostParserError::Ipv6(e))
    }
}

/// The callback contract between a parser and its caller.
///
/// The parser reports through [`validation_error`]; errors raised by
/// the nested IP-address parsers arrive through the lifted
/// [`ipv4_parser_error`] and [`ipv6_parser_error`] forms, which wrap
/// them into [`ValidationError::HostParserError`] by default.
///
/// [`validation_error`]: Self::validation_error
/// [`ipv4_parser_error`]: Self::ipv4_parser_error
/// [`ipv6_parser_error`]: Self::ipv6_parser_error
pub trait ValidationErrorHandler {
    /// Reports one validation error.
    fn validation_error(&mut self, error: ValidationError);

    /// Reports an error from the nested IPv4 parser.
    fn ipv4_parser_error(&mut self, error: Ipv4ParserError) {
        self.validation_error(error.into());
    }

    /// Reports an error from the nested IPv6 parser.
    fn ipv6_parser_error(&mut self, error: Ipv6ParserError) {
        self.validation_error(error.into());
    }
}

/// A handler that discards all validation errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreValidationErrors;

impl ValidationErrorHandler for IgnoreValidationErrors {
    fn validation_error(&mut self, _: ValidationError) {}
}

/// A handler that retains only the most recent validation error.
#[derive(Clone, Copy, Debug, Default)]
pub struct LastValidationError {
    /// The most recently reported error, if any.
    pub error: Option<ValidationError>,
}

impl ValidationErrorHandler for LastValidationError {
    fn validation_error(&mut self, error: ValidationError) {
        self.error = Some(error);
    }
}

/// A handler that appends every validation error into an ordered list.
#[derive(Clone, Debug, Default)]
pub struct CollectedValidationErrors {
    /// The reported errors, oldest first.
    pub errors: Vec<ValidationError>,
}

impl CollectedValidationErrors {
    /// Creates an empty handler with room for a typical parse.
    #[must_use]
    pub fn new() -> CollectedValidationErrors {
        CollectedValidationErrors {
            errors: Vec::with_capacity(8),
        }
    }
}

impl ValidationErrorHandler for CollectedValidationErrors {
    fn validation_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}
