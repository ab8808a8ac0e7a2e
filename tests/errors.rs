use fluent_url::error::{
    CollectedValidationErrors, HostParserError, IgnoreValidationErrors, Ipv4ParserError,
    Ipv6ParserError, LastValidationError, ValidationError, ValidationErrorHandler,
};

#[test]
fn ignore_discards() {
    let mut handler = IgnoreValidationErrors;
    handler.validation_error(ValidationError::InvalidScheme);
    handler.ipv6_parser_error(Ipv6ParserError::TooManyPieces);
}

#[test]
fn last_only_keeps_most_recent() {
    let mut handler = LastValidationError::default();
    assert_eq!(handler.error, None);
    handler.validation_error(ValidationError::UnexpectedAsciiTabOrNewline);
    handler.validation_error(ValidationError::PortOutOfRange);
    assert_eq!(handler.error, Some(ValidationError::PortOutOfRange));
}

#[test]
fn collect_all_preserves_order() {
    let mut handler = CollectedValidationErrors::new();
    handler.validation_error(ValidationError::UnexpectedC0ControlOrSpace);
    handler.ipv4_parser_error(Ipv4ParserError::OutOfRangePart);
    handler.validation_error(ValidationError::InvalidHost);
    assert_eq!(
        handler.errors,
        [
            ValidationError::UnexpectedC0ControlOrSpace,
            ValidationError::HostParserError(HostParserError::Ipv4(
                Ipv4ParserError::OutOfRangePart
            )),
            ValidationError::InvalidHost,
        ]
    );
}

#[test]
fn lifted_forms_wrap() {
    let mut handler = LastValidationError::default();
    handler.ipv6_parser_error(Ipv6ParserError::MultipleCompression);
    assert_eq!(
        handler.error,
        Some(ValidationError::HostParserError(HostParserError::Ipv6(
            Ipv6ParserError::MultipleCompression
        )))
    );
}

#[test]
fn equality_is_componentwise() {
    let a = ValidationError::from(Ipv4ParserError::EmptyPart);
    let b = ValidationError::from(Ipv4ParserError::EmptyPart);
    let c = ValidationError::from(Ipv4ParserError::TooManyParts);
    let d = ValidationError::from(Ipv6ParserError::TooFewPieces);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
    assert_ne!(a, ValidationError::InvalidHost);

    assert_eq!(ValidationError::PortInvalid, ValidationError::PortInvalid);
    assert_ne!(ValidationError::PortInvalid, ValidationError::PortOutOfRange);
}

#[test]
fn displays_are_terse() {
    let samples = [
        ValidationError::UnexpectedC0ControlOrSpace,
        ValidationError::FileSchemeMissingFollowingSolidus,
        ValidationError::DomainToAsciiEmptyDomainFailure,
        ValidationError::BaseUrlRequired,
        ValidationError::InvalidUtf8,
        ValidationError::from(Ipv4ParserError::NonDecimalPart),
        ValidationError::from(Ipv6ParserError::Ipv4TooFewParts),
    ];
    for error in samples {
        let message = error.to_string();
        assert!(!message.is_empty());
        assert!(!message.ends_with('.'));
    }
}
