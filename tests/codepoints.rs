use fluent_url::codepoints::{
    has_non_url_code_points, is_forbidden_host_code_point, is_url_code_point,
};

#[test]
fn ascii_url_code_points() {
    for x in 0u8..=0x7f {
        let expected = x.is_ascii_alphanumeric() || b"!$&'()*+,-./:;=?@_~".contains(&x);
        assert_eq!(is_url_code_point(x as char), expected, "byte {x:#04x}");
    }
}

#[test]
fn latin1_boundary() {
    assert!(!is_url_code_point('\u{7f}'));
    assert!(!is_url_code_point('\u{80}'));
    assert!(!is_url_code_point('\u{9f}'));
    assert!(is_url_code_point('\u{a0}'));
    assert!(is_url_code_point('é'));
}

#[test]
fn noncharacters() {
    assert!(is_url_code_point('\u{fdcf}'));
    for x in 0xfdd0..=0xfdef {
        assert!(!is_url_code_point(char::from_u32(x).unwrap()), "U+{x:04X}");
    }
    assert!(is_url_code_point('\u{fdf0}'));

    for plane in 0..=0x10u32 {
        let fffe = plane << 16 | 0xfffe;
        let ffff = plane << 16 | 0xffff;
        assert!(!is_url_code_point(char::from_u32(fffe).unwrap()), "U+{fffe:04X}");
        // U+10FFFF is also past the upper bound; every other plane's
        // U+nFFFF is excluded as a noncharacter.
        assert!(!is_url_code_point(char::from_u32(ffff).unwrap()), "U+{ffff:04X}");
        if plane < 0x10 {
            assert!(is_url_code_point(char::from_u32(fffe - 1).unwrap()));
        }
    }
    assert!(is_url_code_point('\u{10fffd}'));
}

#[test]
fn forbidden_host_code_points() {
    let forbidden = b"\0\t\n\r #%/:<>?@[\\]^|";
    for x in 0u8..=0x7f {
        assert_eq!(
            is_forbidden_host_code_point(x),
            forbidden.contains(&x),
            "byte {x:#04x}"
        );
    }
    for x in 0x80u8..=0xff {
        assert!(!is_forbidden_host_code_point(x));
    }
}

#[test]
fn scan_ascii_and_latin1() {
    assert!(!has_non_url_code_points(b""));
    assert!(!has_non_url_code_points(b"https://example.com/?q=1"));
    assert!(has_non_url_code_points(b"a b"));
    assert!(has_non_url_code_points(b"a^b"));

    assert!(has_non_url_code_points("alpha\u{0080}123".as_bytes()));
    assert!(!has_non_url_code_points("alpha\u{00a0}123".as_bytes()));
}

#[test]
fn scan_astral_planes() {
    assert!(!has_non_url_code_points("\u{270c}\u{fe0f}".as_bytes()));
    assert!(!has_non_url_code_points("\u{10000}\u{10fffd}".as_bytes()));
    assert!(has_non_url_code_points("\u{fdd0}".as_bytes()));
    assert!(has_non_url_code_points("a\u{1fffe}b".as_bytes()));
}

#[test]
fn scan_lone_surrogates() {
    // Three-byte encodings of U+D800..U+DFFF decode here and fail the
    // classification.
    for second in [0xa0, 0xaf, 0xbf] {
        assert!(has_non_url_code_points(&[0xed, second, 0x80]));
        assert!(has_non_url_code_points(&[0xed, second, 0xbf]));
    }
    // U+D000..=U+D7FF are ordinary code points.
    assert!(!has_non_url_code_points(&[0xed, 0x9f, 0xbf]));
}

#[test]
fn scan_malformed_utf8() {
    assert!(has_non_url_code_points(&[0xff]));
    assert!(has_non_url_code_points(&[0x80]));
    assert!(has_non_url_code_points(&[0xc3]));
    assert!(has_non_url_code_points(&[0xe2, 0x9c]));
    assert!(has_non_url_code_points(&[0xe2, 0x9c, 0x20]));
    assert!(has_non_url_code_points(&[0xf0, 0x9f, 0x98]));
    // Overlong and out-of-range encodings.
    assert!(has_non_url_code_points(&[0xc0, 0xaf]));
    assert!(has_non_url_code_points(&[0xe0, 0x80, 0xaf]));
    assert!(has_non_url_code_points(&[0xf4, 0x90, 0x80, 0x80]));
}
