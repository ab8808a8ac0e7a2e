use std::borrow::Cow;

use fluent_url::encoding::{decode, encode, set, set::EncodeSet, EncodedByte, PercentEncoded};

fn flatten(source: &[u8], set: &EncodeSet) -> Vec<u8> {
    let mut out = Vec::new();
    for group in PercentEncoded::new(source.iter().copied(), set) {
        let mut buf = [0; 3];
        let n = group.expand_into(&mut buf);
        out.extend_from_slice(&buf[..n]);
    }
    out
}

#[test]
fn component_set() {
    assert_eq!(&*encode(b"hello, world", set::COMPONENT), b"hello%2C%20world");
    assert_eq!(&*encode(b"", set::COMPONENT), b"");
    assert_eq!(&*encode(b"safe", set::COMPONENT), b"safe");
    assert!(matches!(encode(b"safe", set::COMPONENT), Cow::Borrowed(_)));
}

#[test]
fn form_encoded_set() {
    assert_eq!(
        &*encode(b"Swift is better than C++", set::FORM_ENCODED),
        b"Swift+is+better+than+C%2B%2B"
    );
    assert_eq!(
        &*decode(b"Swift+is+better+than+C%2B%2B", set::FORM_ENCODED),
        b"Swift is better than C++"
    );
    assert_eq!(&*decode(b"a+b", set::PASSTHROUGH), b"a+b");
}

#[test]
fn non_ascii_always_escapes() {
    // U+270C U+FE0F
    let source = "\u{270c}\u{fe0f}".as_bytes();
    assert_eq!(source, [0xe2, 0x9c, 0x8c, 0xef, 0xb8, 0x8f]);
    for set in [set::C0_CONTROL, set::FRAGMENT, set::COMPONENT, set::FORM_ENCODED] {
        assert_eq!(&*encode(source, set), b"%E2%9C%8C%EF%B8%8F");
    }
}

#[test]
fn round_trip() {
    // Any set that escapes '%' round-trips any byte sequence.
    let all_bytes: Vec<u8> = (0..=0xff).collect();
    for set in [set::COMPONENT, set::FORM_ENCODED] {
        assert!(set.should_escape(b'%'));
        assert_eq!(*decode(&encode(&all_bytes, set), set), *all_bytes);
    }

    let source = b"%40 Polyester";
    let encoded = encode(source, set::COMPONENT);
    assert_eq!(&*encoded, b"%2540%20Polyester");
    assert_eq!(*decode(&encoded, set::COMPONENT), *source);
}

#[test]
fn ascii_sweep() {
    fn c0(x: u8) -> bool {
        x <= 0x1f || x == 0x7f
    }
    fn fragment(x: u8) -> bool {
        c0(x) || b" \"<>`".contains(&x)
    }
    fn query(x: u8) -> bool {
        c0(x) || b" \"#<>".contains(&x)
    }
    fn special_query(x: u8) -> bool {
        query(x) || x == b'\''
    }
    fn path(x: u8) -> bool {
        fragment(x) || b"?`{}".contains(&x)
    }
    fn userinfo(x: u8) -> bool {
        path(x) || b"/:;=@[\\]^|".contains(&x)
    }
    fn component(x: u8) -> bool {
        userinfo(x) || b"$%&+,".contains(&x)
    }
    fn form(x: u8) -> bool {
        !(x.is_ascii_alphanumeric() || b"*-._ ".contains(&x))
    }

    let table: [(&EncodeSet, fn(u8) -> bool); 8] = [
        (set::C0_CONTROL, c0),
        (set::FRAGMENT, fragment),
        (set::QUERY, query),
        (set::SPECIAL_QUERY, special_query),
        (set::PATH, path),
        (set::USERINFO, userinfo),
        (set::COMPONENT, component),
        (set::FORM_ENCODED, form),
    ];
    for (set, expected) in table {
        for x in 0..=0x7f {
            assert_eq!(set.should_escape(x), expected(x), "byte {x:#04x}");
        }
        for x in 0x80..=0xff {
            assert!(set.should_escape(x));
        }
    }
    for x in 0..=0x7f {
        assert!(!set::PASSTHROUGH.should_escape(x));
    }
}

#[test]
fn catalogue_inheritance() {
    assert!(set::C0_CONTROL.is_subset(set::FRAGMENT));
    assert!(set::C0_CONTROL.is_subset(set::QUERY));
    assert!(set::QUERY.is_subset(set::SPECIAL_QUERY));
    assert!(set::FRAGMENT.is_subset(set::PATH));
    assert!(set::PATH.is_subset(set::USERINFO));
    assert!(set::USERINFO.is_subset(set::COMPONENT));
    assert!(!set::COMPONENT.is_subset(set::PATH));
}

#[test]
fn substitution_inverts() {
    for set in [set::COMPONENT, set::FORM_ENCODED, set::PASSTHROUGH] {
        for x in 0..=0x7f {
            if let Some(sub) = set.substitute(x) {
                assert_eq!(set.unsubstitute(sub), Some(x));
            }
        }
    }
    assert_eq!(set::FORM_ENCODED.substitute(b' '), Some(b'+'));
    assert_eq!(set::FORM_ENCODED.unsubstitute(b'+'), Some(b' '));
    assert_eq!(set::COMPONENT.substitute(b' '), None);
}

#[test]
fn groups() {
    let groups: Vec<_> =
        PercentEncoded::new(b"a +\xc3".iter().copied(), set::FORM_ENCODED).collect();
    assert_eq!(
        groups,
        [
            EncodedByte::Unchanged(b'a'),
            EncodedByte::Substituted(b'+'),
            EncodedByte::Escaped(b'+'),
            EncodedByte::Escaped(0xc3),
        ]
    );
    assert_eq!(groups[0].encoded_len(), 1);
    assert_eq!(groups[3].encoded_len(), 3);

    // One group per source byte, from either end.
    let encoded = PercentEncoded::new(b"a%b".iter().copied(), set::COMPONENT);
    assert_eq!(encoded.len(), 3);
    let forward: Vec<_> = encoded.clone().collect();
    let mut backward: Vec<_> = encoded.rev().collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn forward_drain() {
    let source = b"a url string with spaces & percent % signs, 40 bytes plus";
    let expected = flatten(source, set::COMPONENT);

    let mut chunks = Vec::new();
    let modified = PercentEncoded::new(source.iter().copied(), set::COMPONENT)
        .write_buffered(|chunk| chunks.push(chunk.to_vec()));
    assert!(modified);
    assert!(chunks.iter().all(|chunk| chunk.len() <= 15));
    assert_eq!(chunks.concat(), expected);
}

#[test]
fn reverse_drain() {
    let source = b"a url string with spaces & percent % signs, 40 bytes plus";
    let expected = flatten(source, set::COMPONENT);

    let mut chunks = Vec::new();
    let modified = PercentEncoded::new(source.iter().copied(), set::COMPONENT)
        .write_buffered_from_back(|chunk| chunks.push(chunk.to_vec()));
    assert!(modified);
    assert!(chunks.iter().all(|chunk| chunk.len() <= 15));
    chunks.reverse();
    assert_eq!(chunks.concat(), expected);
}

#[test]
fn drain_reports_modification() {
    let mut out = Vec::new();
    let modified = PercentEncoded::new(b"unchanged".iter().copied(), set::COMPONENT)
        .write_buffered(|chunk| out.extend_from_slice(chunk));
    assert!(!modified);
    assert_eq!(out, b"unchanged");

    // Substitution alone counts as modification.
    let modified = PercentEncoded::new(b"a b".iter().copied(), set::FORM_ENCODED)
        .write_buffered(|_| {});
    assert!(modified);

    // A short source drains in a single flush.
    let mut calls = 0;
    PercentEncoded::new(b"ab cd".iter().copied(), set::COMPONENT).write_buffered(|_| calls += 1);
    assert_eq!(calls, 1);

    let modified =
        PercentEncoded::new(b"same".iter().copied(), set::COMPONENT).write_buffered_from_back(|_| {});
    assert!(!modified);
}

#[test]
fn decode_malformed_escapes() {
    assert_eq!(&*decode(b"%", set::PASSTHROUGH), b"%");
    assert_eq!(&*decode(b"%2", set::PASSTHROUGH), b"%2");
    assert_eq!(&*decode(b"%zz", set::PASSTHROUGH), b"%zz");
    assert_eq!(&*decode(b"100%", set::PASSTHROUGH), b"100%");
    // The replayed byte is itself the start of a valid escape.
    assert_eq!(&*decode(b"%%41", set::PASSTHROUGH), b"%A");
    assert_eq!(&*decode(b"%2%31", set::PASSTHROUGH), b"%21");
    // Lower-case hex decodes too.
    assert_eq!(&*decode(b"%2b", set::PASSTHROUGH), b"+");
}

#[test]
fn decode_unsubstitutes_bare_percent() {
    // A set whose substitute target is '%' routes the fallback through
    // unsubstitution.
    const TILDE_FOR_PERCENT: &EncodeSet =
        &EncodeSet::new(b"").with_substitutions(&[(b'~', b'%')]);
    assert_eq!(&*decode(b"%x", TILDE_FOR_PERCENT), b"~x");
    assert_eq!(&*decode(b"%41", TILDE_FOR_PERCENT), b"A");
}

#[test]
fn decode_borrows_when_unchanged() {
    assert!(matches!(decode(b"plain", set::PASSTHROUGH), Cow::Borrowed(_)));
    assert!(matches!(decode(b"a+b", set::PASSTHROUGH), Cow::Borrowed(_)));
    assert!(matches!(decode(b"a+b", set::FORM_ENCODED), Cow::Owned(_)));
    assert!(matches!(decode(b"a%41", set::PASSTHROUGH), Cow::Owned(_)));
}

#[test]
fn decode_passes_non_ascii_through() {
    assert_eq!(&*decode(b"\xe2\x9c\x8c", set::FORM_ENCODED), b"\xe2\x9c\x8c");
}
