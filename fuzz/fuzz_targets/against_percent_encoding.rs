#![no_main]
use fluent_url::encoding::{decode, encode, set};
use libfuzzer_sys::fuzz_target;
use percent_encoding::{percent_decode, percent_encode, AsciiSet, CONTROLS};

// The component percent-encode set, spelled in `percent-encoding`'s
// vocabulary.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',');

fuzz_target!(|data: &[u8]| {
    let ours = encode(data, set::COMPONENT);
    let reference = percent_encode(data, COMPONENT).to_string();
    assert_eq!(*ours, *reference.as_bytes());

    let ours = decode(data, set::PASSTHROUGH);
    let reference = percent_decode(data).collect::<Vec<u8>>();
    assert_eq!(*ours, *reference);
});
