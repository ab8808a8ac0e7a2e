#![no_main]
use fluent_url::encoding::{decode, encode, set, PercentEncoded};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every set that escapes '%' must round-trip arbitrary bytes,
    // and both drainers must agree with the eager encoding.
    for set in [set::USERINFO, set::COMPONENT, set::FORM_ENCODED] {
        let encoded = encode(data, set);
        assert_eq!(*decode(&encoded, set), *data);

        let mut forward = Vec::new();
        PercentEncoded::new(data.iter().copied(), set)
            .write_buffered(|chunk| forward.extend_from_slice(chunk));
        assert_eq!(forward, *encoded);

        let mut chunks = Vec::new();
        PercentEncoded::new(data.iter().copied(), set)
            .write_buffered_from_back(|chunk| chunks.push(chunk.to_vec()));
        chunks.reverse();
        assert_eq!(chunks.concat(), *encoded);
    }

    // Decoding is infallible for any input and any set.
    let _ = decode(data, set::PASSTHROUGH);
    let _ = decode(data, set::FORM_ENCODED);
});
