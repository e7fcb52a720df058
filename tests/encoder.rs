use bytes::BytesMut;
use mpack::prelude::*;
use mpack_strategy::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(v in arb_value()) {
        let enc = encode_full(&v).unwrap();

        let dec = decode_one(&enc, 0);

        if dec != Ok((v.clone(), enc.len())) {
            panic!("Tried encoding\n {}\n as \n{:x?}\n got \n{:?}\n", v, enc, dec)
        }
    }

    #[test]
    fn reencoding_is_stable(v in arb_value()) {
        let enc = encode_full(&v).unwrap();
        let dec = decode_full(&enc).unwrap();
        prop_assert_eq!(encode_full(&dec).unwrap(), enc);
    }

    #[test]
    fn prefixes_are_truncated(v in arb_value()) {
        let enc = encode_full(&v).unwrap();
        for cut in 0..enc.len() {
            match decode_one(&enc[..cut], 0) {
                Err(Error::TruncatedInput { .. }) => {}
                other => panic!("prefix of {} bytes of {:x?} gave {:?}", cut, enc, other),
            }
        }
    }

    #[test]
    fn offsets(prefix in prop::collection::vec(any::<u8>(), 0..16), v in arb_value()) {
        let mut buf = prefix.clone();
        encode(&v, &mut buf).unwrap();
        let (dec, consumed) = decode_one(&buf, prefix.len()).unwrap();
        prop_assert_eq!(dec, v);
        prop_assert_eq!(prefix.len() + consumed, buf.len());
    }

    #[test]
    fn back_to_back(vs in prop::collection::vec(arb_value(), 0..8)) {
        let mut buf = BytesMut::new();
        for v in &vs {
            encode(v, &mut buf).unwrap();
        }
        prop_assert_eq!(decode_many(&buf).unwrap(), vs);
    }

    #[test]
    fn garbage_never_panics(bs in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Ok((_, consumed)) = decode_one(&bs, 0) {
            prop_assert!(consumed <= bs.len());
        }
    }
}
