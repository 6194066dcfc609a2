//! Property tests for key generation and the codec.
//!
//! proptest generates seeds and letter streams; each property is checked
//! against both alphabets where it applies.

use std::collections::HashSet;

use porta_cipher::{
    decode, decode_raw, encode, normalize, Alphabet, CipherKey, Code, Framing, KeyMatrixBuilder,
    NormalizePolicy, ReservedCodes,
};
use proptest::prelude::*;

fn build(alphabet: Alphabet, seed: &str) -> CipherKey {
    KeyMatrixBuilder::new(alphabet, ReservedCodes::default())
        .build_seeded(Some(seed))
        .unwrap()
}

fn framing() -> impl Strategy<Value = Framing> {
    prop_oneof![Just(Framing::Space), Just(Framing::Concat)]
}

/// Even-length streams over the 26-letter alphabet.
fn full_letters() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z]{2}", 0..24).prop_map(|pairs| pairs.concat())
}

/// Even-length streams over the 20-letter alphabet.
fn reduced_letters() -> impl Strategy<Value = String> {
    prop::collection::vec("[ABCDEFGHILMNOPQRSTVY]{2}", 0..24).prop_map(|pairs| pairs.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_same_key(seed in "[a-zA-Z0-9 ]{1,16}") {
        prop_assert_eq!(build(Alphabet::full(), &seed), build(Alphabet::full(), &seed));
        prop_assert_eq!(build(Alphabet::reduced(), &seed), build(Alphabet::reduced(), &seed));
    }

    #[test]
    fn matrix_is_injective_and_avoids_reserved(seed in "\\PC{1,16}") {
        for alphabet in [Alphabet::full(), Alphabet::reduced()] {
            let key = build(alphabet, &seed);
            let cells = key.cells();
            prop_assert_eq!(cells.len(), key.size() * key.size());
            let distinct: HashSet<Code> = cells.iter().copied().collect();
            prop_assert_eq!(distinct.len(), cells.len());
            prop_assert!(cells.iter().all(|&c| !key.reserved().contains(c)));
        }
    }

    #[test]
    fn full_alphabet_round_trip(
        seed in "[a-z]{1,8}",
        letters in full_letters(),
        framing in framing(),
    ) {
        let key = build(Alphabet::full(), &seed);
        let cipher = encode(&letters, &key, framing);
        prop_assert!(!cipher.contains('?'));
        prop_assert_eq!(decode_raw(&cipher, &key, framing), letters);
    }

    #[test]
    fn reduced_alphabet_round_trip(
        seed in "[a-z]{1,8}",
        letters in reduced_letters(),
        framing in framing(),
    ) {
        let key = build(Alphabet::reduced(), &seed);
        let cipher = encode(&letters, &key, framing);
        prop_assert_eq!(decode_raw(&cipher, &key, framing), letters);
    }

    /// Normalized odd-length input comes back without the filler.
    #[test]
    fn padded_text_round_trip(seed in "[a-z]{1,8}", text in "[a-wyz]{1,20}") {
        let key = build(Alphabet::full(), &seed);
        let prepared = normalize(&text, key.alphabet(), &NormalizePolicy::default());
        prop_assert_eq!(prepared.letters.len() % 2, 0);
        let cipher = encode(&prepared.letters, &key, Framing::Space);
        prop_assert_eq!(decode(&cipher, &key, Framing::Space, 'X'), text.to_uppercase());
    }

    /// One code per pair; a pair with an excluded letter becomes the
    /// encode sentinel.
    #[test]
    fn excluded_letters_encode_to_sentinel(
        seed in "[a-z]{1,8}",
        letter in "[JKUWXZ]",
        other in "[A-Z]",
    ) {
        let key = build(Alphabet::reduced(), &seed);
        let cipher = encode(&format!("{}{}", letter, other), &key, Framing::Space);
        prop_assert_eq!(cipher, "???");
        let cipher = encode(&format!("{}{}", other, letter), &key, Framing::Concat);
        prop_assert_eq!(cipher, "???");
    }

    /// Reserved codes never decode to letters.
    #[test]
    fn reserved_codes_decode_to_sentinel(seed in "[a-z]{1,8}", framing in framing()) {
        let key = build(Alphabet::full(), &seed);
        let text = match framing {
            Framing::Space => "000 999",
            Framing::Concat => "000999",
        };
        prop_assert_eq!(decode_raw(text, &key, framing), "????");
    }
}

#[test]
fn single_letter_alphabet() {
    let key = KeyMatrixBuilder::new(Alphabet::new("Q").unwrap(), ReservedCodes::default())
        .build_seeded(Some("porta"))
        .unwrap();
    assert_eq!(key.cells().len(), 1);
    let cipher = encode("QQQQ", &key, Framing::Space);
    let code = key.cells()[0].to_string();
    assert_eq!(cipher, format!("{} {}", code, code));
    assert_eq!(decode_raw(&cipher, &key, Framing::Space), "QQQQ");
}
