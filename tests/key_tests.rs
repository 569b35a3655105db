use fastrand::Rng;
use m209::error::M209Error;
use m209::key::lugs::displacement_vector;
use m209::key::{Key, Lugs, PinBounds, Pins};
use m209::machine::{
    single_type, wheel_bit, TypeCount, NULL_INDICATOR, PATTERNS, TYPE_COUNT_SIZE, WHEELS,
    WHEEL_SIZES,
};
use m209::rules::{LugRules, Version};
use m209::scorer::{EvalType, Stats, CRIB_MAX_SCORE};
use proptest::prelude::*;

const LUGS: &str = "1-2 1-4 2-5 3-6 0-1 0-1 0-2 0-2 0-2 0-3 0-3 0-3 0-3 0-4 0-4 0-4 0-4 0-4 0-5 0-5 0-5 0-5 0-5 0-6 0-6 0-6 0-6";
const PINS: [&str; WHEELS] = [
    "ABDHIKMNSTVW",
    "ADEGJKLORSUX",
    "ABGHJLMNRSTUX",
    "CEFHIMNPSTU",
    "BDFGHIJKNPQ",
    "AEFGHIJKLMNO",
];
const PLAIN: &str = "ATTACKATDAWNWITHTHREEBATTALIONSFROMTHENORTHRIDGEANDHOLDTHEBRIDGE";

fn fixed_key() -> Key {
    let rules = LugRules::for_version(Version::V1942).unwrap();
    Key::parse(LUGS, &PINS, NULL_INDICATOR, &rules, false).unwrap()
}

fn random_key(seed: u64) -> Key {
    let rules = LugRules::for_version(Version::V1947).unwrap();
    let mut rng = Rng::with_seed(seed);
    let mut key = Key::default();
    key.set_type_count(&rules.randomize(&mut rng, 0).unwrap());
    key.randomize_pins(&mut rng, &PinBounds::from_config(rules.config()))
        .unwrap();
    key
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_encrypt_then_decrypt_is_identity(
        text in "[A-Z]{1,300}",
        seed in any::<u64>(),
        slide in 0u8..26,
    ) {
        let mut key = random_key(seed);
        key.set_slide(slide);
        let cipher = key.encrypt_decrypt(&text, true);
        prop_assert_eq!(cipher.len(), text.len());
        prop_assert_eq!(key.encrypt_decrypt(&cipher, false), text);
    }
}

#[test]
fn test_fixed_key_round_trip_and_plaintext() {
    let mut key = fixed_key();
    let cipher = key.encrypt_decrypt(PLAIN, true);
    assert_ne!(cipher, PLAIN);
    key.set_cipher(&cipher).unwrap();
    assert_eq!(key.plaintext(), PLAIN);

    key.update_decryption();
    let decrypted: String = key.decryption().iter().map(|&s| (b'A' + s) as char).collect();
    assert_eq!(decrypted, PLAIN);
    assert_eq!(key.histogram().iter().sum::<u32>() as usize, PLAIN.len());
}

#[test]
fn test_spaces_become_z_and_question_marks_pass_through() {
    let key = fixed_key();
    let cipher = key.encrypt_decrypt("AB CD?E", true);
    assert_eq!(cipher.len(), 7);
    assert_eq!(cipher.as_bytes()[5], b'?');
    assert_eq!(key.encrypt_decrypt(&cipher, false), "ABZCD?E");
}

#[test]
fn test_selective_update_matches_full_decryption() {
    let mut key = random_key(17);
    let cipher = key.encrypt_decrypt(&PLAIN.repeat(12), true);
    key.set_cipher(&cipher).unwrap();
    key.update_decryption();

    let mut rng = Rng::with_seed(99);
    for i in 0..1000 {
        let w = rng.usize(..WHEELS);
        let p1 = rng.usize(..WHEEL_SIZES[w]);
        if i % 3 == 0 {
            let p2 = rng.usize(..WHEEL_SIZES[w]);
            if p1 != p2 {
                key.toggle_pin_pair(w, p1, p2);
            }
        } else {
            key.toggle_pin(w, p1);
        }
        assert!(key.decryption_valid());

        let mut full = key.clone();
        full.invalidate_decryption();
        full.update_decryption();
        assert_eq!(key.decryption(), full.decryption(), "after move {}", i);
        assert_eq!(key.histogram(), full.histogram());
    }
}

#[test]
fn test_displacement_is_deterministic() {
    let rules = LugRules::for_version(Version::V1953).unwrap();
    let mut rng = Rng::with_seed(5);
    for _ in 0..20 {
        let tc = rules.randomize(&mut rng, 0).unwrap();
        assert_eq!(displacement_vector(&tc), displacement_vector(&tc));
        assert_eq!(Lugs::from_type_count(tc).displacement(), &displacement_vector(&tc));
    }
}

#[test]
fn test_displacement_without_overlaps_sums_active_wheels() {
    let mut tc: TypeCount = [0; TYPE_COUNT_SIZE];
    for (w, count) in [1u8, 2, 3, 5, 7, 9].into_iter().enumerate() {
        tc[single_type(w)] = count;
    }
    let vector = displacement_vector(&tc);
    for (v, &d) in vector.iter().enumerate().take(PATTERNS) {
        let expected: usize = (0..WHEELS)
            .filter(|&w| wheel_bit(v, w))
            .map(|w| tc[single_type(w)] as usize)
            .sum();
        assert_eq!(d as usize, expected % 26);
    }
}

#[test]
fn test_crib_score_is_maximal_for_the_true_key() {
    let mut key = fixed_key();
    let cipher = key.encrypt_decrypt(PLAIN, true);
    let crib = format!("{}??????{}", &PLAIN[..6], &PLAIN[12..16]);
    key.set_cipher_and_crib(&cipher, &crib).unwrap();
    let stats = Stats::english();
    assert_eq!(key.eval(EvalType::Crib, &stats), CRIB_MAX_SCORE);

    key.toggle_pin(0, 0);
    key.toggle_pin(3, 4);
    assert!(key.eval(EvalType::Crib, &stats) < CRIB_MAX_SCORE);
}

#[test]
fn test_mono_score_prefers_the_true_key() {
    let mut key = fixed_key();
    let text = PLAIN.repeat(6);
    let cipher = key.encrypt_decrypt(&text, true);
    key.set_cipher(&cipher).unwrap();
    let stats = Stats::english();
    let true_score = key.eval(EvalType::Mono, &stats);

    let mut wrong = random_key(23);
    wrong.set_cipher(&cipher).unwrap();
    assert!(wrong.eval(EvalType::Mono, &stats) < true_score);
    assert_eq!(key.evaluations, 1);
}

#[test]
fn test_parse_errors_are_reported() {
    let rules = LugRules::for_version(Version::V1947).unwrap();
    let short = "1-2 0-1";
    assert!(matches!(
        Key::parse(short, &PINS, NULL_INDICATOR, &rules, false),
        Err(M209Error::Lugs(_))
    ));
    let self_bar = LUGS.replacen("1-2", "2-2", 1);
    assert!(matches!(
        Key::parse(&self_bar, &PINS, NULL_INDICATOR, &rules, false),
        Err(M209Error::Lugs(_))
    ));
    assert!(matches!(
        Key::parse(LUGS, &PINS, "LLKJI", &rules, false),
        Err(M209Error::Indicator(_))
    ));
    assert!(matches!(Pins::parse(&PINS[..5], NULL_INDICATOR), Err(M209Error::Pins(_))));

    let mut key = Key::default();
    assert!(matches!(key.set_cipher("ABC1"), Err(M209Error::Text(_))));
    assert!(matches!(
        key.set_cipher_and_crib("ABCDEF", "??--"),
        Err(M209Error::Text(_))
    ));
}

#[test]
fn test_display_contains_slide_lugs_and_pins() {
    let mut key = fixed_key();
    key.set_slide(3);
    let text = key.to_string();
    assert!(text.starts_with("[Slide 3] [1-2 1-4 2-5 3-6 0-1"));
    assert!(text.contains(NULL_INDICATOR));
}

#[test]
fn test_descriptor_parses_back_into_the_same_key() {
    let rules = LugRules::for_version(Version::V1942).unwrap();
    let key = Key::parse(LUGS, &PINS, "BCDEFG", &rules, false).unwrap();
    let descriptor = key.descriptor();
    assert_eq!(
        descriptor,
        format!("lugs {} | indicator BCDEFG | pins {} | slide 0", LUGS, PINS.join(","))
    );

    let fields: Vec<&str> = descriptor.split(" | ").collect();
    let lugs = fields[0].strip_prefix("lugs ").unwrap();
    let indicator = fields[1].strip_prefix("indicator ").unwrap();
    let pins: Vec<&str> = fields[2].strip_prefix("pins ").unwrap().split(',').collect();
    let parsed = Key::parse(lugs, pins.as_slice(), indicator, &rules, false).unwrap();
    assert_eq!(parsed.to_string(), key.to_string());
    assert_eq!(parsed.encrypt_decrypt(PLAIN, true), key.encrypt_decrypt(PLAIN, true));
}
