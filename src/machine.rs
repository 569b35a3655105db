//! Fixed mechanics of the M-209: wheel sizes and alphabets, the lug cage,
//! and the indexing of lug "types" (a bar engaging one wheel or a pair).

pub const WHEELS: usize = 6;
pub const BARS: usize = 27;
pub const MAX_WHEEL_SIZE: usize = 26;

pub const WHEEL_SIZES: [usize; WHEELS] = [26, 25, 23, 21, 19, 17];
pub const TOTAL_PINS: usize = 26 + 25 + 23 + 21 + 19 + 17;

pub const WHEEL_LETTERS: [&str; WHEELS] = [
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "ABCDEFGHIJKLMNOPQRSTUVXYZ",
    "ABCDEFGHIJKLMNOPQRSTUVX",
    "ABCDEFGHIJKLMNOPQRSTU",
    "ABCDEFGHIJKLMNOPQRS",
    "ABCDEFGHIJKLMNOPQ",
];

/// Letter of the pin sitting at the active (sensing) position when the wheel
/// shows `A` in the indicator window.
pub const ACTIVE_PIN_LETTERS: [u8; WHEELS] = *b"PONMLK";

/// Indicator under which isomorphic and absolute pin positions coincide.
pub const NULL_INDICATOR: &str = "LLKJIH";

/// 64 wheel-activity patterns: bit `w` set means wheel `w` shows an active pin.
pub const PATTERNS: usize = 1 << WHEELS;

/// Slot 0 counts empty bars (UNRESTRICTED only), slots 1..=6 single-wheel
/// bars, slots 7..=21 two-wheel bars.
pub const TYPE_COUNT_SIZE: usize = 22;
pub const EMPTY_BAR: usize = 0;

pub type TypeCount = [u8; TYPE_COUNT_SIZE];

const PAIR_INDEX: [[usize; WHEELS]; WHEELS] = [
    [0, 7, 8, 9, 10, 11],
    [7, 0, 12, 13, 14, 15],
    [8, 12, 0, 16, 17, 18],
    [9, 13, 16, 0, 19, 20],
    [10, 14, 17, 19, 0, 21],
    [11, 15, 18, 20, 21, 0],
];

/// Wheel pairs in type-index order (7..=21).
pub const PAIRS: [(usize, usize); 15] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 3),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
    (4, 5),
];

/// All lug types a bar can carry (empty bars excluded).
pub const TYPES: [usize; 21] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21,
];

#[inline(always)]
pub const fn single_type(w: usize) -> usize {
    1 + w
}

#[inline(always)]
pub fn pair_type(w1: usize, w2: usize) -> usize {
    debug_assert!(w1 != w2);
    PAIR_INDEX[w1][w2]
}

#[inline(always)]
pub const fn wheel_bit(pattern: usize, w: usize) -> bool {
    (pattern >> w) & 1 == 1
}

/// Number of two-wheel bars.
pub fn overlaps(type_count: &TypeCount) -> usize {
    type_count[7..].iter().map(|&c| c as usize).sum()
}

pub fn bar_count(type_count: &TypeCount) -> usize {
    type_count.iter().map(|&c| c as usize).sum()
}

/// Number of lugs engaging each wheel (the "lug-count sequence").
pub fn lug_count_sequence(type_count: &TypeCount) -> [u8; WHEELS] {
    let mut seq = [0u8; WHEELS];
    for (w, s) in seq.iter_mut().enumerate() {
        *s = type_count[single_type(w)];
    }
    for (i, &(w1, w2)) in PAIRS.iter().enumerate() {
        let count = type_count[7 + i];
        seq[w1] += count;
        seq[w2] += count;
    }
    seq
}

/// Position of `letter` on wheel `w`, if the wheel carries it.
pub fn letter_index(w: usize, letter: u8) -> Option<usize> {
    WHEEL_LETTERS[w].bytes().position(|c| c == letter)
}
