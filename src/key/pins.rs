use crate::error::{M209Error, M209Result};
use crate::machine::{
    letter_index, wheel_bit, ACTIVE_PIN_LETTERS, MAX_WHEEL_SIZE, NULL_INDICATOR, TOTAL_PINS,
    WHEELS, WHEEL_LETTERS, WHEEL_SIZES,
};
use crate::rules::RuleConfig;
use fastrand::Rng;
use std::fmt;

const MAX_RANDOMIZE_ATTEMPTS: usize = 100_000;

/// Active-pin limits derived from a [`RuleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBounds {
    /// Longest allowed run of equal pins (circular).
    pub max_run: usize,
    pub min_active: [usize; WHEELS],
    pub max_active: [usize; WHEELS],
    pub min_total: usize,
    pub max_total: usize,
}

impl PinBounds {
    pub fn from_config(cfg: &RuleConfig) -> Self {
        let mut min_active = [0; WHEELS];
        let mut max_active = [0; WHEELS];
        for w in 0..WHEELS {
            let size = WHEEL_SIZES[w];
            max_active[w] = cfg.max_percent_active_pins * size / 100;
            min_active[w] = size - (100 - cfg.min_percent_active_pins) * size / 100;
        }
        Self {
            max_run: cfg.max_consecutive_same_pins,
            min_active,
            max_active,
            min_total: TOTAL_PINS * cfg.min_percent_active_pins / 100,
            max_total: TOTAL_PINS * cfg.max_percent_active_pins / 100,
        }
    }

    pub fn unrestricted() -> Self {
        Self {
            max_run: MAX_WHEEL_SIZE,
            min_active: [0; WHEELS],
            max_active: WHEEL_SIZES,
            min_total: 0,
            max_total: TOTAL_PINS,
        }
    }

    #[inline]
    pub fn wheel_count_ok(&self, w: usize, count: usize) -> bool {
        count >= self.min_active[w] && count <= self.max_active[w]
    }

    #[inline]
    pub fn total_ok(&self, total: usize) -> bool {
        total >= self.min_total && total <= self.max_total
    }
}

/// Pin settings in isomorphic coordinates: `iso[w][p]` is the pin sensed on
/// wheel `w` at cipher position `p` (mod wheel size).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pins {
    iso: [[bool; MAX_WHEEL_SIZE]; WHEELS],
    /// Per-wheel position of the indicator letter.
    indicator: [usize; WHEELS],
    /// Active pins per wheel, kept in step with `iso`.
    counts: [usize; WHEELS],
}

impl Default for Pins {
    fn default() -> Self {
        Self {
            iso: [[false; MAX_WHEEL_SIZE]; WHEELS],
            indicator: null_indicator(),
            counts: [0; WHEELS],
        }
    }
}

fn null_indicator() -> [usize; WHEELS] {
    let bytes = NULL_INDICATOR.as_bytes();
    let mut out = [0; WHEELS];
    for (w, slot) in out.iter_mut().enumerate() {
        *slot = letter_index(w, bytes[w]).unwrap_or(0);
    }
    out
}

fn parse_indicator(indicator: &str) -> M209Result<[usize; WHEELS]> {
    let bytes = indicator.trim().as_bytes();
    if bytes.len() != WHEELS {
        return Err(M209Error::Indicator(format!(
            "'{}' must have {} letters",
            indicator, WHEELS
        )));
    }
    let mut out = [0; WHEELS];
    for w in 0..WHEELS {
        let c = bytes[w].to_ascii_uppercase();
        out[w] = letter_index(w, c).ok_or_else(|| {
            M209Error::Indicator(format!(
                "Letter '{}' does not appear on wheel {}",
                c as char,
                w + 1
            ))
        })?;
    }
    Ok(out)
}

impl Pins {
    /// Parses absolute pin settings.
    ///
    /// Accepts either six strings, one per wheel, listing the letters of
    /// the active pins, or the 26-row layout of the key lists where row `i`
    /// holds the letter of wheel `w` in column `w` and `-` for an inactive
    /// pin.
    pub fn parse<S: AsRef<str>>(rows: &[S], indicator: &str) -> M209Result<Self> {
        let mut pins = Pins {
            iso: [[false; MAX_WHEEL_SIZE]; WHEELS],
            indicator: parse_indicator(indicator)?,
            counts: [0; WHEELS],
        };

        let per_wheel: Vec<String> = if rows.len() == WHEELS {
            rows.iter()
                .map(|r| r.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
                .collect()
        } else if rows.len() == MAX_WHEEL_SIZE {
            (0..WHEELS)
                .map(|w| {
                    rows.iter()
                        .filter_map(|r| r.as_ref().chars().nth(w))
                        .filter(|&c| c != '-')
                        .collect()
                })
                .collect()
        } else {
            return Err(M209Error::Pins(format!(
                "Expected {} wheel strings or {} rows, got {}",
                WHEELS,
                MAX_WHEEL_SIZE,
                rows.len()
            )));
        };

        for (w, letters) in per_wheel.iter().enumerate() {
            if letters.len() > WHEEL_SIZES[w] {
                return Err(M209Error::Pins(format!(
                    "Too many pins for wheel {}: {}",
                    w + 1,
                    letters
                )));
            }
            for c in letters.bytes() {
                let c = c.to_ascii_uppercase();
                let index = letter_index(w, c).ok_or_else(|| {
                    M209Error::Pins(format!(
                        "Invalid letter '{}' for wheel {} ({})",
                        c as char,
                        w + 1,
                        letters
                    ))
                })?;
                let iso = pins.iso_index(w, index);
                if pins.iso[w][iso] {
                    return Err(M209Error::Pins(format!(
                        "Duplicate letter '{}' for wheel {} ({})",
                        c as char,
                        w + 1,
                        letters
                    )));
                }
                pins.iso[w][iso] = true;
                pins.counts[w] += 1;
            }
        }
        Ok(pins)
    }

    #[inline(always)]
    fn iso_index(&self, w: usize, index: usize) -> usize {
        let size = WHEEL_SIZES[w];
        let active = letter_index(w, ACTIVE_PIN_LETTERS[w]).unwrap_or(0);
        (index + 2 * size - active - self.indicator[w]) % size
    }

    #[inline(always)]
    pub fn get(&self, w: usize, pos: usize) -> bool {
        self.iso[w][pos]
    }

    #[inline(always)]
    pub fn wheel(&self, w: usize) -> &[bool] {
        &self.iso[w][..WHEEL_SIZES[w]]
    }

    pub fn indicator(&self) -> String {
        (0..WHEELS)
            .map(|w| WHEEL_LETTERS[w].as_bytes()[self.indicator[w]] as char)
            .collect()
    }

    /// Re-expresses the same absolute pins under a new indicator.
    pub fn set_indicator(&mut self, indicator: &str) -> M209Result<()> {
        let letters = self.absolute_strings();
        *self = Pins::parse(&letters, indicator)?;
        Ok(())
    }

    /// Letters of the active pins, one string per wheel.
    pub fn absolute_strings(&self) -> Vec<String> {
        (0..WHEELS)
            .map(|w| {
                WHEEL_LETTERS[w]
                    .bytes()
                    .enumerate()
                    .filter(|&(index, _)| self.iso[w][self.iso_index(w, index)])
                    .map(|(_, c)| c as char)
                    .collect()
            })
            .collect()
    }

    /// `1`/`0` per absolute position, one string per wheel.
    pub fn absolute_01_strings(&self) -> Vec<String> {
        (0..WHEELS)
            .map(|w| {
                (0..WHEEL_SIZES[w])
                    .map(|index| if self.iso[w][self.iso_index(w, index)] { '1' } else { '0' })
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    pub fn toggle(&mut self, w: usize, pos: usize) {
        let pin = &mut self.iso[w][pos];
        *pin = !*pin;
        if *pin {
            self.counts[w] += 1;
        } else {
            self.counts[w] -= 1;
        }
    }

    #[inline(always)]
    pub fn toggle_pair(&mut self, w: usize, p1: usize, p2: usize) {
        self.toggle(w, p1);
        self.toggle(w, p2);
    }

    pub fn inverse(&mut self, w: usize) {
        for p in self.iso[w][..WHEEL_SIZES[w]].iter_mut() {
            *p ^= true;
        }
        self.counts[w] = WHEEL_SIZES[w] - self.counts[w];
    }

    /// Inverts every wheel whose bit is set in `pattern`.
    pub fn inverse_bitmap(&mut self, pattern: usize) {
        for w in 0..WHEELS {
            if wheel_bit(pattern, w) {
                self.inverse(w);
            }
        }
    }

    #[inline(always)]
    pub fn count_wheel(&self, w: usize) -> usize {
        self.counts[w]
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Length of the circular run of equal pins through `pos`.
    pub fn run_length(&self, w: usize, pos: usize) -> usize {
        let pins = self.wheel(w);
        let size = pins.len();
        let value = pins[pos];
        let mut run = 1;
        let mut p = pos;
        while run < size {
            p = if p + 1 == size { 0 } else { p + 1 };
            if pins[p] != value {
                break;
            }
            run += 1;
        }
        if run == size {
            return run;
        }
        p = pos;
        loop {
            p = if p == 0 { size - 1 } else { p - 1 };
            if pins[p] != value {
                break;
            }
            run += 1;
        }
        run
    }

    /// True when the run through `pos` is longer than `max_run`.
    #[inline]
    pub fn long_seq(&self, w: usize, pos: usize, max_run: usize) -> bool {
        if max_run >= WHEEL_SIZES[w] {
            return false;
        }
        self.run_length(w, pos) > max_run
    }

    pub fn has_long_seq(&self, w: usize, max_run: usize) -> bool {
        (0..WHEEL_SIZES[w]).any(|p| self.long_seq(w, p, max_run))
    }

    /// Draws random pins for every wheel honouring `bounds`.
    pub fn randomize(&mut self, rng: &mut Rng, bounds: &PinBounds) -> M209Result<()> {
        for _ in 0..MAX_RANDOMIZE_ATTEMPTS {
            for w in 0..WHEELS {
                self.randomize_wheel(rng, w, bounds)?;
            }
            if bounds.total_ok(self.count()) {
                return Ok(());
            }
        }
        Err(M209Error::RandomizationExhausted {
            what: "pins",
            attempts: MAX_RANDOMIZE_ATTEMPTS,
        })
    }

    pub fn randomize_wheel(&mut self, rng: &mut Rng, w: usize, bounds: &PinBounds) -> M209Result<()> {
        let size = WHEEL_SIZES[w];
        let max_active = bounds.max_active[w];
        let max_inactive = size - bounds.min_active[w];

        'attempt: for _ in 0..MAX_RANDOMIZE_ATTEMPTS {
            let (mut active, mut inactive) = (0, 0);
            let (mut run_active, mut run_inactive) = (0, 0);
            for p in 0..size {
                let no_active = run_active == bounds.max_run || active == max_active;
                let no_inactive = run_inactive == bounds.max_run || inactive == max_inactive;
                let value = match (no_active, no_inactive) {
                    (true, true) => continue 'attempt,
                    (true, false) => false,
                    (false, true) => true,
                    (false, false) => rng.bool(),
                };
                if value {
                    active += 1;
                    run_active += 1;
                    run_inactive = 0;
                } else {
                    inactive += 1;
                    run_inactive += 1;
                    run_active = 0;
                }
                self.iso[w][p] = value;
            }
            self.counts[w] = active;
            // Runs may still join across the wrap-around point.
            if !self.has_long_seq(w, bounds.max_run) {
                return Ok(());
            }
        }
        self.counts[w] = self.wheel(w).iter().filter(|&&p| p).count();
        Err(M209Error::RandomizationExhausted {
            what: "wheel pins",
            attempts: MAX_RANDOMIZE_ATTEMPTS,
        })
    }

    /// Number of pins differing from `other`, per wheel taking the smaller of
    /// the direct and the inverted comparison.
    pub fn distance(&self, other: &Pins) -> usize {
        let mine = self.absolute_01_strings();
        let theirs = other.absolute_01_strings();
        mine.iter()
            .zip(theirs.iter())
            .map(|(a, b)| {
                let diff = a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count();
                diff.min(a.len() - diff)
            })
            .sum()
    }
}

impl fmt::Display for Pins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indicator())?;
        for (w, s) in self.absolute_01_strings().iter().enumerate() {
            write!(f, " {}: {}", w + 1, s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Version;

    const PINS: [&str; WHEELS] = [
        "ABDHIKMNSTVW",
        "ADEGJKLORSUX",
        "ABGHJLMNRSTUX",
        "CEFHIMNPSTU",
        "BDFGHIJKNPQ",
        "AEFGHIJKLMNO",
    ];

    #[test]
    fn test_parse_round_trip_under_null_indicator() {
        let pins = Pins::parse(&PINS, NULL_INDICATOR).unwrap();
        assert_eq!(pins.absolute_strings(), PINS.to_vec());
        for (w, letters) in PINS.iter().enumerate() {
            assert_eq!(pins.count_wheel(w), letters.len());
            // Null indicator maps letter index straight to position.
            for (i, c) in WHEEL_LETTERS[w].bytes().enumerate() {
                assert_eq!(pins.get(w, i), letters.as_bytes().contains(&c));
            }
        }
    }

    #[test]
    fn test_set_indicator_keeps_absolute_pins() {
        let mut pins = Pins::parse(&PINS, NULL_INDICATOR).unwrap();
        pins.set_indicator("ABCDEF").unwrap();
        assert_eq!(pins.indicator(), "ABCDEF");
        assert_eq!(pins.absolute_strings(), PINS.to_vec());
    }

    #[test]
    fn test_manual_layout_matches_wheel_strings() {
        let pins = Pins::parse(&PINS, "AAAAAA").unwrap();
        let rows: Vec<String> = (0..MAX_WHEEL_SIZE)
            .map(|i| {
                (0..WHEELS)
                    .map(|w| match WHEEL_LETTERS[w].as_bytes().get(i) {
                        Some(&c) if PINS[w].as_bytes().contains(&c) => c as char,
                        _ => '-',
                    })
                    .collect()
            })
            .collect();
        let manual = Pins::parse(&rows, "AAAAAA").unwrap();
        assert_eq!(manual, pins);
    }

    #[test]
    fn test_rejects_bad_letters() {
        let mut bad = PINS;
        bad[1] = "ADW";
        assert!(matches!(Pins::parse(&bad, NULL_INDICATOR), Err(M209Error::Pins(_))));
        bad[1] = "AAD";
        assert!(matches!(Pins::parse(&bad, NULL_INDICATOR), Err(M209Error::Pins(_))));
        assert!(matches!(Pins::parse(&PINS, "ZZZZZZ"), Err(M209Error::Indicator(_))));
    }

    #[test]
    fn test_run_length_wraps_around() {
        let mut pins = Pins::default();
        // Wheel 6 (17 pins): active at 15, 16, 0, 1.
        for p in [15, 16, 0, 1] {
            pins.toggle(5, p);
        }
        assert_eq!(pins.run_length(5, 0), 4);
        assert_eq!(pins.run_length(5, 16), 4);
        assert!(pins.long_seq(5, 1, 3));
        assert!(!pins.long_seq(5, 1, 4));
        assert_eq!(pins.run_length(5, 5), 13);
    }

    #[test]
    fn test_randomize_honours_bounds() {
        let bounds = PinBounds::from_config(&RuleConfig::for_version(Version::V1953));
        let mut rng = Rng::with_seed(11);
        let mut pins = Pins::default();
        for _ in 0..50 {
            pins.randomize(&mut rng, &bounds).unwrap();
            assert!(bounds.total_ok(pins.count()));
            for w in 0..WHEELS {
                assert!(bounds.wheel_count_ok(w, pins.count_wheel(w)));
                assert!(!pins.has_long_seq(w, bounds.max_run));
            }
        }
    }

    #[test]
    fn test_counts_follow_every_mutation() {
        let recount = |pins: &Pins, w: usize| pins.wheel(w).iter().filter(|&&p| p).count();
        let bounds = PinBounds::from_config(&RuleConfig::for_version(Version::V1942));
        let mut rng = Rng::with_seed(5);
        let mut pins = Pins::parse(&PINS, "BCDEFG").unwrap();

        for step in 0..2000 {
            let w = rng.usize(..WHEELS);
            let size = WHEEL_SIZES[w];
            match step % 5 {
                0 | 1 => pins.toggle(w, rng.usize(..size)),
                2 => pins.toggle_pair(w, rng.usize(..size), rng.usize(..size)),
                3 => pins.inverse_bitmap(rng.usize(..64)),
                _ => pins.randomize_wheel(&mut rng, w, &bounds).unwrap(),
            }
            for w in 0..WHEELS {
                assert_eq!(pins.count_wheel(w), recount(&pins, w), "step {}", step);
            }
        }
        let total: usize = (0..WHEELS).map(|w| recount(&pins, w)).sum();
        assert_eq!(pins.count(), total);
    }

    #[test]
    fn test_distance_ignores_inversion() {
        let a = Pins::parse(&PINS, NULL_INDICATOR).unwrap();
        let mut b = a.clone();
        b.inverse(2);
        assert_eq!(a.distance(&b), 0);
        b.toggle(0, 3);
        assert_eq!(a.distance(&b), 1);
    }
}
