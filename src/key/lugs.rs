use crate::error::{M209Error, M209Result};
use crate::machine::{
    bar_count, overlaps, pair_type, single_type, wheel_bit, TypeCount, BARS, EMPTY_BAR, PAIRS,
    PATTERNS, TYPE_COUNT_SIZE, WHEELS,
};
use std::fmt;

/// Displacement produced by each of the 64 wheel-activity patterns.
///
/// A bar kicks once if any wheel it engages shows an active pin.
pub fn displacement_vector(type_count: &TypeCount) -> [u8; PATTERNS] {
    let mut vector = [0u8; PATTERNS];
    for (v, slot) in vector.iter_mut().enumerate() {
        let mut d = 0usize;
        for w in 0..WHEELS {
            if wheel_bit(v, w) {
                d += type_count[single_type(w)] as usize;
            }
        }
        for (i, &(w1, w2)) in PAIRS.iter().enumerate() {
            if wheel_bit(v, w1) || wheel_bit(v, w2) {
                d += type_count[7 + i] as usize;
            }
        }
        *slot = (d % 26) as u8;
    }
    vector
}

/// Lug cage contents: bar counts per type plus the derived displacement
/// table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lugs {
    type_count: TypeCount,
    displacement: [u8; PATTERNS],
}

impl Default for Lugs {
    fn default() -> Self {
        Self::from_type_count([0; TYPE_COUNT_SIZE])
    }
}

impl Lugs {
    pub fn from_type_count(type_count: TypeCount) -> Self {
        Self {
            type_count,
            displacement: displacement_vector(&type_count),
        }
    }

    /// Parses space-separated `w1-w2` bar tokens (1-based wheels, `0-w` for a
    /// bar with a single lug). `0-0` and missing bars are only accepted when
    /// `allow_empty` is set; they are then counted as empty bars.
    pub fn parse(s: &str, allow_empty: bool) -> M209Result<Self> {
        let mut tc: TypeCount = [0; TYPE_COUNT_SIZE];
        let tokens: Vec<&str> = s.split_whitespace().collect();

        if tokens.len() > BARS || (tokens.len() < BARS && !allow_empty) {
            return Err(M209Error::Lugs(format!(
                "'{}' has {} bars, expected {}",
                s.trim(),
                tokens.len(),
                BARS
            )));
        }

        for token in tokens {
            let (a, b) = token
                .split_once('-')
                .ok_or_else(|| M209Error::Lugs(format!("Malformed bar '{}'", token)))?;
            let parse_wheel = |x: &str| -> M209Result<usize> {
                match x.parse::<usize>() {
                    Ok(w) if w <= WHEELS => Ok(w),
                    _ => Err(M209Error::Lugs(format!("Wrong wheel number in bar '{}'", token))),
                }
            };
            let (w1, w2) = {
                let (x, y) = (parse_wheel(a)?, parse_wheel(b)?);
                (x.min(y), x.max(y))
            };

            if w2 == 0 {
                if !allow_empty {
                    return Err(M209Error::Lugs(format!("Empty bar '{}' not allowed", token)));
                }
                tc[EMPTY_BAR] += 1;
            } else if w1 == w2 {
                return Err(M209Error::Lugs(format!(
                    "Wheel appears twice on bar '{}'",
                    token
                )));
            } else if w1 == 0 {
                tc[single_type(w2 - 1)] += 1;
            } else {
                tc[pair_type(w1 - 1, w2 - 1)] += 1;
            }
        }

        if allow_empty {
            tc[EMPTY_BAR] += (BARS - bar_count(&tc)) as u8;
        }
        Ok(Self::from_type_count(tc))
    }

    pub fn type_count(&self) -> &TypeCount {
        &self.type_count
    }

    #[inline(always)]
    pub fn displacement(&self) -> &[u8; PATTERNS] {
        &self.displacement
    }

    pub fn set(&mut self, type_count: &TypeCount) {
        self.type_count = *type_count;
        self.displacement = displacement_vector(type_count);
    }

    pub fn overlaps(&self) -> usize {
        overlaps(&self.type_count)
    }

    /// Number of bar positions that differ from `other`, summed over all
    /// lug types.
    pub fn distance(&self, other: &Lugs) -> usize {
        (1..TYPE_COUNT_SIZE)
            .map(|t| (self.type_count[t] as i32 - other.type_count[t] as i32).unsigned_abs() as usize)
            .sum::<usize>()
            / 2
    }
}

impl fmt::Display for Lugs {
    /// Overlapping bars first, then single-lug bars. Empty bars are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = Vec::with_capacity(BARS);
        for (i, &(w1, w2)) in PAIRS.iter().enumerate() {
            for _ in 0..self.type_count[7 + i] {
                tokens.push(format!("{}-{}", w1 + 1, w2 + 1));
            }
        }
        for w in 0..WHEELS {
            for _ in 0..self.type_count[single_type(w)] {
                tokens.push(format!("0-{}", w + 1));
            }
        }
        write!(f, "{}", tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUGS: &str = "1-2 1-4 2-5 3-6 0-1 0-1 0-2 0-2 0-2 0-3 0-3 0-3 0-3 0-4 0-4 0-4 0-4 0-4 0-5 0-5 0-5 0-5 0-5 0-6 0-6 0-6 0-6";

    #[test]
    fn test_parse_and_format() {
        let lugs = Lugs::parse(LUGS, false).unwrap();
        assert_eq!(lugs.overlaps(), 4);
        assert_eq!(lugs.to_string(), LUGS);
    }

    #[test]
    fn test_single_wheel_patterns() {
        let lugs = Lugs::parse(LUGS, false).unwrap();
        // Wheel 1 alone: two single bars plus the 1-2 and 1-4 bars.
        assert_eq!(lugs.displacement()[0b000001], 4);
        assert_eq!(lugs.displacement()[0], 0);
        // All wheels active: every bar kicks once.
        assert_eq!(lugs.displacement()[63] as usize, BARS % 26);
    }

    #[test]
    fn test_empty_bars_only_when_allowed() {
        assert!(Lugs::parse("0-0 0-1", false).is_err());
        let lugs = Lugs::parse("0-0 0-1", true).unwrap();
        assert_eq!(lugs.type_count()[EMPTY_BAR] as usize, BARS - 1);
        assert_eq!(lugs.to_string(), "0-1");
    }

    #[test]
    fn test_distance_counts_moved_bars() {
        let a = Lugs::parse(LUGS, false).unwrap();
        let moved = LUGS.replacen("0-1", "0-6", 1);
        let b = Lugs::parse(&moved, false).unwrap();
        assert_eq!(a.distance(&b), 1);
        assert_eq!(a.distance(&a), 0);
    }
}
