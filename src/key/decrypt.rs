use super::Key;
use crate::machine::{PATTERNS, WHEELS, WHEEL_SIZES};

#[inline(always)]
fn symbol(lookup: u8, c: u8) -> u8 {
    let s = lookup as i8 - c as i8;
    if s < 0 {
        (s + 26) as u8
    } else {
        s as u8
    }
}

impl Key {
    fn refresh_lookup(&mut self) {
        let base = 25 + self.slide as usize;
        let disp = self.lugs.displacement();
        for v in 0..PATTERNS {
            self.lookup[v] = ((base + disp[v] as usize) % 26) as u8;
        }
    }

    /// Recomputes the whole decryption cache and histogram.
    pub fn update_decryption(&mut self) {
        self.refresh_lookup();
        self.histogram = [0; 26];

        let mut pos = [0usize; WHEELS];
        for i in 0..self.decryption.len() {
            let mut v = 0usize;
            for w in 0..WHEELS {
                if self.pins.get(w, pos[w]) {
                    v |= 1 << w;
                }
                pos[w] += 1;
                if pos[w] == WHEEL_SIZES[w] {
                    pos[w] = 0;
                }
            }
            let s = symbol(self.lookup[v], self.cipher[i]);
            self.decryption[i] = s;
            self.histogram[s as usize] += 1;
        }
        self.valid = true;
    }

    #[inline]
    pub fn update_decryption_if_invalid(&mut self) {
        if !self.valid {
            self.update_decryption();
        }
    }

    /// Refreshes the positions sensed by pin `pos` of wheel `wheel`, i.e.
    /// `pos`, `pos + size`, `pos + 2 * size`, ...
    ///
    /// Requires a valid cache; the result matches a full
    /// [`Key::update_decryption`] exactly.
    pub fn update_decryption_at(&mut self, wheel: usize, pos: usize) {
        debug_assert!(self.valid);
        let step = WHEEL_SIZES[wheel];

        let mut wheel_pos = [0usize; WHEELS];
        for w in 0..WHEELS {
            wheel_pos[w] = pos % WHEEL_SIZES[w];
        }

        let mut i = pos;
        while i < self.decryption.len() {
            let mut v = 0usize;
            for w in 0..WHEELS {
                if self.pins.get(w, wheel_pos[w]) {
                    v |= 1 << w;
                }
                wheel_pos[w] += step;
                while wheel_pos[w] >= WHEEL_SIZES[w] {
                    wheel_pos[w] -= WHEEL_SIZES[w];
                }
            }
            let s = symbol(self.lookup[v], self.cipher[i]);
            let old = self.decryption[i];
            if s != old {
                self.histogram[old as usize] -= 1;
                self.histogram[s as usize] += 1;
                self.decryption[i] = s;
            }
            i += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Lugs, Pins};
    use crate::machine::NULL_INDICATOR;

    fn sample_key() -> Key {
        let lugs = Lugs::parse(
            "1-2 1-4 2-5 3-6 0-1 0-1 0-2 0-2 0-2 0-3 0-3 0-3 0-3 0-4 0-4 0-4 0-4 0-4 0-5 0-5 0-5 0-5 0-5 0-6 0-6 0-6 0-6",
            false,
        )
        .unwrap();
        let pins = Pins::parse(
            &["ABDHIKMNSTVW", "ADEGJKLORSUX", "ABGHJLMNRSTUX", "CEFHIMNPSTU", "BDFGHIJKNPQ", "AEFGHIJKLMNO"],
            NULL_INDICATOR,
        )
        .unwrap();
        Key::new(lugs, pins)
    }

    #[test]
    fn test_cache_matches_encrypt_decrypt() {
        let mut key = sample_key();
        key.set_slide(7);
        let cipher = key.encrypt_decrypt("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG", true);
        key.set_cipher(&cipher).unwrap();
        key.update_decryption();
        let text: String = key.decryption().iter().map(|&s| (b'A' + s) as char).collect();
        assert_eq!(text, "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG");
        assert_eq!(key.histogram().iter().sum::<u32>() as usize, text.len());
    }

    #[test]
    fn test_selective_update_after_toggle() {
        let mut key = sample_key();
        key.set_cipher(&"QWERTYUIOPASDFGHJKLZXCVBNM".repeat(8)).unwrap();
        key.update_decryption();
        key.toggle_pin(3, 7);
        let selective = (key.decryption().to_vec(), *key.histogram());
        key.update_decryption();
        assert_eq!(selective, (key.decryption().to_vec(), *key.histogram()));
    }
}
