//! Candidate key state: lugs, pins and slide, plus the ciphertext it is
//! being tried against and an incrementally maintained decryption.

pub mod decrypt;
pub mod lugs;
pub mod pins;

pub use self::lugs::Lugs;
pub use self::pins::{PinBounds, Pins};

use crate::error::{M209Error, M209Result};
use crate::machine::{TypeCount, PATTERNS, WHEEL_SIZES};
use crate::rules::LugRules;
use fastrand::Rng;
use std::fmt;

/// Crib position with no known plaintext letter.
pub const CRIB_MISSING: u8 = u8::MAX;

/// Plaintext spaces are enciphered as `Z`.
pub const SPACE: u8 = 25;

#[derive(Debug, Clone)]
pub struct Key {
    lugs: Lugs,
    pins: Pins,
    slide: u8,

    cipher_text: String,
    cipher: Vec<u8>,
    crib: Vec<u8>,

    // Decryption cache, covering the crib length when a crib is set.
    lookup: [u8; PATTERNS],
    decryption: Vec<u8>,
    histogram: [u32; 26],
    valid: bool,

    /// Evaluations performed through this key.
    pub evaluations: u64,

    original: Option<Box<(Lugs, Pins)>>,
}

impl Default for Key {
    fn default() -> Self {
        Self {
            lugs: Lugs::default(),
            pins: Pins::default(),
            slide: 0,
            cipher_text: String::new(),
            cipher: Vec::new(),
            crib: Vec::new(),
            lookup: [0; PATTERNS],
            decryption: Vec::new(),
            histogram: [0; 26],
            valid: false,
            evaluations: 0,
            original: None,
        }
    }
}

fn text_symbols(text: &str) -> M209Result<(String, Vec<u8>)> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if cleaned.is_empty() {
        return Err(M209Error::Text("Ciphertext is empty".to_string()));
    }
    let symbols = cleaned
        .bytes()
        .map(|c| {
            if c.is_ascii_uppercase() {
                Ok(c - b'A')
            } else {
                Err(M209Error::Text(format!(
                    "Ciphertext contains '{}', only letters are allowed",
                    c as char
                )))
            }
        })
        .collect::<M209Result<Vec<u8>>>()?;
    Ok((cleaned, symbols))
}

impl Key {
    pub fn new(lugs: Lugs, pins: Pins) -> Self {
        Self {
            lugs,
            pins,
            ..Self::default()
        }
    }

    /// Builds a key from its written form: a lug string, per-wheel pin
    /// letters (or the 26-row layout) and an indicator. With `check_rules`
    /// the lugs must also satisfy `rules`.
    pub fn parse<S: AsRef<str>>(
        lugs: &str,
        pins: &[S],
        indicator: &str,
        rules: &LugRules,
        check_rules: bool,
    ) -> M209Result<Self> {
        let lugs = Lugs::parse(lugs, rules.config().is_unrestricted())?;
        if check_rules && !rules.is_type_count_compliant(lugs.type_count()) {
            return Err(M209Error::Lugs(format!(
                "'{}' does not match the {} lug count rules",
                lugs,
                rules.config().version
            )));
        }
        let pins = Pins::parse(pins, indicator)?;
        Ok(Self::new(lugs, pins))
    }

    pub fn set_cipher(&mut self, cipher: &str) -> M209Result<()> {
        let (text, symbols) = text_symbols(cipher)?;
        self.cipher_text = text;
        self.cipher = symbols;
        self.crib.clear();
        self.resize_decryption();
        Ok(())
    }

    /// Letters of `crib` are aligned with the start of the ciphertext; any
    /// other character marks an unknown position.
    pub fn set_cipher_and_crib(&mut self, cipher: &str, crib: &str) -> M209Result<()> {
        let (text, symbols) = text_symbols(cipher)?;
        let crib: Vec<u8> = crib
            .bytes()
            .take(symbols.len())
            .map(|c| {
                let c = c.to_ascii_uppercase();
                if c.is_ascii_uppercase() {
                    c - b'A'
                } else {
                    CRIB_MISSING
                }
            })
            .collect();
        if crib.iter().all(|&c| c == CRIB_MISSING) {
            return Err(M209Error::Text("Crib has no known letters".to_string()));
        }
        self.cipher_text = text;
        self.cipher = symbols;
        self.crib = crib;
        self.resize_decryption();
        Ok(())
    }

    fn resize_decryption(&mut self) {
        let len = if self.crib.is_empty() {
            self.cipher.len()
        } else {
            self.crib.len()
        };
        self.decryption = vec![0; len];
        self.valid = false;
    }

    pub fn cipher(&self) -> &[u8] {
        &self.cipher
    }

    pub fn cipher_text(&self) -> &str {
        &self.cipher_text
    }

    pub fn crib(&self) -> &[u8] {
        &self.crib
    }

    pub fn has_crib(&self) -> bool {
        !self.crib.is_empty()
    }

    pub fn lugs(&self) -> &Lugs {
        &self.lugs
    }

    pub fn type_count(&self) -> &TypeCount {
        self.lugs.type_count()
    }

    pub fn set_lugs(&mut self, lugs: Lugs) {
        self.lugs = lugs;
        self.valid = false;
    }

    pub fn set_type_count(&mut self, type_count: &TypeCount) {
        self.lugs.set(type_count);
        self.valid = false;
    }

    pub fn pins(&self) -> &Pins {
        &self.pins
    }

    pub fn set_pins(&mut self, pins: &Pins) {
        self.pins.clone_from(pins);
        self.valid = false;
    }

    /// Keeps the absolute pins and moves the wheels to `indicator`.
    pub fn set_indicator(&mut self, indicator: &str) -> M209Result<()> {
        self.pins.set_indicator(indicator)?;
        self.valid = false;
        Ok(())
    }

    pub fn randomize_pins(&mut self, rng: &mut Rng, bounds: &PinBounds) -> M209Result<()> {
        self.valid = false;
        self.pins.randomize(rng, bounds)
    }

    pub fn slide(&self) -> u8 {
        self.slide
    }

    pub fn set_slide(&mut self, slide: u8) {
        self.slide = slide % 26;
        self.valid = false;
    }

    /// Flips one pin and refreshes only the affected cipher positions.
    #[inline]
    pub fn toggle_pin(&mut self, w: usize, pos: usize) {
        self.pins.toggle(w, pos);
        if self.valid {
            self.update_decryption_at(w, pos);
        }
    }

    #[inline]
    pub fn toggle_pin_pair(&mut self, w: usize, p1: usize, p2: usize) {
        self.pins.toggle_pair(w, p1, p2);
        if self.valid {
            self.update_decryption_at(w, p1);
            self.update_decryption_at(w, p2);
        }
    }

    pub fn inverse_wheel(&mut self, w: usize) {
        self.pins.inverse(w);
        self.valid = false;
    }

    pub fn inverse_bitmap(&mut self, pattern: usize) {
        self.pins.inverse_bitmap(pattern);
        self.valid = false;
    }

    pub fn invalidate_decryption(&mut self) {
        self.valid = false;
    }

    pub fn decryption_valid(&self) -> bool {
        self.valid
    }

    pub fn decryption(&self) -> &[u8] {
        &self.decryption
    }

    pub fn histogram(&self) -> &[u32; 26] {
        &self.histogram
    }

    /// Encrypts or decrypts `text` from its first position. Letters and `?`
    /// advance the wheels, `?` is passed through, spaces are enciphered as
    /// `Z`, anything else is dropped.
    pub fn encrypt_decrypt(&self, text: &str, encrypt: bool) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0usize;
        for c in text.chars() {
            let input = match c {
                '?' => {
                    out.push('?');
                    pos += 1;
                    continue;
                }
                ' ' if encrypt => SPACE,
                c if c.is_ascii_alphabetic() => c.to_ascii_uppercase() as u8 - b'A',
                _ => continue,
            };
            let disp = self.lugs.displacement()[self.pattern_at(pos)];
            let symbol = (25 + self.slide as usize + disp as usize - input as usize) % 26;
            out.push((b'A' + symbol as u8) as char);
            pos += 1;
        }
        out
    }

    /// Full decryption of the stored ciphertext.
    pub fn plaintext(&self) -> String {
        self.encrypt_decrypt(&self.cipher_text, false)
    }

    #[inline(always)]
    fn pattern_at(&self, pos: usize) -> usize {
        let mut v = 0;
        for (w, &size) in WHEEL_SIZES.iter().enumerate() {
            if self.pins.get(w, pos % size) {
                v |= 1 << w;
            }
        }
        v
    }

    /// Keeps the current lugs and pins as the reference for
    /// [`Self::incorrect_lugs`] and [`Self::incorrect_pins`].
    pub fn set_original(&mut self, original: &Key) {
        self.original = Some(Box::new((original.lugs.clone(), original.pins.clone())));
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }

    pub fn incorrect_lugs(&self) -> Option<usize> {
        self.original.as_ref().map(|o| self.lugs.distance(&o.0))
    }

    pub fn incorrect_pins(&self) -> Option<usize> {
        self.original.as_ref().map(|o| self.pins.distance(&o.1))
    }

    pub fn pins_strings(&self) -> Vec<String> {
        self.pins.absolute_strings()
    }

    pub fn lugs_string(&self) -> String {
        self.lugs.to_string()
    }

    /// Key settings in the external formats: the lug string, the 6-letter
    /// indicator and the active-pin letters of each wheel.
    pub fn descriptor(&self) -> String {
        format!(
            "lugs {} | indicator {} | pins {} | slide {}",
            self.lugs_string(),
            self.pins.indicator(),
            self.pins_strings().join(","),
            self.slide
        )
    }

    /// Short diagnostic suffix for reports, empty without an original key.
    pub fn diagnostics(&self) -> String {
        match (self.incorrect_lugs(), self.incorrect_pins()) {
            (Some(l), Some(p)) => format!("lugs off {} pins off {}", l, p),
            _ => String::new(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Slide {}] [{}] [{}]", self.slide, self.lugs, self.pins)
    }
}
