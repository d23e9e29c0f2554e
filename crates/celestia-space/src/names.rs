//! Pronounceable body names.
//!
//! A name is an optional Greek-letter prefix, a gibberish word of two or three
//! syllables, and an optional numeric suffix, e.g. `Theta-Korumi-417`. Words
//! found in a reserved [`WordList`] are redrawn.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::Rng;
use rustc_hash::FxHashSet;

/// Greek letter prefixes, e.g. `Sigma-Lavo`.
pub const GREEK_PREFIXES: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omikron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

// Latin consonants without q, x and y, which read badly in gibberish.
const CONSONANTS: [char; 18] = [
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'r', 's', 't', 'v', 'w', 'z',
];

/// Words a generated name must never be.
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: FxHashSet<String>,
}

impl WordList {
    /// Build from any word source. Words are compared case-insensitively.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Parse a JSON array of strings.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let words: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(words))
    }

    /// Parse a JSON array of strings from a reader.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or a failed read.
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        let words: Vec<String> = serde_json::from_reader(reader)?;
        Ok(Self::new(words))
    }

    /// Parse a JSON array of strings from a file.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for a missing file or malformed input.
    pub fn from_path(path: &Path) -> Result<Self, serde_json::Error> {
        let file = File::open(path).map_err(serde_json::Error::io)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Draws names from a caller-supplied RNG, so names share the system's stream.
#[derive(Clone, Debug, Default)]
pub struct NameGenerator {
    reserved: WordList,
}

impl NameGenerator {
    pub fn new(reserved: WordList) -> Self {
        Self { reserved }
    }

    pub fn reserved(&self) -> &WordList {
        &self.reserved
    }

    /// Next full name: `[Prefix-]Word[-N]`.
    pub fn next_name(&self, rng: &mut impl Rng) -> String {
        let mut name = String::new();
        if rng.random_bool(0.5) {
            let prefix = GREEK_PREFIXES[rng.random_range(0..GREEK_PREFIXES.len())];
            name.push_str(prefix);
            name.push('-');
        }

        let word = self.next_word(rng);
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }

        if rng.random_bool(0.5) {
            let number: u32 = rng.random_range(0..=999);
            name.push('-');
            name.push_str(&number.to_string());
        }
        name
    }

    /// A lowercase gibberish word that is not reserved.
    pub fn next_word(&self, rng: &mut impl Rng) -> String {
        loop {
            let syllables = rng.random_range(2..=3);
            let mut word = String::new();
            for _ in 0..syllables {
                push_syllable(&mut word, rng);
            }
            if !self.reserved.contains(&word) {
                return word;
            }
        }
    }
}

/// Vowel, consonant-vowel, or consonant-vowel-consonant.
fn push_syllable(word: &mut String, rng: &mut impl Rng) {
    match rng.random_range(0..3) {
        0 => word.push(vowel(rng)),
        1 => {
            word.push(consonant(rng));
            word.push(vowel(rng));
        }
        _ => {
            word.push(consonant(rng));
            word.push(vowel(rng));
            word.push(consonant(rng));
        }
    }
}

fn vowel(rng: &mut impl Rng) -> char {
    VOWELS[rng.random_range(0..VOWELS.len())]
}

fn consonant(rng: &mut impl Rng) -> char {
    CONSONANTS[rng.random_range(0..CONSONANTS.len())]
}

/// Roman numeral for `n`; empty for zero.
pub fn romanize(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
