//! Song keys: tonic plus mode, parsed from and printed to either notation.

use std::fmt;

use crate::chord::{Accidental, NotationConvention, Note, PitchClass};
use crate::error::ChordError;

/// Mode of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// A key such as `G`, `F#m` or (Central European) `Hm`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Key {
    pub tonic: Note,
    pub mode: Mode,
}

impl Key {
    pub fn new(tonic: Note, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    pub fn major(pitch_class: PitchClass) -> Self {
        Self::new(natural_spelling(pitch_class), Mode::Major)
    }

    pub fn minor(pitch_class: PitchClass) -> Self {
        Self::new(natural_spelling(pitch_class), Mode::Minor)
    }

    /// Parse a key name like `C`, `Am`, `Ebmi`, `F#min` or `Hmoll`-style `Hm`.
    ///
    /// # Errors
    /// Returns [`ChordError::InvalidKey`] for anything that is not a note followed by
    /// an empty or minor suffix.
    pub fn parse(text: &str, notation: NotationConvention) -> Result<Self, ChordError> {
        let trimmed = text.trim();
        let invalid = || ChordError::InvalidKey(text.to_string());
        let (tonic, rest) = Note::parse_prefix(trimmed, notation).ok_or_else(invalid)?;

        let mode = match rest.trim() {
            "" | "maj" | "major" | "dur" => Mode::Major,
            "m" | "mi" | "min" | "minor" | "moll" => Mode::Minor,
            _ => return Err(invalid()),
        };

        Ok(Self { tonic, mode })
    }

    pub fn to_string_in(&self, notation: NotationConvention) -> String {
        let suffix = match self.mode {
            Mode::Major => "",
            Mode::Minor => "m",
        };
        format!("{}{}", self.tonic.spelled(notation), suffix)
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.tonic.pitch_class
    }

    /// Keys whose signature is written with flats
    pub fn prefers_flats(&self) -> bool {
        let pc = self.tonic.pitch_class.value();
        match self.mode {
            // F Bb Eb Ab Db Gb
            Mode::Major => matches!(pc, 5 | 10 | 3 | 8 | 1 | 6),
            // Dm Gm Cm Fm Bbm Ebm
            Mode::Minor => matches!(pc, 2 | 7 | 0 | 5 | 10 | 3),
        }
    }

    /// Preferred accidental for spelling chords in this key
    pub fn spelling(&self) -> Accidental {
        if self.prefers_flats() {
            Accidental::Flat
        } else {
            Accidental::Sharp
        }
    }

    /// The key moved by `semitones`, spelled according to its new signature
    pub fn transposed(&self, semitones: i32) -> Self {
        let pitch_class = self.tonic.pitch_class.shifted(semitones);
        let mut key = Self::new(natural_spelling(pitch_class), self.mode);
        if pitch_class.is_black_key() {
            key.tonic.accidental = key.spelling();
        }
        key
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_in(NotationConvention::English))
    }
}

fn natural_spelling(pitch_class: PitchClass) -> Note {
    let accidental = if pitch_class.is_black_key() {
        Accidental::Sharp
    } else {
        Accidental::Natural
    };
    Note::new(pitch_class, accidental)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: NotationConvention = NotationConvention::English;
    const CE: NotationConvention = NotationConvention::CentralEuropean;

    #[test]
    fn test_parse_keys() {
        let key = Key::parse("Am", EN).unwrap();
        assert_eq!(key.pitch_class().value(), 9);
        assert_eq!(key.mode, Mode::Minor);

        let key = Key::parse("Eb", EN).unwrap();
        assert_eq!(key.pitch_class().value(), 3);
        assert_eq!(key.mode, Mode::Major);
        assert_eq!(key.to_string(), "Eb");

        let key = Key::parse("Hmi", CE).unwrap();
        assert_eq!(key.pitch_class().value(), 11);
        assert_eq!(key.to_string_in(CE), "Hm");
        assert_eq!(key.to_string_in(EN), "Bm");
    }

    #[test]
    fn test_invalid_keys() {
        assert!(Key::parse("", EN).is_err());
        assert!(Key::parse("C7", EN).is_err());
        assert!(Key::parse("X", EN).is_err());
    }

    #[test]
    fn test_default_key_is_c_major() {
        assert_eq!(Key::default().to_string(), "C");
        assert_eq!(Key::default().mode, Mode::Major);
    }

    #[test]
    fn test_flat_preference() {
        assert!(Key::parse("F", EN).unwrap().prefers_flats());
        assert!(Key::parse("Dm", EN).unwrap().prefers_flats());
        assert!(!Key::parse("G", EN).unwrap().prefers_flats());
        assert!(!Key::parse("Em", EN).unwrap().prefers_flats());
    }

    #[test]
    fn test_transposed_key_spelling() {
        let c = Key::parse("C", EN).unwrap();
        assert_eq!(c.transposed(3).to_string(), "Eb");
        assert_eq!(c.transposed(-1).to_string(), "B");
        assert_eq!(c.transposed(6).to_string(), "Gb");
        let a_minor = Key::parse("Am", EN).unwrap();
        assert_eq!(a_minor.transposed(1).to_string(), "Bbm");
        assert_eq!(a_minor.transposed(-3).to_string(), "F#m");
    }
}
