//! # Chord Token Model
//!
//! Parses and prints single chord symbols (`Am`, `F#m7`, `Bb/D`, `Hmi`) against a fixed
//! chromatic pitch-class table.
//!
//! ## Pitch Classes
//! Pitch classes are integers mod 12 with `C = 0` … `B = 11`. Every note spelling is
//! looked up in the sharp and flat tables of the active [`NotationConvention`]:
//!
//! ```text
//! pc               0  1  2  3  4  5  6  7  8  9  10 11
//! English  sharp   C  C# D  D# E  F  F# G  G# A  A# B
//! English  flat    C  Db D  Eb E  F  Gb G  Ab A  Bb B
//! Central  sharp   C  C# D  D# E  F  F# G  G# A  A# H
//! Central  flat    C  Db D  Eb E  F  Gb G  Ab A  B  H
//! ```
//!
//! ## Spelling
//! A [`Note`] keeps the [`Accidental`] it was written with. Printing uses the flat table
//! when that accidental is `Flat` and the sharp table otherwise, so `Db` prints back as
//! `Db` and `C#` as `C#`. Transposition keeps the accidental, which makes it both the
//! record of the original spelling and the spelling preference for black keys.
//!
//! ## Quality
//! Everything after the root (and before an optional `/bass`) is the quality, stored
//! verbatim and never interpreted, so unusual suffixes round-trip exactly.
//!
//! ## Example
//! ```rust
//! use chordbook::{ChordSymbol, NotationConvention};
//!
//! let chord = ChordSymbol::parse("Bbmaj7/D", NotationConvention::English).unwrap();
//! assert_eq!(chord.root.pitch_class.value(), 10);
//! assert_eq!(chord.quality, "maj7");
//! assert_eq!(chord.to_string_in(NotationConvention::CentralEuropean), "Bmaj7/D");
//! ```

use std::fmt;

use crate::error::ChordError;

pub const SEMITONES_IN_OCTAVE: i32 = 12;

const ENGLISH_SHARP: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const ENGLISH_FLAT: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];
const CENTRAL_SHARP: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "H"];
const CENTRAL_FLAT: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "B", "H"];

/// A pitch class in `0..12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wrap any semitone count into a pitch class
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(SEMITONES_IN_OCTAVE) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn shifted(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Semitones to go up from `self` to reach `other`, in `0..12`
    pub fn semitones_to(self, other: PitchClass) -> i32 {
        (other.0 as i32 - self.0 as i32).rem_euclid(SEMITONES_IN_OCTAVE)
    }

    pub fn is_black_key(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }
}

/// Accidental a note was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

/// Letter-naming scheme used to print pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotationConvention {
    /// `Bb` and `B`
    #[default]
    English,
    /// `B` and `H` (Czech, German, Polish, Nordic)
    CentralEuropean,
}

impl NotationConvention {
    /// Parse a notation name as used in options files and on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "central-european" | "central_european" | "central" | "czech" | "german" | "cz"
            | "de" => Some(Self::CentralEuropean),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::CentralEuropean => "central-european",
        }
    }

    fn sharp_names(self) -> &'static [&'static str; 12] {
        match self {
            Self::English => &ENGLISH_SHARP,
            Self::CentralEuropean => &CENTRAL_SHARP,
        }
    }

    fn flat_names(self) -> &'static [&'static str; 12] {
        match self {
            Self::English => &ENGLISH_FLAT,
            Self::CentralEuropean => &CENTRAL_FLAT,
        }
    }
}

/// A pitch class together with the accidental it is spelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub accidental: Accidental,
}

impl Note {
    pub fn new(pitch_class: PitchClass, accidental: Accidental) -> Self {
        Self { pitch_class, accidental }
    }

    /// Parse an exact note spelling such as `C`, `F#`, `Eb` or `H`.
    pub fn parse(spelling: &str, notation: NotationConvention) -> Option<Self> {
        let position = |table: &[&str; 12]| table.iter().position(|name| *name == spelling);

        if let Some(index) = position(notation.sharp_names()) {
            let pitch_class = PitchClass::new(index as i32);
            let accidental = if pitch_class.is_black_key() {
                Accidental::Sharp
            } else {
                Accidental::Natural
            };
            return Some(Self::new(pitch_class, accidental));
        }

        // White keys are all in the sharp table, so a flat-table hit is a flat
        position(notation.flat_names())
            .map(|index| Self::new(PitchClass::new(index as i32), Accidental::Flat))
    }

    /// Parse the note at the start of `text`, returning it with the unparsed rest.
    ///
    /// A letter followed by `#` or `b` must form a known spelling; `Cb` or a
    /// Central European `Hb` are rejected rather than read as `C` + quality `b`.
    pub fn parse_prefix(text: &str, notation: NotationConvention) -> Option<(Self, &str)> {
        let letter = text.chars().next()?;
        let letter_len = letter.len_utf8();

        if let Some(sign @ ('#' | 'b')) = text[letter_len..].chars().next() {
            let end = letter_len + sign.len_utf8();
            return Self::parse(&text[..end], notation).map(|note| (note, &text[end..]));
        }

        Self::parse(&text[..letter_len], notation).map(|note| (note, &text[letter_len..]))
    }

    pub fn spelled(self, notation: NotationConvention) -> &'static str {
        let table = match self.accidental {
            Accidental::Flat => notation.flat_names(),
            Accidental::Natural | Accidental::Sharp => notation.sharp_names(),
        };
        table[self.pitch_class.value() as usize]
    }

    pub fn transposed(self, semitones: i32) -> Self {
        Self::new(self.pitch_class.shifted(semitones), self.accidental)
    }
}

/// A single chord symbol: root, verbatim quality suffix and optional bass note
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChordSymbol {
    pub root: Note,
    pub quality: String,
    pub bass: Option<Note>,
}

impl ChordSymbol {
    /// Parse a chord symbol written in `notation`.
    ///
    /// The bass is only split off when the text after the last `/` is a note, so
    /// `C6/9` keeps `6/9` as its quality.
    ///
    /// # Errors
    /// Returns [`ChordError::InvalidChordSymbol`] when the root is not a note.
    pub fn parse(text: &str, notation: NotationConvention) -> Result<Self, ChordError> {
        let trimmed = text.trim();
        let (root, rest) = Note::parse_prefix(trimmed, notation)
            .ok_or_else(|| ChordError::InvalidChordSymbol(text.to_string()))?;

        if let Some(slash) = rest.rfind('/') {
            if let Some(bass) = Note::parse(&rest[slash + 1..], notation) {
                return Ok(Self {
                    root,
                    quality: rest[..slash].to_string(),
                    bass: Some(bass),
                });
            }
        }

        Ok(Self {
            root,
            quality: rest.to_string(),
            bass: None,
        })
    }

    pub fn to_string_in(&self, notation: NotationConvention) -> String {
        let mut text = String::from(self.root.spelled(notation));
        text.push_str(&self.quality);
        if let Some(bass) = self.bass {
            text.push('/');
            text.push_str(bass.spelled(notation));
        }
        text
    }

    /// Respell root and bass with the given accidental preference
    pub fn with_spelling(mut self, accidental: Accidental) -> Self {
        self.root.accidental = accidental;
        if let Some(bass) = self.bass.as_mut() {
            bass.accidental = accidental;
        }
        self
    }

    /// `m`, `mi`, `min`, `m7`, `-7` … but not `maj7`
    pub fn is_minor(&self) -> bool {
        let quality = self.quality.as_str();
        (quality.starts_with('m') && !quality.starts_with("maj")) || quality.starts_with('-')
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_in(NotationConvention::English))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: NotationConvention = NotationConvention::English;
    const CE: NotationConvention = NotationConvention::CentralEuropean;

    #[test]
    fn test_parse_simple_chords() {
        let am = ChordSymbol::parse("Am", EN).unwrap();
        assert_eq!(am.root.pitch_class.value(), 9);
        assert_eq!(am.quality, "m");
        assert_eq!(am.bass, None);

        let fsharp = ChordSymbol::parse("F#m7", EN).unwrap();
        assert_eq!(fsharp.root, Note::new(PitchClass::new(6), Accidental::Sharp));
        assert_eq!(fsharp.quality, "m7");
    }

    #[test]
    fn test_enharmonic_synonyms_share_pitch_class() {
        let db = ChordSymbol::parse("Db", EN).unwrap();
        let csharp = ChordSymbol::parse("C#", EN).unwrap();
        assert_eq!(db.root.pitch_class, csharp.root.pitch_class);
        assert_eq!(db.to_string(), "Db");
        assert_eq!(csharp.to_string(), "C#");
    }

    #[test]
    fn test_bass_note_and_slash_quality() {
        let slash = ChordSymbol::parse("G/B", EN).unwrap();
        assert_eq!(slash.bass.map(|b| b.pitch_class.value()), Some(11));
        assert_eq!(slash.quality, "");

        let six_nine = ChordSymbol::parse("C6/9", EN).unwrap();
        assert_eq!(six_nine.bass, None);
        assert_eq!(six_nine.quality, "6/9");
        assert_eq!(six_nine.to_string(), "C6/9");
    }

    #[test]
    fn test_unusual_quality_round_trips() {
        for text in ["Cmaj7(#11)", "Esus4add9", "A7b9", "Dm7b5/Ab", "G(omit3)"] {
            let chord = ChordSymbol::parse(text, EN).unwrap();
            assert_eq!(chord.to_string_in(EN), text);
        }
    }

    #[test]
    fn test_central_european_tables() {
        let h = ChordSymbol::parse("Hmi", CE).unwrap();
        assert_eq!(h.root.pitch_class.value(), 11);
        assert_eq!(h.to_string_in(EN), "Bmi");

        let b = ChordSymbol::parse("B7", CE).unwrap();
        assert_eq!(b.root.pitch_class.value(), 10);
        assert_eq!(b.to_string_in(EN), "Bb7");

        let bb = ChordSymbol::parse("Bb", EN).unwrap();
        assert_eq!(bb.to_string_in(CE), "B");
        assert_eq!(ChordSymbol::parse("B", EN).unwrap().to_string_in(CE), "H");
    }

    #[test]
    fn test_invalid_roots() {
        assert!(ChordSymbol::parse("", EN).is_err());
        assert!(ChordSymbol::parse("N.C.", EN).is_err());
        assert!(ChordSymbol::parse("H7", EN).is_err());
        assert!(ChordSymbol::parse("Cb", EN).is_err());
        assert_eq!(
            ChordSymbol::parse("x", EN),
            Err(ChordError::InvalidChordSymbol("x".to_string()))
        );
    }

    #[test]
    fn test_is_minor() {
        assert!(ChordSymbol::parse("Am", EN).unwrap().is_minor());
        assert!(ChordSymbol::parse("Emi7", EN).unwrap().is_minor());
        assert!(ChordSymbol::parse("D-7", EN).unwrap().is_minor());
        assert!(!ChordSymbol::parse("Cmaj7", EN).unwrap().is_minor());
        assert!(!ChordSymbol::parse("G7", EN).unwrap().is_minor());
    }

    #[test]
    fn test_pitch_class_wraps() {
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(25).value(), 1);
        assert_eq!(PitchClass::new(9).semitones_to(PitchClass::new(2)), 5);
    }

    #[test]
    fn test_notation_names() {
        assert_eq!(NotationConvention::from_name("English"), Some(EN));
        assert_eq!(NotationConvention::from_name("czech"), Some(CE));
        assert_eq!(NotationConvention::from_name("solfege"), None);
        assert_eq!(CE.name(), "central-european");
    }
}
