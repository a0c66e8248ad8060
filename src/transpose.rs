//! # Transposition & Notation Engine
//!
//! Shifts chord pitch classes by a number of semitones or towards a target key, applies
//! the capo offset, and re-prints chords in either notation convention.
//!
//! ## Semitone Delta
//! - Directly: [`Transposition::by`] with a signed number of semitones
//! - From keys: [`Transposition::between`] uses `(target - source) mod 12` and also
//!   remembers whether the target key is written with flats
//!
//! A spelling preference never touches a chord when the shift is a whole number of
//! octaves, so a capo that cancels the delta leaves the chords exactly as written.
//!
//! ## Capo
//! A capo of `c` frets means the chords in the source are already fingered `c`
//! semitones below what sounds, so the delta used for display is `delta - c`.
//! [`Transposition::with_capo`] applies it once for the whole render.
//!
//! ## Notation
//! Notation conversion re-prints a chord without touching its pitch classes, so it
//! commutes with transposition.
//!
//! ## Example
//! ```rust
//! use chordbook::{transpose_chord_text, NotationConvention, Transposition};
//!
//! let up_two = Transposition::by(2);
//! let en = NotationConvention::English;
//! let shifted: Vec<String> = ["Am", "F", "C", "G"]
//!     .iter()
//!     .map(|c| transpose_chord_text(c, &up_two, en, en).unwrap())
//!     .collect();
//! assert_eq!(shifted, vec!["Bm", "G", "D", "A"]);
//! ```

use crate::chord::{Accidental, ChordSymbol, NotationConvention, SEMITONES_IN_OCTAVE};
use crate::error::ChordError;
use crate::key::Key;

/// Transpose a single chord by the given number of semitones.
///
/// Root and bass move together; quality and spelling preference are untouched, so
/// `transpose(&transpose(c, n), -n) == c`.
pub fn transpose(symbol: &ChordSymbol, semitones: i32) -> ChordSymbol {
    ChordSymbol {
        root: symbol.root.transposed(semitones),
        quality: symbol.quality.clone(),
        bass: symbol.bass.map(|bass| bass.transposed(semitones)),
    }
}

/// Semitones to move from `from` up to `to`, in `0..12`
pub fn semitones_between(from: &Key, to: &Key) -> i32 {
    from.pitch_class().semitones_to(to.pitch_class())
}

/// A semitone shift plus an optional spelling preference, applied to every chord of a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transposition {
    semitones: i32,
    spelling: Option<Accidental>,
}

impl Transposition {
    /// No shift, original spellings
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn by(semitones: i32) -> Self {
        Self {
            semitones,
            spelling: None,
        }
    }

    /// Shift from the song's key to a target key, spelling black keys the way the
    /// target key signature does.
    pub fn between(from: &Key, to: &Key) -> Self {
        Self {
            semitones: semitones_between(from, to),
            spelling: Some(to.spelling()),
        }
    }

    /// Compensate for a capo placed on fret `capo`
    pub fn with_capo(self, capo: i32) -> Self {
        Self {
            semitones: self.semitones - capo,
            ..self
        }
    }

    /// Spell black keys of the result with `accidental`
    pub fn with_spelling(self, accidental: Accidental) -> Self {
        Self {
            spelling: Some(accidental),
            ..self
        }
    }

    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    /// Effective shift in `0..12`
    pub fn normalized(&self) -> i32 {
        self.semitones.rem_euclid(SEMITONES_IN_OCTAVE)
    }

    pub fn spelling(&self) -> Option<Accidental> {
        self.spelling
    }

    /// True when chords come out exactly as they went in
    pub fn is_identity(&self) -> bool {
        self.normalized() == 0
    }

    /// Shift `symbol`. The spelling preference only applies when pitches actually move;
    /// a shift of whole octaves keeps every chord as written.
    pub fn apply(&self, symbol: &ChordSymbol) -> ChordSymbol {
        let shifted = transpose(symbol, self.semitones);
        match self.spelling {
            Some(accidental) if !self.is_identity() => shifted.with_spelling(accidental),
            _ => shifted,
        }
    }

    /// The key the song ends up in, used for display
    pub fn apply_to_key(&self, key: &Key) -> Key {
        key.transposed(self.semitones)
    }
}

/// Parse `text` in `input`, transpose it and print it in `output`.
///
/// # Errors
/// Returns [`ChordError::InvalidChordSymbol`] when the text is not a chord; callers
/// rendering a whole song keep the original text in that case.
pub fn transpose_chord_text(
    text: &str,
    transposition: &Transposition,
    input: NotationConvention,
    output: NotationConvention,
) -> Result<String, ChordError> {
    let symbol = ChordSymbol::parse(text, input)?;
    Ok(transposition.apply(&symbol).to_string_in(output))
}

/// Re-print a chord in another notation without changing its pitch classes
pub fn convert_chord_notation(
    text: &str,
    from: NotationConvention,
    to: NotationConvention,
) -> Result<String, ChordError> {
    if from == to {
        // Still validate, callers rely on the error for non-chords
        ChordSymbol::parse(text, from)?;
        return Ok(text.to_string());
    }
    Ok(ChordSymbol::parse(text, from)?.to_string_in(to))
}
