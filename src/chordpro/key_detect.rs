//! Key inference from the chords of a song.
//!
//! Every major and minor key is scored by how many of the song's chords are diatonic
//! triads of that key (I ii iii IV V vi, or i iio III iv v VI for minor). Ties go to the
//! key whose tonic chord opens the song, then to the one whose tonic chord closes it,
//! then to major keys in chromatic order from C.

use crate::chord::{ChordSymbol, NotationConvention, PitchClass};
use crate::key::{Key, Mode};

/// Semitone offsets and minor-ness of the diatonic triads of a major key
const MAJOR_TRIADS: [(i32, bool); 6] = [
    (0, false),
    (2, true),
    (4, true),
    (5, false),
    (7, false),
    (9, true),
];

/// Guess the key of a chord progression; `None` when no chord parses
pub fn guess_key<'a>(
    chords: impl IntoIterator<Item = &'a str>,
    notation: NotationConvention,
) -> Option<Key> {
    let chords: Vec<(PitchClass, bool)> = chords
        .into_iter()
        .filter_map(|chord| ChordSymbol::parse(chord, notation).ok())
        .map(|chord| (chord.root.pitch_class, chord.is_minor()))
        .collect();
    let first = *chords.first()?;
    let last = *chords.last()?;

    let candidates = (0..12).flat_map(|pc| {
        let pitch_class = PitchClass::new(pc);
        [Key::major(pitch_class), Key::minor(pitch_class)]
    });

    let mut best: Option<(Key, (usize, bool, bool))> = None;
    for key in candidates {
        let score = chords.iter().filter(|chord| is_diatonic(&key, **chord)).count();
        let rank = (score, tonic_triad(&key) == first, tonic_triad(&key) == last);
        // Strictly greater keeps the earliest candidate on a full tie
        if best.as_ref().map_or(true, |(_, best_rank)| rank > *best_rank) {
            best = Some((key, rank));
        }
    }

    best.map(|(key, _)| key.transposed(0))
}

fn tonic_triad(key: &Key) -> (PitchClass, bool) {
    (key.pitch_class(), key.mode == Mode::Minor)
}

fn is_diatonic(key: &Key, (root, minor): (PitchClass, bool)) -> bool {
    // A minor key shares its triads with the relative major
    let major_tonic = match key.mode {
        Mode::Major => key.pitch_class(),
        Mode::Minor => key.pitch_class().shifted(3),
    };
    MAJOR_TRIADS
        .iter()
        .any(|(offset, triad_minor)| major_tonic.shifted(*offset) == root && *triad_minor == minor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(chords: &[&str]) -> Option<String> {
        guess_key(chords.iter().copied(), NotationConvention::English).map(|k| k.to_string())
    }

    #[test]
    fn test_guess_major_key() {
        assert_eq!(guess(&["G", "D", "Em", "C", "G"]), Some("G".to_string()));
        assert_eq!(guess(&["C", "F", "G", "C"]), Some("C".to_string()));
    }

    #[test]
    fn test_guess_relative_minor_by_tonic() {
        assert_eq!(guess(&["Am", "F", "C", "G", "Am"]), Some("Am".to_string()));
    }

    #[test]
    fn test_guess_spells_flat_keys() {
        assert_eq!(guess(&["Bb", "Eb", "F", "Bb"]), Some("Bb".to_string()));
        assert_eq!(guess(&["Eb", "Ab", "Bb7", "Eb"]), Some("Eb".to_string()));
    }

    #[test]
    fn test_guess_central_european_input() {
        let key = guess_key(["Hm", "G", "D", "A", "Hm"], NotationConvention::CentralEuropean);
        assert_eq!(key.map(|k| k.to_string()), Some("Bm".to_string()));
    }

    #[test]
    fn test_no_chords_no_key() {
        assert_eq!(guess(&[]), None);
        assert_eq!(guess(&["N.C.", "x"]), None);
    }
}
