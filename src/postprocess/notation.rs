//! Re-prints every chord leaf of a formatted document in the display notation.

use crate::chord::NotationConvention;
use crate::dom::Document;
use crate::transpose::convert_chord_notation;

/// Convert chord leaves written in English notation to `notation`.
/// Leaves that are not chords are left as they are.
pub fn convert_notation(doc: &mut Document, notation: NotationConvention) {
    if notation == NotationConvention::English {
        return;
    }

    let converted: Vec<_> = doc
        .find_by_class(doc.root(), "chord")
        .into_iter()
        .filter_map(|leaf| {
            let text = doc.text_content(leaf);
            convert_chord_notation(text.trim(), NotationConvention::English, notation)
                .ok()
                .map(|chord| (leaf, chord))
        })
        .collect();

    for (leaf, chord) in converted {
        doc.set_text(leaf, &chord);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chordpro::{format, parse};
    use crate::error::Warnings;
    use crate::transpose::Transposition;

    fn chords_after(source: &str, transposition: Transposition) -> Vec<String> {
        let mut warnings = Warnings::new();
        let mut doc = format(
            &parse(source),
            &transposition,
            NotationConvention::English,
            &mut warnings,
        );
        convert_notation(&mut doc, NotationConvention::CentralEuropean);
        doc.find_by_class(doc.root(), "chord")
            .into_iter()
            .map(|leaf| doc.text_content(leaf))
            .collect()
    }

    #[test]
    fn test_b_and_h() {
        assert_eq!(
            chords_after("[Bb]a [B7]b [F#m]c [G/B]d", Transposition::identity()),
            vec!["B", "H7", "F#m", "G/H"]
        );
    }

    #[test]
    fn test_after_transposition() {
        assert_eq!(chords_after("[A]a [Am]b", Transposition::by(2)), vec!["H", "Hm"]);
    }

    #[test]
    fn test_non_chords_untouched() {
        assert_eq!(chords_after("[N.C.]a", Transposition::identity()), vec!["N.C."]);
    }
}
