//! Property tests for transposition and notation conversion

use chordbook::{
    convert_chord_notation, render_song, transpose, ChordSymbol, NotationConvention,
    RenderOptions, Transposition,
};
use proptest::prelude::*;

const ROOTS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];
const QUALITIES: [&str; 8] = ["", "m", "7", "maj7", "m7", "sus4", "dim", "6/9"];

fn chord_text() -> impl Strategy<Value = String> {
    (
        prop::sample::select(ROOTS.to_vec()),
        prop::sample::select(QUALITIES.to_vec()),
        prop::option::of(prop::sample::select(ROOTS.to_vec())),
    )
        .prop_map(|(root, quality, bass)| match bass {
            Some(bass) => format!("{}{}/{}", root, quality, bass),
            None => format!("{}{}", root, quality),
        })
}

fn notation() -> impl Strategy<Value = NotationConvention> {
    prop_oneof![
        Just(NotationConvention::English),
        Just(NotationConvention::CentralEuropean),
    ]
}

proptest! {
    #[test]
    fn transposition_round_trips(text in chord_text(), delta in -24i32..24) {
        let chord = ChordSymbol::parse(&text, NotationConvention::English).unwrap();
        prop_assert_eq!(transpose(&transpose(&chord, delta), -delta), chord);
    }

    #[test]
    fn transposition_by_octave_is_identity(text in chord_text(), octaves in -3i32..3) {
        let chord = ChordSymbol::parse(&text, NotationConvention::English).unwrap();
        prop_assert_eq!(transpose(&chord, octaves * 12), chord);
    }

    #[test]
    fn notation_commutes_with_transposition(
        text in chord_text(),
        delta in -12i32..12,
        target in notation(),
    ) {
        let english = NotationConvention::English;
        let chord = ChordSymbol::parse(&text, english).unwrap();
        let shifted = Transposition::by(delta);

        let convert_then_transpose = {
            let converted = convert_chord_notation(&text, english, target).unwrap();
            let parsed = ChordSymbol::parse(&converted, target).unwrap();
            shifted.apply(&parsed).to_string_in(target)
        };
        let transpose_then_convert = {
            let moved = shifted.apply(&chord).to_string_in(english);
            convert_chord_notation(&moved, english, target).unwrap()
        };
        prop_assert_eq!(convert_then_transpose, transpose_then_convert);
    }

    #[test]
    fn render_with_capo_matches_shifted_render(
        chords in prop::collection::vec(chord_text(), 1..6),
        capo in 0i32..8,
        delta in -6i32..6,
    ) {
        let line: String = chords.iter().map(|c| format!("[{}]la ", c)).collect();
        let source = format!("{{start_of_verse}}\n{}\n{{end_of_verse}}", line);
        let with_capo = RenderOptions { capo: Some(capo), transpose: delta, ..RenderOptions::default() };
        let shifted = RenderOptions { capo: Some(0), transpose: delta - capo, ..RenderOptions::default() };
        prop_assert_eq!(render_song(&source, &with_capo).html, render_song(&source, &shifted).html);
    }

    #[test]
    fn recalled_chorus_repeats_definition(chords in prop::collection::vec(chord_text(), 1..6)) {
        let line: String = chords.iter().map(|c| format!("[{}]la ", c)).collect();
        let source = format!("{{start_of_chorus}}\n{}\n{{end_of_chorus}}\n{{chorus}}\n{{chorus}}", line);
        let options = RenderOptions { shorthand: false, compress_recalls: false, ..RenderOptions::default() };
        let html = render_song(&source, &options).html;
        prop_assert_eq!(html.matches("recalled-section").count(), 2);
        prop_assert_eq!(html.matches("repeated-chords").count(), 2);
        prop_assert!(!html.contains("force-shown"));
    }
}
