//! Falsification Tests
//!
//! Each test states a claim about the library's observable behavior that a
//! single counterexample would refute.
//!
//! Run: cargo test --test falsification_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use chromagraph::convert::{edges, ConversionGraph, Edge};
use chromagraph::numeric::{IncrementProfile, Operator, Rounding, TokenKind};
use chromagraph::{
    apply_increment, channels, convert, detect_model, parse, serialize, serialize_alt, Channel,
    Color, Compliance, Error, Model,
};

// ============================================================================
// SECTION 1: PARSING
// ============================================================================

/// Claim 1: Short hex parses to doubled, uppercase pairs
#[test]
fn claim_01_short_hex_expands() {
    let (channels, model) = parse("#0af", None).unwrap();
    assert_eq!(model, Model::Hex);
    assert_eq!(channels, channels!["00", "AA", "FF"]);
}

/// Claim 2: Percent rgb channels scale to 0-255 with round-half-up
#[test]
fn claim_02_percent_rgb_rounds_half_up() {
    let (channels, _) = parse("rgb(100%,50%,25%)", None).unwrap();
    assert_eq!(channels, channels![255, 127, 64]);
}

/// Claim 3: Parsed hue is wrapped into [0, 360)
#[test]
fn claim_03_parsed_hue_wraps() {
    let (channels, model) = parse("hsl(1280,100%,50%)", None).unwrap();
    assert_eq!(model, Model::Hsl);
    assert_eq!(channels, channels![200, 100, 50]);
}

/// Claim 4: Detection follows registration order; bare words are keywords
#[test]
fn claim_04_bare_words_are_keywords() {
    assert_eq!(detect_model("aqua"), Some(Model::Keyword));
    assert_eq!(detect_model("gray"), Some(Model::Keyword));
    assert_eq!(detect_model("gray(50)"), Some(Model::Gray));
}

/// Claim 5: A malformed input is absence, and parse turns it into an error
#[test]
fn claim_05_unsupported_format() {
    assert_eq!(detect_model("rgb(0, 0, 0, 0)"), None);
    assert!(matches!(
        parse("rgb(0, 0, 0, 0)", None),
        Err(Error::UnsupportedFormat(_))
    ));
}

/// Claim 6: Arrays are accepted only if their rendered form is valid
#[test]
fn claim_06_array_shape_is_validated() {
    assert_eq!(detect_model(channels!["rgba", 1, 2, 3, 0.5]), Some(Model::Rgb));
    assert_eq!(detect_model(channels!["rgba", 1, 2, 3, 40]), None);
    assert_eq!(detect_model(channels!["hsl", 1, 2]), None);
}

// ============================================================================
// SECTION 2: CONVERSION GRAPH
// ============================================================================

/// Claim 7: Composed paths are found breadth-first through rgb
#[test]
fn claim_07_shortest_paths() {
    let graph = ConversionGraph::with_edges(edges::standard_edges());
    assert_eq!(
        graph.path(Model::Keyword, Model::Hsv).unwrap(),
        vec![Model::Keyword, Model::Rgb, Model::Hsv]
    );
    assert_eq!(graph.path(Model::Gray, Model::Hsv).unwrap(), vec![Model::Gray, Model::Hsv]);
}

/// Claim 8: Each pair is searched once; later requests hit the cache
#[test]
fn claim_08_paths_are_memoized() {
    let graph = ConversionGraph::with_edges(edges::standard_edges());
    for _ in 0..10 {
        graph.convert(&channels!["aqua"], Model::Keyword, Model::Hsl).unwrap();
    }
    assert_eq!(graph.cached_len(), 1);
}

/// Claim 9: A graph that cannot reach the target says so
#[test]
fn claim_09_no_path_is_an_error() {
    let graph = ConversionGraph::with_edges([Edge::new(Model::Hex, Model::Rgb, edges::hex_to_rgb)]);
    assert_eq!(
        graph.path(Model::Rgb, Model::Hex).unwrap_err(),
        Error::NoConversionPath {
            from: "rgb",
            to: "hex"
        }
    );
}

/// Claim 10: Only the final result is rounded
#[test]
fn claim_10_intermediate_values_stay_unrounded() {
    // gray(50) is 127.5 in rgb; hex truncates that to 7F.
    assert_eq!(
        convert(&channels![50], Model::Gray, Model::Hex).unwrap(),
        channels!["7F", "7F", "7F"]
    );
    assert_eq!(convert(&channels![50], Model::Gray, Model::Rgb).unwrap(), channels![128, 128, 128]);
}

/// Claim 11: Keywords resolve to the nearest table entry
#[test]
fn claim_11_nearest_keyword() {
    assert_eq!(
        convert(&channels![1, 1, 1], Model::Rgb, Model::Keyword).unwrap(),
        channels!["black"]
    );
    assert_eq!(
        convert(&channels![250, 0, 5], Model::Rgb, Model::Keyword).unwrap(),
        channels!["red"]
    );
}

/// Claim 12: Unknown keywords fail at conversion time, not at parse time
#[test]
fn claim_12_unknown_keyword() {
    let color: Color = "notacolor".parse().unwrap();
    assert_eq!(
        color.to_hex().unwrap_err(),
        Error::UnknownKeyword("notacolor".to_string())
    );
}

// ============================================================================
// SECTION 3: SERIALIZATION
// ============================================================================

/// Claim 13: Alpha switches the functional notation
#[test]
fn claim_13_alpha_notation() {
    assert_eq!(serialize(&channels![1, 2, 3], Model::Rgb), "rgb(1, 2, 3)");
    assert_eq!(serialize(&channels![1, 2, 3, 0.5], Model::Rgb), "rgba(1, 2, 3, 0.5)");
    assert_eq!(serialize(&channels![1, 2, 3, 0.5], Model::Hsv), "hsva(1, 2%, 3%, 0.5)");
}

/// Claim 14: Short hex only contracts doubled pairs
#[test]
fn claim_14_short_hex() {
    assert_eq!(serialize_alt(&channels!["AA", "BB", "CC"], Model::Hex, "shex").unwrap(), "#ABC");
    assert_eq!(serialize_alt(&channels!["AA", "BB", "CD"], Model::Hex, "shex").unwrap(), "#AABBCD");
}

// ============================================================================
// SECTION 4: INCREMENTS
// ============================================================================

/// Claim 15: The three delta forms compute absolute, base and relative deltas
#[test]
fn claim_15_increment_forms() {
    let profile = IncrementProfile::new(&[
        TokenKind::Number,
        TokenKind::Percent,
        TokenKind::RelativePercent,
    ])
    .percent_base(200.0);
    assert_eq!(apply_increment(50.0, "5", Operator::Add, &profile).unwrap(), 55.0);
    assert_eq!(apply_increment(50.0, "10%", Operator::Add, &profile).unwrap(), 70.0);
    assert_eq!(apply_increment(50.0, "10%%", Operator::Subtract, &profile).unwrap(), 45.0);
}

/// Claim 16: Floating-point artifacts are visible unless rounding is asked for
#[test]
fn claim_16_rounding_is_opt_in() {
    let raw = IncrementProfile::new(&[TokenKind::Number]);
    assert_ne!(apply_increment(0.1, "0.2", Operator::Add, &raw).unwrap(), 0.3);
    let rounded = raw.rounding(Rounding::Places(1));
    assert_eq!(apply_increment(0.1, "0.2", Operator::Add, &rounded).unwrap(), 0.3);
}

/// Claim 17: Tokens outside the accepted grammar are rejected
#[test]
fn claim_17_bad_increment() {
    let profile = IncrementProfile::new(&[TokenKind::UnsignedInt]);
    assert_eq!(
        apply_increment(1.0, "-1", Operator::Add, &profile).unwrap_err(),
        Error::InvalidIncrement("-1".to_string())
    );
}

// ============================================================================
// SECTION 5: COLOR OPERATIONS
// ============================================================================

/// Claim 18: Operations return new values and leave the receiver untouched
#[test]
fn claim_18_values_are_immutable() {
    let color: Color = "hsl(240, 100%, 50%)".parse().unwrap();
    let before = color.clone();
    let _ = color.spin(90).unwrap();
    let _ = color.fade(0.5).unwrap();
    assert_eq!(color, before);
}

/// Claim 19: Fading a color without alpha support moves it to rgba
#[test]
fn claim_19_fade_switches_to_rgba() {
    let faded = "aqua".parse::<Color>().unwrap().fade("50%").unwrap();
    assert_eq!(faded.model(), Model::Rgb);
    assert_eq!(faded.channels(), &channels![0, 255, 255, 0.5][..]);
}

/// Claim 20: Black on white passes every WCAG level
#[test]
fn claim_20_black_on_white() {
    let black: Color = "#000".parse().unwrap();
    let white: Color = "white".parse().unwrap();
    let wcag = black.wcag(&white).unwrap();
    assert!(wcag.normal_aa && wcag.normal_aaa && wcag.big_aa && wcag.big_aaa);
    assert_eq!(black.compliance(&white).unwrap(), Compliance::Yes);
}

/// Claim 21: Gray inputs convert to achromatic cylindrical colors
#[test]
fn claim_21_gray_is_achromatic() {
    let gray: Color = "lumagray(40)".parse().unwrap();
    assert_eq!(gray.to_hsl().unwrap().channels(), &channels![0, 0, 40][..]);
    assert_eq!(gray.to_hsv().unwrap().channels(), &channels![0, 0, 40][..]);
}

/// Claim 22: Numeric channels never render with a signed zero
#[test]
fn claim_22_no_negative_zero() {
    assert_eq!(Channel::Num(-0.0).to_string(), "0");
}
