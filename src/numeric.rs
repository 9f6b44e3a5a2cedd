//! Numeric utilities: rounding, hue wrapping, hex canonicalization,
//! accessibility metrics and the increment (delta-calc) evaluator.
//!
//! # References
//!
//! - W3C (2008). "Web Content Accessibility Guidelines (WCAG) 2.0",
//!   definitions of *relative luminance* and *contrast ratio*.
//! - W3C (2000). "Techniques For Accessibility Evaluation And Repair Tools",
//!   color brightness (YIQ) and color difference formulas.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// Rounding and clamping
// ============================================================================

/// Round to the nearest integer, halves toward positive infinity.
///
/// This is the single rounding rule used for channel output, percentage
/// parsing and increment rounding: `2.5 → 3`, `-2.5 → -2`,
/// `127.49999999999999 → 127`.
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to `places` decimal places.
///
/// The value is shifted through its decimal representation rather than
/// multiplied, so `round_to(0.1 + 0.2, 1)` is exactly `0.3`.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(places as i32);
    let shifted = format!("{value}e{places}")
        .parse::<f64>()
        .unwrap_or(value * scale);
    let rounded = round_half_up(shifted);
    format!("{rounded}e-{places}")
        .parse::<f64>()
        .unwrap_or(rounded / scale)
}

/// Clamp `value` into `[min, max]`.
#[inline]
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

/// Wrap a hue angle into `[0, 360)`.
#[inline]
#[must_use]
pub fn hue_normalize(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

// ============================================================================
// Hex canonicalization
// ============================================================================

fn is_hex_body(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Uppercase a hex string and expand `#RGB` to `#RRGGBB`.
///
/// Anything that is not a 3-digit hex color is only uppercased.
#[must_use]
pub fn to_normalized_hex(s: &str) -> String {
    let upper = s.to_uppercase();
    match upper.strip_prefix('#') {
        Some(body) if is_hex_body(body, 3) => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in body.chars() {
                out.push(c);
                out.push(c);
            }
            out
        }
        _ => upper,
    }
}

/// Uppercase a hex string and contract `#RRGGBB` to `#RGB` when every
/// channel pair is a doubled digit.
#[must_use]
pub fn to_short_hex(s: &str) -> String {
    let upper = s.to_uppercase();
    if let Some(body) = upper.strip_prefix('#') {
        if is_hex_body(body, 6) {
            let bytes = body.as_bytes();
            if bytes.chunks(2).all(|pair| pair[0] == pair[1]) {
                let short: String = bytes.chunks(2).map(|pair| char::from(pair[0])).collect();
                return format!("#{short}");
            }
        }
    }
    upper
}

// ============================================================================
// Accessibility metrics
// ============================================================================

fn linearize(channel: f64) -> f64 {
    let c = channel / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an sRGB triple (channels 0-255), in `[0, 1]`.
#[must_use]
pub fn luma(rgb: [f64; 3]) -> f64 {
    let [r, g, b] = rgb.map(linearize);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// NTSC YIQ brightness of an sRGB triple, in `[0, 255]`.
#[must_use]
pub fn yiq(rgb: [f64; 3]) -> f64 {
    let [r, g, b] = rgb;
    (299.0 * r + 587.0 * g + 114.0 * b) / 1000.0
}

/// WCAG 2.0 contrast compliance of two colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WcagContrast {
    /// Contrast ratio in `[1, 21]`.
    pub ratio: f64,
    /// Normal text (12pt / 16px), level AA: ratio ≥ 4.5.
    pub normal_aa: bool,
    /// Normal text, level AAA: ratio ≥ 7.
    pub normal_aaa: bool,
    /// Large text (18pt, or 14pt bold), level AA: ratio ≥ 3.
    pub big_aa: bool,
    /// Large text, level AAA: ratio ≥ 4.5.
    pub big_aaa: bool,
}

/// Contrast ratio between two sRGB triples with the derived WCAG levels.
#[must_use]
pub fn wcag_contrast(rgb1: [f64; 3], rgb2: [f64; 3]) -> WcagContrast {
    let luma1 = luma(rgb1);
    let luma2 = luma(rgb2);
    let ratio = (luma1.max(luma2) + 0.05) / (luma1.min(luma2) + 0.05);
    WcagContrast {
        ratio,
        normal_aa: ratio >= 4.5,
        normal_aaa: ratio >= 7.0,
        big_aa: ratio >= 3.0,
        big_aaa: ratio >= 4.5,
    }
}

// ============================================================================
// Increment evaluator
// ============================================================================

/// Direction of an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `current + delta`
    Add,
    /// `current - delta`
    Subtract,
}

impl Operator {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
        }
    }
}

/// Token shapes an increment may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `0.5`, `12`: absolute delta.
    Number,
    /// `12`: absolute delta.
    UnsignedInt,
    /// `-12`, `+12`: absolute delta.
    SignedInt,
    /// `10%` (0-100): percentage of the profile's base.
    Percent,
    /// `-10%`: percentage of the profile's base.
    SignedPercent,
    /// `10%%`: percentage of the current value.
    RelativePercent,
    /// `-10%%`: percentage of the current value.
    SignedRelativePercent,
}

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("valid number regex"));
static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid int regex"));
static SIGNED_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid signed int regex"));
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]{1,2}|100)%$").expect("valid percent regex"));
static SIGNED_PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]{1,2}|100)%$").expect("valid signed percent regex")
});
static RELATIVE_PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+%%$").expect("valid relative percent regex"));
static SIGNED_RELATIVE_PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+%%$").expect("valid signed relative percent regex")
});

impl TokenKind {
    /// Order in which token kinds are tried.
    pub const ORDER: [Self; 7] = [
        Self::Number,
        Self::UnsignedInt,
        Self::SignedInt,
        Self::Percent,
        Self::SignedPercent,
        Self::RelativePercent,
        Self::SignedRelativePercent,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            Self::Number => &NUMBER_RE,
            Self::UnsignedInt => &INT_RE,
            Self::SignedInt => &SIGNED_INT_RE,
            Self::Percent => &PERCENT_RE,
            Self::SignedPercent => &SIGNED_PERCENT_RE,
            Self::RelativePercent => &RELATIVE_PERCENT_RE,
            Self::SignedRelativePercent => &SIGNED_RELATIVE_PERCENT_RE,
        }
    }

    /// Whether `token` has this shape.
    #[must_use]
    pub fn matches(self, token: &str) -> bool {
        self.regex().is_match(token)
    }
}

/// Rounding applied to an increment result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Keep the raw floating-point result.
    #[default]
    None,
    /// Round to the nearest integer.
    Integer,
    /// Round to the given number of decimal places.
    Places(u32),
}

impl Rounding {
    /// Apply this rounding to `value`.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Integer => round_half_up(value),
            Self::Places(places) => round_to(value, places),
        }
    }
}

/// Which increment tokens a channel accepts and how they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncrementProfile {
    /// Accepted token kinds.
    pub accepts: &'static [TokenKind],
    /// Base for `Percent` tokens (`10%` of `percent_base`).
    pub percent_base: f64,
    /// Rounding applied to the result.
    pub rounding: Rounding,
}

impl IncrementProfile {
    /// Profile accepting `accepts`, with a percent base of 100 and no rounding.
    #[must_use]
    pub const fn new(accepts: &'static [TokenKind]) -> Self {
        Self {
            accepts,
            percent_base: 100.0,
            rounding: Rounding::None,
        }
    }

    /// Set the percent base.
    #[must_use]
    pub const fn percent_base(mut self, base: f64) -> Self {
        self.percent_base = base;
        self
    }

    /// Set the rounding policy.
    #[must_use]
    pub const fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    fn accepts(&self, kind: TokenKind) -> bool {
        self.accepts.contains(&kind)
    }
}

fn parse_number(text: &str, token: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| Error::InvalidIncrement(token.to_string()))
}

/// Apply an increment token to `current`.
///
/// The token is checked against the accepted kinds in [`TokenKind::ORDER`];
/// the first match decides how the delta is computed:
///
/// - numbers and integers: the token itself,
/// - percentages: `percent_base / 100 * p`,
/// - relative percentages: `|current| / 100 * p`.
///
/// ```
/// use chromagraph::numeric::{apply_increment, IncrementProfile, Operator, TokenKind};
///
/// let profile = IncrementProfile::new(&[TokenKind::RelativePercent]);
/// assert_eq!(apply_increment(10.0, "10%%", Operator::Add, &profile).unwrap(), 11.0);
/// ```
pub fn apply_increment(
    current: f64,
    token: &str,
    operator: Operator,
    profile: &IncrementProfile,
) -> Result<f64> {
    let kind = TokenKind::ORDER
        .into_iter()
        .filter(|kind| profile.accepts(*kind))
        .find(|kind| kind.matches(token))
        .ok_or_else(|| Error::InvalidIncrement(token.to_string()))?;

    let delta = match kind {
        TokenKind::Number | TokenKind::UnsignedInt | TokenKind::SignedInt => {
            parse_number(token, token)?
        }
        TokenKind::Percent | TokenKind::SignedPercent => {
            let pct = parse_number(token.trim_end_matches('%'), token)?;
            profile.percent_base / 100.0 * pct
        }
        TokenKind::RelativePercent | TokenKind::SignedRelativePercent => {
            let pct = parse_number(token.trim_end_matches('%'), token)?;
            current.abs() / 100.0 * pct
        }
    };

    Ok(profile.rounding.apply(operator.apply(current, delta)))
}
