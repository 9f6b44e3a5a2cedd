//! Color model registry.
//!
//! One immutable [`ModelDescriptor`] per supported color space, built once on
//! first use. A descriptor knows its channel layout, its string grammar, how
//! to clamp channels into range, and how to round conversion output.
//!
//! | model      | channels        | alpha | rounded |
//! |------------|-----------------|-------|---------|
//! | `hex`      | `rr gg bb`      | no    | no      |
//! | `rgb`      | `r g b`         | yes   | yes     |
//! | `hsl`      | `h s l`         | yes   | yes     |
//! | `hsv`      | `h s v`         | yes   | yes     |
//! | `gray`     | `gray`          | no    | yes     |
//! | `lumagray` | `lumagray`      | no    | yes     |
//! | `keyword`  | `keyword`       | no    | no      |

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, Channels};
use crate::error::{Error, Result};
use crate::numeric::{clamp, hue_normalize, round_half_up, to_normalized_hex, to_short_hex};

/// A registered color model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum Model {
    /// `#RRGGBB`, channels are two-digit hex strings.
    Hex,
    /// `rgb(r, g, b)`, channels 0-255.
    Rgb,
    /// `hsl(h, s%, l%)`.
    Hsl,
    /// `hsv(h, s%, v%)`.
    Hsv,
    /// `gray(n)`, arithmetic mean brightness 0-100.
    Gray,
    /// `lumagray(n)`, relative luminance 0-100.
    LumaGray,
    /// CSS named color.
    Keyword,
}

impl Model {
    /// All models in registration order. Model detection and conversion
    /// path search both follow this order.
    pub const ALL: [Self; 7] = [
        Self::Hex,
        Self::Rgb,
        Self::Hsl,
        Self::Hsv,
        Self::Gray,
        Self::LumaGray,
        Self::Keyword,
    ];

    /// Registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Hsv => "hsv",
            Self::Gray => "gray",
            Self::LumaGray => "lumagray",
            Self::Keyword => "keyword",
        }
    }

    /// Resolve a registry name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.name() == name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    /// Static descriptor of this model.
    #[must_use]
    pub fn descriptor(self) -> &'static ModelDescriptor {
        &REGISTRY[self as usize]
    }

    /// Number of core channels (alpha excluded).
    #[must_use]
    pub fn channel_count(self) -> usize {
        self.descriptor().channel_count()
    }

    /// Whether a trailing alpha channel is allowed.
    #[must_use]
    pub fn supports_alpha(self) -> bool {
        self.descriptor().supports_alpha
    }

    /// Model for a positional-array alias (`"#"`, `"rgba"`, ...).
    #[must_use]
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.descriptor().aliases.contains(&alias))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Clamp rule for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelRule {
    /// Wrap modulo 360.
    Hue,
    /// Clamp into `[min, max]`.
    Range(f64, f64),
}

impl ChannelRule {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Hue => hue_normalize(value),
            Self::Range(min, max) => clamp(value, min, max),
        }
    }
}

/// Named alternate serialization (e.g. short hex).
#[derive(Clone, Copy)]
pub struct AltFormat {
    /// Format name.
    pub name: &'static str,
    render: fn(&ModelDescriptor, &[Channel]) -> String,
}

impl fmt::Debug for AltFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AltFormat").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Immutable description of a color model.
#[derive(Debug)]
pub struct ModelDescriptor {
    /// Model this descriptor belongs to.
    pub model: Model,
    /// Registry name.
    pub name: &'static str,
    /// Tokens accepted as the first element of a positional array.
    pub aliases: &'static [&'static str],
    /// Core channel names.
    pub channel_labels: &'static [&'static str],
    /// Whether one trailing alpha value in `[0, 1]` is allowed.
    pub supports_alpha: bool,
    /// Whether conversion output is left unrounded.
    pub no_round: bool,
    /// Alternate serializations.
    pub alt_formats: &'static [AltFormat],
    rules: &'static [ChannelRule],
    percent_base: Option<f64>,
    patterns: Vec<Regex>,
}

static RGB_RULES: [ChannelRule; 4] = [
    ChannelRule::Range(0.0, 255.0),
    ChannelRule::Range(0.0, 255.0),
    ChannelRule::Range(0.0, 255.0),
    ChannelRule::Range(0.0, 1.0),
];
static CYLINDRICAL_RULES: [ChannelRule; 4] = [
    ChannelRule::Hue,
    ChannelRule::Range(0.0, 100.0),
    ChannelRule::Range(0.0, 100.0),
    ChannelRule::Range(0.0, 1.0),
];
static GRAY_RULES: [ChannelRule; 1] = [ChannelRule::Range(0.0, 100.0)];

const ALPHA: &str = r"([0-9](?:\.[0-9]+)?|\.[0-9]+)";

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid color model pattern"))
        .collect()
}

fn cylindrical_patterns(prefix: &str) -> Vec<Regex> {
    let body = r"([+-]?[0-9]+),\s*([0-9]{1,3})%,\s*([0-9]{1,3})%";
    compile(&[
        format!(r"^{prefix}\({body}\)$"),
        format!(r"^{prefix}a\({body},\s*{ALPHA}\)$"),
    ])
}

fn short_hex(descriptor: &ModelDescriptor, channels: &[Channel]) -> String {
    to_short_hex(&descriptor.format(channels))
}

static HEX_ALT_FORMATS: [AltFormat; 1] = [AltFormat {
    name: "shex",
    render: short_hex,
}];

static REGISTRY: LazyLock<[ModelDescriptor; 7]> = LazyLock::new(|| {
    let byte = r"([0-9]{1,3})";
    let pct = r"([0-9]{1,3}%)";
    [
        ModelDescriptor {
            model: Model::Hex,
            name: "hex",
            aliases: &["#", "hex"],
            channel_labels: &["rr", "gg", "bb"],
            supports_alpha: false,
            no_round: true,
            alt_formats: &HEX_ALT_FORMATS,
            rules: &[],
            percent_base: None,
            patterns: compile(&[
                r"(?i)^#([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})$".to_string(),
                r"(?i)^#([0-9a-f])([0-9a-f])([0-9a-f])$".to_string(),
            ]),
        },
        ModelDescriptor {
            model: Model::Rgb,
            name: "rgb",
            aliases: &["rgb", "rgba"],
            channel_labels: &["r", "g", "b"],
            supports_alpha: true,
            no_round: false,
            alt_formats: &[],
            rules: &RGB_RULES,
            percent_base: Some(255.0),
            patterns: compile(&[
                format!(r"^rgb\({byte},\s*{byte},\s*{byte}\)$"),
                format!(r"^rgba\({byte},\s*{byte},\s*{byte},\s*{ALPHA}\)$"),
                format!(r"^rgb\({pct},\s*{pct},\s*{pct}\)$"),
                format!(r"^rgba\({pct},\s*{pct},\s*{pct},\s*{ALPHA}\)$"),
            ]),
        },
        ModelDescriptor {
            model: Model::Hsl,
            name: "hsl",
            aliases: &["hsl", "hsla"],
            channel_labels: &["h", "s", "l"],
            supports_alpha: true,
            no_round: false,
            alt_formats: &[],
            rules: &CYLINDRICAL_RULES,
            percent_base: None,
            patterns: cylindrical_patterns("hsl"),
        },
        ModelDescriptor {
            model: Model::Hsv,
            name: "hsv",
            aliases: &["hsv", "hsva"],
            channel_labels: &["h", "s", "v"],
            supports_alpha: true,
            no_round: false,
            alt_formats: &[],
            rules: &CYLINDRICAL_RULES,
            percent_base: None,
            patterns: cylindrical_patterns("hsv"),
        },
        ModelDescriptor {
            model: Model::Gray,
            name: "gray",
            aliases: &["gray"],
            channel_labels: &["gray"],
            supports_alpha: false,
            no_round: false,
            alt_formats: &[],
            rules: &GRAY_RULES,
            percent_base: None,
            patterns: compile(&[format!(r"^gray\({byte}\)$")]),
        },
        ModelDescriptor {
            model: Model::LumaGray,
            name: "lumagray",
            aliases: &["lumagray"],
            channel_labels: &["lumagray"],
            supports_alpha: false,
            no_round: false,
            alt_formats: &[],
            rules: &GRAY_RULES,
            percent_base: None,
            patterns: compile(&[format!(r"^lumagray\({byte}\)$")]),
        },
        ModelDescriptor {
            model: Model::Keyword,
            name: "keyword",
            aliases: &["keyword"],
            channel_labels: &["keyword"],
            supports_alpha: false,
            no_round: true,
            alt_formats: &[],
            rules: &[],
            percent_base: None,
            patterns: compile(&[r"^([0-9A-Za-z_]+)$".to_string()]),
        },
    ]
});

impl ModelDescriptor {
    /// Number of core channels.
    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channel_labels.len()
    }

    /// Recognition patterns, tried in order.
    #[must_use]
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Clamp or wrap one channel value. Channels without a rule (hex,
    /// keyword, out-of-layout indices) pass through unchanged.
    #[must_use]
    pub fn sanitize(&self, value: f64, index: usize) -> f64 {
        self.rules
            .get(index)
            .map_or(value, |rule| rule.apply(value))
    }

    /// Sanitize every numeric channel of an array.
    #[must_use]
    pub fn sanitize_all(&self, channels: &[Channel]) -> Channels {
        channels
            .iter()
            .enumerate()
            .map(|(index, channel)| match channel {
                Channel::Num(v) => Channel::Num(self.sanitize(*v, index)),
                Channel::Text(_) => channel.clone(),
            })
            .collect()
    }

    /// Round the core channels, leaving any alpha untouched.
    #[must_use]
    pub fn round(&self, channels: Channels) -> Channels {
        if self.no_round {
            return channels;
        }
        let count = self.channel_count();
        channels
            .into_iter()
            .enumerate()
            .map(|(index, channel)| match channel {
                Channel::Num(v) if index < count => Channel::Num(round_half_up(v)),
                other => other,
            })
            .collect()
    }

    /// Whether any recognition pattern matches `s`.
    #[must_use]
    pub fn test(&self, s: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(s))
    }

    /// Serialize a channel array. Missing channels render empty, so the
    /// result of a malformed array never passes [`test`](Self::test).
    #[must_use]
    pub fn format(&self, channels: &[Channel]) -> String {
        let at = |index: usize| {
            channels
                .get(index)
                .map(ToString::to_string)
                .unwrap_or_default()
        };
        match self.model {
            Model::Hex => format!("#{}{}{}", at(0), at(1), at(2)),
            Model::Rgb => match channels.get(3) {
                Some(a) => format!("rgba({}, {}, {}, {a})", at(0), at(1), at(2)),
                None => format!("rgb({}, {}, {})", at(0), at(1), at(2)),
            },
            Model::Hsl | Model::Hsv => match channels.get(3) {
                Some(a) => format!("{}a({}, {}%, {}%, {a})", self.name, at(0), at(1), at(2)),
                None => format!("{}({}, {}%, {}%)", self.name, at(0), at(1), at(2)),
            },
            Model::Gray | Model::LumaGray => format!("{}({})", self.name, at(0)),
            Model::Keyword => at(0),
        }
    }

    /// Serialize with a named alternate format.
    #[must_use]
    pub fn format_alt(&self, name: &str, channels: &[Channel]) -> Option<String> {
        self.alt_formats
            .iter()
            .find(|alt| alt.name == name)
            .map(|alt| (alt.render)(self, channels))
    }

    fn captures(&self, s: &str) -> Option<Vec<String>> {
        self.patterns.iter().find_map(|re| {
            re.captures(s).map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string())
                    .collect()
            })
        })
    }

    fn parse_number(&self, raw: &str) -> Option<f64> {
        match (raw.strip_suffix('%'), self.percent_base) {
            (Some(pct), Some(base)) => pct
                .parse::<f64>()
                .ok()
                .map(|p| round_half_up(base / 100.0 * p)),
            _ => raw.parse::<f64>().ok(),
        }
    }

    /// Parse a string in this model's grammar. Hex input is uppercased and
    /// expanded to six digits first; numeric captures are sanitized.
    #[must_use]
    pub fn parse(&self, s: &str) -> Option<Channels> {
        match self.model {
            Model::Hex => {
                let captured = self.captures(&to_normalized_hex(s))?;
                Some(captured.into_iter().map(Channel::Text).collect())
            }
            Model::Keyword => {
                let captured = self.captures(s)?;
                Some(captured.into_iter().map(Channel::Text).collect())
            }
            _ => {
                let captured = self.captures(s)?;
                captured
                    .iter()
                    .enumerate()
                    .map(|(index, raw)| {
                        self.parse_number(raw)
                            .map(|v| Channel::Num(self.sanitize(v, index)))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{nums, texts};
    use crate::channels;

    #[test]
    fn test_registry_order_matches_enum() {
        for model in Model::ALL {
            assert_eq!(model.descriptor().model, model);
            assert_eq!(model.descriptor().name, model.name());
        }
    }

    #[test]
    fn test_descriptor_defaults() {
        assert_eq!(Model::Hex.channel_count(), 3);
        assert_eq!(Model::Gray.channel_count(), 1);
        assert!(Model::Rgb.supports_alpha());
        assert!(!Model::Gray.supports_alpha());
        assert!(Model::Hex.descriptor().no_round);
        assert!(Model::Keyword.descriptor().no_round);
        assert!(!Model::Hsl.descriptor().no_round);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Model::from_name("lumagray").unwrap(), Model::LumaGray);
        assert_eq!("hsv".parse::<Model>().unwrap(), Model::Hsv);
        assert_eq!(
            Model::from_name("cmyk").unwrap_err(),
            Error::UnknownModel("cmyk".to_string())
        );
    }

    #[test]
    fn test_from_alias() {
        assert_eq!(Model::from_alias("#"), Some(Model::Hex));
        assert_eq!(Model::from_alias("rgba"), Some(Model::Rgb));
        assert_eq!(Model::from_alias("hsva"), Some(Model::Hsv));
        assert_eq!(Model::from_alias("cmyk"), None);
    }

    #[test]
    fn test_round_leaves_alpha() {
        let rgb = Model::Rgb.descriptor();
        assert_eq!(
            rgb.round(nums(&[127.5, 0.4, 63.2, 0.45])),
            nums(&[128.0, 0.0, 63.0, 0.45])
        );
        let hex = Model::Hex.descriptor();
        assert_eq!(hex.round(texts(&["0A", "0B", "0C"])), texts(&["0A", "0B", "0C"]));
    }

    #[test]
    fn test_sanitize_is_total() {
        let hsl = Model::Hsl.descriptor();
        assert_eq!(hsl.sanitize(-160.0, 0), 200.0);
        assert_eq!(hsl.sanitize(140.0, 1), 100.0);
        assert_eq!(hsl.sanitize(-3.0, 2), 0.0);
        assert_eq!(hsl.sanitize(1.5, 3), 1.0);
        assert_eq!(hsl.sanitize(42.0, 9), 42.0);
        assert_eq!(Model::Rgb.descriptor().sanitize(300.0, 0), 255.0);
        assert_eq!(Model::Gray.descriptor().sanitize(101.0, 0), 100.0);
        assert_eq!(Model::Hex.descriptor().sanitize(999.0, 0), 999.0);
    }

    #[test]
    fn test_hex_format_and_test() {
        let hex = Model::Hex.descriptor();
        assert_eq!(hex.format(&texts(&["DE", "AD", "ED"])), "#DEADED");
        assert_eq!(hex.format(&texts(&["DE", "AD", "ed"])), "#DEADed");
        assert_eq!(hex.format(&texts(&["D", "A", "D"])), "#DAD");
        assert!(hex.test("#DEADED"));
        assert!(hex.test("#DEADed"));
        assert!(hex.test("#DaD"));
        assert!(!hex.test("#"));
        assert!(!hex.test("#DEAD"));
    }

    #[test]
    fn test_hex_parse_normalizes() {
        let hex = Model::Hex.descriptor();
        assert_eq!(hex.parse("#DEADed"), Some(texts(&["DE", "AD", "ED"])));
        assert_eq!(hex.parse("#DaD"), Some(texts(&["DD", "AA", "DD"])));
        assert_eq!(hex.parse("#"), None);
        assert_eq!(hex.parse("#DEAD"), None);
    }

    #[test]
    fn test_hex_short_format() {
        let hex = Model::Hex.descriptor();
        assert_eq!(hex.format_alt("shex", &texts(&["00", "00", "00"])), Some("#000".to_string()));
        assert_eq!(hex.format_alt("shex", &texts(&["12", "34", "56"])), Some("#123456".to_string()));
        assert_eq!(hex.format_alt("nope", &texts(&["00", "00", "00"])), None);
    }

    #[test]
    fn test_rgb_grammar() {
        let rgb = Model::Rgb.descriptor();
        assert_eq!(rgb.format(&channels![200, 100, 50]), "rgb(200, 100, 50)");
        assert_eq!(rgb.format(&channels![200, 100, 50, 0.4]), "rgba(200, 100, 50, 0.4)");
        assert_eq!(rgb.format(&channels![200, 100, 50, 0]), "rgba(200, 100, 50, 0)");

        assert!(rgb.test("rgb(200, 100, 50)"));
        assert!(rgb.test("rgba(200, 100, 50, 0.4)"));
        assert!(rgb.test("rgb(100%, 50%, 25%)"));
        assert!(rgb.test("rgba(100%, 50%, 25%, 0.4)"));
        assert!(!rgb.test("rgb(200, 100, 50, 0.4)"));
        assert!(!rgb.test("rgba(200, 100, 50)"));
    }

    #[test]
    fn test_rgb_parse() {
        let rgb = Model::Rgb.descriptor();
        assert_eq!(rgb.parse("rgb(200, 100, 50)"), Some(channels![200, 100, 50]));
        assert_eq!(rgb.parse("rgba(200, 100, 50, 0.4)"), Some(channels![200, 100, 50, 0.4]));
        assert_eq!(rgb.parse("rgb(100%, 50%, 25%)"), Some(channels![255, 127, 64]));
        assert_eq!(rgb.parse("rgba(100%, 50%, 25%, 0.4)"), Some(channels![255, 127, 64, 0.4]));
        assert_eq!(rgb.parse("rgb(999, 0, 0)"), Some(channels![255, 0, 0]));
        assert_eq!(rgb.parse("rgba(0, 0, 0, .5)"), Some(channels![0, 0, 0, 0.5]));
        assert_eq!(rgb.parse("rgb(200, 100, 50, 0.4)"), None);
        assert_eq!(rgb.parse("rgba(200, 100, 50)"), None);
    }

    #[test]
    fn test_cylindrical_grammar() {
        for model in [Model::Hsl, Model::Hsv] {
            let desc = model.descriptor();
            let name = desc.name;
            assert_eq!(desc.format(&channels![200, 100, 50]), format!("{name}(200, 100%, 50%)"));
            assert_eq!(
                desc.format(&channels![200, 100, 50, 0.4]),
                format!("{name}a(200, 100%, 50%, 0.4)")
            );
            for hue in ["200", "1280", "+200", "+1280", "-160", "-1240"] {
                assert_eq!(
                    desc.parse(&format!("{name}({hue}, 100%, 50%)")),
                    Some(channels![200, 100, 50]),
                    "{name} hue {hue}"
                );
                assert_eq!(
                    desc.parse(&format!("{name}a({hue}, 100%, 50%, 0.4)")),
                    Some(channels![200, 100, 50, 0.4]),
                    "{name}a hue {hue}"
                );
            }
            assert_eq!(desc.parse(&format!("{name}(200, 100%, 50%, 0.4)")), None);
            assert_eq!(desc.parse(&format!("{name}a(200, 100%, 50%)")), None);
        }
    }

    #[test]
    fn test_gray_grammar() {
        for model in [Model::Gray, Model::LumaGray] {
            let desc = model.descriptor();
            let text = format!("{}(50)", desc.name);
            assert_eq!(desc.format(&channels![50]), text);
            assert!(desc.test(&text));
            assert_eq!(desc.parse(&text), Some(channels![50]));
        }
    }

    #[test]
    fn test_keyword_grammar() {
        let keyword = Model::Keyword.descriptor();
        assert_eq!(keyword.format(&channels!["aqua"]), "aqua");
        assert!(keyword.test("aqua"));
        assert!(!keyword.test("aqua()"));
        assert!(!keyword.test("ärger"));
        assert_eq!(keyword.parse("aqua"), Some(channels!["aqua"]));
        assert_eq!(keyword.parse("aqua()"), None);
    }
}
