//! Fluent color value.
//!
//! A [`Color`] is a channel array tagged with its model. Every operation
//! returns a new value; conversions go through the standard
//! [`ConversionGraph`](crate::convert::ConversionGraph).
//!
//! # References
//!
//! - W3C (2008). "Web Content Accessibility Guidelines (WCAG) 2.0".
//! - Sass `mix()`: weighted average that also accounts for the alpha
//!   difference of the two colors.

use std::fmt;
use std::str::FromStr;

use crate::channel::{Channel, Channels};
use crate::config::{ComplianceConfig, Config, ContrastConfig};
use crate::convert::{convert, edges::rgb_triple};
use crate::error::{Error, Result};
use crate::model::Model;
use crate::numeric::{
    self, apply_increment, clamp, IncrementProfile, Operator, Rounding, TokenKind, WcagContrast,
};
use crate::parse::{parse, ColorInput};

/// A color value in one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    channels: Channels,
    model: Model,
}

impl Color {
    /// Wraps an already parsed channel array.
    #[must_use]
    pub fn new(channels: Channels, model: Model) -> Self {
        Self { channels, model }
    }

    /// Detects the model of `input` and parses it.
    ///
    /// ```
    /// use chromagraph::{channels, Color, Model};
    ///
    /// let color = Color::from_input("#0af").unwrap();
    /// assert_eq!(color.model(), Model::Hex);
    /// assert_eq!(color.channels(), &channels!["00", "AA", "FF"][..]);
    ///
    /// let color = Color::from_input(channels!["rgba", 0, 0, 0, 0.5]).unwrap();
    /// assert_eq!(color.to_string(), "rgba(0, 0, 0, 0.5)");
    /// ```
    pub fn from_input(input: impl Into<ColorInput>) -> Result<Self> {
        let (channels, model) = parse(input, None)?;
        Ok(Self { channels, model })
    }

    /// Random opaque color in hex, drawn from the OS entropy source.
    ///
    /// ```
    /// use chromagraph::{Color, Model};
    ///
    /// let color = Color::random().unwrap();
    /// assert_eq!(color.model(), Model::Hex);
    /// ```
    #[cfg(feature = "random")]
    #[cfg_attr(docsrs, doc(cfg(feature = "random")))]
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; 3];
        getrandom::getrandom(&mut bytes).map_err(|e| Error::Entropy(e.to_string()))?;
        Ok(Self {
            channels: bytes
                .iter()
                .map(|byte| Channel::Text(format!("{byte:02X}")))
                .collect(),
            model: Model::Hex,
        })
    }

    /// Channel array, alpha last when present.
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Model the channels are expressed in.
    #[must_use]
    pub fn model(&self) -> Model {
        self.model
    }

    /// Splits into channels and model.
    #[must_use]
    pub fn into_parts(self) -> (Channels, Model) {
        (self.channels, self.model)
    }

    fn number(&self, index: usize) -> Result<f64> {
        self.channels
            .get(index)
            .and_then(Channel::as_f64)
            .ok_or(Error::InvalidChannel {
                model: self.model.name(),
                index,
            })
    }

    // ========================================================================
    // Conversion and serialization
    // ========================================================================

    /// Converts to another model.
    pub fn to(&self, model: Model) -> Result<Self> {
        Ok(Self {
            channels: convert(&self.channels, self.model, model)?,
            model,
        })
    }

    /// Converts to hex.
    pub fn to_hex(&self) -> Result<Self> {
        self.to(Model::Hex)
    }

    /// Converts to rgb.
    pub fn to_rgb(&self) -> Result<Self> {
        self.to(Model::Rgb)
    }

    /// Converts to hsl.
    pub fn to_hsl(&self) -> Result<Self> {
        self.to(Model::Hsl)
    }

    /// Converts to hsv.
    pub fn to_hsv(&self) -> Result<Self> {
        self.to(Model::Hsv)
    }

    /// Converts to arithmetic-mean gray.
    pub fn to_gray(&self) -> Result<Self> {
        self.to(Model::Gray)
    }

    /// Converts to luminance gray.
    pub fn to_lumagray(&self) -> Result<Self> {
        self.to(Model::LumaGray)
    }

    /// Converts to the exact or nearest CSS keyword.
    pub fn to_keyword(&self) -> Result<Self> {
        self.to(Model::Keyword)
    }

    /// Serializes in another model's notation.
    ///
    /// ```
    /// use chromagraph::{Color, Model};
    ///
    /// let color: Color = "rgba(0, 0, 0, 0)".parse().unwrap();
    /// assert_eq!(color.format(Model::Hsl).unwrap(), "hsla(0, 0%, 0%, 0)");
    /// ```
    pub fn format(&self, model: Model) -> Result<String> {
        Ok(self.to(model)?.to_string())
    }

    /// Serializes with a named alternate format of whichever model
    /// defines it (`"shex"` for short hex).
    pub fn format_alt(&self, name: &str) -> Result<String> {
        let owner = Model::ALL
            .into_iter()
            .find(|model| model.descriptor().alt_formats.iter().any(|alt| alt.name == name))
            .ok_or_else(|| Error::UnknownFormat {
                model: self.model.name(),
                name: name.to_string(),
            })?;
        let converted = self.to(owner)?;
        crate::parse::serialize_alt(&converted.channels, owner, name)
    }

    // ========================================================================
    // Alpha
    // ========================================================================

    /// Whether an alpha channel is present.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        self.channels.len() > self.model.channel_count()
    }

    /// Adds an opaque alpha channel when the model supports one and none
    /// is present.
    #[must_use]
    pub fn with_alpha_channel(mut self) -> Self {
        if self.model.supports_alpha() && !self.has_alpha() {
            self.channels.push(Channel::Num(1.0));
        }
        self
    }

    /// Drops the alpha channel.
    #[must_use]
    pub fn without_alpha(mut self) -> Self {
        if self.model.supports_alpha() && self.has_alpha() {
            self.channels.truncate(self.model.channel_count());
        }
        self
    }

    /// Copy without alpha.
    #[must_use]
    pub fn nofade(&self) -> Self {
        self.clone().without_alpha()
    }

    fn rgba(&self) -> Result<[f64; 4]> {
        let rgb = self.to_rgb()?.with_alpha_channel();
        Ok([rgb.number(0)?, rgb.number(1)?, rgb.number(2)?, rgb.number(3)?])
    }

    fn rgb(&self) -> Result<[f64; 3]> {
        rgb_triple(&self.to_rgb()?.channels)
    }

    fn from_rgba(values: impl IntoIterator<Item = f64>) -> Self {
        let channels = values.into_iter().map(Channel::Num).collect();
        Self {
            channels: Model::Rgb.descriptor().round(channels),
            model: Model::Rgb,
        }
    }

    // ========================================================================
    // Combining
    // ========================================================================

    /// Lays `other` over `self` with opacity `alpha` (clamped to `[0, 1]`).
    ///
    /// The result is rgb with alpha; alpha channels interpolate like the
    /// color channels.
    pub fn blend(&self, other: &Self, alpha: f64) -> Result<Self> {
        let alpha = clamp(alpha, 0.0, 1.0);
        let base = self.rgba()?;
        let over = other.rgba()?;
        Ok(Self::from_rgba(
            base.into_iter()
                .zip(over)
                .map(|(c, o)| c * (1.0 - alpha) + o * alpha),
        ))
    }

    /// [`blend`](Self::blend) with the configured opacity.
    pub fn blend_with(&self, other: &Self, config: &Config) -> Result<Self> {
        self.blend(other, config.blend_alpha)
    }

    /// Weighted mix; `weight` (clamped to `[0, 100]`) is the share of
    /// `self`. The alpha difference shifts the color weights toward the
    /// more opaque color.
    ///
    /// ```
    /// use chromagraph::{channels, Color};
    ///
    /// let black: Color = "#000".parse().unwrap();
    /// let white: Color = "#FFF".parse().unwrap();
    /// assert_eq!(black.mix(&white, 50.0).unwrap().channels(), &channels![128, 128, 128, 1][..]);
    /// ```
    pub fn mix(&self, other: &Self, weight: f64) -> Result<Self> {
        let weight = clamp(weight, 0.0, 100.0);
        let base = self.rgba()?;
        let over = other.rgba()?;

        let sw = weight / 100.0;
        let w = 2.0 * sw - 1.0;
        let a = base[3] - over[3];
        let w1 = ((if w * a == -1.0 { w } else { (w + a) / (1.0 + w * a) }) + 1.0) / 2.0;
        let w2 = 1.0 - w1;

        let mut values: Vec<f64> = (0..3).map(|i| base[i] * w1 + over[i] * w2).collect();
        values.push(sw * base[3] + (1.0 - sw) * over[3]);
        Ok(Self::from_rgba(values))
    }

    /// [`mix`](Self::mix) with the configured weight.
    pub fn mix_with(&self, other: &Self, config: &Config) -> Result<Self> {
        self.mix(other, config.mix_weight)
    }

    // ========================================================================
    // Contrast
    // ========================================================================

    /// Picks `#000` or `#FFF`, whichever reads better on `self`.
    pub fn contrast(&self) -> Result<Self> {
        self.contrast_with(&ContrastConfig::default())
    }

    /// [`contrast_between`](Self::contrast_between) with configured colors
    /// and threshold.
    pub fn contrast_with(&self, config: &ContrastConfig) -> Result<Self> {
        let dark = Self::from_input(config.dark.as_str())?;
        let light = Self::from_input(config.light.as_str())?;
        self.contrast_between(dark, light, config.threshold)
    }

    /// Returns `dark` when the luminance of `self` (as a percentage) is at
    /// least `threshold`, else `light`. The pair is swapped first if
    /// `dark` is the lighter one.
    pub fn contrast_between(&self, dark: Self, light: Self, threshold: f64) -> Result<Self> {
        let threshold = clamp(threshold, 0.0, 100.0);
        let (dark, light) = if dark.luma()? > light.luma()? {
            (light, dark)
        } else {
            (dark, light)
        };
        Ok(if self.luma()? * 100.0 >= threshold {
            dark
        } else {
            light
        })
    }

    /// `#000` for bright colors (YIQ at least 128), `#FFF` otherwise.
    pub fn yiq_contrast(&self) -> Result<Self> {
        let pick = if self.yiq()? >= 128.0 { "#000" } else { "#FFF" };
        Self::from_input(pick)
    }

    /// Fully desaturated copy without alpha.
    pub fn grayscale(&self) -> Result<Self> {
        self.nofade().desaturate(100)
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Relative luminance, `[0, 1]`.
    pub fn luma(&self) -> Result<f64> {
        Ok(numeric::luma(self.rgb()?))
    }

    /// YIQ brightness, `[0, 255]`.
    pub fn yiq(&self) -> Result<f64> {
        Ok(numeric::yiq(self.rgb()?))
    }

    /// WCAG 2.0 contrast ratio and pass levels against `other`.
    pub fn wcag(&self, other: &Self) -> Result<WcagContrast> {
        Ok(numeric::wcag_contrast(self.rgb()?, other.rgb()?))
    }

    /// Absolute YIQ difference, `[0, 255]`.
    pub fn brightness_difference(&self, other: &Self) -> Result<f64> {
        Ok((self.yiq()? - other.yiq()?).abs())
    }

    /// Sum of absolute rgb channel differences, `[0, 765]`.
    pub fn color_difference(&self, other: &Self) -> Result<f64> {
        let [r1, g1, b1] = self.rgb()?;
        let [r2, g2, b2] = other.rgb()?;
        Ok((r1 - r2).abs() + (g1 - g2).abs() + (b1 - b2).abs())
    }

    /// Visibility of `self` against `other` with the default thresholds.
    pub fn compliance(&self, other: &Self) -> Result<Compliance> {
        self.compliance_with(other, &ComplianceConfig::default())
    }

    /// Visibility of `self` against `other`: both thresholds met is
    /// [`Compliance::Yes`], one is [`Compliance::SortOf`].
    pub fn compliance_with(&self, other: &Self, config: &ComplianceConfig) -> Result<Compliance> {
        let brightness = self.brightness_difference(other)? >= config.brightness;
        let color = self.color_difference(other)? >= config.color;
        Ok(match (brightness, color) {
            (true, true) => Compliance::Yes,
            (true, false) | (false, true) => Compliance::SortOf,
            (false, false) => Compliance::No,
        })
    }

    // ========================================================================
    // Channel increments
    // ========================================================================

    /// Raises alpha: `0.1`, `"10%"` (of 1) or `"10%%"` (of current).
    pub fn unfade(&self, amount: impl fmt::Display) -> Result<Self> {
        FADE.apply(self, &amount.to_string(), Operator::Add)
    }

    /// Lowers alpha.
    pub fn fade(&self, amount: impl fmt::Display) -> Result<Self> {
        FADE.apply(self, &amount.to_string(), Operator::Subtract)
    }

    /// Rotates hue: degrees, `"10%"` of a full turn or `"10%%"` of the
    /// current hue. Signed amounts are accepted.
    pub fn spin(&self, amount: impl fmt::Display) -> Result<Self> {
        SPIN.apply(self, &amount.to_string(), Operator::Add)
    }

    /// Raises saturation (hsl unless already hsl or hsv).
    pub fn saturate(&self, amount: impl fmt::Display) -> Result<Self> {
        SATURATION.apply(self, &amount.to_string(), Operator::Add)
    }

    /// Lowers saturation.
    pub fn desaturate(&self, amount: impl fmt::Display) -> Result<Self> {
        SATURATION.apply(self, &amount.to_string(), Operator::Subtract)
    }

    /// Raises hsl lightness.
    pub fn lighten(&self, amount: impl fmt::Display) -> Result<Self> {
        LIGHTNESS.apply(self, &amount.to_string(), Operator::Add)
    }

    /// Lowers hsl lightness.
    pub fn darken(&self, amount: impl fmt::Display) -> Result<Self> {
        LIGHTNESS.apply(self, &amount.to_string(), Operator::Subtract)
    }

    /// Raises hsv value.
    pub fn envalue(&self, amount: impl fmt::Display) -> Result<Self> {
        VALUE.apply(self, &amount.to_string(), Operator::Add)
    }

    /// Lowers hsv value.
    pub fn devalue(&self, amount: impl fmt::Display) -> Result<Self> {
        VALUE.apply(self, &amount.to_string(), Operator::Subtract)
    }
}

/// Outcome of [`Color::compliance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compliance {
    /// Brightness and color difference both pass.
    Yes,
    /// Exactly one of them passes.
    SortOf,
    /// Neither passes.
    No,
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "yes",
            Self::SortOf => "sort of",
            Self::No => "no",
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model.descriptor().format(&self.channels))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_input(s)
    }
}

impl TryFrom<Channels> for Color {
    type Error = Error;

    fn try_from(array: Channels) -> Result<Self> {
        Self::from_input(array)
    }
}

// ============================================================================
// Increment configurations
// ============================================================================

/// Model an increment operates in.
#[derive(Debug, Clone, Copy)]
enum WorkingModel {
    /// Keep the color's model if it has alpha, else rgb.
    AlphaCapable,
    /// Keep hsl or hsv, else hsl.
    Cylindrical,
    /// Always this model.
    Fixed(Model),
}

/// One adjustable channel: where it lives and which tokens move it.
#[derive(Debug, Clone, Copy)]
struct ChannelIncrement {
    channel: usize,
    working: WorkingModel,
    force_alpha: bool,
    profile: IncrementProfile,
}

const ABSOLUTE: &[TokenKind] = &[
    TokenKind::UnsignedInt,
    TokenKind::Percent,
    TokenKind::RelativePercent,
];

const FADE: ChannelIncrement = ChannelIncrement {
    channel: 3,
    working: WorkingModel::AlphaCapable,
    force_alpha: true,
    profile: IncrementProfile::new(&[
        TokenKind::Number,
        TokenKind::Percent,
        TokenKind::RelativePercent,
    ])
    .percent_base(1.0)
    .rounding(Rounding::Places(3)),
};

const SPIN: ChannelIncrement = ChannelIncrement {
    channel: 0,
    working: WorkingModel::Cylindrical,
    force_alpha: false,
    profile: IncrementProfile::new(&[
        TokenKind::SignedInt,
        TokenKind::SignedPercent,
        TokenKind::SignedRelativePercent,
    ])
    .percent_base(360.0)
    .rounding(Rounding::Integer),
};

const SATURATION: ChannelIncrement = ChannelIncrement {
    channel: 1,
    working: WorkingModel::Cylindrical,
    force_alpha: false,
    profile: IncrementProfile::new(ABSOLUTE).rounding(Rounding::Integer),
};

const LIGHTNESS: ChannelIncrement = ChannelIncrement {
    channel: 2,
    working: WorkingModel::Fixed(Model::Hsl),
    force_alpha: false,
    profile: IncrementProfile::new(ABSOLUTE).rounding(Rounding::Integer),
};

const VALUE: ChannelIncrement = ChannelIncrement {
    channel: 2,
    working: WorkingModel::Fixed(Model::Hsv),
    force_alpha: false,
    profile: IncrementProfile::new(ABSOLUTE).rounding(Rounding::Integer),
};

impl ChannelIncrement {
    fn working_color(self, color: &Color) -> Result<Color> {
        match self.working {
            WorkingModel::AlphaCapable if color.model.supports_alpha() => Ok(color.clone()),
            WorkingModel::AlphaCapable => color.to_rgb(),
            WorkingModel::Cylindrical if matches!(color.model, Model::Hsl | Model::Hsv) => {
                Ok(color.clone())
            }
            WorkingModel::Cylindrical => color.to_hsl(),
            WorkingModel::Fixed(model) => color.to(model),
        }
    }

    fn apply(self, color: &Color, token: &str, operator: Operator) -> Result<Color> {
        let mut target = self.working_color(color)?;
        if self.force_alpha {
            target = target.with_alpha_channel();
        }
        let current = target.number(self.channel)?;
        let next = apply_increment(current, token, operator, &self.profile)?;
        let sanitized = target.model.descriptor().sanitize(next, self.channel);
        if let Some(slot) = target.channels.get_mut(self.channel) {
            *slot = Channel::Num(sanitized);
        }
        Ok(target)
    }
}
