//! Channel values.
//!
//! Most models carry numeric channels, but `hex` stores two-digit strings
//! (`"DE"`, `"AD"`, `"ED"`) and `keyword` stores the color name. A channel
//! array is therefore a `Vec<Channel>` rather than a numeric slice.

use std::fmt;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// One component of a color value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(untagged))]
pub enum Channel {
    /// Numeric channel (rgb, hsl, hsv, gray, lumagray, alpha).
    Num(f64),
    /// Textual channel (hex digit pairs, keyword names, array aliases).
    Text(String),
}

/// Ordered channel array, optionally followed by alpha.
pub type Channels = Vec<Channel>;

impl Channel {
    /// Numeric value, if this is a numeric channel.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is a textual channel.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Num(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0 prints as "0" so serialized output never carries a sign on zero.
            Self::Num(v) if *v == 0.0 => write!(f, "0"),
            Self::Num(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Channel {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<i32> for Channel {
    fn from(v: i32) -> Self {
        Self::Num(f64::from(v))
    }
}

impl From<u8> for Channel {
    fn from(v: u8) -> Self {
        Self::Num(f64::from(v))
    }
}

impl From<&str> for Channel {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Channel {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Build a numeric channel array.
#[must_use]
pub fn nums(values: &[f64]) -> Channels {
    values.iter().copied().map(Channel::Num).collect()
}

/// Build a textual channel array.
#[must_use]
pub fn texts(values: &[&str]) -> Channels {
    values.iter().copied().map(Channel::from).collect()
}

/// Build a channel array from mixed values: `channels![200, 100, 50, 0.4]`.
#[macro_export]
macro_rules! channels {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::channel::Channel::from($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numbers_like_css() {
        assert_eq!(Channel::Num(200.0).to_string(), "200");
        assert_eq!(Channel::Num(0.4).to_string(), "0.4");
        assert_eq!(Channel::Num(-0.0).to_string(), "0");
        assert_eq!(Channel::from("DE").to_string(), "DE");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Channel::Num(1.5).as_f64(), Some(1.5));
        assert_eq!(Channel::Num(1.5).as_str(), None);
        assert_eq!(Channel::from("aqua").as_str(), Some("aqua"));
        assert_eq!(Channel::from("aqua").as_f64(), None);
    }

    #[test]
    fn test_channels_macro_mixes_kinds() {
        let c = channels!["rgba", 0, 0.5];
        assert_eq!(c, vec![Channel::from("rgba"), Channel::Num(0.0), Channel::Num(0.5)]);
    }

    #[test]
    fn test_builders() {
        assert_eq!(nums(&[1.0, 2.0]), vec![Channel::Num(1.0), Channel::Num(2.0)]);
        assert_eq!(texts(&["00", "FF"]), vec![Channel::from("00"), Channel::from("FF")]);
    }
}
