//! Model detection, parsing and serialization.
//!
//! Input is either a CSS-like string (`"#0af"`, `"rgba(0, 0, 0, .5)"`,
//! `"aqua"`) or a positional array whose first element is a model alias
//! (`["rgba", 0, 0, 0, 0]`). Arrays are rendered with the model's
//! formatter and parsed as that string, so both forms share one grammar.
//!
//! Failing to detect a model is reported as `None`; [`parse`] turns that
//! into [`Error::UnsupportedFormat`] for callers.

use crate::channel::{Channel, Channels};
use crate::error::{Error, Result};
use crate::model::Model;

const COMPONENT: &str = "parse";

/// Raw color input.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// Textual color notation.
    Text(String),
    /// Positional array: model alias followed by channel values.
    Array(Channels),
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Channels> for ColorInput {
    fn from(array: Channels) -> Self {
        Self::Array(array)
    }
}

impl From<&[Channel]> for ColorInput {
    fn from(array: &[Channel]) -> Self {
        Self::Array(array.to_vec())
    }
}

impl ColorInput {
    /// Canonical string form under `model`. Arrays drop their alias.
    fn render(&self, model: Model) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Array(array) => model.descriptor().format(array.get(1..).unwrap_or_default()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Array(array) => format!(
                "[{}]",
                array
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

fn detect(input: &ColorInput) -> Option<Model> {
    let model = match input {
        ColorInput::Text(s) => Model::ALL
            .into_iter()
            .find(|model| model.descriptor().test(s)),
        ColorInput::Array(array) => detect_array(input, array),
    };
    if model.is_none() {
        crate::debug!(COMPONENT, "no model matches {}", input.describe());
    }
    model
}

fn detect_array(input: &ColorInput, array: &[Channel]) -> Option<Model> {
    let alias = array.first()?.as_str()?;
    let model = Model::from_alias(alias)?;
    let rendered = input.render(model);
    if model.descriptor().test(&rendered) {
        Some(model)
    } else {
        crate::warn!(COMPONENT, "{alias} array renders as {rendered:?}, rejected by {model}");
        None
    }
}

/// Detects the model of a color input.
///
/// Strings are matched against each model's patterns in registration
/// order. Arrays are resolved by alias and accepted only when their
/// rendered form passes that model's patterns.
///
/// ```
/// use chromagraph::{channels, detect_model, Model};
///
/// assert_eq!(detect_model("#0af"), Some(Model::Hex));
/// assert_eq!(detect_model(channels!["hsla", 0, 0, 0, 0]), Some(Model::Hsl));
/// assert_eq!(detect_model("rgb(0, 0)"), None);
/// ```
pub fn detect_model(input: impl Into<ColorInput>) -> Option<Model> {
    detect(&input.into())
}

/// Parses a color input into its channels and model.
///
/// With a `hint` the input is parsed under that model only; otherwise the
/// model is detected first.
pub fn parse(input: impl Into<ColorInput>, hint: Option<Model>) -> Result<(Channels, Model)> {
    let input = input.into();
    let unsupported = || Error::UnsupportedFormat(input.describe());

    let model = match hint {
        Some(model) => model,
        None => detect(&input).ok_or_else(unsupported)?,
    };
    let channels = model
        .descriptor()
        .parse(&input.render(model))
        .ok_or_else(unsupported)?;
    Ok((channels, model))
}

/// Serializes channels in a model's canonical notation.
#[must_use]
pub fn serialize(channels: &[Channel], model: Model) -> String {
    model.descriptor().format(channels)
}

/// Serializes channels with a named alternate format (hex: `"shex"`).
pub fn serialize_alt(channels: &[Channel], model: Model, name: &str) -> Result<String> {
    model
        .descriptor()
        .format_alt(name, channels)
        .ok_or_else(|| Error::UnknownFormat {
            model: model.name(),
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{nums, texts};
    use crate::channels;
    use crate::debug::{capture, Level};

    #[test]
    fn test_detect_strings() {
        let suites: [(Model, &[&str]); 7] = [
            (Model::Hex, &["#000000", "#000", "#aBc"]),
            (
                Model::Rgb,
                &["rgb(0, 0, 0)", "rgba(0, 0, 0, 0)", "rgb(0%, 0%, 0%)", "rgba(0%, 0%, 0%, 0)"],
            ),
            (Model::Hsl, &["hsl(0, 0%, 0%)", "hsla(0, 0%, 0%, 0)"]),
            (Model::Hsv, &["hsv(0, 0%, 0%)", "hsva(0, 0%, 0%, 0)"]),
            (Model::Gray, &["gray(0)"]),
            (Model::LumaGray, &["lumagray(0)"]),
            (Model::Keyword, &["aqua", "gray"]),
        ];
        for (model, inputs) in suites {
            for input in inputs {
                assert_eq!(detect_model(*input), Some(model), "{input}");
            }
        }
    }

    #[test]
    fn test_detect_arrays() {
        let suites: [(Model, Vec<Channels>); 7] = [
            (
                Model::Hex,
                vec![
                    channels!["#", "00", "00", "00"],
                    channels!["hex", "00", "00", "00"],
                    channels!["#", "0", "0", "0"],
                ],
            ),
            (
                Model::Rgb,
                vec![
                    channels!["rgb", 0, 0, 0],
                    channels!["rgba", 0, 0, 0, 0],
                    channels!["rgb", "0%", "0%", "0%"],
                    channels!["rgba", "0%", "0%", "0%", 0],
                ],
            ),
            (Model::Hsl, vec![channels!["hsl", 0, 0, 0], channels!["hsla", 0, 0, 0, 0]]),
            (Model::Hsv, vec![channels!["hsv", 0, 0, 0], channels!["hsva", 0, 0, 0, 0]]),
            (Model::Gray, vec![channels!["gray", 0]]),
            (Model::LumaGray, vec![channels!["lumagray", 0]]),
            (Model::Keyword, vec![channels!["keyword", "aqua"]]),
        ];
        for (model, inputs) in suites {
            for input in inputs {
                assert_eq!(detect_model(input.clone()), Some(model), "{input:?}");
            }
        }
    }

    #[test]
    fn test_detect_rejects_malformed() {
        assert_eq!(detect_model("rgb(0, 0)"), None);
        assert_eq!(detect_model("#12"), None);
        assert_eq!(detect_model("hsl(0, 0, 0)"), None);
        assert_eq!(detect_model(""), None);
        assert_eq!(detect_model(channels!["rgb", 0, 0]), None);
        assert_eq!(detect_model(channels!["cmyk", 0, 0, 0, 0]), None);
        assert_eq!(detect_model(channels![0, 0, 0]), None);
        assert_eq!(detect_model(Channels::new()), None);
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse("#000", None).unwrap(), (texts(&["00", "00", "00"]), Model::Hex));
        assert_eq!(
            parse("rgba(0,0,0,0)", None).unwrap(),
            (nums(&[0.0, 0.0, 0.0, 0.0]), Model::Rgb)
        );
        assert_eq!(
            parse("rgb(100%,50%,25%)", None).unwrap(),
            (nums(&[255.0, 127.0, 64.0]), Model::Rgb)
        );
        assert_eq!(
            parse("hsl(1280,100%,50%)", None).unwrap(),
            (nums(&[200.0, 100.0, 50.0]), Model::Hsl)
        );
        assert_eq!(parse("aqua", None).unwrap(), (texts(&["aqua"]), Model::Keyword));
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(parse(channels!["#", "0", "0", "0"], None).unwrap().0, texts(&["00", "00", "00"]));
        assert_eq!(
            parse(channels!["rgba", "0%", "0%", "0%", 0], None).unwrap().0,
            nums(&[0.0, 0.0, 0.0, 0.0])
        );
        assert_eq!(parse(channels!["keyword", "aqua"], None).unwrap().0, texts(&["aqua"]));
        assert_eq!(parse(channels!["gray", 0], None).unwrap().0, nums(&[0.0]));
    }

    #[test]
    fn test_parse_clamps_channels() {
        let (rgb, _) = parse("rgba(300, 0, 999, 5)", None).unwrap();
        assert_eq!(rgb, nums(&[255.0, 0.0, 255.0, 1.0]));
        let (gray, _) = parse("gray(150)", None).unwrap();
        assert_eq!(gray, nums(&[100.0]));
        let (hsv, _) = parse("hsv(-90, 20%, 30%)", None).unwrap();
        assert_eq!(hsv, nums(&[270.0, 20.0, 30.0]));
    }

    #[test]
    fn test_parse_with_hint() {
        let (channels, model) = parse("gray(40)", Some(Model::Gray)).unwrap();
        assert_eq!((channels, model), (nums(&[40.0]), Model::Gray));

        let err = parse("gray(40)", Some(Model::Rgb)).unwrap_err();
        assert_eq!(err, Error::UnsupportedFormat("gray(40)".to_string()));
    }

    #[test]
    fn test_parse_unsupported() {
        assert_eq!(
            parse("rgb(1, 2)", None).unwrap_err(),
            Error::UnsupportedFormat("rgb(1, 2)".to_string())
        );
        assert_eq!(
            parse(channels!["rgb", 1, 2], None).unwrap_err(),
            Error::UnsupportedFormat("[rgb, 1, 2]".to_string())
        );
    }

    #[test]
    fn test_parse_logs_detection_miss() {
        let (result, records) = capture::records(|| parse("rgb(0, 0)", None));
        assert!(result.is_err());
        assert_eq!(
            records,
            vec![(Level::Debug, "parse: no model matches rgb(0, 0)".to_string())]
        );

        let (_, records) = capture::records(|| parse("#0af", None));
        assert!(records.is_empty());
    }

    #[test]
    fn test_rejected_array_warns() {
        let (model, records) = capture::records(|| detect_model(channels!["hsl", 1, 2]));
        assert_eq!(model, None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, Level::Warn);
        assert!(records[0].1.starts_with("parse: hsl array renders as "), "{records:?}");
        assert_eq!(records[1], (Level::Debug, "parse: no model matches [hsl, 1, 2]".to_string()));
    }

    #[test]
    fn test_unknown_alias_is_a_plain_miss() {
        let (model, records) = capture::records(|| detect_model(channels!["lab", 1, 2, 3]));
        assert_eq!(model, None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Level::Debug);
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serialize(&nums(&[0.0, 0.0, 0.0, 0.0]), Model::Hsl), "hsla(0, 0%, 0%, 0)");
        assert_eq!(serialize(&channels![200, 100, 50, 0.4], Model::Rgb), "rgba(200, 100, 50, 0.4)");
        assert_eq!(serialize(&texts(&["DE", "AD", "ED"]), Model::Hex), "#DEADED");
        assert_eq!(serialize(&nums(&[42.0]), Model::LumaGray), "lumagray(42)");
        assert_eq!(serialize(&texts(&["aqua"]), Model::Keyword), "aqua");
    }

    #[test]
    fn test_serialize_alt() {
        assert_eq!(serialize_alt(&texts(&["00", "00", "00"]), Model::Hex, "shex").unwrap(), "#000");
        assert_eq!(
            serialize_alt(&texts(&["00", "11", "FE"]), Model::Hex, "shex").unwrap(),
            "#0011FE"
        );
        assert_eq!(
            serialize_alt(&nums(&[0.0, 0.0, 0.0]), Model::Rgb, "shex").unwrap_err(),
            Error::UnknownFormat {
                model: "rgb",
                name: "shex".to_string()
            }
        );
    }
}
