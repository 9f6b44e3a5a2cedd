//! # chromagraph
//!
//! Color parsing, conversion and manipulation over a memoized conversion
//! graph.
//!
//! Colors are channel arrays tagged with a model (`hex`, `rgb`, `hsl`,
//! `hsv`, `gray`, `lumagray`, `keyword`). Each model is described by a
//! static descriptor holding its grammar, serializer, clamp rules and
//! rounding. Only a handful of direct conversions are written by hand; any
//! other pair is found by breadth-first search over them, composed, and
//! cached.
//!
//! ## Quick Start
//!
//! ```rust
//! use chromagraph::prelude::*;
//!
//! let blue: Color = "#00F".parse()?;
//! assert_eq!(blue.format(Model::Hsl)?, "hsl(240, 100%, 50%)");
//!
//! let teal = blue.spin(-60)?.darken("25%%")?;
//! assert_eq!(teal.to_string(), "hsl(180, 100%, 38%)");
//!
//! let mixed = blue.mix(&"rgba(255, 0, 0, 0.5)".parse()?, 50.0)?;
//! assert_eq!(mixed.to_string(), "rgba(64, 0, 191, 0.75)");
//! # Ok::<(), chromagraph::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config`: serde derives and YAML loading for [`Config`]
//! - `random`: [`Color::random`] backed by the OS entropy source
//!
//! ## Debug Logging
//!
//! Set `CHROMAGRAPH_DEBUG=1` (or call [`debug::enable`]) to trace path
//! searches and cache fills on stderr.
//!
//! ## References
//!
//! - W3C (2008). "Web Content Accessibility Guidelines (WCAG) 2.0".
//! - W3C (2022). "CSS Color Module Level 4", named colors.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Channel values (numbers and text tokens).
pub mod channel;

/// Rounding, hue wrapping, hex helpers, accessibility metrics, increments.
pub mod numeric;

/// CSS named colors.
pub mod keywords;

/// Color model registry.
pub mod model;

// ============================================================================
// Conversion and Parsing
// ============================================================================

/// Conversion graph and hand-written edges.
pub mod convert;

/// Model detection, parsing and serialization.
pub mod parse;

/// Fluent color value.
pub mod color;

// ============================================================================
// Ambient
// ============================================================================

/// Library-wide defaults.
pub mod config;

/// Opt-in stderr debug logging.
pub mod debug;

/// Error types for chromagraph operations.
pub mod error;

pub use channel::{Channel, Channels};
pub use color::{Color, Compliance};
pub use config::Config;
pub use convert::{convert, ConversionGraph};
pub use error::{Error, Result};
pub use model::Model;
pub use numeric::{apply_increment, hue_normalize, luma, wcag_contrast, yiq};
pub use parse::{detect_model, parse, serialize, serialize_alt, ColorInput};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use chromagraph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{Channel, Channels};
    pub use crate::channels;
    pub use crate::color::{Color, Compliance};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::model::Model;
    pub use crate::numeric::Operator;
}
