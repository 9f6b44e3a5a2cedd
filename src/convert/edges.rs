//! Hand-written direct conversions between model pairs.
//!
//! Every edge maps *core* channels to core channels; alpha and rounding are
//! applied by the graph engine. Intermediate values are left unrounded so a
//! composed path only rounds once, at the end.
//!
//! `rgb` is the hub: every model has an edge to it and it has an edge to
//! every model, so the graph is strongly connected.

use crate::channel::{Channel, Channels};
use crate::error::{Error, Result};
use crate::keywords;
use crate::model::Model;
use crate::numeric::luma;

/// Raw conversion function over core channels.
pub type EdgeFn = fn(&[Channel]) -> Result<Channels>;

/// A directed conversion edge.
#[derive(Clone, Copy)]
pub struct Edge {
    /// Source model.
    pub from: Model,
    /// Target model.
    pub to: Model,
    /// Conversion function.
    pub apply: EdgeFn,
}

impl std::fmt::Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({} -> {})", self.from, self.to)
    }
}

impl Edge {
    /// Create an edge.
    #[must_use]
    pub const fn new(from: Model, to: Model, apply: EdgeFn) -> Self {
        Self { from, to, apply }
    }
}

/// The authored edge set, in adjacency order.
#[must_use]
pub fn standard_edges() -> Vec<Edge> {
    use Model::{Gray, Hex, Hsl, Hsv, Keyword, LumaGray, Rgb};
    vec![
        Edge::new(Hex, Rgb, hex_to_rgb),
        Edge::new(Rgb, Hex, rgb_to_hex),
        Edge::new(Rgb, Hsl, rgb_to_hsl),
        Edge::new(Rgb, Hsv, rgb_to_hsv),
        Edge::new(Rgb, Gray, rgb_to_gray),
        Edge::new(Rgb, LumaGray, rgb_to_lumagray),
        Edge::new(Rgb, Keyword, rgb_to_keyword),
        Edge::new(Hsl, Rgb, hsl_to_rgb),
        Edge::new(Hsl, Hsv, hsl_to_hsv),
        Edge::new(Hsv, Rgb, hsv_to_rgb),
        Edge::new(Hsv, Hsl, hsv_to_hsl),
        Edge::new(Gray, Rgb, gray_to_rgb),
        Edge::new(Gray, Hsl, gray_to_achromatic),
        Edge::new(Gray, Hsv, gray_to_achromatic),
        Edge::new(LumaGray, Rgb, gray_to_rgb),
        Edge::new(LumaGray, Hsl, gray_to_achromatic),
        Edge::new(LumaGray, Hsv, gray_to_achromatic),
        Edge::new(Keyword, Rgb, keyword_to_rgb),
    ]
}

// ============================================================================
// Channel access
// ============================================================================

fn numbers<const N: usize>(c: &[Channel], model: Model) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (index, slot) in out.iter_mut().enumerate() {
        *slot = c
            .get(index)
            .and_then(Channel::as_f64)
            .ok_or(Error::InvalidChannel {
                model: model.name(),
                index,
            })?;
    }
    Ok(out)
}

fn text(c: &[Channel], index: usize, model: Model) -> Result<&str> {
    c.get(index)
        .and_then(Channel::as_str)
        .ok_or(Error::InvalidChannel {
            model: model.name(),
            index,
        })
}

/// Numeric rgb triple of a core channel array.
pub(crate) fn rgb_triple(c: &[Channel]) -> Result<[f64; 3]> {
    numbers::<3>(c, Model::Rgb)
}

fn triple(values: [f64; 3]) -> Channels {
    values.into_iter().map(Channel::Num).collect()
}

// ============================================================================
// hex
// ============================================================================

/// Each two-digit pair parsed as base 16.
pub fn hex_to_rgb(c: &[Channel]) -> Result<Channels> {
    (0..3)
        .map(|index| {
            let digits = text(c, index, Model::Hex)?;
            u8::from_str_radix(digits, 16)
                .map(Channel::from)
                .map_err(|_| Error::InvalidChannel {
                    model: Model::Hex.name(),
                    index,
                })
        })
        .collect()
}

/// Channels truncated to integers and packed as `1RRGGBB`; the leading
/// `1` keeps zero padding and is dropped.
pub fn rgb_to_hex(c: &[Channel]) -> Result<Channels> {
    let [r, g, b] = rgb_triple(c)?.map(|v| v as i64);
    let packed = (1_i64 << 24) + (r << 16) + (g << 8) + b;
    let digits = format!("{packed:X}");
    let digits = digits.get(1..).unwrap_or_default();
    Ok([0..2, 2..4, 4..6]
        .into_iter()
        .map(|range| Channel::from(digits.get(range).unwrap_or_default()))
        .collect())
}

// ============================================================================
// rgb -> cylindrical
// ============================================================================

/// Hue (`[0, 1)`) plus max and min of normalized channels.
fn hue_of(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0.0, max, min);
    }
    let d = max - min;
    let h = if max == r {
        (if g < b { 6.0 } else { 0.0 }) + (g - b) / d
    } else if max == g {
        2.0 + (b - r) / d
    } else {
        4.0 + (r - g) / d
    };
    (h / 6.0, max, min)
}

/// Standard sRGB to HSL.
pub fn rgb_to_hsl(c: &[Channel]) -> Result<Channels> {
    let [r, g, b] = rgb_triple(c)?.map(|v| v / 255.0);
    let (h, max, min) = hue_of(r, g, b);
    let l = (max + min) / 2.0;
    let s = if max == min {
        0.0
    } else if l > 0.5 {
        (max - min) / (2.0 - max - min)
    } else {
        (max - min) / (max + min)
    };
    Ok(triple([h * 360.0, s * 100.0, l * 100.0]))
}

/// Standard sRGB to HSV.
pub fn rgb_to_hsv(c: &[Channel]) -> Result<Channels> {
    let [r, g, b] = rgb_triple(c)?.map(|v| v / 255.0);
    let (h, max, min) = hue_of(r, g, b);
    let s = if max == min { 0.0 } else { (max - min) / max };
    Ok(triple([h * 360.0, s * 100.0, max * 100.0]))
}

// ============================================================================
// rgb -> gray / keyword
// ============================================================================

/// Arithmetic mean scaled to 0-100.
pub fn rgb_to_gray(c: &[Channel]) -> Result<Channels> {
    let [r, g, b] = rgb_triple(c)?;
    Ok(vec![Channel::Num((r + g + b) / 3.0 / 255.0 * 100.0)])
}

/// Relative luminance scaled to 0-100.
pub fn rgb_to_lumagray(c: &[Channel]) -> Result<Channels> {
    Ok(vec![Channel::Num(luma(rgb_triple(c)?) * 100.0)])
}

/// Exact keyword, else the nearest one.
pub fn rgb_to_keyword(c: &[Channel]) -> Result<Channels> {
    Ok(vec![Channel::from(keywords::nearest(rgb_triple(c)?))])
}

// ============================================================================
// cylindrical -> *
// ============================================================================

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + 6.0 * (q - p) * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + 6.0 * (q - p) * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Standard HSL to sRGB.
pub fn hsl_to_rgb(c: &[Channel]) -> Result<Channels> {
    let [h, s, l] = numbers::<3>(c, Model::Hsl)?;
    let (h, s, l) = (h / 360.0, s / 100.0, l / 100.0);

    let (r, g, b) = if s == 0.0 || l == 0.0 || l == 1.0 {
        (l, l, l)
    } else {
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };
    Ok(triple([r * 255.0, g * 255.0, b * 255.0]))
}

/// HSL to HSV; hue carries over.
pub fn hsl_to_hsv(c: &[Channel]) -> Result<Channels> {
    let [h, s, l] = numbers::<3>(c, Model::Hsl)?;
    let l = l / 100.0 * 2.0;
    let s = s / 100.0 * if l <= 1.0 { l } else { 2.0 - l };
    let v = (l + s) / 2.0;
    let s = 2.0 * s / (l + s);
    let s = if s.is_nan() { 0.0 } else { s };
    Ok(triple([h, s * 100.0, v * 100.0]))
}

/// Maps sector `i` to the indices of `[v, p, q, t]` used for `(r, g, b)`.
const SECTORS: [[usize; 3]; 6] = [
    [0, 3, 1],
    [2, 0, 1],
    [1, 0, 3],
    [1, 2, 0],
    [3, 1, 0],
    [0, 1, 2],
];

/// HSV to sRGB via the six-sector permutation table.
pub fn hsv_to_rgb(c: &[Channel]) -> Result<Channels> {
    let [h, s, v] = numbers::<3>(c, Model::Hsv)?;
    let (h, s, v) = (h / 360.0, s / 100.0, v / 100.0);

    if s == 0.0 || v == 0.0 {
        return Ok(triple([v * 255.0; 3]));
    }
    let sector = (6.0 * h).floor();
    let f = 6.0 * h - sector;
    let values = [
        v,
        v * (1.0 - s),
        v * (1.0 - s * f),
        v * (1.0 - s * (1.0 - f)),
    ];
    let [ri, gi, bi] = SECTORS[(sector as i64).rem_euclid(6) as usize];
    Ok(triple([values[ri] * 255.0, values[gi] * 255.0, values[bi] * 255.0]))
}

/// HSV to HSL; hue carries over.
pub fn hsv_to_hsl(c: &[Channel]) -> Result<Channels> {
    let [h, s, v] = numbers::<3>(c, Model::Hsv)?;
    let (sv, v) = (s / 100.0, v / 100.0);

    let mut s = sv * v;
    let mut l = (2.0 - sv) * v;
    if l != 0.0 && 2.0 - l != 0.0 {
        s /= if l <= 1.0 { l } else { 2.0 - l };
    }
    l /= 2.0;
    Ok(triple([h, s * 100.0, l * 100.0]))
}

// ============================================================================
// gray -> *
// ============================================================================

/// Scale 0-100 to 0-255 on every channel.
pub fn gray_to_rgb(c: &[Channel]) -> Result<Channels> {
    let [gray] = numbers::<1>(c, Model::Gray)?;
    Ok(triple([gray / 100.0 * 255.0; 3]))
}

/// `[0, 0, gray]` for hsl and hsv alike.
pub fn gray_to_achromatic(c: &[Channel]) -> Result<Channels> {
    let [gray] = numbers::<1>(c, Model::Gray)?;
    Ok(triple([0.0, 0.0, gray]))
}

// ============================================================================
// keyword
// ============================================================================

/// Case-insensitive keyword lookup.
pub fn keyword_to_rgb(c: &[Channel]) -> Result<Channels> {
    let name = text(c, 0, Model::Keyword)?;
    let rgb = keywords::lookup(name).ok_or_else(|| Error::UnknownKeyword(name.to_string()))?;
    Ok(rgb.into_iter().map(Channel::from).collect())
}
