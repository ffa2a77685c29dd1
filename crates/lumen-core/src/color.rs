// File: crates/lumen-core/src/color.rs
// Summary: CSS-style color parsing, white-to-base gradients, pastel colors and category color tables.

use rand::Rng;
use serde::Deserialize;
use skia_safe as skia;

use crate::error::{Error, Result};
use crate::scale::LinearScale;

const NAMED: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("violet", (238, 130, 238)),
    ("brown", (165, 42, 42)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("lightgrey", (211, 211, 211)),
    ("lightgray", (211, 211, 211)),
    ("darkcyan", (0, 139, 139)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("pink", (255, 192, 203)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("steelblue", (70, 130, 180)),
    ("crimson", (220, 20, 60)),
];

/// Parse `name`, `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse_color(value: &str) -> Result<skia::Color> {
    let s = value.trim().to_ascii_lowercase();
    let bad = || Error::InvalidColor { value: value.to_string() };

    if s == "transparent" {
        return Ok(skia::Color::TRANSPARENT);
    }
    if let Some(&(_, (r, g, b))) = NAMED.iter().find(|(n, _)| *n == s) {
        return Ok(skia::Color::from_rgb(r, g, b));
    }
    if let Some(hex) = s.strip_prefix('#') {
        let digits = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(bad()),
        };
        let v = u32::from_str_radix(&digits, 16).map_err(|_| bad())?;
        return Ok(skia::Color::from_rgb((v >> 16) as u8, (v >> 8) as u8, v as u8));
    }
    let inner = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(bad)?;
    let parts = inner.split(',').map(str::trim).collect::<Vec<_>>();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(bad());
    }
    let channel = |p: &str| p.parse::<f64>().map(|v| v.clamp(0.0, 255.0).round() as u8).map_err(|_| bad());
    let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let a = match parts.get(3) {
        Some(p) => (p.parse::<f64>().map_err(|_| bad())?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Ok(skia::Color::from_argb(a, r, g, b))
}

/// Linear RGB interpolation between two colors, `t` clamped to `[0, 1]`.
pub fn interpolate_rgb(from: skia::Color, to: skia::Color, t: f64) -> skia::Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    skia::Color::from_argb(
        lerp(from.a(), to.a()),
        lerp(from.r(), to.r()),
        lerp(from.g(), to.g()),
        lerp(from.b(), to.b()),
    )
}

/// Sequential white-to-`base` scale over `[0.95·min, 0.95·max]`.
#[derive(Clone, Copy, Debug)]
pub struct GradientScale {
    scale: LinearScale,
    base: skia::Color,
}

impl GradientScale {
    pub fn new(min: f64, max: f64, base: skia::Color) -> Self {
        Self { scale: LinearScale::new((0.95 * min, 0.95 * max), (0.0, 1.0)), base }
    }

    pub fn color(&self, value: f64) -> skia::Color {
        interpolate_rgb(skia::Color::WHITE, self.base, self.scale.map_clamped(value))
    }
}

/// Random light color, each channel in `[127, 254)`.
pub fn random_pastel<R: Rng>(rng: &mut R) -> skia::Color {
    let mut channel = || rng.random_range(127..254) as u8;
    let (r, g, b) = (channel(), channel(), channel());
    skia::Color::from_rgb(r, g, b)
}

/// Whether a mapping entry colors a bubble's body or its ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Fill,
    #[serde(alias = "ring")]
    Stroke,
}

impl ColorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Fill => "fill",
            ColorRole::Stroke => "stroke",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ColorEntry {
    pub color: String,
    pub label: String,
    pub role: ColorRole,
}

/// Category label to color table, in legend order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColorMapping {
    pub entries: Vec<ColorEntry>,
}

impl ColorMapping {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        Self { entries }
    }

    /// Color for `category` under `role`; a miss is an error rather than a fallback.
    pub fn lookup(&self, category: &str, role: ColorRole) -> Result<skia::Color> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.label == category && e.role == role)
            .ok_or_else(|| Error::UnmappedCategory { category: category.to_string(), role: role.as_str() })?;
        parse_color(&entry.color)
    }
}

/// Anti-aliased fill paint.
pub fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

/// Anti-aliased stroke paint of the given width.
pub fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}
