// File: crates/lumen-core/src/plots/bar.rs
// Summary: Bar chart of record counts per category, pastel bars with centered labels.

use indexmap::IndexMap;
use rand::Rng;
use skia_safe as skia;
use tracing::debug;

use super::padding_or_default;
use crate::color::{fill_paint, random_pastel};
use crate::error::Result;
use crate::hover::{Bar, BarHover};
use crate::record::{Dataset, Record};
use crate::scale::map_value;
use crate::surface::Viewport;
use crate::text::Label;

/// Number of records per distinct value of `column`, in first-appearance order.
pub fn category_counts(data: &Dataset, column: &str) -> Result<IndexMap<String, usize>> {
    let mut counts = IndexMap::new();
    for r in data {
        *counts.entry(r.get(column)?.to_string()).or_insert(0usize) += 1;
    }
    Ok(counts)
}

/// One bar per category of `x_col`, height mapped from its count. Bar colors
/// come from `rng`.
pub fn draw_bar_plot<R: Rng>(
    vp: &mut Viewport,
    data: &Dataset,
    x_col: &str,
    padding: Option<f64>,
    rng: &mut R,
) -> Result<BarHover> {
    let padding = padding_or_default(vp, padding);
    let (width, height) = (vp.width() as f64, vp.height() as f64);
    let counts = category_counts(data, x_col)?;
    let values = counts.values().map(|&c| c as f64).collect::<Vec<_>>();
    let bar_width = (width - 2.0 * padding) / counts.len().max(1) as f64;
    let label = Label::new(12.0, skia::Color::BLACK).centered();

    let mut bars = Vec::with_capacity(counts.len());
    for (i, (category, &count)) in counts.iter().enumerate() {
        let bar_height = map_value(count as f64, padding, height - 2.0 * padding, &values);
        let x = padding + i as f64 * bar_width;
        let rect = skia::Rect::from_xywh(x as f32, padding as f32, bar_width as f32, bar_height as f32);
        vp.canvas().draw_rect(rect, &fill_paint(random_pastel(rng)));
        vp.draw_text(category, x + bar_width / 2.0, padding / 2.0, &label);

        bars.push(Bar {
            record: Record::new().with(x_col, category.as_str()).with("count", count as f64),
            x,
            width: bar_width,
            height: bar_height,
        });
    }

    debug!(bars = bars.len(), "bar plot drawn");
    Ok(BarHover {
        bars,
        columns: vec![x_col.to_string(), "count".to_string()],
        canvas_height: height,
        padding,
    })
}
