// File: crates/lumen-core/src/plots/map.rs
// Summary: Map renderers: polygon outlines, points and bubbles in the map frame, filtered bubble map, choropleth.

use std::collections::HashSet;

use skia_safe as skia;
use tracing::{debug, warn};

use super::bubble::map_bubbles;
use super::{draw_bubbles, draw_points, padding_or_default, XyOptions};
use crate::color::{fill_paint, parse_color, stroke_paint, ColorMapping, ColorRole, GradientScale};
use crate::error::{Error, Result};
use crate::geojson::{Feature, FeatureCollection};
use crate::geometry::{BoundingBox, Projection};
use crate::hover::{MapHover, PointHover};
use crate::record::{Dataset, Record, Value};
use crate::scale::{map_value, Extent};
use crate::surface::Viewport;
use crate::text::Label;
use crate::types::CanvasPoint;

/// Outline and fill of map regions.
#[derive(Clone, Debug, PartialEq)]
pub struct MapStyle {
    pub stroke: String,
    pub fill: String,
    pub line_width: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self { stroke: "black".to_string(), fill: "white".to_string(), line_width: 1.0 }
    }
}

fn projection(vp: &Viewport, bbox: BoundingBox, padding: f64) -> Projection {
    Projection::new(bbox, vp.width() as f64, vp.height() as f64, padding)
}

fn bounding_box(fc: &FeatureCollection) -> Result<BoundingBox> {
    BoundingBox::of(fc).ok_or(Error::EmptyDataset { context: "feature collection has no coordinates" })
}

/// Fill then stroke every ring of every feature, each as its own closed path.
fn draw_regions<'a>(
    vp: &mut Viewport,
    proj: &Projection,
    regions: impl IntoIterator<Item = (&'a Feature, skia::Color)>,
    stroke: &skia::Paint,
) {
    let canvas = vp.canvas();
    for (feature, fill) in regions {
        let fill = fill_paint(fill);
        for polygon in feature.polygons() {
            for ring in polygon {
                let path = proj.ring_path(ring);
                canvas.draw_path(&path, &fill);
                canvas.draw_path(&path, stroke);
            }
        }
    }
}

/// Draw the collection projected through its own bounding box and return
/// that box for the layers drawn on top.
pub fn draw_map(vp: &mut Viewport, fc: &FeatureCollection, padding: Option<f64>, style: &MapStyle) -> Result<BoundingBox> {
    let padding = padding_or_default(vp, padding);
    let bbox = bounding_box(fc)?;
    let proj = projection(vp, bbox, padding);
    let fill = parse_color(&style.fill)?;
    let stroke = stroke_paint(parse_color(&style.stroke)?, style.line_width as f32);
    draw_regions(vp, &proj, fc.features.iter().map(|f| (f, fill)), &stroke);
    debug!(features = fc.features.len(), "map drawn");
    Ok(bbox)
}

/// Values of `column` followed by the two bounding-box ordinates, so a point
/// layer shares the map's frame.
fn framed(values: Vec<f64>, corners: [f64; 2]) -> Vec<f64> {
    let mut out = values;
    out.extend(corners);
    out
}

/// Map outline plus one marker per record at `(x_col, y_col)` geographic
/// coordinates.
pub fn draw_map_dot_plot(
    vp: &mut Viewport,
    fc: &FeatureCollection,
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    opts: &XyOptions,
) -> Result<PointHover> {
    let padding = padding_or_default(vp, opts.padding);
    let color = parse_color(&opts.style.color)?;
    let bbox = draw_map(vp, fc, Some(padding), &MapStyle::default())?;

    let sorted = data.sorted_by(x_col)?;
    let xs = framed(sorted.numbers(x_col)?, bbox.x_domain());
    let ys = framed(sorted.numbers(y_col)?, bbox.y_domain());
    let (width, height) = (vp.width() as f64, vp.height() as f64);
    let points = sorted
        .iter()
        .zip(xs.iter().zip(&ys))
        .map(|(r, (&x, &y))| {
            CanvasPoint::new(
                r.clone(),
                map_value(x, padding, width - 2.0 * padding, &xs),
                map_value(y, padding, height - 2.0 * padding, &ys),
            )
        })
        .collect::<Vec<_>>();

    draw_points(vp, &points, color, opts.style.filled, opts.style.radius);
    debug!(points = points.len(), "map dot plot drawn");
    Ok(PointHover::new(points, opts.info_columns.clone(), height))
}

/// Options for bubbles drawn in a map frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleMapOptions {
    pub info_columns: Vec<String>,
    pub color: String,
    pub min_size: f64,
    pub max_size: f64,
    pub padding: Option<f64>,
    /// Joined to the size domain so radii stay comparable across filters.
    pub size_reference_max: f64,
}

impl Default for BubbleMapOptions {
    fn default() -> Self {
        Self {
            info_columns: Vec::new(),
            color: "black".to_string(),
            min_size: 1.0,
            max_size: 5.0,
            padding: None,
            size_reference_max: 1000.0,
        }
    }
}

fn map_frame_bubbles(
    vp: &Viewport,
    bbox: &BoundingBox,
    sorted: &Dataset,
    columns: (&str, &str, &str),
    opts: &BubbleMapOptions,
    padding: f64,
) -> Result<(Vec<CanvasPoint>, Vec<f64>)> {
    let (x_col, y_col, size_col) = columns;
    let xs = framed(sorted.numbers(x_col)?, bbox.x_domain());
    let ys = framed(sorted.numbers(y_col)?, bbox.y_domain());
    let ss = framed(sorted.numbers(size_col)?, [opts.size_reference_max; 2]);
    // Radii land in [min_size, max_size], matching the reference circles below.
    let points = map_bubbles(
        sorted,
        columns,
        (&xs, &ys, &ss),
        (vp.width() as f64, vp.height() as f64, padding),
        (opts.min_size, opts.max_size),
    )?;
    Ok((points, ss))
}

/// Map outline plus bubbles sized by `size_col`, smallest drawn first.
pub fn draw_map_bubble_plot(
    vp: &mut Viewport,
    fc: &FeatureCollection,
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    size_col: &str,
    opts: &BubbleMapOptions,
) -> Result<PointHover> {
    let padding = padding_or_default(vp, opts.padding);
    let color = parse_color(&opts.color)?;
    let bbox = draw_map(vp, fc, Some(padding), &MapStyle::default())?;
    let sorted = data.sorted_by(size_col)?;
    let (points, _) = map_frame_bubbles(vp, &bbox, &sorted, (x_col, y_col, size_col), opts, padding)?;
    draw_bubbles(vp, &points, color);
    debug!(bubbles = points.len(), "map bubble plot drawn");
    Ok(PointHover::new(points, opts.info_columns.clone(), vp.height() as f64))
}

/// Row selection for the interactive bubble map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BubbleMapFilters {
    pub year_column: String,
    /// `None` keeps every year.
    pub year: Option<f64>,
    pub category_column: String,
    /// Empty keeps every category.
    pub categories: Vec<String>,
}

impl BubbleMapFilters {
    pub fn apply(&self, data: &Dataset) -> Dataset {
        let wanted = self.categories.iter().map(String::as_str).collect::<HashSet<_>>();
        data.filter(|r| {
            let year_ok = match self.year {
                Some(y) => r.try_get(&self.year_column).is_some_and(|v| v.matches(&Value::Number(y))),
                None => true,
            };
            let category_ok = wanted.is_empty()
                || r.try_get(&self.category_column)
                    .is_some_and(|v| wanted.contains(v.to_string().as_str()));
            year_ok && category_ok
        })
    }
}

/// Observed size values of the rows drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

/// Column roles and colors of the interactive bubble map.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractiveBubbleMap {
    pub x_column: String,
    pub y_column: String,
    pub size_column: String,
    /// Category column whose entry gives the fill color.
    pub fill_column: String,
    /// Category column whose entry gives the ring color.
    pub ring_column: String,
    pub mapping: ColorMapping,
    pub options: BubbleMapOptions,
    pub reference: SizeReference,
}

/// Column of reference bubbles drawn beside the map.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeReference {
    pub values: Vec<f64>,
    pub x: f64,
    pub y: f64,
    pub step: f64,
    pub color: String,
}

impl Default for SizeReference {
    fn default() -> Self {
        Self {
            values: vec![1.0, 5.0, 10.0, 50.0, 100.0, 750.0],
            x: 170.0,
            y: 70.0,
            step: 73.0,
            color: "rgb(255, 3, 58)".to_string(),
        }
    }
}

pub struct RenderedBubbleMap {
    pub hover: PointHover,
    /// `None` when the filters left nothing to draw.
    pub sizes: Option<SizeRange>,
}

/// Redraw the bubble layer for the current filters: clear the canvas, draw
/// bubbles colored through the mapping table and the size reference column.
///
/// `bbox` is the frame returned by [`draw_map`] for the map underneath.
pub fn draw_interactive_bubble_map(
    vp: &mut Viewport,
    bbox: &BoundingBox,
    data: &Dataset,
    layer: &InteractiveBubbleMap,
    filters: &BubbleMapFilters,
) -> Result<RenderedBubbleMap> {
    let opts = &layer.options;
    let padding = padding_or_default(vp, opts.padding);
    let selected = filters.apply(data);
    let sorted = selected.sorted_by(&layer.size_column)?;
    let columns = (layer.x_column.as_str(), layer.y_column.as_str(), layer.size_column.as_str());
    let (points, size_domain) = map_frame_bubbles(vp, bbox, &sorted, columns, opts, padding)?;

    let mut styled = Vec::with_capacity(points.len());
    for p in &points {
        let fill = layer.mapping.lookup(&p.record.get_string(&layer.fill_column)?, ColorRole::Fill)?;
        let ring = layer.mapping.lookup(&p.record.get_string(&layer.ring_column)?, ColorRole::Stroke)?;
        styled.push((p, fill, ring));
    }

    vp.clear();
    let canvas = vp.canvas();
    for (p, fill, ring) in styled {
        let center = p.position().to_skia();
        let r = p.size_canvas.unwrap_or(0.0).max(0.0) as f32;
        canvas.draw_circle(center, r, &fill_paint(fill));
        canvas.draw_circle(center, r, &stroke_paint(ring, 2.0));
    }

    let reference = &layer.reference;
    let ref_paint = fill_paint(parse_color(&reference.color)?);
    for (i, &value) in reference.values.iter().enumerate() {
        // Same [min_size, max_size] radius span as the bubbles.
        let r = map_value(value, opts.min_size, opts.max_size - opts.min_size, &size_domain);
        let y = reference.y + i as f64 * reference.step;
        canvas.draw_circle((reference.x as f32, y as f32), r.max(0.0) as f32, &ref_paint);
    }

    let sizes = Extent::of(&sorted.numbers(&layer.size_column)?).map(|e| SizeRange { min: e.min, max: e.max });
    debug!(bubbles = points.len(), ?sizes, "interactive bubble map drawn");
    Ok(RenderedBubbleMap { hover: PointHover::new(points, opts.info_columns.clone(), vp.height() as f64), sizes })
}

/// Legend of every mapping entry: filled circles for fill colors, rings for
/// ring colors, stacked downward from `(x, y)`.
pub fn draw_color_reference(vp: &mut Viewport, mapping: &ColorMapping, x: f64, y: f64, text_color: skia::Color) -> Result<()> {
    let label = Label::new(10.0, text_color);
    let mut y = y;
    for entry in &mapping.entries {
        let color = parse_color(&entry.color)?;
        let paint = match entry.role {
            ColorRole::Fill => fill_paint(color),
            ColorRole::Stroke => stroke_paint(color, 1.5),
        };
        vp.canvas().draw_circle((x as f32, y as f32), 10.0, &paint);
        vp.draw_text(&entry.label, x + 30.0, y, &label);
        y -= 33.0;
    }
    Ok(())
}

/// Choropleth options.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatMapOptions {
    /// Feature property naming the region.
    pub region_property: String,
    /// Record column holding the same region name.
    pub link_column: String,
    /// Numeric column driving the gradient.
    pub value_column: String,
    pub base_color: String,
    pub missing_color: String,
    pub info_columns: Vec<String>,
    pub padding: Option<f64>,
}

impl Default for HeatMapOptions {
    fn default() -> Self {
        Self {
            region_property: "name".to_string(),
            link_column: "name".to_string(),
            value_column: "value".to_string(),
            base_color: "steelblue".to_string(),
            missing_color: "lightgrey".to_string(),
            info_columns: Vec::new(),
            padding: None,
        }
    }
}

/// Color each region by the white-to-base gradient of its joined record's
/// value; regions without a record get `missing_color`.
pub fn draw_heat_map(
    vp: &mut Viewport,
    fc: &FeatureCollection,
    data: &Dataset,
    opts: &HeatMapOptions,
) -> Result<MapHover> {
    let padding = padding_or_default(vp, opts.padding);
    let bbox = bounding_box(fc)?;
    let proj = projection(vp, bbox, padding);

    let values = data.numbers(&opts.value_column)?;
    let extent = Extent::of(&values).ok_or(Error::EmptyDataset { context: "heat map has no values" })?;
    let gradient = GradientScale::new(extent.min, extent.max, parse_color(&opts.base_color)?);
    let missing = parse_color(&opts.missing_color)?;

    let mut regions: Vec<(Feature, Option<Record>)> = Vec::with_capacity(fc.features.len());
    let mut colors = Vec::with_capacity(fc.features.len());
    let mut unmatched = 0usize;
    for feature in &fc.features {
        let joined = feature
            .property(&opts.region_property)
            .and_then(|name| data.find(&opts.link_column, &name))
            .cloned();
        let color = match &joined {
            Some(r) => gradient.color(r.get_number(&opts.value_column)?),
            None => {
                unmatched += 1;
                missing
            }
        };
        colors.push(color);
        regions.push((feature.clone(), joined));
    }
    if unmatched > 0 {
        warn!(unmatched, "regions without a matching record");
    }

    let stroke = stroke_paint(skia::Color::BLACK, 1.0);
    draw_regions(vp, &proj, fc.features.iter().zip(colors), &stroke);

    debug!(regions = regions.len(), "heat map drawn");
    Ok(MapHover { regions, projection: proj, columns: opts.info_columns.clone() })
}
