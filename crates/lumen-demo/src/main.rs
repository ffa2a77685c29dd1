// File: crates/lumen-demo/src/main.rs
// Summary: Demo loads the sample shelter data and renders a gallery of every chart type to PNGs.

use anyhow::{Context, Result};
use lumen_core::plots::{
    draw_bar_plot, draw_bubble_plot, draw_circle_legend, draw_color_reference, draw_dot_plot, draw_heat_map,
    draw_interactive_bubble_map, draw_line_plot, draw_map, draw_map_bubble_plot, draw_map_dot_plot,
    draw_radial_time_series, draw_time_series, BubbleMapFilters, BubbleMapOptions, BubbleOptions, Curve,
    HeatMapOptions, InteractiveBubbleMap, MapStyle, PointStyle, RadialOptions, SizeReference, TimeEvent,
    TimeSeriesOptions, XyOptions,
};
use lumen_core::{
    load_csv, load_geojson, parse_color, AnimationSession, AxesProperties, ColorMapping, Dataset, Hover,
    IntervalMode, Label, Page, TreeAnimation, TreeParams, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Accept the data directory from the CLI or fall back to the bundled samples
    let raw = std::env::args().nth(1);
    let data_dir = resolve_data_dir(raw.as_deref())?;
    println!("Using data directory: {}", data_dir.display());

    let intake = load_csv(data_dir.join("intake.csv")).context("failed to load intake.csv")?;
    let shelters = load_csv(data_dir.join("shelters.csv")).context("failed to load shelters.csv")?;
    let totals = load_csv(data_dir.join("state_totals.csv")).context("failed to load state_totals.csv")?;
    let adoptions = load_csv(data_dir.join("adoptions.csv")).context("failed to load adoptions.csv")?;
    let states = load_geojson(data_dir.join("states.geojson")).context("failed to load states.geojson")?;
    let mapping: ColorMapping = read_json(&data_dir.join("color_mapping.json"))?;
    let events: Vec<TimeEvent> = read_json(&data_dir.join("events.json"))?;
    println!(
        "Loaded {} intake rows, {} shelters, {} regions",
        intake.len(),
        shelters.len(),
        states.features.len()
    );

    let mut rng = StdRng::seed_from_u64(2020);
    let mut page = Page::new();
    let (w, h) = (lumen_core::types::WIDTH, lumen_core::types::HEIGHT);

    // 1) Scatter and line over the weekly intake
    let axes = AxesProperties {
        x_mode: IntervalMode::Dynamic,
        y_mode: IntervalMode::Dynamic,
        ..Default::default()
    };
    let xy = XyOptions {
        info_columns: vec!["week".into(), "intake".into(), "adopted".into()],
        axes: Some(axes.clone()),
        ..Default::default()
    };
    let dots = draw_dot_plot(page.init_viewport("dot", w, h)?, &intake, "intake", "adopted", &xy)?;
    report_hover("dot", &dots, h);

    let line_opts = XyOptions {
        style: PointStyle { color: "steelblue".into(), filled: true, radius: 3.0 },
        line_width: 2.0,
        ..xy.clone()
    };
    let with_index = intake.with_column("index", {
        let mut i = 0.0;
        move |_| {
            i += 1.0;
            Ok(i.into())
        }
    })?;
    draw_line_plot(page.init_viewport("line", w, h)?, &with_index, "index", "intake", &line_opts)?;

    // 2) Bars: shelters per animal kind
    let bars = draw_bar_plot(page.init_viewport("bar", w, h)?, &shelters, "kind", None, &mut rng)?;
    if let Some(bar) = bars.bars.first() {
        let pointer = (bar.x + bar.width / 2.0, h as f64 - bars.padding - bar.height / 2.0);
        if let Some(overlay) = bars.hover(pointer.0, pointer.1) {
            println!("bar hover:\n{}", overlay.text());
        }
    }

    // 3) Bubbles: intake vs adopted, sized by month
    let bubble_opts = BubbleOptions {
        info_columns: xy.info_columns.clone(),
        color: "rgba(70, 130, 180, 0.6)".into(),
        min_size: 2.0,
        max_size: 14.0,
        axes: Some(axes),
        ..Default::default()
    };
    draw_bubble_plot(page.init_viewport("bubble", w, h)?, &intake, "intake", "adopted", "month", &bubble_opts)?;

    // 4) Maps
    draw_map_dot_plot(
        page.init_viewport("map_dots", w, h)?,
        &states,
        &shelters,
        "lon",
        "lat",
        &XyOptions { style: PointStyle { color: "crimson".into(), filled: true, radius: 4.0 }, ..Default::default() },
    )?;
    let bubble_map = BubbleMapOptions {
        info_columns: vec!["name".into(), "animals".into()],
        color: "rgba(255, 3, 58, 0.5)".into(),
        min_size: 2.0,
        max_size: 40.0,
        ..Default::default()
    };
    draw_map_bubble_plot(page.init_viewport("map_bubbles", w, h)?, &states, &shelters, "lon", "lat", "animals", &bubble_map)?;

    let bbox = draw_map(page.init_viewport("interactive_map", w, h)?, &states, None, &MapStyle::default())?;
    let layer = InteractiveBubbleMap {
        x_column: "lon".into(),
        y_column: "lat".into(),
        size_column: "animals".into(),
        fill_column: "kind".into(),
        ring_column: "owner".into(),
        mapping: mapping.clone(),
        options: bubble_map,
        reference: SizeReference::default(),
    };
    let filters = BubbleMapFilters {
        year_column: "year".into(),
        year: Some(2020.0),
        category_column: "kind".into(),
        categories: vec!["Dog".into(), "Cat".into()],
    };
    let overlay = page.init_viewport("interactive_bubbles", w, h)?;
    let rendered = draw_interactive_bubble_map(overlay, &bbox, &shelters, &layer, &filters)?;
    draw_color_reference(overlay, &mapping, w as f64 - 150.0, 200.0, parse_color("black")?)?;
    match rendered.sizes {
        Some(s) => println!("bubble sizes for 2020 dogs and cats: {} to {}", s.min, s.max),
        None => println!("no shelters match the 2020 filters"),
    }

    let heat_opts = HeatMapOptions {
        region_property: "name".into(),
        link_column: "state".into(),
        value_column: "adoptions".into(),
        info_columns: vec!["state".into(), "adoptions".into()],
        ..Default::default()
    };
    draw_heat_map(page.init_viewport("heat", w, h)?, &states, &totals, &heat_opts)?;

    // 5) Time series with events, and the radial view of the same year
    let series = TimeSeriesOptions {
        series: XyOptions {
            info_columns: vec!["date".into(), "intake".into()],
            style: PointStyle { color: "darkcyan".into(), filled: true, radius: 3.0 },
            line_width: 2.0,
            axes: Some(AxesProperties { x_mode: IntervalMode::Dynamic, x_label_angle: 30.0, ..Default::default() }),
            ..Default::default()
        },
        curve: Curve::Bezier,
        events,
    };
    let ts = draw_time_series(page.init_viewport("time_series", w, h)?, &intake, "date", "intake", &series)?;
    if let Some(title) = ts.events.titles.first() {
        if let Some(tip) = ts.events.tooltip(title.x + 1.0, title.y - 1.0) {
            println!("event tooltip: {}", tip.text);
        }
    }

    let radial = page.init_viewport("radial", h, h)?;
    draw_radial_time_series(radial, &intake, "intake", &RadialOptions::default())?;
    let black = parse_color("black")?;
    draw_circle_legend(radial, 6.0, parse_color("steelblue")?, 30.0, h as f64 - 30.0, 15.0, "weekly intake", black);
    radial.draw_text("2020", h as f64 / 2.0, h as f64 / 2.0, &Label::new(24.0, black).centered());

    // 6) Decorative tree grown frame by frame
    render_tree(&mut page, &adoptions, &mut rng)?;

    let out = PathBuf::from("target/out");
    page.write_all(&out).with_context(|| format!("writing gallery to {}", out.display()))?;
    for id in page.ids() {
        println!("Wrote {}", out.join(format!("{id}.png")).display());
    }
    Ok(())
}

fn render_tree(page: &mut Page, adoptions: &Dataset, rng: &mut StdRng) -> Result<()> {
    let (w, h) = (lumen_core::types::WIDTH, lumen_core::types::HEIGHT);
    let (tree, totals) = TreeAnimation::create(
        adoptions,
        "year",
        "class",
        2020.0,
        true,
        (w as f64, h as f64),
        TreeParams::default(),
        rng,
    );
    println!("tree: {} boys, {} girls", totals.boys, totals.girls);

    let mut session = AnimationSession::new();
    let handles = session.restart([tree]);
    let mut frames = 0u32;
    while session.tick(FRAME_MS) > 0 {
        frames += 1;
    }
    info!(frames, "tree animation finished");

    let mut branches = Viewport::screen(w, h)?;
    let mut flowers = Viewport::screen(w, h)?;
    for handle in handles {
        if let Some(tree) = session.get(handle) {
            tree.render(&mut branches, &mut flowers)?;
        }
    }
    page.insert("tree", branches);
    page.insert("flowers", flowers);
    Ok(())
}

fn report_hover(name: &str, hover: &lumen_core::hover::PointHover, height: i32) {
    let Some(p) = hover.points.first() else {
        return;
    };
    if let Some(overlay) = hover.hover(p.x_canvas, height as f64 - p.y_canvas) {
        println!("{name} hover at ({:.0}, {:.0}):\n{}", overlay.left, overlay.top, overlay.text());
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Use the given directory, else the samples next to this crate.
fn resolve_data_dir(raw: Option<&str>) -> Result<PathBuf> {
    if let Some(raw) = raw {
        let p = Path::new(raw);
        if p.is_dir() {
            return Ok(p.to_path_buf());
        }
        anyhow::bail!("data directory not found: {}", p.display());
    }
    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    if bundled.is_dir() {
        return Ok(bundled);
    }
    anyhow::bail!("no data directory given and {} is missing", bundled.display());
}
