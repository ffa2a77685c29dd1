// File: crates/lumen-core/tests/smoke.rs
// Purpose: End-to-end renders of every chart type to PNG, plus orientation and error checks.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use lumen_core::plots::{
    draw_bar_plot, draw_bubble_plot, draw_circle_legend, draw_color_reference, draw_dot_plot, draw_heat_map,
    draw_interactive_bubble_map, draw_line_plot, draw_map, draw_map_bubble_plot, draw_map_dot_plot,
    draw_radial_time_series, draw_time_series, BubbleMapFilters, BubbleMapOptions, BubbleOptions, HeatMapOptions,
    InteractiveBubbleMap, MapStyle, PointStyle, RadialOptions, SizeRange, SizeReference, TimeEvent,
    TimeSeriesOptions, XyOptions,
};
use lumen_core::axis::{draw_pixel_x_axis, draw_pixel_y_axis};
use lumen_core::{
    parse_color, read_csv, AxesProperties, ColorMapping, Dataset, Error, FeatureCollection, Hover, IntervalMode,
    Label, Page, PixelAxis, Record, TreeAnimation, TreeParams, Viewport,
};

const STATES: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"name":"Low"},
   "geometry":{"type":"Polygon","coordinates":[[[-100,30],[-90,30],[-90,40],[-100,40],[-100,30]]]}},
  {"type":"Feature","properties":{"name":"High"},
   "geometry":{"type":"Polygon","coordinates":[[[-90,30],[-80,30],[-80,40],[-90,40],[-90,30]]]}},
  {"type":"Feature","properties":{"name":"Empty"},
   "geometry":{"type":"Polygon","coordinates":[[[-100,40],[-80,40],[-80,45],[-100,45],[-100,40]]]}}
]}"#;

const SHELTERS: &str = "\
lon,lat,year,animals,kind,owner,name,value
-95,35,2019,120,Dog,Shelter,Low,12
-85,33,2019,40,Cat,Rescue,High,30
-88,42,2020,600,Dog,Rescue,Empty-ish,1
";

fn out_dir() -> PathBuf {
    let dir = PathBuf::from("target/test_out");
    std::fs::create_dir_all(&dir).expect("create test_out");
    dir
}

fn states() -> FeatureCollection {
    FeatureCollection::from_json_str(STATES).expect("geojson")
}

fn shelters() -> Dataset {
    read_csv(SHELTERS.as_bytes()).expect("csv")
}

fn series() -> Dataset {
    (0..24)
        .map(|i| {
            Record::new()
                .with("x", i as f64)
                .with("y", (i as f64 * 0.4).sin() * 10.0 + 20.0)
                .with("size", (i % 5) as f64 + 1.0)
                .with("week", format!("W{i}"))
                .with("date", format!("2020-{:02}-01", i % 12 + 1))
        })
        .collect()
}

fn assert_png(vp: &mut Viewport) -> Vec<u8> {
    let bytes = vp.to_png_bytes().expect("encode");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    bytes
}

#[test]
fn xy_charts_render_with_axes() {
    let data = series();
    let axes = AxesProperties { x_mode: IntervalMode::Dynamic, y_mode: IntervalMode::Fixed(5.0), ..Default::default() };
    let opts = XyOptions { axes: Some(axes.clone()), info_columns: vec!["x".into(), "y".into()], ..Default::default() };

    let mut page = Page::new();
    let dot = draw_dot_plot(page.init_viewport("dot", 640, 400).expect("vp"), &data, "x", "y", &opts).expect("dot");
    assert_eq!(dot.points.len(), 24);
    let line = draw_line_plot(page.init_viewport("line", 640, 400).expect("vp"), &data, "x", "y", &opts).expect("line");
    assert_eq!(line.points.len(), 24);

    let bubble_opts = BubbleOptions { axes: Some(axes), color: "steelblue".into(), ..Default::default() };
    let bubbles = draw_bubble_plot(page.init_viewport("bubble", 640, 400).expect("vp"), &data, "x", "y", "size", &bubble_opts)
        .expect("bubble");
    for p in &bubbles.points {
        let r = p.size_canvas.expect("radius");
        assert!((1.0..=5.0).contains(&r));
    }

    let mut rng = StdRng::seed_from_u64(5);
    let bars = draw_bar_plot(page.init_viewport("bar", 640, 400).expect("vp"), &shelters(), "kind", None, &mut rng)
        .expect("bar");
    assert_eq!(bars.bars.len(), 2);

    page.write_all(out_dir()).expect("write");
    for id in ["dot", "line", "bubble", "bar"] {
        assert!(out_dir().join(format!("{id}.png")).exists());
        assert_png(page.canvas_mut(id).expect("canvas"));
    }
    assert!(matches!(page.canvas("missing"), Err(Error::CanvasNotFound { id }) if id == "missing"));
}

#[test]
fn bubble_radii_span_min_to_max_size() {
    let opts = BubbleOptions { min_size: 3.0, max_size: 9.0, ..Default::default() };
    let mut vp = Viewport::new(320, 200).expect("vp");
    let bubbles = draw_bubble_plot(&mut vp, &series(), "x", "y", "size", &opts).expect("bubble");
    let radii: Vec<f64> = bubbles.points.iter().map(|p| p.size_canvas.expect("radius")).collect();
    let smallest = radii.iter().copied().fold(f64::INFINITY, f64::min);
    let largest = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(smallest, 3.0);
    assert_eq!(largest, 9.0);
}

#[test]
fn y_up_viewport_puts_small_values_at_the_bottom() {
    let data: Dataset = [(0.0, 0.0), (10.0, 10.0)]
        .into_iter()
        .map(|(x, y)| Record::new().with("x", x).with("y", y))
        .collect();
    let opts = XyOptions {
        style: PointStyle { filled: true, ..Default::default() },
        padding: Some(10.0),
        ..Default::default()
    };
    let mut vp = Viewport::new(200, 100).expect("vp");
    vp.clear();
    let hover = draw_dot_plot(&mut vp, &data, "x", "y", &opts).expect("dot");
    assert_eq!(hover.points[0].position(), lumen_core::Point::new(10.0, 10.0));

    let img = image::load_from_memory(&assert_png(&mut vp)).expect("decode").to_rgba8();
    assert!(img.get_pixel(10, 89)[3] > 0, "(0, 0) is drawn near the bottom-left");
    assert!(img.get_pixel(189, 10)[3] > 0, "(10, 10) is drawn near the top-right");
    assert_eq!(img.get_pixel(10, 10)[3], 0);

    assert!(hover.hover(10.0, 90.0).is_some());
    assert!(hover.hover(10.0, 10.0).is_none());
}

#[test]
fn pixel_step_axes() {
    let axis = PixelAxis {
        start: 0.0,
        end: 100.0,
        x_pos: 30.0,
        y_pos: 30.0,
        step: 25.0,
        color: parse_color("grey").expect("grey"),
        label_space: 15.0,
    };
    assert_eq!(axis.offsets().expect("offsets"), vec![0.0, 25.0, 50.0, 75.0, 100.0]);

    let mut vp = Viewport::new(200, 200).expect("vp");
    draw_pixel_x_axis(&mut vp, &axis).expect("x axis");
    draw_pixel_y_axis(&mut vp, &axis).expect("y axis");
    assert_png(&mut vp);

    let flat = PixelAxis { step: 0.0, ..axis };
    assert!(matches!(draw_pixel_x_axis(&mut vp, &flat), Err(Error::InvalidInterval { .. })));
}

#[test]
fn invalid_surface_sizes_are_rejected() {
    assert!(matches!(Viewport::new(0, 10), Err(Error::InvalidSurfaceSize { width: 0, height: 10 })));
    assert!(matches!(Viewport::screen(10, -1), Err(Error::InvalidSurfaceSize { .. })));
}

#[test]
fn maps_render_in_one_frame() {
    let fc = states();
    let data = shelters();
    let mut page = Page::new();

    let bbox = draw_map(page.init_viewport("outline", 600, 300).expect("vp"), &fc, None, &MapStyle::default())
        .expect("outline");
    assert_eq!(bbox.corners(), [[-100.0, 30.0], [-80.0, 45.0]]);

    let dots = draw_map_dot_plot(page.init_viewport("map_dots", 600, 300).expect("vp"), &fc, &data, "lon", "lat", &XyOptions::default())
        .expect("map dots");
    let pad = 600.0 * 0.02;
    let first = dots.points[0].position();
    assert!((first.x - (pad + 0.25 * (600.0 - 2.0 * pad))).abs() < 1e-9, "lon -95 sits a quarter across");

    let bubbles = draw_map_bubble_plot(
        page.init_viewport("map_bubbles", 600, 300).expect("vp"),
        &fc,
        &data,
        "lon",
        "lat",
        "animals",
        &BubbleMapOptions::default(),
    )
    .expect("map bubbles");
    assert!(bubbles.points.iter().all(|p| p.size_canvas.is_some_and(|r| r < 5.0)), "1000 caps the size domain");

    let heat_opts = HeatMapOptions {
        info_columns: vec!["value".into()],
        ..Default::default()
    };
    let heat = draw_heat_map(page.init_viewport("heat", 600, 300).expect("vp"), &fc, &data, &heat_opts).expect("heat");
    assert!(heat.regions[0].1.is_some());
    assert!(heat.regions[2].1.is_none(), "no record named Empty");

    for id in ["outline", "map_dots", "map_bubbles", "heat"] {
        assert_png(page.canvas_mut(id).expect("canvas"));
    }
}

#[test]
fn interactive_bubble_map_filters_and_reports_sizes() {
    let fc = states();
    let mapping: ColorMapping = serde_json::from_str(
        r#"[
          {"color":"#DE78A1","label":"Dog","role":"fill"},
          {"color":"#164C8F","label":"Cat","role":"fill"},
          {"color":"black","label":"Shelter","role":"stroke"},
          {"color":"darkcyan","label":"Rescue","role":"stroke"}
        ]"#,
    )
    .expect("mapping");
    let layer = InteractiveBubbleMap {
        x_column: "lon".into(),
        y_column: "lat".into(),
        size_column: "animals".into(),
        fill_column: "kind".into(),
        ring_column: "owner".into(),
        mapping: mapping.clone(),
        options: BubbleMapOptions { min_size: 2.0, max_size: 40.0, ..Default::default() },
        reference: SizeReference::default(),
    };

    let mut base = Viewport::new(600, 300).expect("vp");
    let bbox = draw_map(&mut base, &fc, None, &MapStyle::default()).expect("outline");

    let mut overlay = Viewport::new(600, 300).expect("vp");
    let all = BubbleMapFilters { year_column: "year".into(), category_column: "kind".into(), ..Default::default() };
    let rendered = draw_interactive_bubble_map(&mut overlay, &bbox, &shelters(), &layer, &all).expect("all rows");
    assert_eq!(rendered.hover.points.len(), 3);
    assert_eq!(rendered.sizes, Some(SizeRange { min: 40.0, max: 600.0 }));

    let dogs_2019 = BubbleMapFilters { year: Some(2019.0), categories: vec!["Dog".into()], ..all.clone() };
    let rendered = draw_interactive_bubble_map(&mut overlay, &bbox, &shelters(), &layer, &dogs_2019).expect("filtered");
    assert_eq!(rendered.hover.points.len(), 1);
    assert_eq!(rendered.sizes, Some(SizeRange { min: 120.0, max: 120.0 }));

    let nothing = BubbleMapFilters { year: Some(1990.0), ..all.clone() };
    let rendered = draw_interactive_bubble_map(&mut overlay, &bbox, &shelters(), &layer, &nothing).expect("empty");
    assert_eq!(rendered.sizes, None);

    draw_color_reference(&mut overlay, &mapping, 40.0, 260.0, parse_color("black").expect("black")).expect("legend");
    assert_png(&mut overlay);

    let partial = InteractiveBubbleMap { mapping: ColorMapping::new(mapping.entries[..1].to_vec()), ..layer };
    assert!(matches!(
        draw_interactive_bubble_map(&mut overlay, &bbox, &shelters(), &partial, &all),
        Err(Error::UnmappedCategory { .. })
    ));
}

#[test]
fn time_series_with_events() {
    let data = series();
    let events: Vec<TimeEvent> = serde_json::from_str(
        r#"[
          {"start_date":"2020-03-01","end_date":"2020-05-01","title":"Spring","description":"Intake peak","color":"rgba(255,0,0,0.2)"},
          {"start_date":"2020-07-01","end_date":"2020-07-01","title":"Fair","description":"One day","color":"orange"},
          {"start_date":"someday","end_date":"2020-07-01","title":"Bad","description":"skipped","color":"red"}
        ]"#,
    )
    .expect("events");
    let opts = TimeSeriesOptions {
        series: XyOptions { axes: Some(AxesProperties { x_label_angle: 45.0, ..Default::default() }), ..Default::default() },
        events,
        ..Default::default()
    };
    let mut vp = Viewport::new(800, 400).expect("vp");
    let rendered = draw_time_series(&mut vp, &data, "date", "y", &opts).expect("time series");
    assert_eq!(rendered.hover.points.len(), 24);
    assert_eq!(rendered.events.titles.len(), 2);
    assert!(rendered.events.titles[1].width > 0.0);
    assert!(rendered.hover.points.windows(2).all(|w| w[0].x_canvas <= w[1].x_canvas));
    vp.write_png(out_dir().join("time_series.png")).expect("write");
}

#[test]
fn radial_series_and_legend() {
    let data = series();
    let mut vp = Viewport::new(800, 800).expect("vp");
    let opts = RadialOptions { max_value: 40.0, line_divide_factor: 6, ..Default::default() };
    let hover = draw_radial_time_series(&mut vp, &data, "y", &opts).expect("radial");
    assert_eq!(hover.points.len(), 24);
    let label = Label::new(12.0, parse_color("black").expect("black"));
    vp.draw_text("Weekly intake", 20.0, 780.0, &label);
    draw_circle_legend(&mut vp, 6.0, parse_color("steelblue").expect("color"), 30.0, 750.0, 12.0, "intake", parse_color("black").expect("black"));
    vp.write_png(out_dir().join("radial.png")).expect("write");

    assert!(matches!(
        draw_radial_time_series(&mut vp, &Dataset::default(), "y", &opts),
        Err(Error::EmptyDataset { .. })
    ));
}

#[test]
fn tree_renders_every_state() {
    let data: Dataset = (0..30)
        .map(|i| Record::new().with("year", 2020.0).with("class", (i % 2) as f64))
        .collect();
    let mut rng = StdRng::seed_from_u64(11);
    let params = TreeParams { max_depth: 4, growth_ms: 200.0, ..TreeParams::default() };
    let (mut tree, totals) =
        TreeAnimation::create(&data, "year", "class", 2020.0, true, (600.0, 500.0), params, &mut rng);
    assert_eq!((totals.boys, totals.girls), (15, 15));

    let mut trunk = Viewport::screen(600, 500).expect("tree vp");
    let mut flowers = Viewport::screen(600, 500).expect("flower vp");
    use lumen_core::Animation;
    while tree.advance(100.0) {
        tree.render(&mut trunk, &mut flowers).expect("render");
    }
    tree.render(&mut trunk, &mut flowers).expect("render");
    assert!(!tree.flowers().is_empty());
    trunk.write_png(out_dir().join("tree.png")).expect("write");
    flowers.write_png(out_dir().join("flowers.png")).expect("write");
}
