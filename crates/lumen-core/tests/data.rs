// File: crates/lumen-core/tests/data.rs
// Purpose: CSV loading with dynamic typing, typed accessors, dataset transforms and JSON configuration.

use lumen_core::axis::TickFormat;
use lumen_core::plots::{category_counts, parse_date_millis, TimeEvent};
use lumen_core::{parse_color, read_csv, AxesProperties, ColorMapping, ColorRole, Error, IntervalMode, Value};

const ADOPTIONS: &str = "\
year, state ,count,verified,note
2019,Texas,12,true,
2020,Ohio,7,false,late
2019,Ohio,3.5,true,

2021,Texas,9,false,x
";

#[test]
fn csv_cells_are_dynamically_typed() {
    let data = read_csv(ADOPTIONS.as_bytes()).expect("csv");
    assert_eq!(data.len(), 4, "blank lines are skipped");

    let first = &data.records[0];
    assert_eq!(first.columns().collect::<Vec<_>>(), ["year", "state", "count", "verified", "note"]);
    assert_eq!(first.try_get("year"), Some(&Value::Number(2019.0)));
    assert_eq!(first.try_get("state"), Some(&Value::Text("Texas".into())));
    assert_eq!(first.try_get("verified"), Some(&Value::Bool(true)));
    assert_eq!(first.try_get("note"), Some(&Value::Null));
    assert_eq!(data.records[2].get_number("count").expect("count"), 3.5);
}

#[test]
fn typed_accessors_report_missing_and_mismatched_columns() {
    let data = read_csv(ADOPTIONS.as_bytes()).expect("csv");
    let r = &data.records[1];
    assert!(matches!(r.get_number("missing"), Err(Error::MissingColumn { column }) if column == "missing"));
    assert!(matches!(
        r.get_number("state"),
        Err(Error::TypeMismatch { expected: "number", found: "text", .. })
    ));
    assert_eq!(r.get_string("count").expect("count as text"), "7");
    assert!(data.records[0].get_string("note").is_err());
}

#[test]
fn dataset_sort_filter_and_derive() {
    let data = read_csv(ADOPTIONS.as_bytes()).expect("csv");

    let sorted = data.sorted_by("count").expect("sort");
    assert_eq!(sorted.numbers("count").expect("counts"), vec![3.5, 7.0, 9.0, 12.0]);
    // Input untouched.
    assert_eq!(data.numbers("count").expect("counts"), vec![12.0, 7.0, 3.5, 9.0]);

    let texas = data.filter(|r| r.get_string("state").is_ok_and(|s| s == "Texas"));
    assert_eq!(texas.len(), 2);

    let doubled = data
        .with_column("twice", |r| Ok(Value::Number(r.get_number("count")? * 2.0)))
        .expect("derive");
    assert_eq!(doubled.numbers("twice").expect("twice"), vec![24.0, 14.0, 7.0, 18.0]);

    let ohio = data.find("state", &Value::from("Ohio")).expect("Ohio row");
    assert_eq!(ohio.get_number("year").expect("year"), 2020.0);

    assert!(matches!(data.sorted_by("state"), Err(Error::TypeMismatch { .. })));
}

#[test]
fn category_counts_keep_first_appearance_order() {
    let data = read_csv(ADOPTIONS.as_bytes()).expect("csv");
    let counts = category_counts(&data, "state").expect("counts");
    assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![("Texas".to_string(), 2), ("Ohio".to_string(), 2)]);
}

#[test]
fn css_colors_parse() {
    let c = parse_color("steelblue").expect("named");
    assert_eq!((c.r(), c.g(), c.b()), (70, 130, 180));
    let c = parse_color("#1F1916").expect("hex");
    assert_eq!((c.r(), c.g(), c.b()), (0x1f, 0x19, 0x16));
    let c = parse_color("#fff").expect("short hex");
    assert_eq!((c.r(), c.g(), c.b()), (255, 255, 255));
    let c = parse_color("rgb(255, 3, 58)").expect("rgb");
    assert_eq!((c.a(), c.r(), c.g(), c.b()), (255, 255, 3, 58));
    let c = parse_color("rgba(0, 0, 0, 0.5)").expect("rgba");
    assert_eq!(c.a(), 128);
    assert!(matches!(parse_color("not-a-color"), Err(Error::InvalidColor { .. })));
}

#[test]
fn color_mapping_loads_from_json_and_rejects_unknown_categories() {
    let mapping: ColorMapping = serde_json::from_str(
        r#"[
          { "color": "#DE78A1", "label": "Dog", "role": "fill" },
          { "color": "black", "label": "Shelter", "role": "stroke" },
          { "color": "red", "label": "Rescue", "role": "ring" }
        ]"#,
    )
    .expect("mapping json");
    assert_eq!(mapping.entries.len(), 3);
    assert_eq!(mapping.lookup("Rescue", ColorRole::Stroke).expect("ring alias"), parse_color("red").expect("red"));
    assert!(mapping.lookup("Dog", ColorRole::Fill).is_ok());
    assert!(matches!(
        mapping.lookup("Dog", ColorRole::Stroke),
        Err(Error::UnmappedCategory { role: "stroke", .. })
    ));
}

#[test]
fn axes_properties_and_events_deserialize() {
    let axes: AxesProperties = serde_json::from_str(r#"{ "x_mode": -1, "y_mode": 25, "color": "grey" }"#).expect("axes");
    assert_eq!(axes.x_mode, IntervalMode::Dynamic);
    assert_eq!(axes.y_mode, IntervalMode::Fixed(25.0));
    assert_eq!(axes.x_pos, 50.0);

    let events: Vec<TimeEvent> = serde_json::from_str(
        r#"[{ "start_date": "2020-03-01", "end_date": "2020-06-01", "title": "Lockdown",
              "desc": "Shelters closed", "color": "rgba(255, 0, 0, 0.2)" }]"#,
    )
    .expect("events");
    assert_eq!(events[0].description, "Shelters closed");
}

#[test]
fn dates_parse_to_utc_millis_and_format_back() {
    assert_eq!(parse_date_millis("2020-01-01").expect("date"), 1_577_836_800_000.0);
    assert_eq!(parse_date_millis("2020/01/01").expect("slashes"), 1_577_836_800_000.0);
    assert_eq!(parse_date_millis("2020-01-01 00:00:10").expect("datetime"), 1_577_836_810_000.0);
    assert_eq!(parse_date_millis("2020-01-01T01:00:00+01:00").expect("rfc3339"), 1_577_836_800_000.0);
    assert!(matches!(parse_date_millis("soon"), Err(Error::InvalidDate { .. })));

    assert_eq!(TickFormat::Date.label(1_577_836_800_000.0), "2020/01/01");
    assert_eq!(TickFormat::Number.label(13.5), "13.5");
}
