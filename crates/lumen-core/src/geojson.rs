// File: crates/lumen-core/src/geojson.rs
// Summary: Minimal GeoJSON model (FeatureCollection of Polygon/MultiPolygon) via serde.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::record::{Record, Value};

/// `[x, y, ...]`; extra ordinates (altitude) are ignored.
pub type Position = Vec<f64>;
/// Closed sequence of positions.
pub type Ring = Vec<Position>;
/// Outer ring followed by holes.
pub type Polygon = Vec<Ring>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, serde_json::Value>>,
}

impl Feature {
    pub fn property(&self, name: &str) -> Option<Value> {
        self.properties.as_ref()?.get(name).cloned().map(Value::from)
    }

    pub fn properties_record(&self) -> Record {
        self.properties
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect()
    }

    /// Polygons of this feature; empty for missing or unsupported geometry.
    pub fn polygons(&self) -> &[Polygon] {
        match &self.geometry {
            Some(g) => g.polygons(),
            None => &[],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Polygon },
    MultiPolygon { coordinates: Vec<Polygon> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Geometry::Polygon { coordinates } => std::slice::from_ref(coordinates),
            Geometry::MultiPolygon { coordinates } => coordinates,
            Geometry::Unsupported => &[],
        }
    }
}
