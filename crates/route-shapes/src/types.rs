use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// Payload of the `geo-shapes` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteShapesResponse {
    pub route_info: RouteInfo,
    pub shapes: FeatureCollection,
}

/// A transit route, using GTFS `routes.txt` field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub route_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,
    pub route_short_name: String,
    pub route_long_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_desc: Option<String>,

    /// GTFS route type (3 = bus).
    pub route_type: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_sort_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous_pickup: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous_drop_off: Option<u8>,
}

/// GeoJSON `FeatureCollection` of route shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<RouteShape>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self { kind: feature_collection(), features: Vec::new() }
    }
}

fn feature_collection() -> String {
    "FeatureCollection".to_string()
}

/// GeoJSON `Feature` describing one shape of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteShape {
    #[serde(rename = "type", default = "feature")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: ShapeProperties,
}

fn feature() -> String {
    "Feature".to_string()
}

impl RouteShape {
    #[must_use]
    pub const fn direction_id(&self) -> Option<u8> {
        self.properties.direction_id
    }
}

/// Shape geometry. Only line strings carry coordinates we use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString {
        #[serde(deserialize_with = "positions")]
        coordinates: Vec<Position>,
    },

    /// Any other GeoJSON geometry (stops as `Point`, etc).
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Coordinates of a line geometry; empty for anything else.
    #[must_use]
    pub fn line_coordinates(&self) -> &[Position] {
        match self {
            Self::LineString { coordinates } => coordinates,
            Self::Unsupported => &[],
        }
    }
}

// Positions may carry elevation (`[lon, lat, alt]`); only `[lon, lat]` is kept.
fn positions<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Position>, D::Error> {
    let raw = Vec::<Vec<f64>>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|position| match position.as_slice() {
            &[lon, lat, ..] => Ok([lon, lat]),
            _ => Err(D::Error::invalid_length(position.len(), &"at least 2 elements")),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeProperties {
    pub shape_id: String,
    pub route_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_long_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_id: Option<u8>,
}
