#![allow(missing_docs)]


use chrono::TimeDelta;
use pretty_assertions::assert_eq;
use route_shapes::{ApiConfig, Bounds, Clock, Error, RouteShapes, ShapeFormat, ShapeOptions};
use serde_json::json;

use self::provider::MockProvider;

const GEO_SHAPES: &[u8] = include_bytes!("../data/geo-shapes.json");

fn config() -> ApiConfig {
    ApiConfig::new("https://api.infobus.example.com").with_api_key("test-key")
}

#[tokio::test]
async fn fetch_route_shapes() {
    let provider = MockProvider::new().respond(200, GEO_SHAPES);
    let route_shapes = RouteShapes::new(config(), provider.clone());

    let shapes = route_shapes
        .fetch_route_shapes("R1", &ShapeOptions::new())
        .await
        .expect("should fetch");

    assert_eq!(shapes.kind, "FeatureCollection");
    assert_eq!(shapes.features.len(), 3);
    assert_eq!(route_shapes.shapes(), Some(shapes));
    assert_eq!(route_shapes.features().len(), 3);

    let route = route_shapes.route_info().expect("route info");
    assert_eq!(route.route_long_name, "Centro - Universidad");
    assert_eq!(route.route_type, 3);
    assert_eq!(route_shapes.fetched_at(), Some(provider.now()));
    assert_eq!(route_shapes.last_error(), None);
    assert!(!route_shapes.is_loading());

    let uris = provider.uris();
    assert_eq!(uris[0].to_string(), "https://api.infobus.example.com/geo-shapes?route_id=R1");
}

#[tokio::test]
async fn query_options() {
    let provider = MockProvider::new().respond(200, GEO_SHAPES);
    let route_shapes = RouteShapes::new(config(), provider.clone());

    let options = ShapeOptions::new()
        .direction_id(1)
        .include_stops(false)
        .simplify(true)
        .format(ShapeFormat::Polyline);
    route_shapes.fetch_route_shapes("R1", &options).await.expect("should fetch");

    let uris = provider.uris();
    assert_eq!(
        uris[0].query(),
        Some("route_id=R1&direction_id=1&include_stops=false&simplify=true&format=polyline")
    );
}

#[test]
fn format_only() {
    let query = ShapeOptions::new().format(ShapeFormat::GeoJson).query("R1");

    assert_eq!(query.to_string(), "route_id=R1&format=geojson");
    assert_eq!(query.get("direction_id"), None);
}

#[tokio::test]
async fn shapes_by_direction() {
    let provider = MockProvider::new().respond(200, GEO_SHAPES);
    let route_shapes = RouteShapes::new(config(), provider);

    assert!(route_shapes.shapes_by_direction(0).is_empty());
    route_shapes.fetch_route_shapes("R1", &ShapeOptions::new()).await.expect("should fetch");

    let outbound = route_shapes.shapes_by_direction(0);
    assert_eq!(outbound.len(), 1);
    assert_eq!(outbound[0].properties.shape_id, "S1-0");

    let inbound = route_shapes.shapes_by_direction(1);
    assert_eq!(inbound[0].properties.shape_id, "S1-1");
    assert!(route_shapes.shapes_by_direction(2).is_empty());
}

// Elevation values are ignored rather than failing the whole payload.
#[tokio::test]
async fn elevation_coordinates() {
    let body = json!({
        "route_info": {
            "route_id": "R3",
            "route_short_name": "3",
            "route_long_name": "Volcan",
            "route_type": 3
        },
        "shapes": {
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[1, 2, 1150], [3, 4, 1160]]},
                "properties": {"shape_id": "S3", "route_id": "R3", "direction_id": 0}
            }]
        }
    });
    let provider = MockProvider::new().respond(200, body.to_string());
    let route_shapes = RouteShapes::new(config(), provider);

    route_shapes.fetch_route_shapes("R3", &ShapeOptions::new()).await.expect("should fetch");

    assert_eq!(route_shapes.all_coordinates(), vec![[1.0, 2.0], [3.0, 4.0]]);
    let bounds = route_shapes.bounds().expect("bounds");
    assert_eq!(bounds, Bounds { north: 4.0, south: 2.0, east: 3.0, west: 1.0 });
    assert_eq!(route_shapes.route_info().map(|route| route.route_id).as_deref(), Some("R3"));
}

// The stop point is not part of any line and must not widen the bounds.
#[tokio::test]
async fn coordinates_and_bounds() {
    let provider = MockProvider::new().respond(200, GEO_SHAPES);
    let route_shapes = RouteShapes::new(config(), provider);

    assert!(route_shapes.all_coordinates().is_empty());
    assert_eq!(route_shapes.bounds(), None);

    route_shapes.fetch_route_shapes("R1", &ShapeOptions::new()).await.expect("should fetch");

    let coordinates = route_shapes.all_coordinates();
    assert_eq!(coordinates.len(), 5);
    assert_eq!(coordinates[0], [-99.1332, 19.4326]);
    assert_eq!(coordinates[4], [-99.1610, 19.3980]);

    let bounds = route_shapes.bounds().expect("bounds");
    assert_eq!(bounds, Bounds { north: 19.4326, south: 19.3980, east: -99.1332, west: -99.1610 });
}

#[tokio::test]
async fn empty_collection() {
    let body = json!({
        "route_info": {
            "route_id": "R2",
            "route_short_name": "2",
            "route_long_name": "Norte - Sur",
            "route_type": 3
        },
        "shapes": {"type": "FeatureCollection", "features": []}
    });
    let provider = MockProvider::new().respond(200, body.to_string());
    let route_shapes = RouteShapes::new(config(), provider);

    let shapes = route_shapes
        .fetch_route_shapes("R2", &ShapeOptions::new())
        .await
        .expect("bare payload should decode");

    assert!(shapes.features.is_empty());
    assert_eq!(route_shapes.bounds(), None);
    assert!(route_shapes.data().is_some());
}

#[tokio::test]
async fn staleness() {
    let provider = MockProvider::new().respond(200, GEO_SHAPES);
    let route_shapes = RouteShapes::new(config(), provider.clone());

    assert!(route_shapes.is_stale(None));
    assert!(route_shapes.is_stale(Some(TimeDelta::days(30))));

    route_shapes.fetch_route_shapes("R1", &ShapeOptions::new()).await.expect("should fetch");
    assert!(!route_shapes.is_stale(None));

    provider.advance(TimeDelta::minutes(30));
    assert!(!route_shapes.is_stale(None));
    assert!(route_shapes.is_stale(Some(TimeDelta::minutes(5))));

    provider.advance(TimeDelta::seconds(1));
    assert!(route_shapes.is_stale(None));
}

#[tokio::test]
async fn failure_keeps_data() {
    let body = json!({"success": false, "message": "route not found"}).to_string();
    let provider = MockProvider::new().respond(200, GEO_SHAPES).respond(200, body);
    let route_shapes = RouteShapes::new(config(), provider);

    route_shapes.fetch_route_shapes("R1", &ShapeOptions::new()).await.expect("should fetch");
    let err = route_shapes.refresh("R9", &ShapeOptions::new()).await.unwrap_err();

    assert_eq!(err, Error::Api("route not found".to_string()));
    assert_eq!(route_shapes.last_error().as_deref(), Some("route not found"));
    assert_eq!(route_shapes.route_info().map(|route| route.route_id).as_deref(), Some("R1"));
    assert_eq!(route_shapes.features().len(), 3);
}

#[tokio::test]
async fn http_error() {
    let provider = MockProvider::new().respond(404, "not found");
    let route_shapes = RouteShapes::new(config(), provider);

    let err = route_shapes.fetch_route_shapes("R1", &ShapeOptions::new()).await.unwrap_err();

    assert_eq!(err, Error::Http { status: 404 });
    assert!(err.to_string().contains("404"));
    assert_eq!(route_shapes.last_error(), Some(err.to_string()));
    assert!(route_shapes.shapes().is_none());
}
