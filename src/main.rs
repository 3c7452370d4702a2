use std::sync::Arc;

use anyhow::{Context, Result};
use infobus::api::Client;
use infobus::next_trips::{NextTrips, TripOptions};
use infobus::route_shapes::{RouteShapes, ShapeOptions};
use infobus::{Board, Provider, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let api_config = Arc::new(config::api_config()?);
    let provider = Arc::new(Provider::new());
    let stop_id = config::get_stop_id();
    let route_id = config::get_route_id();

    let next_trips =
        NextTrips::with_client(Client::with_shared(Arc::clone(&api_config), Arc::clone(&provider)));
    let options = TripOptions::new().limit(10).include_realtime(true);
    let trips = next_trips
        .fetch_next_trips(&stop_id, &options)
        .await
        .with_context(|| format!("fetching next trips for stop {stop_id}"))?;

    let stop_info = next_trips.stop_info();
    print!("{}", Board::new(stop_info.as_ref(), &trips));

    let route_shapes = RouteShapes::with_client(Client::with_shared(api_config, provider));
    let shapes = route_shapes
        .fetch_route_shapes(&route_id, &ShapeOptions::new())
        .await
        .with_context(|| format!("fetching shapes for route {route_id}"))?;

    println!();
    println!("Route {route_id}: {} shapes", shapes.features.len());
    match route_shapes.bounds() {
        Some(bounds) => println!(
            "bounds: north {:.5}, south {:.5}, east {:.5}, west {:.5}",
            bounds.north, bounds.south, bounds.east, bounds.west
        ),
        None => println!("bounds: none"),
    }

    Ok(())
}
