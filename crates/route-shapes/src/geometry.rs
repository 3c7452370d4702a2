//! Coordinate helpers for drawing route shapes on a map.

use serde::{Deserialize, Serialize};

use crate::types::{Position, RouteShape};

/// Axis-aligned bounding box, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// The smallest box containing every position, or `None` when there are
    /// none.
    #[must_use]
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        let mut positions = positions.into_iter();
        let &[lon, lat] = positions.next()?;
        let init = Self { north: lat, south: lat, east: lon, west: lon };

        Some(positions.fold(init, |bounds, &[lon, lat]| Self {
            north: bounds.north.max(lat),
            south: bounds.south.min(lat),
            east: bounds.east.max(lon),
            west: bounds.west.min(lon),
        }))
    }

    /// Midpoint as `[longitude, latitude]`.
    #[must_use]
    pub fn center(&self) -> Position {
        [f64::midpoint(self.west, self.east), f64::midpoint(self.south, self.north)]
    }
}

/// Line coordinates of every shape, in feature order.
#[must_use]
pub fn line_coordinates(shapes: &[RouteShape]) -> Vec<Position> {
    shapes.iter().flat_map(|shape| shape.geometry.line_coordinates()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points() {
        let bounds = Bounds::from_positions(&[[1.0, 2.0], [3.0, 4.0]]).expect("bounds");
        assert_eq!(bounds, Bounds { north: 4.0, south: 2.0, east: 3.0, west: 1.0 });
        assert_eq!(bounds.center(), [2.0, 3.0]);
    }

    #[test]
    fn single_point() {
        let bounds = Bounds::from_positions(&[[-99.1, 19.4]]).expect("bounds");
        assert_eq!(bounds, Bounds { north: 19.4, south: 19.4, east: -99.1, west: -99.1 });
    }

    #[test]
    fn no_points() {
        assert_eq!(Bounds::from_positions(&[]), None);
    }
}
