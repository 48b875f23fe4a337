//! Geodesic distance on the WGS84 ellipsoid (Karney's algorithm via `geo`).

use crate::models::ZipCoordinate;
use geo::{GeodesicDistance, Point};

pub const METERS_PER_MILE: f64 = 1609.344;

fn point(coordinate: ZipCoordinate) -> Point<f64> {
    Point::new(coordinate.longitude, coordinate.latitude)
}

/// Distance in statute miles between two coordinates
pub fn distance_miles(source: ZipCoordinate, destination: ZipCoordinate) -> f64 {
    if source == destination {
        return 0.0;
    }
    point(source).geodesic_distance(&point(destination)) / METERS_PER_MILE
}

/// Same as [`distance_miles`] but taking raw degrees
pub fn distance(source_lat: f64, source_long: f64, dest_lat: f64, dest_long: f64) -> f64 {
    distance_miles(
        ZipCoordinate::new(source_lat, source_long),
        ZipCoordinate::new(dest_lat, dest_long),
    )
}
