use super::geojson::Geometry;
use geo::prelude::*;
use geo_types::{LineString, Point, Polygon};

fn get_line_string(coordinates: &[(f64, f64)]) -> LineString<f64> {
    coordinates.to_vec().into()
}

fn get_polygon(rings: &[Vec<(f64, f64)>]) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| get_line_string(ring));
    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Polygon::new(exterior, rings.collect())
}

impl Geometry {
    pub fn as_point(&self) -> Option<Point<f64>> {
        match self {
            Geometry::Point { coordinates } => Some(Point::new(coordinates.0, coordinates.1)),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<Polygon<f64>> {
        match self {
            Geometry::Polygon { coordinates } => Some(get_polygon(coordinates)),
            _ => None,
        }
    }
}

/// Surface area in square meters.
///
/// Rings are projected onto a sphere with the WGS84 equatorial radius
/// (Chamberlain & Duquette), holes are subtracted from the exterior ring.
/// Points and line strings have no area.
pub trait Measurable {
    fn area(&self) -> f64;
}

impl Measurable for Geometry {
    fn area(&self) -> f64 {
        match self {
            Geometry::Polygon { coordinates } => {
                let mut rings = coordinates.iter().map(|ring| {
                    let polygon = Polygon::new(get_line_string(ring), vec![]);
                    polygon.chamberlain_duquette_unsigned_area()
                });
                let exterior = rings.next().unwrap_or(0.);
                rings.fold(exterior, |total, hole| total - hole)
            }
            _ => 0.,
        }
    }
}

/// Planar distance in degrees between a point and a geometry, zero if the
/// point touches or lies inside it.
pub fn get_distance(point: &Point<f64>, geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Point { coordinates } => {
            point.euclidean_distance(&Point::new(coordinates.0, coordinates.1))
        }
        Geometry::LineString { coordinates } => {
            point.euclidean_distance(&get_line_string(coordinates))
        }
        Geometry::Polygon { coordinates } => point.euclidean_distance(&get_polygon(coordinates)),
    }
}

pub fn is_within(geometry: &Geometry, polygon: &Polygon<f64>) -> bool {
    match geometry {
        Geometry::Point { coordinates } => {
            polygon.contains(&Point::new(coordinates.0, coordinates.1))
        }
        Geometry::LineString { coordinates } => polygon.contains(&get_line_string(coordinates)),
        Geometry::Polygon { coordinates } => polygon.contains(&get_polygon(coordinates)),
    }
}
