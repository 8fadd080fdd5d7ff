use super::geojson::{Feature, Geometry};

fn polygon(ring: &[(f64, f64)]) -> Geometry {
    Geometry::Polygon {
        coordinates: vec![ring.to_vec()],
    }
}

fn point(x: f64, y: f64) -> Geometry {
    Geometry::Point {
        coordinates: (x, y),
    }
}

fn line_string(coordinates: &[(f64, f64)]) -> Geometry {
    Geometry::LineString {
        coordinates: coordinates.to_vec(),
    }
}

/// Three buildings, four pedestrians and two roads, each under a unique name.
pub fn sample_features() -> Vec<Feature> {
    vec![
        Feature::new(
            "building1",
            polygon(&[(10., 10.), (20., 40.), (8., 35.), (4., 12.), (10., 10.)]),
        ),
        Feature::new(
            "building2",
            polygon(&[
                (40., 10.),
                (30., 20.),
                (40., 30.),
                (35., 40.),
                (60., 50.),
                (80., 35.),
                (60., 20.),
                (40., 10.),
            ]),
        ),
        Feature::new(
            "building3",
            polygon(&[(95., 10.), (95., 20.), (135., 20.), (135., 20.), (95., 10.)]),
        ),
        Feature::new("pedestrian1", point(70., 10.)),
        Feature::new("pedestrian2", point(30., 30.)),
        Feature::new("pedestrian3", point(70., 35.)),
        Feature::new("pedestrian4", point(60., 35.)),
        Feature::new("bordureRoute1", line_string(&[(85., 1.), (85., 50.)])),
        Feature::new("bordureRoute2", line_string(&[(92., 1.), (92., 50.)])),
    ]
}

pub fn find_by_name<'a>(features: &'a [Feature], name: &str) -> Option<&'a Feature> {
    features.iter().find(|feature| feature.name == name)
}
