use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: (f64, f64),
    },
    LineString {
        coordinates: Vec<(f64, f64)>,
    },
    Polygon {
        coordinates: Vec<Vec<(f64, f64)>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    /// Value of the `type` member in the GeoJSON encoding
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::LineString { .. } => GeometryKind::LineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
        }
    }
}

/// A named document as it is stored in the collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub geom: Geometry,
}

impl Feature {
    pub fn new(name: &str, geom: Geometry) -> Self {
        Feature {
            name: name.into(),
            geom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn serialize_point_as_geojson() {
        let geom = Geometry::Point {
            coordinates: (30., 30.),
        };
        let value = to_value(&geom).unwrap();
        assert_eq!(value, json!({ "type": "Point", "coordinates": [30.0, 30.0] }));

        let parsed = serde_json::from_value::<::geojson::Geometry>(value).unwrap();
        assert_eq!(parsed.value, ::geojson::Value::Point(vec![30., 30.]));
    }

    #[test]
    fn serialize_polygon_as_geojson() {
        let ring = vec![(0., 0.), (1., 0.), (1., 1.), (0., 0.)];
        let geom = Geometry::Polygon {
            coordinates: vec![ring],
        };
        let value = to_value(&geom).unwrap();
        let parsed = serde_json::from_value::<::geojson::Geometry>(value).unwrap();
        match parsed.value {
            ::geojson::Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 4);
                assert_eq!(rings[0][1], vec![1., 0.]);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn deserialize_feature_ignores_extra_members() {
        let value = json!({
            "_id": "5f1d7a",
            "name": "bordureRoute1",
            "geom": { "type": "LineString", "coordinates": [[85, 1], [85, 50]] }
        });
        let feature: Feature = serde_json::from_value(value).unwrap();
        assert_eq!(feature.name, "bordureRoute1");
        assert_eq!(feature.geom.kind(), GeometryKind::LineString);
    }

    #[test]
    fn kind_names_match_type_tag() {
        let geom = Geometry::LineString {
            coordinates: vec![(85., 1.), (85., 50.)],
        };
        let value = to_value(&geom).unwrap();
        assert_eq!(value["type"], geom.kind().as_str());
    }
}
