use super::error::StoreError;
use super::geojson::{Feature, GeometryKind};
use mongodb::bson::{doc, to_bson, Document};

/// Matches documents by the `type` member of their geometry.
///
/// # Example
///
/// ```
/// use geo_queries::filter::geometry_type;
/// use geo_queries::geojson::GeometryKind;
/// use mongodb::bson::doc;
///
/// let filter = geometry_type(GeometryKind::Polygon);
/// assert_eq!(filter, doc! { "geom.type": "Polygon" });
/// ```
pub fn geometry_type(kind: GeometryKind) -> Document {
    doc! { "geom.type": kind.as_str() }
}

fn spatial(reference: &Feature, operator: &str) -> Result<Document, StoreError> {
    let geometry = to_bson(&reference.geom)?;
    Ok(doc! {
        "name": { "$ne": reference.name.as_str() },
        "geom": { operator: { "$geometry": geometry } },
    })
}

/// Other documents ordered by their distance to the reference geometry.
/// Requires a `2dsphere` index on `geom`.
pub fn near(reference: &Feature) -> Result<Document, StoreError> {
    spatial(reference, "$near")
}

/// Other documents lying entirely inside the reference geometry.
pub fn within(reference: &Feature) -> Result<Document, StoreError> {
    spatial(reference, "$geoWithin")
}
