//! GeoJSON encoding of the committed region.
//!
//! A region is written as a single GeoJSON `MultiPolygon` geometry. Reading
//! accepts any GeoJSON document (geometry, feature, feature collection) whose
//! geometries are all polygonal, and merges them into one region. Rings must
//! be closed with at least three distinct vertices and finite coordinates.
//! The JSON literal `null` stands for "nothing painted".

use geo::{Geometry, MultiPolygon, Polygon};
use geojson::GeoJson;

use crate::geometry::{validate_region, Region};

use super::error::PersistenceError;

/// Serialize the committed region; `None` becomes `null`.
pub fn encode_region(region: Option<&Region>) -> Result<String, PersistenceError> {
    let Some(region) = region else {
        return Ok(serde_json::to_string(&serde_json::Value::Null)?);
    };

    let geometry = geojson::Geometry::new(geojson::Value::from(region.as_multi_polygon()));
    Ok(serde_json::to_string(&geometry)?)
}

/// Parse a region document. `Ok(None)` means the document was `null`.
pub fn decode_region(json: &str) -> Result<Option<Region>, PersistenceError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_null() {
        return Ok(None);
    }

    let document = GeoJson::try_from(value)?;
    let collection: geo::GeometryCollection<f64> = geojson::quick_collection(&document)?;

    let mut polygons = Vec::new();
    for geometry in collection {
        collect_polygons(geometry, &mut polygons)?;
    }
    let region = Region::from(MultiPolygon::new(polygons));
    validate_region(&region)?;
    Ok(Some(region))
}

fn collect_polygons(
    geometry: Geometry<f64>,
    polygons: &mut Vec<Polygon<f64>>,
) -> Result<(), PersistenceError> {
    match geometry {
        Geometry::Polygon(polygon) => polygons.push(polygon),
        Geometry::MultiPolygon(multi) => polygons.extend(multi),
        Geometry::GeometryCollection(nested) => {
            for inner in nested {
                collect_polygons(inner, polygons)?;
            }
        }
        Geometry::Rect(rect) => polygons.push(rect.to_polygon()),
        Geometry::Triangle(triangle) => polygons.push(triangle.to_polygon()),
        Geometry::Point(_) => return Err(PersistenceError::UnsupportedGeometry("Point")),
        Geometry::MultiPoint(_) => return Err(PersistenceError::UnsupportedGeometry("MultiPoint")),
        Geometry::Line(_) | Geometry::LineString(_) => {
            return Err(PersistenceError::UnsupportedGeometry("LineString"));
        }
        Geometry::MultiLineString(_) => {
            return Err(PersistenceError::UnsupportedGeometry("MultiLineString"));
        }
    }
    Ok(())
}
