use crate::api::grid::GridGeometry;
use crate::core::geometry::{Label, Line};
use crate::util::error::MgrsError;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue};

/// Grid lines as `LineString` features in degrees, with a `precision` property.
pub fn lines_to_feature_collection(lines: &[Line]) -> Result<FeatureCollection, MgrsError> {
    let features = lines
        .iter()
        .map(|line| {
            let degrees = line.to_degrees()?;
            let mut properties = JsonObject::new();
            properties.insert(
                "precision".to_string(),
                JsonValue::from(line.precision.name()),
            );
            Ok(Feature {
                bbox: None,
                geometry: Some(Geometry::from(&degrees.to_line_string())),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<Feature>, MgrsError>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Labels as `Point` features at their centers, with `name`, `zone`, `band` and
/// `precision` properties and the label footprint as `bbox`.
pub fn labels_to_feature_collection(labels: &[Label]) -> FeatureCollection {
    let features = labels
        .iter()
        .map(|label| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), JsonValue::from(label.name.clone()));
            properties.insert("zone".to_string(), JsonValue::from(label.zone));
            properties.insert("band".to_string(), JsonValue::from(label.band.to_string()));
            properties.insert(
                "precision".to_string(),
                JsonValue::from(label.precision.name()),
            );
            let bounds = label.bounds;
            Feature {
                bbox: Some(vec![
                    bounds.west(),
                    bounds.south(),
                    bounds.east(),
                    bounds.north(),
                ]),
                geometry: Some(Geometry::from(&label.center.to_point())),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Lines followed by labels in one collection.
pub fn geometry_to_geojson(geometry: &GridGeometry) -> Result<GeoJson, MgrsError> {
    let mut collection = lines_to_feature_collection(geometry.lines())?;
    collection
        .features
        .extend(labels_to_feature_collection(geometry.labels()).features);
    Ok(GeoJson::FeatureCollection(collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::precision::Precision;
    use crate::util::bounds::Bounds;
    use geojson::Value;

    fn white_house_grid() -> Result<GridGeometry, MgrsError> {
        GridGeometry::new(
            &Bounds::degrees(-77.1, 38.85, -77.0, 38.95),
            Precision::TenKm,
        )
    }

    #[test]
    fn test_lines_in_degrees() -> Result<(), MgrsError> {
        let grid = white_house_grid()?;
        let collection = lines_to_feature_collection(grid.lines())?;
        assert_eq!(collection.features.len(), grid.lines().len());

        for feature in &collection.features {
            let Some(Geometry {
                value: Value::LineString(coords),
                ..
            }) = &feature.geometry
            else {
                panic!("expected a LineString");
            };
            assert_eq!(coords.len(), 2);
            for position in coords {
                assert!(position[0] > -77.11 && position[0] < -76.99);
                assert!(position[1] > 38.84 && position[1] < 38.96);
            }
            assert_eq!(
                feature.property("precision"),
                Some(&JsonValue::from("10km"))
            );
        }
        Ok(())
    }

    #[test]
    fn test_label_features() -> Result<(), MgrsError> {
        let grid = white_house_grid()?;
        let collection = labels_to_feature_collection(grid.labels());
        let names: Vec<&str> = collection
            .features
            .iter()
            .filter_map(|f| f.property("name").and_then(JsonValue::as_str))
            .collect();
        assert!(names.contains(&"UJ20"));

        let feature = &collection.features[0];
        assert_eq!(feature.property("zone"), Some(&JsonValue::from(18)));
        assert_eq!(feature.property("band"), Some(&JsonValue::from("S")));
        assert_eq!(feature.bbox.as_ref().map(Vec::len), Some(4));
        assert!(matches!(
            feature.geometry.as_ref().map(|g| &g.value),
            Some(Value::Point(_))
        ));

        let label = &grid.labels()[0];
        let footprint = label.bounds_meters()?;
        assert!(footprint.contains(&label.center_meters()));
        Ok(())
    }

    #[test]
    fn test_empty_collections() -> Result<(), MgrsError> {
        assert!(lines_to_feature_collection(&[])?.features.is_empty());
        assert!(labels_to_feature_collection(&[]).features.is_empty());
        Ok(())
    }

    #[test]
    fn test_geometry_document_parses() -> Result<(), MgrsError> {
        let grid = white_house_grid()?;
        let text = geometry_to_geojson(&grid)?.to_string();
        let parsed: GeoJson = text
            .parse()
            .map_err(|e: geojson::Error| MgrsError::Config(e.to_string()))?;
        let GeoJson::FeatureCollection(collection) = parsed else {
            panic!("expected a FeatureCollection");
        };
        assert_eq!(
            collection.features.len(),
            grid.lines().len() + grid.labels().len()
        );
        Ok(())
    }
}
