pub mod geojson;

pub use self::geojson::{
    geometry_to_geojson, labels_to_feature_collection, lines_to_feature_collection,
};
