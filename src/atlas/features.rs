//! Reading region ids and display names from a feature collection.
//!
//! Feature geometry is ignored entirely; only ids and name properties matter.

use serde_json::Value;

use crate::constants::FALLBACK_REGION_NAME;
use crate::error::AtlasError;
use crate::regions::RegionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFeature {
    pub id: RegionId,
    pub display_name: String,
}

/// Parse an atlas document: an object with a `features` array, or a bare array.
pub fn parse_atlas(json: &str, name_fields: &[String]) -> Result<Vec<RegionFeature>, AtlasError> {
    let document: Value = serde_json::from_str(json)?;
    let features = match &document {
        Value::Array(features) => features,
        Value::Object(map) => match map.get("features") {
            Some(Value::Array(features)) => features,
            _ => return Err(AtlasError::MissingFeatures),
        },
        _ => return Err(AtlasError::MissingFeatures),
    };

    Ok(features
        .iter()
        .enumerate()
        .map(|(index, feature)| RegionFeature {
            id: feature_id(feature, index),
            display_name: display_name(feature, name_fields),
        })
        .collect())
}

/// The feature's own id, or its position (`geo-<index>`) when it has none
fn feature_id(feature: &Value, index: usize) -> RegionId {
    match feature.get("id") {
        Some(Value::String(id)) if !id.is_empty() => RegionId::new(id.clone()),
        Some(Value::Number(id)) => RegionId::new(id.to_string()),
        _ => RegionId::new(format!("geo-{}", index)),
    }
}

/// First non-empty name property, in `name_fields` order
fn display_name(feature: &Value, name_fields: &[String]) -> String {
    let properties = feature.get("properties");
    name_fields
        .iter()
        .filter_map(|field| properties?.get(field)?.as_str())
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(FALLBACK_REGION_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<String> {
        vec!["N03_004".to_string(), "N03_003".to_string()]
    }

    #[test]
    fn test_first_non_empty_name_wins() {
        let feature = json!({"properties": {"N03_003": "Ishikari", "N03_004": "Sapporo"}});
        assert_eq!(display_name(&feature, &fields()), "Sapporo");

        let feature = json!({"properties": {"N03_003": "Abuta", "N03_004": "  "}});
        assert_eq!(display_name(&feature, &fields()), "Abuta");
    }

    #[test]
    fn test_fallback_name_when_no_field_matches() {
        let feature = json!({"properties": {"N03_004": null, "other": "x"}});
        assert_eq!(display_name(&feature, &fields()), FALLBACK_REGION_NAME);

        let bare = json!({});
        assert_eq!(display_name(&bare, &fields()), FALLBACK_REGION_NAME);
    }

    #[test]
    fn test_feature_collection_ids() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"id": "01100", "properties": {"N03_004": "Sapporo"}, "geometry": null},
                {"properties": {"N03_004": "Hakodate"}},
                {"id": 1203, "properties": {"N03_004": "Otaru"}}
            ]
        }"#;

        let features = parse_atlas(json, &fields()).unwrap();

        assert_eq!(features.len(), 3);
        assert_eq!(features[0].id.as_str(), "01100");
        assert_eq!(features[1].id.as_str(), "geo-1");
        assert_eq!(features[1].display_name, "Hakodate");
        assert_eq!(features[2].id.as_str(), "1203");
    }

    #[test]
    fn test_bare_feature_array_accepted() {
        let features = parse_atlas(r#"[{"properties": {}}]"#, &fields()).unwrap();
        assert_eq!(
            features,
            vec![RegionFeature {
                id: RegionId::from("geo-0"),
                display_name: FALLBACK_REGION_NAME.to_string(),
            }]
        );
    }

    #[test]
    fn test_documents_without_features_rejected() {
        assert!(matches!(
            parse_atlas(r#"{"type": "Topology"}"#, &fields()),
            Err(AtlasError::MissingFeatures)
        ));
        assert!(matches!(
            parse_atlas("42", &fields()),
            Err(AtlasError::MissingFeatures)
        ));
        assert!(matches!(
            parse_atlas("{", &fields()),
            Err(AtlasError::Parse(_))
        ));
    }
}
