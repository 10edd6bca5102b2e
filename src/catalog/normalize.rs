//! Raw resource → `Photo`. Pure, no I/O.

use serde_json::Value;

use super::error::NormalizeError;
use super::records::RawResource;
use crate::model::{Color, Photo};

/// Split a composite identifier `"<album>/<name>"`.
///
/// Exactly one separator with non-empty segments on both sides; anything
/// deeper (`"a/b/c"`) or shallower is rejected rather than truncated.
pub fn split_public_id(public_id: &str) -> Result<(&str, &str), NormalizeError> {
    match public_id.split_once('/') {
        Some((album, name)) if !album.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((album, name))
        }
        _ => Err(NormalizeError::InvalidPublicId(public_id.to_string())),
    }
}

pub fn normalize(raw: RawResource) -> Result<Photo, NormalizeError> {
    let (album, name) = split_public_id(&raw.public_id)?;
    let (album, name) = (album.to_string(), name.to_string());

    Ok(Photo {
        name,
        album,
        public_id: raw.public_id,
        format: raw.format,
        version: raw.version,
        created_at: raw.created_at,
        width: raw.width,
        height: raw.height,
        colors: raw.colors.map(|colors| {
            colors
                .into_iter()
                .map(|c| Color {
                    code: c.0,
                    weight: c.1,
                })
                .collect()
        }),
        tags: raw.tags.unwrap_or_default(),
    })
}

/// Validate an untyped record and normalize it.
pub fn normalize_value(value: Value) -> Result<Photo, NormalizeError> {
    let raw: RawResource = serde_json::from_value(value)?;
    normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(public_id: &str) -> Value {
        json!({
            "public_id": public_id,
            "format": "jpg",
            "version": 1,
            "created_at": "2024-05-01T12:00:00Z",
            "width": 800,
            "height": 600
        })
    }

    #[test]
    fn test_split_public_id() {
        assert_eq!(split_public_id("trips/paris").unwrap(), ("trips", "paris"));
    }

    #[test]
    fn test_split_public_id_rejects_nesting_and_missing_segments() {
        for bad in ["trips", "trips/2024/paris", "/paris", "trips/", ""] {
            assert!(
                matches!(split_public_id(bad), Err(NormalizeError::InvalidPublicId(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_derives_album_and_name() {
        let photo = normalize_value(record("A/B")).unwrap();
        assert_eq!(photo.album, "A");
        assert_eq!(photo.name, "B");
        assert_eq!(photo.public_id, "A/B");
        assert_eq!(photo.width, 800);
        assert_eq!(photo.height, 600);
    }

    #[test]
    fn test_normalize_missing_tags_is_empty() {
        let photo = normalize_value(record("A/B")).unwrap();
        assert_eq!(photo.tags, Vec::<String>::new());
    }

    #[test]
    fn test_normalize_null_tags_is_empty() {
        let mut value = record("A/B");
        value["tags"] = Value::Null;
        assert!(normalize_value(value).unwrap().tags.is_empty());
    }

    #[test]
    fn test_normalize_keeps_tag_order() {
        let mut value = record("A/B");
        value["tags"] = json!(["zeta", "featured", "alpha"]);
        let photo = normalize_value(value).unwrap();
        assert_eq!(photo.tags, vec!["zeta", "featured", "alpha"]);
    }

    #[test]
    fn test_normalize_maps_colors_in_order() {
        let mut value = record("A/B");
        value["colors"] = json!([["#112233", 60.2], ["#FFFFFF", 12.0]]);
        let photo = normalize_value(value).unwrap();
        assert_eq!(
            photo.colors,
            Some(vec![
                Color {
                    code: "#112233".into(),
                    weight: 60.2
                },
                Color {
                    code: "#FFFFFF".into(),
                    weight: 12.0
                },
            ])
        );
    }

    #[test]
    fn test_normalize_absent_colors_stay_absent() {
        let photo = normalize_value(record("A/B")).unwrap();
        assert_eq!(photo.colors, None);
    }

    #[test]
    fn test_normalize_empty_colors_stay_present() {
        let mut value = record("A/B");
        value["colors"] = json!([]);
        assert_eq!(normalize_value(value).unwrap().colors, Some(vec![]));
    }

    #[test]
    fn test_normalize_rejects_malformed_record() {
        let mut value = record("A/B");
        value["width"] = json!("wide");
        assert!(matches!(
            normalize_value(value),
            Err(NormalizeError::Malformed(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_nested_public_id() {
        assert!(matches!(
            normalize_value(record("A/B/C")),
            Err(NormalizeError::InvalidPublicId(id)) if id == "A/B/C"
        ));
    }
}
