//! Profile normalizer: strips noise from a nested profile record.
//!
//! Rules, applied recursively:
//! - a key containing a noise keyword is dropped; if its value is a mapping,
//!   that mapping's key-feature subkeys are hoisted into the current level
//! - string values containing a noise keyword are absent
//! - `null` is absent; absent values are removed from mappings and lists
//!
//! The top level is finally restricted to the key-feature vocabulary.
//! Malformed input only ever shrinks the output; nothing here fails.

use serde_json::{Map, Value};

use crate::profile::{IGNORE_KEYWORDS, KEY_FEATURES};

/// True when `text` contains any noise keyword, ignoring case.
pub fn is_noise(text: &str) -> bool {
    let lower = text.to_lowercase();
    IGNORE_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}

fn is_key_feature(key: &str) -> bool {
    KEY_FEATURES.contains(&key)
}

/// Recursive reducer. `None` means the value is absent.
pub fn clean_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => Some(Value::Object(clean_map(map))),
        Value::Array(items) => Some(Value::Array(items.iter().filter_map(clean_value).collect())),
        Value::String(s) if is_noise(s) => None,
        Value::Null => None,
        scalar => Some(scalar.clone()),
    }
}

fn clean_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::new();

    for (key, value) in map {
        if !is_noise(key) {
            if let Some(cleaned) = clean_value(value) {
                result.insert(key.clone(), cleaned);
            }
            continue;
        }

        if let Value::Object(nested) = value {
            for (subkey, subvalue) in nested {
                if !is_key_feature(subkey) {
                    continue;
                }
                if let Some(cleaned) = clean_value(subvalue) {
                    result.insert(subkey.clone(), cleaned);
                }
            }
        }
    }

    result
}

/// Normalizes a retrieved profile record.
///
/// Mappings come back restricted to key-feature fields at the top level;
/// other shapes are reduced by `clean_value` alone.
pub fn normalize_profile(record: &Value) -> Option<Value> {
    match clean_value(record)? {
        Value::Object(mut map) => {
            map.retain(|key, _| is_key_feature(key));
            Some(Value::Object(map))
        }
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_profile() -> Value {
        json!({
            "firstName": "Curtis",
            "lastName": "Northcutt",
            "headline": "CEO at Cleanlab",
            "geoLocationName": "San Francisco",
            "profilePictureUrn": "urn:li:digitalmediaAsset:123",
            "trackingId": "abc==",
            "displayPictureUrl": "https://media.example.com/p.jpg",
            "miniProfile": {
                "firstName": "Curtis",
                "publicIdentifier": "cgnorthcutt",
                "entityUrn": "urn:li:fs_miniProfile:1"
            },
            "locationUrnData": {
                "countryName": "United States",
                "postalCode": "94105"
            },
            "experience": [
                {
                    "title": "CEO",
                    "companyName": "Cleanlab",
                    "companyUrn": "urn:li:fs_miniCompany:2",
                    "company": {"employeeCountRange": {"start": 11, "end": 50}},
                    "timePeriod": {"startDate": {"year": 2021}},
                    "logoImg": {"rootUrl": "https://media.example.com/"},
                    "description": null
                },
                "https://example.com/stray",
                null
            ],
            "education": [],
            "skills": [{"name": "Machine Learning"}, {"name": "Python"}]
        })
    }

    /// Every key at every depth of `value`.
    fn all_keys(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    out.push(k.clone());
                    all_keys(v, out);
                }
            }
            Value::Array(items) => items.iter().for_each(|v| all_keys(v, out)),
            _ => {}
        }
    }

    #[test]
    fn test_noise_match_is_case_insensitive_substring() {
        assert!(is_noise("entityUrn"));
        assert!(is_noise("TRACKINGID"));
        assert!(is_noise("https://x"));
        assert!(is_noise("companyLogoImg"));
        assert!(!is_noise("headline"));
        assert!(!is_noise("Machine Learning"));
    }

    #[test]
    fn test_no_key_feature_is_noise() {
        assert!(KEY_FEATURES.iter().all(|f| !is_noise(f)));
    }

    #[test]
    fn test_noise_keys_never_survive_at_any_depth() {
        let normalized = normalize_profile(&raw_profile()).unwrap();
        let mut keys = Vec::new();
        all_keys(&normalized, &mut keys);
        assert!(!keys.is_empty());
        for key in keys {
            assert!(!is_noise(&key), "noise key '{key}' survived");
        }
    }

    #[test]
    fn test_key_features_hoisted_from_noise_mapping() {
        let normalized = normalize_profile(&raw_profile()).unwrap();
        assert_eq!(normalized["countryName"], "United States");
        assert!(normalized.get("postalCode").is_none());
        assert!(normalized.get("locationUrnData").is_none());
    }

    #[test]
    fn test_top_level_restricted_to_key_features() {
        let normalized = normalize_profile(&raw_profile()).unwrap();
        let map = normalized.as_object().unwrap();
        assert!(map.keys().all(|k| KEY_FEATURES.contains(&k.as_str())));
        assert_eq!(map["firstName"], "Curtis");
        assert_eq!(map["headline"], "CEO at Cleanlab");
    }

    #[test]
    fn test_nested_values_are_cleaned_and_absent_items_dropped() {
        let normalized = normalize_profile(&raw_profile()).unwrap();
        let experience = normalized["experience"].as_array().unwrap();
        assert_eq!(experience.len(), 1);
        assert_eq!(
            experience[0],
            json!({
                "title": "CEO",
                "companyName": "Cleanlab",
                "company": {"employeeCountRange": {"start": 11, "end": 50}},
                "timePeriod": {"startDate": {"year": 2021}}
            })
        );
        assert_eq!(normalized["education"], json!([]));
    }

    #[test]
    fn test_noise_scalar_is_absent() {
        assert_eq!(clean_value(&json!("https://example.com")), None);
        assert_eq!(clean_value(&json!(null)), None);
        assert_eq!(clean_value(&json!(42)), Some(json!(42)));
        assert_eq!(clean_value(&json!(true)), Some(json!(true)));
    }

    #[test]
    fn test_noise_key_with_scalar_value_is_dropped() {
        let cleaned = clean_value(&json!({"imgSize": 3, "summary": "hi"})).unwrap();
        assert_eq!(cleaned, json!({"summary": "hi"}));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_profile(&raw_profile()).unwrap();
        let twice = normalize_profile(&once).unwrap();
        assert_eq!(once, twice);

        let odd = json!([{"idx": {"skills": ["https"]}}, "plain", null]);
        let once = normalize_profile(&odd).unwrap();
        assert_eq!(normalize_profile(&once).unwrap(), once);
    }
}
