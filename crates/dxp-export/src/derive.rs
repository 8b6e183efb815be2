//! Destination-aware field derivation
//!
//! A [`FieldDeriver`] borrows an [`EventRecord`] together with an
//! [`ExportDestination`] and computes the derived values destinations are
//! built from. Every accessor is a pure read of the record's current
//! attribute values; nothing is memoized and the record is never mutated,
//! so re-deriving after an upstream correction reflects the new values.

use crate::destination::{ExportDestination, IdentityField, TouchDataPolicy};
use crate::event::EventRecord;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::warn;

/// Prefix of every attributed-touch attribute on the record.
const TOUCH_DATA_PREFIX: &str = "last_attributed_touch_data";

/// Device identifier attributes in selection order.
const DEVICE_ID_ORDER: &[fn(&EventRecord) -> Option<&String>] = &[
    |r| r.user_data_aaid.as_ref(),
    |r| r.user_data_idfa.as_ref(),
    |r| r.user_data_idfv.as_ref(),
    |r| r.user_data_android_id.as_ref(),
];

/// Stateless view over one record for one destination.
pub struct FieldDeriver<'a> {
    record: &'a EventRecord,
    destination: ExportDestination,
}

impl<'a> FieldDeriver<'a> {
    pub fn new(record: &'a EventRecord, destination: ExportDestination) -> Self {
        Self {
            record,
            destination,
        }
    }

    /// Millisecond timestamp for the event.
    ///
    /// Without a raw timestamp this is the current wall-clock time. With
    /// one, the value is `ceil(raw / 1000)`: the divide-by-1000 matches
    /// what downstream consumers were built against and is kept verbatim
    /// even though the raw value already looks second-scale.
    pub fn timestamp_millis(&self) -> i64 {
        match self.record.timestamp {
            None => Utc::now().timestamp_millis(),
            // `i64::div_ceil` is unstable; this is the stable equivalent.
            Some(raw) => raw.div_euclid(1000) + (raw.rem_euclid(1000) != 0) as i64,
        }
    }

    /// Comma-joined tag list from the attributed touch.
    pub fn joined_tags(&self) -> String {
        join_serialized_array(self.record.last_attributed_touch_data_tilde_tags.as_deref())
    }

    /// Comma-joined via-features list from the attributed touch.
    pub fn joined_features(&self) -> String {
        join_serialized_array(
            self.record
                .last_attributed_touch_data_plus_via_features
                .as_deref(),
        )
    }

    /// User identity for the configured destination: first non-empty
    /// attribute in the destination's priority order.
    pub fn user_id(&self) -> Option<String> {
        for field in self.destination.policy().identity_priority {
            let candidate = match field {
                IdentityField::DeveloperIdentity => {
                    non_empty(self.record.user_data_developer_identity.as_ref())
                },
                IdentityField::CrossPlatformId => {
                    non_empty(self.record.user_data_cross_platform_id.as_ref())
                },
                IdentityField::DeviceId => self.device_id(),
            };
            if candidate.is_some() {
                return candidate;
            }
        }
        None
    }

    /// First non-empty hardware identifier: aaid, idfa, idfv, android id.
    pub fn device_id(&self) -> Option<String> {
        DEVICE_ID_ORDER
            .iter()
            .find_map(|get| non_empty(get(self.record)))
    }

    /// Attributed-touch block as a serialized JSON object.
    ///
    /// Collects every present attribute named under the touch-data prefix,
    /// including custom fields the feed delivered without a named column.
    /// Destinations with a custom-fields-only policy get just the blob.
    pub fn touch_data(&self) -> serde_json::Result<String> {
        match self.destination.policy().touch_data {
            TouchDataPolicy::CustomFieldsOnly => serde_json::to_string(
                &self
                    .custom_data()
                    .map(|fields| {
                        let mut block = Map::new();
                        block.insert(
                            format!("{}_custom_fields", TOUCH_DATA_PREFIX),
                            Value::String(fields.to_string()),
                        );
                        block
                    })
                    .unwrap_or_default(),
            ),
            TouchDataPolicy::Full => {
                let attributes = serde_json::to_value(self.record)?;
                let mut block = Map::new();
                if let Value::Object(attributes) = attributes {
                    for (key, value) in attributes {
                        if key.starts_with(TOUCH_DATA_PREFIX) && !value.is_null() {
                            block.insert(key, value);
                        }
                    }
                }
                serde_json::to_string(&block)
            },
        }
    }

    /// Serialized custom-fields blob from the attributed touch, passed
    /// through for destination metadata blocks.
    pub fn custom_data(&self) -> Option<&str> {
        self.record
            .last_attributed_touch_data_custom_fields
            .as_deref()
    }
}

/// Non-empty attribute values only; empty strings read as unset.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// Join a serialized JSON string array with commas, no escaping.
///
/// An absent or empty serialized value joins to the empty string.
fn join_serialized_array(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items.join(","),
        Err(e) => {
            warn!(raw = %raw, error = %e, "Unparseable serialized array attribute");
            String::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deriver(record: &EventRecord) -> FieldDeriver<'_> {
        FieldDeriver::new(record, ExportDestination::None)
    }

    #[test]
    fn test_timestamp_ceiling_division() {
        let record = EventRecord {
            timestamp: Some(1_541_704_239_104),
            ..Default::default()
        };
        assert_eq!(deriver(&record).timestamp_millis(), 1_541_704_240);

        let record = EventRecord {
            timestamp: Some(2_000),
            ..Default::default()
        };
        assert_eq!(deriver(&record).timestamp_millis(), 2);
    }

    #[test]
    fn test_timestamp_defaults_to_now() {
        let record = EventRecord::default();
        let before = Utc::now().timestamp_millis();
        let millis = deriver(&record).timestamp_millis();
        let after = Utc::now().timestamp_millis();
        assert!(millis >= before && millis <= after);
    }

    #[test]
    fn test_joined_tags() {
        let mut record = EventRecord {
            last_attributed_touch_data_tilde_tags: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(deriver(&record).joined_tags(), "");

        record.last_attributed_touch_data_tilde_tags = Some(r#"["Bottom Banner"]"#.to_string());
        assert_eq!(deriver(&record).joined_tags(), "Bottom Banner");

        record.last_attributed_touch_data_tilde_tags = Some(r#"["A","B","C"]"#.to_string());
        assert_eq!(deriver(&record).joined_tags(), "A,B,C");
    }

    #[test]
    fn test_joined_features() {
        let record = EventRecord {
            last_attributed_touch_data_plus_via_features: Some(
                r#"["journeys","quick links"]"#.to_string(),
            ),
            ..Default::default()
        };
        assert_eq!(deriver(&record).joined_features(), "journeys,quick links");
    }

    #[test]
    fn test_device_id_priority() {
        let mut record = EventRecord {
            user_data_aaid: Some("2f3ff5df-fd74-0bfa-1286-70755d580118".to_string()),
            user_data_idfa: Some("other-idfa".to_string()),
            ..Default::default()
        };
        assert_eq!(
            deriver(&record).device_id().as_deref(),
            Some("2f3ff5df-fd74-0bfa-1286-70755d580118")
        );

        record.user_data_aaid = Some("".to_string());
        assert_eq!(deriver(&record).device_id().as_deref(), Some("other-idfa"));
    }

    #[test]
    fn test_user_id_follows_destination_priority() {
        let record = EventRecord {
            user_data_developer_identity: Some("318".to_string()),
            user_data_cross_platform_id: Some("xp-99".to_string()),
            ..Default::default()
        };

        let mixpanel = FieldDeriver::new(&record, ExportDestination::Mixpanel);
        assert_eq!(mixpanel.user_id().as_deref(), Some("318"));

        let amplitude = FieldDeriver::new(&record, ExportDestination::Amplitude);
        assert_eq!(amplitude.user_id().as_deref(), Some("xp-99"));
    }

    #[test]
    fn test_user_id_falls_back_to_device_id() {
        let record = EventRecord {
            user_data_idfa: Some("device-1".to_string()),
            ..Default::default()
        };
        let amplitude = FieldDeriver::new(&record, ExportDestination::Amplitude);
        assert_eq!(amplitude.user_id().as_deref(), Some("device-1"));
    }

    #[test]
    fn test_touch_data_collects_prefixed_attributes() {
        let record = EventRecord {
            name: Some("CLICK".to_string()),
            last_attributed_touch_data_tilde_campaign: Some(
                "Top vs Bottom Banner A/B Test".to_string(),
            ),
            last_attributed_touch_data_tilde_channel: Some("Some Channel".to_string()),
            user_data_aaid: Some("device".to_string()),
            ..Default::default()
        };

        let raw = deriver(&record).touch_data().unwrap();
        let block: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            block["last_attributed_touch_data_tilde_campaign"],
            "Top vs Bottom Banner A/B Test"
        );
        assert_eq!(block["last_attributed_touch_data_tilde_channel"], "Some Channel");
        // only the prefixed block, nothing else from the record
        assert!(block.get("name").is_none());
        assert!(block.get("user_data_aaid").is_none());
    }

    #[test]
    fn test_touch_data_custom_fields_only_policy() {
        let record = EventRecord {
            last_attributed_touch_data_custom_fields: Some(r#"{"k":"v"}"#.to_string()),
            last_attributed_touch_data_tilde_campaign: Some("campaign".to_string()),
            ..Default::default()
        };

        let segment = FieldDeriver::new(&record, ExportDestination::Segment);
        let raw = segment.touch_data().unwrap();
        let block: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(block.get("last_attributed_touch_data_tilde_campaign").is_none());
        assert_eq!(
            block["last_attributed_touch_data_custom_fields"],
            r#"{"k":"v"}"#
        );
    }

    #[test]
    fn test_derivations_reflect_record_changes() {
        let mut record = EventRecord {
            user_data_aaid: Some("first".to_string()),
            ..Default::default()
        };
        assert_eq!(deriver(&record).device_id().as_deref(), Some("first"));

        record.user_data_aaid = Some("second".to_string());
        assert_eq!(deriver(&record).device_id().as_deref(), Some("second"));
    }
}
