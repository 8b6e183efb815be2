//! Ingestion-time analytics event record
//!
//! Flat record mirroring the upstream export feed: attribution blocks for
//! the last attributed touch and last CTA view, device and user
//! identifiers, revenue fields, and free-form custom-data blobs kept as
//! serialized JSON strings. Feeds are sparse, so every field is optional
//! and missing attributes deserialize to `None`.

use serde::{Deserialize, Serialize};

/// One analytics event as delivered by the ingestion feed.
///
/// The record itself is immutable data; destination-aware derived values
/// are computed by [`crate::FieldDeriver`], never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// Raw ingestion timestamp as recorded upstream
    pub timestamp: Option<i64>,
    pub event_timestamp: Option<i64>,
    pub origin: Option<String>,
    pub customer_event_alias: Option<String>,
    pub deep_linked: Option<String>,
    pub first_event_for_user: Option<String>,
    pub hash_version: Option<String>,
    pub di_match_click_token: Option<i64>,

    // ------------------------------------------------------------------
    // Last attributed touch
    // ------------------------------------------------------------------
    pub last_attributed_touch_type: Option<String>,
    pub last_attributed_touch_timestamp: Option<String>,
    pub last_attributed_touch_timestamp_iso: Option<String>,
    pub last_attributed_touch_data_tilde_id: Option<String>,
    pub last_attributed_touch_data_tilde_campaign: Option<String>,
    pub last_attributed_touch_data_tilde_campaign_id: Option<String>,
    pub last_attributed_touch_data_tilde_customer_campaign: Option<String>,
    pub last_attributed_touch_data_tilde_campaign_type: Option<String>,
    pub last_attributed_touch_data_tilde_channel: Option<String>,
    pub last_attributed_touch_data_tilde_feature: Option<String>,
    pub last_attributed_touch_data_tilde_stage: Option<String>,
    /// Serialized JSON array of tag strings
    pub last_attributed_touch_data_tilde_tags: Option<String>,
    pub last_attributed_touch_data_tilde_advertising_partner_name: Option<String>,
    pub last_attributed_touch_data_tilde_secondary_publisher: Option<String>,
    pub last_attributed_touch_data_tilde_creative_name: Option<String>,
    pub last_attributed_touch_data_tilde_creative_id: Option<String>,
    pub last_attributed_touch_data_tilde_ad_set_name: Option<String>,
    pub last_attributed_touch_data_tilde_ad_set_id: Option<String>,
    pub last_attributed_touch_data_tilde_ad_name: Option<String>,
    pub last_attributed_touch_data_tilde_ad_id: Option<String>,
    pub last_attributed_touch_data_tilde_ad_format: Option<String>,
    pub last_attributed_touch_data_tilde_secondary_ad_format: Option<String>,
    pub last_attributed_touch_data_tilde_technology_partner: Option<String>,
    pub last_attributed_touch_data_tilde_banner_dimensions: Option<String>,
    pub last_attributed_touch_data_tilde_placement: Option<String>,
    pub last_attributed_touch_data_tilde_keyword: Option<String>,
    pub last_attributed_touch_data_tilde_keyword_id: Option<String>,
    pub last_attributed_touch_data_tilde_agency: Option<String>,
    pub last_attributed_touch_data_tilde_agency_id: Option<String>,
    pub last_attributed_touch_data_tilde_optimization_model: Option<String>,
    pub last_attributed_touch_data_tilde_journey_name: Option<String>,
    pub last_attributed_touch_data_tilde_journey_id: Option<String>,
    pub last_attributed_touch_data_tilde_view_name: Option<String>,
    pub last_attributed_touch_data_tilde_view_id: Option<String>,
    pub last_attributed_touch_data_plus_current_feature: Option<String>,
    /// Serialized JSON array of feature strings
    pub last_attributed_touch_data_plus_via_features: Option<String>,
    pub last_attributed_touch_data_plus_web_format: Option<String>,
    pub last_attributed_touch_data_plus_touch_id: Option<String>,
    pub last_attributed_touch_data_dollar_3p: Option<String>,
    /// Serialized JSON object of custom key/value pairs
    pub last_attributed_touch_data_custom_fields: Option<String>,
    pub days_from_last_attributed_touch_to_event: Option<String>,
    pub hours_from_last_attributed_touch_to_event: Option<String>,
    pub minutes_from_last_attributed_touch_to_event: Option<String>,
    pub seconds_from_last_attributed_touch_to_event: Option<String>,

    // ------------------------------------------------------------------
    // Last CTA view
    // ------------------------------------------------------------------
    pub last_cta_view_timestamp: Option<String>,
    pub last_cta_view_timestamp_iso: Option<String>,
    pub last_cta_view_data_tilde_id: Option<String>,
    pub last_cta_view_data_tilde_campaign: Option<String>,
    pub last_cta_view_data_tilde_campaign_id: Option<String>,
    pub last_cta_view_data_tilde_campaign_type: Option<String>,
    pub last_cta_view_data_tilde_channel: Option<String>,
    pub last_cta_view_data_tilde_feature: Option<String>,
    pub last_cta_view_data_tilde_stage: Option<String>,
    pub last_cta_view_data_tilde_tags: Option<String>,
    pub last_cta_view_data_tilde_advertising_partner_name: Option<String>,
    pub last_cta_view_data_tilde_secondary_publisher: Option<String>,
    pub last_cta_view_data_tilde_creative_name: Option<String>,
    pub last_cta_view_data_tilde_creative_id: Option<String>,
    pub last_cta_view_data_tilde_ad_set_name: Option<String>,
    pub last_cta_view_data_tilde_ad_set_id: Option<String>,
    pub last_cta_view_data_tilde_ad_name: Option<String>,
    pub last_cta_view_data_tilde_ad_id: Option<String>,
    pub last_cta_view_data_tilde_ad_format: Option<String>,
    pub last_cta_view_data_tilde_secondary_ad_format: Option<String>,
    pub last_cta_view_data_tilde_technology_partner: Option<String>,
    pub last_cta_view_data_tilde_banner_dimensions: Option<String>,
    pub last_cta_view_data_tilde_placement: Option<String>,
    pub last_cta_view_data_tilde_keyword_id: Option<String>,
    pub last_cta_view_data_tilde_agency: Option<String>,
    pub last_cta_view_data_tilde_optimization_model: Option<String>,
    pub last_cta_view_data_plus_via_features: Option<String>,
    pub last_cta_view_data_plus_touch_id: Option<String>,
    pub last_cta_view_data_dollar_3p: Option<String>,
    pub last_cta_view_data_plus_web_format: Option<String>,
    pub last_cta_view_data_custom_fields: Option<String>,

    // ------------------------------------------------------------------
    // User and device
    // ------------------------------------------------------------------
    pub user_data_os: Option<String>,
    pub user_data_os_version: Option<String>,
    pub user_data_os_version_android: Option<String>,
    pub user_data_model: Option<String>,
    pub user_data_brand: Option<String>,
    pub user_data_browser: Option<String>,
    pub user_data_app_version: Option<String>,
    pub user_data_sdk_version: Option<String>,
    pub user_data_build: Option<String>,
    pub user_data_environment: Option<String>,
    pub user_data_platform: Option<String>,
    pub user_data_aaid: Option<String>,
    pub user_data_idfa: Option<String>,
    pub user_data_idfv: Option<String>,
    pub user_data_android_id: Option<String>,
    pub user_data_limit_ad_tracking: Option<String>,
    pub user_data_user_agent: Option<String>,
    pub user_data_ip: Option<String>,
    pub user_data_developer_identity: Option<String>,
    pub user_data_cross_platform_id: Option<String>,
    pub user_data_past_cross_platform_ids: Option<String>,
    pub user_data_prob_cross_platform_ids: Option<String>,
    pub user_data_language: Option<String>,
    pub user_data_geo_country_code: Option<String>,
    pub user_data_geo_dma_code: Option<i64>,
    pub user_data_geo_city_code: Option<i64>,
    pub user_data_geo_city_en: Option<String>,
    pub user_data_http_referrer: Option<String>,
    pub user_data_installer_package_name: Option<String>,
    pub user_data_cpu_type: Option<String>,
    pub user_data_screen_width: Option<i64>,
    pub user_data_screen_height: Option<i64>,
    pub user_data_internet_connection_type: Option<String>,

    // ------------------------------------------------------------------
    // Commerce / revenue
    // ------------------------------------------------------------------
    pub event_data_revenue: Option<String>,
    pub event_data_revenue_in_usd: Option<String>,
    pub event_data_exchange_rate: Option<String>,
    pub event_data_currency: Option<String>,
    pub event_data_transaction_id: Option<String>,
    pub event_data_shipping: Option<String>,
    pub event_data_tax: Option<String>,
    pub event_data_coupon: Option<String>,
    pub event_data_affiliation: Option<String>,
    pub event_data_search_query: Option<String>,
    pub event_data_description: Option<String>,

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------
    /// Serialized JSON object of event-level custom data
    pub custom_data: Option<String>,
    pub store_install_begin_timestamp: Option<String>,
    pub referrer_click_timestamp: Option<String>,

    /// Attributes the feed sends that have no named field yet
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_feed_deserializes() {
        let record: EventRecord =
            serde_json::from_str(r#"{"name":"CLICK","timestamp":1541704239}"#).unwrap();
        assert_eq!(record.name.as_deref(), Some("CLICK"));
        assert_eq!(record.timestamp, Some(1541704239));
        assert!(record.user_data_aaid.is_none());
    }

    #[test]
    fn test_cta_view_block_has_named_fields() {
        let record: EventRecord = serde_json::from_str(
            r#"{
                "last_cta_view_data_tilde_placement": "Bottom Banner",
                "last_cta_view_data_tilde_agency": "Some Agency",
                "last_cta_view_data_tilde_banner_dimensions": "320x50"
            }"#,
        )
        .unwrap();
        assert_eq!(
            record.last_cta_view_data_tilde_placement.as_deref(),
            Some("Bottom Banner")
        );
        assert_eq!(
            record.last_cta_view_data_tilde_agency.as_deref(),
            Some("Some Agency")
        );
        assert_eq!(
            record.last_cta_view_data_tilde_banner_dimensions.as_deref(),
            Some("320x50")
        );
        // named columns, not spillover
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_attributes_land_in_extra() {
        let record: EventRecord =
            serde_json::from_str(r#"{"name":"OPEN","some_future_field":"x"}"#).unwrap();
        assert_eq!(
            record.extra.get("some_future_field"),
            Some(&serde_json::Value::String("x".to_string()))
        );
    }
}
