//! Google Play Developer API v2 models

use crate::resource::Paginated;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An APK uploaded within an edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<ApkBinary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_code: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkBinary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_changes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkListingsListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<Vec<ApkListing>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApksAddExternallyHostedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externally_hosted_apk: Option<ExternallyHostedApk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApksAddExternallyHostedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externally_hosted_apk: Option<ExternallyHostedApk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApksListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apks: Option<Vec<Apk>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Contact details shown on the store listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
}

/// An edit: a transaction grouping changes to an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time_seconds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// One page of entitlements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementsListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Entitlement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_pagination: Option<TokenPagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references_version: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionFilesUploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion_file: Option<ExpansionFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternallyHostedApk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_base64s: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externally_hosted_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha1_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha256_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_sdk: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_sdk: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_permissions: Option<Vec<ExternallyHostedApkUsesPermission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternallyHostedApkUsesPermission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sdk_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesDeleteAllResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesUploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// An in-app product or subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InAppProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<HashMap<String, InAppProductListing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<HashMap<String, Price>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InAppProductListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsBatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrys: Option<Vec<InappproductsBatchRequestEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsBatchRequestEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproductsinsertrequest: Option<InappproductsInsertRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproductsupdaterequest: Option<InappproductsUpdateRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsBatchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrys: Option<Vec<InappproductsBatchResponseEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsBatchResponseEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproductsinsertresponse: Option<InappproductsInsertResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproductsupdateresponse: Option<InappproductsUpdateResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsInsertRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproduct: Option<InAppProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsInsertResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproduct: Option<InAppProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproduct: Option<Vec<InAppProduct>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_pagination: Option<TokenPagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproduct: Option<InAppProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappproductsUpdateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inappproduct: Option<InAppProduct>,
}

/// A localized store listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<Vec<Listing>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_per_page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_micros: Option<String>,
}

/// Purchase state of an in-app product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPurchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption_state: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_state: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_time_millis: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<MonthDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<MonthDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDeferralInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_expiry_time_millis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_expiry_time_millis: Option<String>,
}

/// Purchase state of a subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPurchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renewing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time_millis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_millis: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPurchasesDeferRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferral_info: Option<SubscriptionDeferralInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPurchasesDeferResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_expiry_time_millis: Option<String>,
}

/// Groups allowed to test an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_plus_communities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_token: Option<String>,
}

/// A release track and the version codes it serves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_codes: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracksListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<Track>>,
}
impl Paginated for EntitlementsListResponse {
    type Item = Entitlement;

    fn next_page_token(&self) -> Option<&str> {
        self.token_pagination.as_ref()?.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Entitlement> {
        self.resources.unwrap_or_default()
    }
}

impl Paginated for InappproductsListResponse {
    type Item = InAppProduct;

    fn next_page_token(&self) -> Option<&str> {
        self.token_pagination.as_ref()?.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<InAppProduct> {
        self.inappproduct.unwrap_or_default()
    }
}

impl Track {
    pub fn new(track: &str, version_codes: Vec<i32>) -> Self {
        Self {
            track: Some(track.to_string()),
            version_codes: Some(version_codes),
            ..Default::default()
        }
    }
}

impl SubscriptionPurchase {
    /// Expiry as a UTC timestamp
    pub fn expiry_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let millis = self.expiry_time_millis.as_deref()?.parse().ok()?;
        chrono::DateTime::from_timestamp_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_subscription_expiry_time() {
        let purchase: SubscriptionPurchase = serde_json::from_str(
            r#"{"kind": "androidpublisher#subscriptionPurchase", "autoRenewing": true,
                "expiryTimeMillis": "1790000000000", "startTimeMillis": "1760000000000"}"#,
        )
        .unwrap();
        assert_eq!(purchase.auto_renewing, Some(true));
        assert_eq!(
            purchase.expiry_time(),
            Some(Utc.timestamp_millis_opt(1_790_000_000_000).unwrap())
        );
    }

    #[test]
    fn test_in_app_product_maps() {
        let product: InAppProduct = serde_json::from_str(
            r#"{"sku": "coins_100", "purchaseType": "managedUser",
                "listings": {"en-US": {"title": "100 coins"}},
                "prices": {"US": {"currency": "USD", "priceMicros": "990000"}}}"#,
        )
        .unwrap();
        assert_eq!(product.listings.unwrap()["en-US"].title.as_deref(), Some("100 coins"));
        assert_eq!(product.prices.unwrap()["US"].price_micros.as_deref(), Some("990000"));
    }

    #[test]
    fn test_entitlements_token_pagination() {
        let page: EntitlementsListResponse = serde_json::from_str(
            r#"{"resources": [{"productId": "p1"}], "tokenPagination": {"nextPageToken": "x"}}"#,
        )
        .unwrap();
        assert_eq!(page.next_page_token(), Some("x"));
        assert_eq!(page.into_items()[0].product_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_track_version_codes() {
        let value = serde_json::to_value(Track::new("beta", vec![41, 42])).unwrap();
        assert_eq!(value, serde_json::json!({"track": "beta", "versionCodes": [41, 42]}));
    }
}
