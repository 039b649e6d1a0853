//! Typed request and response models
//!
//! Plain data structs mirroring the JSON schemas of each API. Every field is
//! optional; unset fields are left out of request bodies, unknown response
//! fields are ignored.

pub mod androidpublisher;
pub mod calendar;
pub mod cloudtrace;
pub mod drive;
pub mod fusiontables;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Implement [`Paginated`](crate::resource::Paginated) for a list model with
/// a top-level `next_page_token`
macro_rules! impl_paginated {
    ($list:ty, $item:ty, $field:ident) => {
        impl $crate::resource::Paginated for $list {
            type Item = $item;

            fn next_page_token(&self) -> Option<&str> {
                self.next_page_token.as_deref()
            }

            fn into_items(self) -> Vec<$item> {
                self.$field.unwrap_or_default()
            }
        }
    };
}
pub(crate) use impl_paginated;

/// A notification channel for watching changes (Calendar and Drive)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Milliseconds since the epoch, as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

impl Channel {
    /// A `web_hook` channel delivering to `address`, with a random id
    pub fn web_hook(address: &str) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            r#type: Some("web_hook".to_string()),
            address: Some(address.to_string()),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_expiration(mut self, expires_at: chrono::DateTime<chrono::Utc>) -> Self {
        self.expiration = Some(expires_at.timestamp_millis().to_string());
        self
    }

    /// The channel fields `channels.stop` needs
    pub fn stop_request(&self) -> Self {
        Self {
            id: self.id.clone(),
            resource_id: self.resource_id.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_web_hook_channels_get_unique_ids() {
        let a = Channel::web_hook("https://example.com/notify");
        let b = Channel::web_hook("https://example.com/notify");
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(a.id.as_deref().unwrap()).is_ok());

        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["type"], "web_hook");
        assert_eq!(value["address"], "https://example.com/notify");
    }

    #[test]
    fn test_channel_expiration_in_millis() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        let channel = Channel::web_hook("https://example.com/n").with_expiration(at);
        assert_eq!(channel.expiration, Some(at.timestamp_millis().to_string()));
    }

    #[test]
    fn test_stop_request_keeps_identity_only() {
        let mut channel = Channel::web_hook("https://example.com/n").with_token("secret");
        channel.resource_id = Some("res-1".to_string());
        let stop = channel.stop_request();
        assert_eq!(stop.id, channel.id);
        assert_eq!(stop.resource_id.as_deref(), Some("res-1"));
        assert_eq!(stop.token, None);
        assert_eq!(stop.address, None);
    }
}
