//! Locale block embedded in the document for hydration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::LocaleBundle;

/// Client-side intl configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntlPayload {
    /// Locale key the request negotiated (e.g. "en").
    pub key: String,
    /// BCP 47 tag of the bundle (e.g. "en-US").
    pub locale: String,
    /// Full message table.
    pub messages: BTreeMap<String, String>,
}

impl IntlPayload {
    /// Build the payload for a negotiated key and its bundle.
    pub fn new(key: impl Into<String>, bundle: &LocaleBundle) -> Self {
        Self {
            key: key.into(),
            locale: bundle.locale.clone(),
            messages: bundle.messages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let bundle = LocaleBundle::new("en-US").with_message("hi", "Hi");
        let payload = IntlPayload::new("en", &bundle);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["key"], "en");
        assert_eq!(json["locale"], "en-US");
        assert_eq!(json["messages"]["hi"], "Hi");
    }
}
