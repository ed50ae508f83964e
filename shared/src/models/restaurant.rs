//! Restaurant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded image payload (logo/banner), stored inline with its mimetype.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageBlob {
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub mimetype: String,
}

/// Restaurant entity - the tenant root
///
/// Every other entity is exclusively owned by one restaurant; all core
/// operations are scoped by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    /// Unique URL slug, e.g. `/menu/my-restaurant`
    pub slug: String,
    /// IANA timezone name; falls back to UTC when unset or unparseable
    pub timezone: String,

    // Branding
    pub brand_color: String,
    pub tagline: Option<String>,
    pub logo: Option<ImageBlob>,
    pub banner: Option<ImageBlob>,

    /// Customer page-design configuration (opaque to the core)
    #[serde(default)]
    pub pages_config: serde_json::Value,
    /// QR style configuration (opaque to the core)
    #[serde(default)]
    pub qr_config: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

impl Restaurant {
    pub fn new(id: i64, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            timezone: "UTC".to_string(),
            brand_color: "#e74c3c".to_string(),
            tagline: None,
            logo: None,
            banner: None,
            pages_config: serde_json::Value::Null,
            qr_config: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }
}

/// Inline binary columns serialize as base64 strings.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
