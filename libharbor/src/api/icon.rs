//! Artifact icons.

use crate::client::Client;
use crate::error::{HarborError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// An icon image, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Icon {
    #[serde(rename = "content-type", alias = "content_type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Icon {
    /// Decodes `content`; a missing content yields no bytes.
    pub fn decode_content(&self) -> Result<Vec<u8>> {
        match &self.content {
            Some(content) => STANDARD
                .decode(content)
                .map_err(|e| HarborError::decode_with_source("Invalid base64 icon content", e)),
            None => Ok(Vec::new()),
        }
    }
}

impl Client {
    /// `GET /icons/{digest}`
    pub async fn get_icon(&self, digest: &str) -> Result<Icon> {
        self.get_json(&format!("/icons/{}", digest)).await
    }
}
