//! OCI Content Digest validation and verification.
//!
//! This module provides a wrapper around the `oci_spec::image::Digest` type
//! to integrate with libharbor's error handling.

use crate::error::{HarborError, Result};
use oci_spec::image::Digest as OciDigest;
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;
use std::str::FromStr;


/// Represents a content digest (`algorithm:hex`), wrapping `oci_spec::image::Digest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(OciDigest);

impl FromStr for Digest {
    type Err = HarborError;

    fn from_str(s: &str) -> Result<Self> {
        let oci_digest = OciDigest::from_str(s).map_err(|e| {
            HarborError::validation_with_source(format!("Invalid digest format: {}", e), e)
        })?;
        Ok(Digest(oci_digest))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Digest {
    /// Returns the algorithm part, e.g. `sha256`.
    pub fn algorithm(&self) -> &str {
        self.0.algorithm().as_ref()
    }

    /// Returns the encoded (hex) part.
    pub fn hex(&self) -> &str {
        self.0.digest()
    }

    /// Checks that `content` hashes to this digest. Only sha256 is supported.
    pub fn verify(&self, content: &[u8]) -> Result<()> {
        let algorithm = self.algorithm();
        if algorithm != "sha256" {
            return Err(HarborError::validation(format!(
                "Unsupported digest algorithm: {}. Only sha256 is currently supported",
                algorithm
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(content);
        let computed = format!("{:x}", hasher.finalize());

        if computed != self.hex() {
            return Err(HarborError::validation(format!(
                "Digest mismatch: expected {}, computed sha256:{}",
                self, computed
            )));
        }
        Ok(())
    }
}
