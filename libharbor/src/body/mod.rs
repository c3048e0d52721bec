//! Request bodies and response sinks for the transport pipeline.
//!
//! A [`RequestBody`] says how the outgoing payload is produced, a
//! [`ResponseSink`] says where a successful response body goes.

use crate::error::{HarborError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::Write;

#[cfg(test)]
mod tests;

/// Outgoing payload of an exchange.
#[derive(Default)]
pub enum RequestBody {
    /// No body at all.
    #[default]
    Empty,
    /// Bytes sent verbatim.
    Raw(Vec<u8>),
    /// A caller-provided stream, passed through untouched.
    Stream(reqwest::Body),
    /// Text sent as-is.
    Text(String),
    /// A JSON document, serialized when the request is built.
    Json(serde_json::Value),
}

impl RequestBody {
    /// Serializes `value` into a JSON body.
    ///
    /// Fails with [`HarborError::Encoding`] before any network I/O happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::body::RequestBody;
    /// use serde_json::json;
    ///
    /// let body = RequestBody::json(&json!({"id": 3})).unwrap();
    /// assert!(!body.is_empty());
    /// ```
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| HarborError::encoding_with_source("Failed to encode request body", e))?;
        Ok(RequestBody::Json(value))
    }

    /// Returns true when no payload will be sent.
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Converts into the body handed to reqwest, `None` for [`RequestBody::Empty`].
    pub(crate) fn into_body(self) -> Result<Option<reqwest::Body>> {
        match self {
            RequestBody::Empty => Ok(None),
            RequestBody::Raw(bytes) => Ok(Some(reqwest::Body::from(bytes))),
            RequestBody::Stream(body) => Ok(Some(body)),
            RequestBody::Text(text) => Ok(Some(reqwest::Body::from(text))),
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| {
                    HarborError::encoding_with_source("Failed to encode request body", e)
                })?;
                Ok(Some(reqwest::Body::from(bytes)))
            }
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "Empty"),
            RequestBody::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
            RequestBody::Stream(_) => write!(f, "Stream"),
            RequestBody::Text(text) => write!(f, "Text({} bytes)", text.len()),
            RequestBody::Json(value) => write!(f, "Json({})", value),
        }
    }
}

/// Something a successful response body can be decoded into.
pub trait DecodeTarget: Send {
    /// Decodes the complete response body.
    fn decode(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<T: DeserializeOwned + Send> DecodeTarget for Option<T> {
    fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        let value = serde_json::from_slice(bytes)
            .map_err(|e| HarborError::decode_with_source("Failed to decode response body", e))?;
        *self = Some(value);
        Ok(())
    }
}

/// Destination of a successful response body.
#[derive(Default)]
pub enum ResponseSink<'a> {
    /// The body is dropped.
    #[default]
    Discard,
    /// The body is streamed into the writer chunk by chunk.
    Writer(&'a mut (dyn Write + Send)),
    /// The body is appended verbatim to the buffer.
    Buffer(&'a mut Vec<u8>),
    /// The body is deserialized as JSON.
    Json(&'a mut dyn DecodeTarget),
}

impl<'a> ResponseSink<'a> {
    /// Builds a JSON sink over an `Option<T>` slot.
    pub fn json<T: DeserializeOwned + Send>(slot: &'a mut Option<T>) -> Self {
        ResponseSink::Json(slot)
    }

    /// Consumes the response body into the sink.
    pub(crate) async fn drain(self, mut response: reqwest::Response) -> Result<()> {
        match self {
            ResponseSink::Discard => Ok(()),
            ResponseSink::Writer(writer) => {
                while let Some(chunk) = response.chunk().await.map_err(|e| {
                    HarborError::network_with_source("Failed to read response body", e)
                })? {
                    writer.write_all(&chunk).map_err(|e| {
                        HarborError::decode_with_source("Failed to write response body", e)
                    })?;
                }
                writer
                    .flush()
                    .map_err(|e| HarborError::decode_with_source("Failed to write response body", e))
            }
            ResponseSink::Buffer(buffer) => {
                let bytes = read_all(response).await?;
                buffer.extend_from_slice(&bytes);
                Ok(())
            }
            ResponseSink::Json(target) => {
                let bytes = read_all(response).await?;
                target.decode(&bytes)
            }
        }
    }
}

impl fmt::Debug for ResponseSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseSink::Discard => "Discard",
            ResponseSink::Writer(_) => "Writer",
            ResponseSink::Buffer(_) => "Buffer",
            ResponseSink::Json(_) => "Json",
        };
        f.write_str(name)
    }
}

async fn read_all(response: reqwest::Response) -> Result<Vec<u8>> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| HarborError::network_with_source("Failed to read response body", e))?;
    Ok(bytes.to_vec())
}
