//! Label endpoints.

use super::artifact_path;
use crate::body::RequestBody;
use crate::client::Client;
use crate::error::{HarborError, Result};
use crate::pagination::QueryBuilder;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Scope value of system-wide labels.
pub const SCOPE_GLOBAL: &str = "g";
/// Scope value of project labels.
pub const SCOPE_PROJECT: &str = "p";

/// A label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// Label color: one of the console presets or any `#rrggbb` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelColor {
    Red,
    Green,
    White,
    Yellow,
    Custom(String),
}

impl LabelColor {
    /// Validates a `#rrggbb` color.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::api::label::LabelColor;
    ///
    /// assert!(LabelColor::custom("#1D5100").is_ok());
    /// assert!(LabelColor::custom("green").is_err());
    /// ```
    pub fn custom(color: &str) -> Result<Self> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(HarborError::validation(format!(
                "Label color must be in '#rrggbb' format, got '{}'",
                color
            )));
        }
        Ok(LabelColor::Custom(color.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            LabelColor::Red => "#C92100",
            LabelColor::Green => "#00AB9A",
            LabelColor::White => "#FFFFFF",
            LabelColor::Yellow => "#FFDC0B",
            LabelColor::Custom(color) => color,
        }
    }
}

impl FromStr for LabelColor {
    type Err = HarborError;

    fn from_str(s: &str) -> Result<Self> {
        LabelColor::custom(s)
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Client {
    /// `POST /labels` with global scope.
    pub async fn create_global_label(&self, name: &str, description: &str, color: LabelColor) -> Result<()> {
        let label = Label {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            scope: SCOPE_GLOBAL.to_string(),
            ..Label::default()
        };
        self.send(Method::POST, "/labels", RequestBody::json(&label)?)
            .await
    }

    /// `POST /labels` with project scope.
    pub async fn create_project_label(
        &self,
        project_id: i64,
        name: &str,
        description: &str,
        color: LabelColor,
    ) -> Result<()> {
        let label = Label {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            scope: SCOPE_PROJECT.to_string(),
            project_id: Some(project_id),
            ..Label::default()
        };
        self.send(Method::POST, "/labels", RequestBody::json(&label)?)
            .await
    }

    /// `GET /labels?scope=g`
    pub async fn list_global_labels(&self) -> Result<Vec<Label>> {
        self.get_json("/labels?scope=g").await
    }

    /// `GET /labels?scope=p&project_id=`
    pub async fn list_project_labels(&self, project_id: i64) -> Result<Vec<Label>> {
        let mut query = QueryBuilder::new();
        query.push("scope", SCOPE_PROJECT).push("project_id", project_id);
        self.get_json(&query.apply_to("/labels")).await
    }

    /// Finds a global label by exact name.
    ///
    /// Harbor matches `name` loosely, so the result is filtered again here.
    pub async fn find_global_label(&self, name: &str) -> Result<Option<Label>> {
        let mut query = QueryBuilder::new();
        query.push("scope", SCOPE_GLOBAL).push("name", name);
        let labels: Vec<Label> = self.get_json(&query.apply_to("/labels")).await?;
        Ok(labels.into_iter().find(|label| label.name == name))
    }

    /// `GET /labels/{id}`
    pub async fn get_label(&self, id: i64) -> Result<Label> {
        self.get_json(&format!("/labels/{}", id)).await
    }

    /// `PUT /labels/{id}`; `label.id` must be set.
    pub async fn update_label(&self, label: &Label) -> Result<()> {
        let id = label
            .id
            .ok_or_else(|| HarborError::validation("Label id is required for an update"))?;
        self.send(
            Method::PUT,
            &format!("/labels/{}", id),
            RequestBody::json(label)?,
        )
        .await
    }

    /// `DELETE /labels/{id}`
    pub async fn delete_label(&self, id: i64) -> Result<()> {
        self.send(Method::DELETE, &format!("/labels/{}", id), RequestBody::Empty)
            .await
    }

    /// `POST .../artifacts/{reference}/labels` with body `{"id": label_id}`.
    pub async fn attach_artifact_label(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        label_id: i64,
    ) -> Result<()> {
        let path = format!("{}/labels", artifact_path(project, repository, reference));
        self.send(Method::POST, &path, RequestBody::Json(json!({ "id": label_id })))
            .await
    }

    /// `DELETE .../artifacts/{reference}/labels/{label_id}`
    pub async fn detach_artifact_label(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        label_id: i64,
    ) -> Result<()> {
        let path = format!(
            "{}/labels/{}",
            artifact_path(project, repository, reference),
            label_id
        );
        self.send(Method::DELETE, &path, RequestBody::Empty).await
    }

    /// Attaches the global label `name`, creating it first when missing.
    ///
    /// # Errors
    ///
    /// Listing and creation failures are returned as is. If the label still
    /// cannot be found after creating it, [`HarborError::NotFound`] is returned.
    pub async fn attach_artifact_label_by_name(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        name: &str,
        description: &str,
        color: LabelColor,
    ) -> Result<()> {
        let label = match self.find_global_label(name).await? {
            Some(label) => label,
            None => {
                debug!(label = name, "Creating missing global label");
                self.create_global_label(name, description, color).await?;
                self.find_global_label(name)
                    .await?
                    .ok_or_else(|| HarborError::not_found("label", name))?
            }
        };
        let id = label_id(&label, name)?;
        self.attach_artifact_label(project, repository, reference, id)
            .await
    }

    /// Detaches the global label `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HarborError::NotFound`] when no global label has that name.
    pub async fn detach_artifact_label_by_name(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        name: &str,
    ) -> Result<()> {
        let label = self
            .find_global_label(name)
            .await?
            .ok_or_else(|| HarborError::not_found("label", name))?;
        let id = label_id(&label, name)?;
        self.detach_artifact_label(project, repository, reference, id)
            .await
    }
}

fn label_id(label: &Label, name: &str) -> Result<i64> {
    label
        .id
        .ok_or_else(|| HarborError::decode(format!("Label '{}' has no id", name)))
}
