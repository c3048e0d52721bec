//! Vulnerability scan endpoints.

use super::artifact_path;
use crate::body::RequestBody;
use crate::client::Client;
use crate::error::Result;
use reqwest::Method;

impl Client {
    /// `POST .../artifacts/{reference}/scan`: queues a scan.
    pub async fn scan_artifact(&self, project: &str, repository: &str, reference: &str) -> Result<()> {
        let path = format!("{}/scan", artifact_path(project, repository, reference));
        self.send(Method::POST, &path, RequestBody::Empty).await
    }

    /// `POST .../artifacts/{reference}/scan/stop`
    pub async fn stop_scan_artifact(&self, project: &str, repository: &str, reference: &str) -> Result<()> {
        let path = format!("{}/scan/stop", artifact_path(project, repository, reference));
        self.send(Method::POST, &path, RequestBody::Empty).await
    }

    /// `GET .../artifacts/{reference}/scan/{report_id}/log`, as plain bytes.
    pub async fn get_scan_report_log(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        report_id: &str,
    ) -> Result<Vec<u8>> {
        let path = format!(
            "{}/scan/{}/log",
            artifact_path(project, repository, reference),
            report_id
        );
        self.get_bytes(&path).await
    }
}
