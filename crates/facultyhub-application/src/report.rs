//! Publication report download.

use facultyhub_core::model::{ReportDocument, ReportOptions};
use facultyhub_core::notice::Notifier;
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::ReportClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ReportService {
    client: ReportClient,
    notifier: Arc<dyn Notifier>,
}

impl ReportService {
    pub fn new(client: ReportClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Generates the report with the selected columns.
    pub async fn generate(&self, options: &ReportOptions) -> Result<ReportDocument> {
        if !options.any_selected() {
            self.notifier.error("Select at least one column");
            return Err(ClientError::validation("Select at least one column"));
        }
        match self.client.generate(options).await {
            Ok(document) => {
                tracing::info!(file_name = %document.file_name, bytes = document.bytes.len(), "Report generated");
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Report generation failed");
                self.notifier.error(&e.user_message("Failed to generate report. Try again."));
                Err(e)
            }
        }
    }

    /// Generates the report and writes it into `dir` under its suggested
    /// file name.
    pub async fn download(&self, options: &ReportOptions, dir: &Path) -> Result<PathBuf> {
        let document = self.generate(options).await?;
        let path = dir.join(sanitize_file_name(&document.file_name));
        if let Err(e) = tokio::fs::write(&path, &document.bytes).await {
            tracing::warn!(path = %path.display(), error = %e, "Writing report failed");
            self.notifier.error("Failed to generate report. Try again.");
            return Err(e.into());
        }
        self.notifier.success("Report downloaded successfully!");
        Ok(path)
    }
}

// Server-suggested names must not escape the target directory.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    if base.is_empty() || base == ".." || base == "." {
        "Research_Report.docx".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facultyhub_core::notice::NoticeLog;
    use facultyhub_interaction::testing::ScriptedGateway;
    use facultyhub_interaction::{ApiResponse, Method};
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report.docx"), "report.docx");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".."), "Research_Report.docx");
    }

    #[tokio::test]
    async fn test_download_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.respond(
            Method::Post,
            "/users/report",
            ApiResponse::new(200, b"PK-doc".to_vec())
                .with_header("Content-Disposition", "attachment; filename=\"mine.docx\""),
        );
        let notices = Arc::new(NoticeLog::new());
        let service = ReportService::new(ReportClient::new(gateway), notices.clone());

        let path = service
            .download(&ReportOptions::default(), temp_dir.path())
            .await
            .unwrap();

        assert_eq!(path, temp_dir.path().join("mine.docx"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK-doc");
        assert_eq!(
            notices.successes(),
            vec!["Report downloaded successfully!".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unwritable_directory_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.respond(
            Method::Post,
            "/users/report",
            ApiResponse::new(200, b"PK-doc".to_vec()),
        );
        let notices = Arc::new(NoticeLog::new());
        let service = ReportService::new(ReportClient::new(gateway), notices.clone());

        let missing = temp_dir.path().join("missing");
        assert!(service.download(&ReportOptions::default(), &missing).await.is_err());

        assert!(notices.successes().is_empty());
        assert_eq!(
            notices.errors(),
            vec!["Failed to generate report. Try again.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_message() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.drop_connection(Method::Post, "/users/report");
        let notices = Arc::new(NoticeLog::new());
        let service = ReportService::new(ReportClient::new(gateway), notices.clone());

        assert!(service.generate(&ReportOptions::default()).await.is_err());
        assert_eq!(
            notices.errors(),
            vec!["Failed to generate report. Try again.".to_string()]
        );
    }
}
