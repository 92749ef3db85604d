use super::require_login;
use anyhow::{Result, bail};
use facultyhub_application::FacultyHub;
use facultyhub_core::model::ReportOptions;
use std::path::Path;

pub async fn download(hub: &FacultyHub, toggles: &[String], out: &Path) -> Result<()> {
    require_login(hub, "/report")?;
    let mut options = ReportOptions::default();
    for column in toggles {
        if !options.toggle(column.trim()) {
            bail!("Unknown report column: {column}");
        }
    }

    let path = hub.reports().download(&options, out).await?;
    println!("Saved {}", path.display());
    Ok(())
}
