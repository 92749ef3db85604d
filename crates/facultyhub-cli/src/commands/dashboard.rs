use super::require_login;
use anyhow::Result;
use facultyhub_application::FacultyHub;
use facultyhub_core::model::StatKind;

pub async fn stats(hub: &FacultyHub) -> Result<()> {
    let user = require_login(hub, "/dashboard")?;
    let stats = hub.dashboard().refresh().await?;

    println!("{}", user.display_name());
    println!("  Papers:     {}", stats.papers_count);
    if stats.has_scholar_data() {
        for (label, key) in [("Citations", "citations"), ("h-index", "h_index"), ("i10-index", "i10_index")] {
            println!("  {label:<11} {}", stats.external_stat(key, StatKind::All));
        }
    } else {
        println!("  No scholar profile synced yet; run `facultyhub sync <profile-url>`");
    }
    Ok(())
}

pub async fn sync(hub: &FacultyHub, url: &str) -> Result<()> {
    require_login(hub, "/dashboard")?;
    let dashboard = hub.dashboard();
    let sync = hub.scholar_sync(&dashboard);

    let outcome = sync.run(url).await;
    for note in sync.progress() {
        println!("  {note}");
    }
    let result = outcome?;
    println!("Imported {} papers", result.paper_count);
    Ok(())
}
