use super::require_login;
use anyhow::Result;
use facultyhub_application::FacultyHub;

pub async fn list(hub: &FacultyHub) -> Result<()> {
    require_login(hub, "/collections")?;
    let groups = hub.collections().load().await?;
    if groups.is_empty() {
        println!("No collections");
    }
    for group in groups {
        let tag = group.tag.map(|t| format!(" [#{t}]")).unwrap_or_default();
        println!("{}  {}{tag}", group.id, group.name);
    }
    Ok(())
}

pub async fn show(hub: &FacultyHub, id: &str) -> Result<()> {
    require_login(hub, "/collections")?;
    let group = hub.collections().open(id).await?;
    println!("{} ({} papers)", group.name, group.papers.len());
    if let Some(description) = group.description.filter(|d| !d.is_empty()) {
        println!("{description}");
    }
    for paper in group.papers {
        let year = paper.published_year().map(|y| y.to_string()).unwrap_or_else(|| "----".into());
        println!("  {}  {year}  {}", paper.id, paper.title);
    }
    Ok(())
}

pub async fn create(hub: &FacultyHub, name: &str, description: &str) -> Result<()> {
    require_login(hub, "/collections")?;
    let group = hub.collections().create(name, description).await?;
    println!("Created {} ({})", group.name, group.id);
    Ok(())
}

pub async fn by_tag(hub: &FacultyHub, tag: &str) -> Result<()> {
    require_login(hub, "/collections")?;
    let group = hub.collections().create_by_tag(tag).await?;
    println!("Created {} with {} papers", group.name, group.papers.len());
    Ok(())
}

pub async fn delete(hub: &FacultyHub, id: &str) -> Result<()> {
    require_login(hub, "/collections")?;
    hub.collections().delete(id).await?;
    println!("Deleted {id}");
    Ok(())
}

pub async fn remove_paper(hub: &FacultyHub, id: &str, paper_id: &str) -> Result<()> {
    require_login(hub, "/collections")?;
    let collections = hub.collections();
    collections.open(id).await?;
    collections.remove_paper(paper_id).await?;
    println!("{} papers left", collections.selected_paper_ids().len());
    Ok(())
}
