use super::require_admin;
use anyhow::Result;
use facultyhub_application::FacultyHub;

pub async fn dashboard(hub: &FacultyHub) -> Result<()> {
    require_admin(hub, "/admin")?;
    let admin = hub.admin();
    admin.load().await?;
    let stats = admin.stats();

    println!("Faculty:      {}", stats.total_users);
    println!("Publications: {}", stats.total);
    println!("  Journal:    {}", stats.journal);
    println!("  Conference: {}", stats.conference);
    for bar in stats.yearwise_analytics {
        if let Some(year) = bar.year {
            println!("  {year}: {}", bar.count);
        }
    }
    Ok(())
}

pub async fn faculty(hub: &FacultyHub, search: Option<&str>) -> Result<()> {
    require_admin(hub, "/admin/faculty")?;
    let admin = hub.admin();
    admin.load().await?;
    for member in admin.search(search.unwrap_or_default()) {
        let department = member.department.unwrap_or_default();
        println!("{}  {:<28} {:<32} {department}", member.id, member.full_name, member.email);
    }
    Ok(())
}

pub async fn range(hub: &FacultyHub, from: &str, to: &str) -> Result<()> {
    require_admin(hub, "/admin")?;
    let range = hub.admin().range(from, to).await?;
    println!("{from}-{to}: {} publications, {} citations", range.count, range.total_citations);
    Ok(())
}

pub async fn user(hub: &FacultyHub, id: &str) -> Result<()> {
    require_admin(hub, "/admin/faculty")?;
    let profile = hub.admin().faculty_detail(id).await?;

    println!(
        "{} papers, {} projects, {} patents, {} citations",
        profile.papers.len(),
        profile.detail.projects.len(),
        profile.detail.patents.len(),
        profile.citations
    );
    for (year, count) in &profile.timeline {
        println!("  {year}  {}", "#".repeat(*count));
    }
    Ok(())
}
