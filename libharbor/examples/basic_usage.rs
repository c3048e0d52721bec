//! Basic usage example for libharbor.
//!
//! Run with: cargo run --example basic_usage -- https://harbor.example.com

use libharbor::api::artifact::ListArtifactsOptions;
use libharbor::api::project::ListProjectsOptions;
use libharbor::{ClientBuilder, ListOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    let mut builder = ClientBuilder::new().endpoint(&endpoint);
    if let (Ok(user), Ok(password)) = (std::env::var("HARBOR_USERNAME"), std::env::var("HARBOR_PASSWORD")) {
        builder = builder.basic_auth(user, password);
    }
    let client = builder.clone().build()?;

    let info = client.system_info().await?;
    println!(
        "Connected to {} (Harbor {})",
        client.endpoint(),
        info.harbor_version.as_deref().unwrap_or("unknown")
    );

    let projects = client.list_projects(&ListProjectsOptions::default()).await?;
    println!("{} projects", projects.total.unwrap_or(projects.items.len() as u64));

    for project in projects.items.iter().take(5) {
        println!("- {}", project.name);
        let repositories = client
            .list_repositories(&project.name, &ListOptions::new().with_page_size(5))
            .await?;
        for repository in repositories.items {
            let name = repository.name_in_project(&project.name);
            let artifacts = client
                .list_artifacts(&project.name, name, &ListArtifactsOptions::default())
                .await?;
            println!("    {} ({} artifacts)", repository.name, artifacts.items.len());
        }
    }

    let registry = builder.build_distribution()?;
    registry.ping().await?;
    println!("Registry API at {}/v2/ is reachable", registry.server_url());

    Ok(())
}
