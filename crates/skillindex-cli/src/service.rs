use crate::config::{expand_tilde, CacheBackend, Config};
use crate::{Cli, Command};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use skillindex_catalog::seo::{render_robots_txt, render_sitemap};
use skillindex_catalog::{Catalog, CatalogError};
use skillindex_persistence::{KeyValueStore, MemoryStore, SqliteStore};
use skillindex_stars::StarCountCache;
use skillindex_types::SkillRecord;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Detail view of a single skill
#[derive(Debug, Serialize)]
struct SkillDetail<'a> {
    #[serde(flatten)]
    skill: &'a SkillRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    stars: Option<u64>,
}

/// Command dispatcher - wires configuration to the catalog and star cache
pub struct SkillIndexService {
    config: Config,
}

impl SkillIndexService {
    /// Create a new service
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run a parsed command line
    pub async fn run(self, cli: Cli) -> Result<ExitCode> {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(&self.config.logging.level);
        skillindex_logging::init_logging(level)?;
        debug!("Running {:?}", cli.command);

        let catalog_path = cli
            .catalog
            .unwrap_or_else(|| expand_tilde(&self.config.catalog.path));

        match cli.command {
            Command::Validate => self.validate(&catalog_path),
            Command::Search { query, json } => {
                self.search(&catalog_path, query.as_deref().unwrap_or(""), json)
            }
            Command::Show { package, json } => self.show(&catalog_path, &package, json).await,
            Command::Stars { url } => self.stars(&url).await,
            Command::ClearCache => self.clear_cache().await,
            Command::Seo { output_dir } => {
                let output_dir =
                    output_dir.unwrap_or_else(|| expand_tilde(&self.config.site.output_dir));
                self.seo(&catalog_path, &output_dir)
            }
        }
    }

    fn validate(&self, catalog_path: &Path) -> Result<ExitCode> {
        match Catalog::from_path(catalog_path) {
            Ok(catalog) => {
                for name in catalog.duplicate_package_names() {
                    warn!("Package name '{}' is used by more than one skill", name);
                }
                println!(
                    "✅ {} is valid! ({} skills)",
                    catalog_path.display(),
                    catalog.len()
                );
                Ok(ExitCode::SUCCESS)
            }
            Err(CatalogError::Invalid(err)) => {
                eprintln!("❌ {} validation failed:", catalog_path.display());
                for issue in &err.issues {
                    eprintln!("  - {}", issue);
                }
                Ok(ExitCode::FAILURE)
            }
            Err(e) => {
                eprintln!("❌ {} validation failed: {}", catalog_path.display(), e);
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn search(&self, catalog_path: &Path, query: &str, json: bool) -> Result<ExitCode> {
        let catalog = Catalog::from_path(catalog_path)?;
        let matches = catalog.search(query);
        info!("{} of {} skills match {:?}", matches.len(), catalog.len(), query);

        if json {
            println!("{}", serde_json::to_string_pretty(&matches)?);
            return Ok(ExitCode::SUCCESS);
        }

        if matches.is_empty() {
            println!("No skills found matching {:?}", query.trim());
            return Ok(ExitCode::SUCCESS);
        }

        for skill in matches {
            println!("{} ({})", skill.name, skill.package_name);
            println!("    {}", skill.description);
            if !skill.tags.is_empty() {
                println!("    tags: {}", skill.tags.join(", "));
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn show(&self, catalog_path: &Path, package: &str, json: bool) -> Result<ExitCode> {
        let catalog = Catalog::from_path(catalog_path)?;
        let skill = catalog
            .get(package)
            .ok_or_else(|| anyhow!("Skill '{}' not found", package))?;

        // The star count is optional; a broken cache only hides it
        let stars = match self.star_cache().await {
            Ok(cache) => {
                let cancel = cancel_on_ctrl_c();
                cache
                    .get_star_count_cancellable(&skill.github_repo_url, &cancel)
                    .await
            }
            Err(e) => {
                warn!(
                    "Star cache unavailable, showing {} without stars: {:#}",
                    package, e
                );
                None
            }
        };

        if json {
            let detail = SkillDetail { skill, stars };
            println!("{}", serde_json::to_string_pretty(&detail)?);
            return Ok(ExitCode::SUCCESS);
        }

        println!("{}", skill.name);
        println!("  package:     {}", skill.package_name);
        println!("  description: {}", skill.description);
        println!("  repository:  {}", skill.github_repo_url);
        if let Some(author) = &skill.author {
            println!("  author:      {}", author);
        }
        if !skill.tags.is_empty() {
            println!("  tags:        {}", skill.tags.join(", "));
        }
        // No star count means the lookup failed; leave the line out
        if let Some(stars) = stars {
            println!("  stars:       {}", stars);
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn stars(&self, url: &str) -> Result<ExitCode> {
        let cache = self.star_cache().await?;
        let cancel = cancel_on_ctrl_c();

        match cache.get_star_count_cancellable(url, &cancel).await {
            Some(stars) => {
                println!("{}", stars);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("unavailable");
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn clear_cache(&self) -> Result<ExitCode> {
        let cache = self.star_cache().await?;
        cache.clear_cache().await?;
        println!("Star cache cleared");
        Ok(ExitCode::SUCCESS)
    }

    fn seo(&self, catalog_path: &Path, output_dir: &Path) -> Result<ExitCode> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let base_url = &self.config.site.base_url;

        if catalog_path.exists() {
            let catalog = Catalog::from_path(catalog_path)?;
            let sitemap_path = output_dir.join("sitemap.xml");
            fs::write(&sitemap_path, render_sitemap(base_url, catalog.records()))
                .with_context(|| format!("Failed to write {}", sitemap_path.display()))?;
            info!("Wrote {} ({} skills)", sitemap_path.display(), catalog.len());
        } else {
            warn!(
                "{} not found, skipping sitemap generation",
                catalog_path.display()
            );
        }

        let robots_path = output_dir.join("robots.txt");
        fs::write(&robots_path, render_robots_txt(base_url))
            .with_context(|| format!("Failed to write {}", robots_path.display()))?;
        info!("Wrote {}", robots_path.display());

        Ok(ExitCode::SUCCESS)
    }

    /// Build the star cache over the configured backend
    async fn star_cache(&self) -> Result<StarCountCache> {
        let store: Arc<dyn KeyValueStore> = match self.config.cache.backend {
            CacheBackend::Sqlite => {
                let path = cache_database_path(&self.config.cache.path)?;
                Arc::new(SqliteStore::new(&path).await?)
            }
            CacheBackend::Memory => Arc::new(MemoryStore::new()),
        };

        Ok(StarCountCache::from_config(&self.config.stars, store)?)
    }
}

/// Resolve the SQLite path, creating its parent directory
fn cache_database_path(configured: &str) -> Result<String> {
    let path: PathBuf = expand_tilde(configured);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(path.to_string_lossy().into_owned())
}

/// Token cancelled when the user presses Ctrl+C
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            trigger.cancel();
        }
    });
    cancel
}
