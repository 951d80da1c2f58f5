//! CLI module for Coda
//!
//! Offline maintenance commands against a saved memory session:
//! - `stats`: print the stats snapshot
//! - `maintain`: run decay and eviction
//! - `forget` / `reinforce`: edit one memory
//! - `remember` / `update` / `search`: embed through Ollama and write or query

use crate::config::AppConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use coda_memory::{MemoryManager, MemoryType, OllamaEmbedder, SearchOptions, SessionDir};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Coda memory CLI
#[derive(Parser, Debug)]
#[command(name = "coda")]
#[command(about = "Inspect and maintain Coda's conversation memory")]
#[command(version)]
pub struct Cli {
    /// Session directory (overrides `session_dir` in config)
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print memory stats as JSON
    Stats,
    /// Apply decay and evict down to capacity
    Maintain,
    /// Delete a memory
    Forget {
        /// Memory ID
        id: String,
    },
    /// Raise a memory's importance
    Reinforce {
        /// Memory ID
        id: String,
        /// Importance added (capped at 1.0)
        #[arg(long, default_value_t = 0.1)]
        strength: f32,
    },
    /// Store a memory directly
    Remember {
        /// Memory content
        text: String,
        /// fact, preference, conversation or persona
        #[arg(long = "type", default_value = "fact")]
        memory_type: MemoryType,
        /// Initial importance in [0, 1]
        #[arg(long, default_value_t = 0.7)]
        importance: f32,
    },
    /// Replace a memory's content and re-embed it
    Update {
        /// Memory ID
        id: String,
        /// New content
        text: String,
    },
    /// Search long-term memory
    Search {
        /// Query text
        query: String,
        /// Maximum results (defaults to retrieval.top_k)
        #[arg(long)]
        top_k: Option<usize>,
        /// Importance floor (defaults to retrieval.min_importance)
        #[arg(long)]
        min_importance: Option<f32>,
        /// Cosine similarity floor (defaults to retrieval.min_similarity)
        #[arg(long)]
        min_similarity: Option<f32>,
        /// Only return memories of this type
        #[arg(long = "type")]
        memory_type: Option<MemoryType>,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let session = config.session_path(cli.session);
    let manager = open_session(&config, &session).await?;

    match command {
        Commands::Stats => {
            print_json(&manager.stats().await)?;
        }
        Commands::Maintain => {
            let report = manager.apply_decay(Utc::now()).await;
            let evicted = manager.evict_to_capacity().await;
            manager.save_session(&session).await?;
            print_json(&json!({
                "decayed": report.decayed,
                "forgotten": report.forgotten,
                "evicted": evicted,
            }))?;
        }
        Commands::Forget { id } => {
            let removed = manager.forget(&id).await;
            if removed {
                manager.save_session(&session).await?;
            }
            print_json(&json!({ "memory_id": id, "removed": removed }))?;
        }
        Commands::Reinforce { id, strength } => {
            let importance = manager
                .reinforce(&id, strength)
                .await
                .with_context(|| format!("Memory not found: {id}"))?;
            manager.save_session(&session).await?;
            print_json(&json!({ "memory_id": id, "importance": importance }))?;
        }
        Commands::Remember {
            text,
            memory_type,
            importance,
        } => {
            let stored = manager
                .remember(text, memory_type, importance)
                .await
                .context("Failed to store memory")?;
            manager.save_session(&session).await?;
            match stored {
                Some(record) => print_json(&json!({
                    "stored": true,
                    "memory_id": record.id,
                    "memory_type": record.memory_type,
                    "importance": record.importance,
                }))?,
                // Store was full and everything kept outranks the new memory
                None => print_json(&json!({
                    "stored": false,
                    "memory_type": memory_type,
                    "importance": importance,
                }))?,
            }
        }
        Commands::Update { id, text } => {
            let record = manager
                .update_memory(&id, text)
                .await
                .context("Failed to update memory")?
                .with_context(|| format!("Memory not found: {id}"))?;
            manager.save_session(&session).await?;
            print_json(&json!({
                "memory_id": record.id,
                "content": record.content,
                "importance": record.importance,
            }))?;
        }
        Commands::Search {
            query,
            top_k,
            min_importance,
            min_similarity,
            memory_type,
        } => {
            let options = search_options(&config, top_k, min_importance, min_similarity, memory_type);
            let results = manager
                .search_with(&query, options)
                .await
                .context("Search failed")?;
            // Search counts as an access; persist the bumped metadata
            manager.save_session(&session).await?;
            let rows: Vec<_> = results
                .iter()
                .map(|m| {
                    json!({
                        "memory_id": m.record.id,
                        "memory_type": m.record.memory_type,
                        "content": m.record.content,
                        "importance": m.record.importance,
                        "similarity": m.similarity,
                        "score": m.score,
                    })
                })
                .collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}

fn search_options(
    config: &AppConfig,
    top_k: Option<usize>,
    min_importance: Option<f32>,
    min_similarity: Option<f32>,
    memory_type: Option<MemoryType>,
) -> SearchOptions {
    let retrieval = &config.memory.retrieval;
    let mut options = SearchOptions::new(
        top_k.unwrap_or(retrieval.top_k),
        min_importance.unwrap_or(retrieval.min_importance),
    );
    if let Some(floor) = min_similarity.or(retrieval.min_similarity) {
        options = options.with_min_similarity(floor);
    }
    if let Some(memory_type) = memory_type {
        options = options.with_memory_type(memory_type);
    }
    options
}

async fn open_session(config: &AppConfig, session: &Path) -> Result<MemoryManager> {
    let embedder = OllamaEmbedder::new(
        &config.memory.embedding,
        config.memory.long_term.embedding_dim,
    )
    .context("Failed to create embedder")?;
    let manager = MemoryManager::new(config.memory.clone(), Arc::new(embedder))
        .context("Failed to create memory manager")?;

    if SessionDir::new(session).exists() {
        manager
            .load_session(session)
            .await
            .with_context(|| format!("Failed to load session from {}", session.display()))?;
    } else {
        info!(dir = %session.display(), "No saved session, starting empty");
    }
    Ok(manager)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
