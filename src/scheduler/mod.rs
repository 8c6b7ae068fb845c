//! Scheduled run orchestration
//!
//! The scheduler executes the first run immediately, then waits `interval`
//! seconds between run starts until `run-count` runs have completed (0 means
//! run forever). Each run walks every configured seed against a fresh visited
//! store built from the current download history; newly downloaded file URLs
//! are merged into the history and the history file is rewritten after every
//! seed. A ctrl-c lets the in-flight run finish and then stops the loop.

use crate::config::Config;
use crate::crawler::CrawlEngine;
use crate::state::VisitedStore;
use crate::storage::{load_history, save_history};
use crate::Result;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Runs the scheduling loop to completion
///
/// Returns when the configured number of runs has finished or a shutdown
/// signal arrived. Per-seed failures are logged and never abort the loop;
/// config problems have already been rejected at startup.
pub async fn run(config: Config) -> Result<()> {
    // Patterns were validated at load time, so compilation cannot fail here
    let seeds = config
        .seeds
        .iter()
        .map(|seed| seed.compile())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let engine = CrawlEngine::new(&config.harvester)?;
    let mut history = load_history(&config.harvester.db_path);
    tracing::info!(known_files = history.len(), "download history loaded");

    let shutdown = ShutdownFlag::listen();
    let interval = Duration::from_secs(config.harvester.interval);
    let run_count = config.harvester.run_count;
    let mut executions: u32 = 0;

    loop {
        tracing::info!(run = executions + 1, "starting run");
        execute_run(&engine, &seeds, &config, &mut history).await;
        executions += 1;

        if run_count > 0 && executions >= run_count {
            tracing::info!(executions, "run limit reached, stopping");
            break;
        }
        if shutdown.is_set() {
            tracing::info!("shutdown requested, stopping after in-flight run");
            break;
        }

        let next = chrono::Local::now() + chrono::Duration::seconds(interval.as_secs() as i64);
        tracing::info!(next_run = %next.format("%Y-%m-%d %H:%M:%S"), "sleeping until next run");
        if !shutdown.sleep(interval).await {
            tracing::info!("shutdown requested, stopping");
            break;
        }
    }

    Ok(())
}

/// Executes exactly one run and returns, ignoring interval and run-count
pub async fn run_once(config: Config) -> Result<()> {
    let seeds = config
        .seeds
        .iter()
        .map(|seed| seed.compile())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let engine = CrawlEngine::new(&config.harvester)?;
    let mut history = load_history(&config.harvester.db_path);
    tracing::info!(known_files = history.len(), "download history loaded");

    execute_run(&engine, &seeds, &config, &mut history).await;
    Ok(())
}

/// One scheduled run: every seed in order, history persisted after each
async fn execute_run(
    engine: &CrawlEngine,
    seeds: &[crate::config::SeedTask],
    config: &Config,
    history: &mut HashSet<String>,
) {
    for seed in seeds {
        // Fresh store per seed: file history carries over, page exploration
        // does not, and one seed's failures never taint the next
        let mut visited = VisitedStore::from_history(history.iter());

        match engine
            .crawl(
                &seed.url,
                seed.crawl_pattern.as_ref(),
                &seed.file_pattern,
                seed.depth,
                &mut visited,
            )
            .await
        {
            Ok(new_files) => {
                tracing::info!(
                    seed = %seed.url,
                    downloaded = new_files.len(),
                    "seed finished"
                );
                if !new_files.is_empty() {
                    history.extend(new_files);
                }
                if let Err(err) = save_history(&config.harvester.db_path, history) {
                    tracing::warn!(
                        path = %config.harvester.db_path.display(),
                        error = %err,
                        "failed to persist download history"
                    );
                }
            }
            Err(err) => {
                tracing::error!(seed = %seed.url, error = %err, "seed crawl failed");
            }
        }
    }
}

/// Ctrl-c flag that can also interrupt the inter-run sleep
struct ShutdownFlag {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownFlag {
    /// Spawns the signal listener
    fn listen() -> Self {
        let flag = Arc::new(AtomicBool::new(false));
        let notify = Arc::new(Notify::new());

        let task_flag = Arc::clone(&flag);
        let task_notify = Arc::clone(&notify);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
                task_flag.store(true, Ordering::SeqCst);
                task_notify.notify_waiters();
            }
        });

        Self { flag, notify }
    }

    fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sleeps for `duration`; returns false if shutdown interrupted the sleep
    async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.notify.notified() => false,
        }
    }
}
