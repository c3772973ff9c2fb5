//! One complete run: crawl, reconcile, submit, verify, report

use crate::api::{HttpIndexingClient, HttpSearchClient, IndexingApi, SearchApi};
use crate::config::Config;
use crate::crawler::{build_http_client, crawl_sitemaps};
use crate::output::{append_report, format_report, RunResult, TableStatistics};
use crate::pipeline::submit::{select_for_submission, submit_batch, SUBMIT_TIMESTAMP_FORMAT};
use crate::pipeline::verify::{select_for_verification, verify_batch};
use crate::storage::{open_table_store, reconcile_and_save, sort_policy, RunHistory, TableStore};
use crate::Result;
use chrono::Local;

/// Per-invocation choices made by the operator
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Absolute URLs submitted ahead of the natural selection
    pub prioritized: Vec<String>,

    pub skip_submit: bool,
    pub skip_verify: bool,

    /// Hash of the configuration file, stored with the run history
    pub config_hash: String,
}

/// Executes a full run and records it in the run history
///
/// Per-item failures (a sitemap, a notification, a lookup) are logged and
/// never fail the run. Table I/O failures and missing credentials do; the
/// table keeps whatever was saved before the failure.
pub async fn run(config: &Config, options: &RunOptions) -> Result<RunResult> {
    let mut history = RunHistory::open(&config.files.history_db())?;
    let run_id = history.start_run(&options.config_hash)?;
    tracing::info!("Starting run {}", run_id);

    match execute(config, options).await {
        Ok(result) => {
            history.complete_run(run_id, &result)?;
            tracing::info!("Run {} completed", run_id);
            Ok(result)
        }
        Err(e) => {
            if let Err(history_err) = history.fail_run(run_id, &e.to_string()) {
                tracing::warn!("Failed to record failure of run {}: {}", run_id, history_err);
            }
            Err(e)
        }
    }
}

async fn execute(config: &Config, options: &RunOptions) -> Result<RunResult> {
    let client = build_http_client(&config.http)?;

    // Credentials are resolved up front so a missing token fails before any work
    let indexing = if options.skip_submit {
        None
    } else {
        Some(HttpIndexingClient::from_config(
            client.clone(),
            &config.indexing_api,
        )?)
    };
    let search = if options.skip_verify {
        None
    } else {
        Some(HttpSearchClient::from_config(client.clone(), &config.search_api)?)
    };

    let crawl = crawl_sitemaps(&client, config).await;

    let store = open_table_store(config);
    let reconciliation = reconcile_and_save(&store, &crawl.urls, &sort_policy(config))?;

    let mut table = reconciliation.table;
    let mut result = RunResult {
        urls_added: reconciliation.new_urls.len(),
        ..RunResult::default()
    };

    if let Some(api) = &indexing {
        let api: &dyn IndexingApi = api;
        let urls = select_for_submission(
            &table,
            &options.prioritized,
            &reconciliation.new_urls,
            config.limits.max_submission_urls_per_run,
            config.indexing_api.retry_failed,
        );
        let outcome = submit_batch(api, &mut table, &urls).await;
        store.save(&table)?;

        result.newly_submitted = outcome.submitted;
        result.submission_quota_exceeded = outcome.quota_exceeded;
    } else {
        tracing::info!("Submission skipped");
    }

    if let Some(api) = &search {
        let api: &dyn SearchApi = api;
        let today = Local::now().date_naive();
        let urls = select_for_verification(
            &table,
            today,
            config.limits.recheck_cooldown_days,
            config.limits.max_indexing_urls_per_run,
        );
        let outcome = verify_batch(api, &mut table, &urls, today).await;
        store.save(&table)?;

        result.newly_indexed = outcome.newly_indexed;
        result.newly_not_indexed = outcome.newly_not_indexed;
        result.indexing_quota_exceeded = outcome.quota_exceeded;
    } else {
        tracing::info!("Verification skipped");
    }

    let totals = TableStatistics::from_table(&table);
    let finished_at = Local::now().format(SUBMIT_TIMESTAMP_FORMAT).to_string();
    let block = format_report(&result, &totals, &finished_at);

    println!("{}", block);
    append_report(&config.files.results_log, &block)?;

    Ok(result)
}
