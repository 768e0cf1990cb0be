use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::detect::changed;
use super::extract::extract_latest_patch;
use super::fetch::{HttpPageFetcher, PageFetcher};
use super::store::{DynamoStateStore, PatchStateStore};
use crate::core::config::CheckerConfig;
use crate::core::models::CheckOutcome;
use crate::core::response;
use crate::errors::WatchError;
use crate::line::{LineClient, Messenger};
use crate::notify::notify_update;

/// External services the update checker talks to.
pub struct CheckerDeps<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub store: &'a dyn PatchStateStore,
    pub messenger: &'a dyn Messenger,
}

/// Per-run parameters taken from configuration.
#[derive(Debug, Clone)]
pub struct CheckTarget {
    pub url: String,
    pub page_identifier: String,
    pub recipient_id: String,
}

impl From<&CheckerConfig> for CheckTarget {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            url: config.target_url.clone(),
            page_identifier: config.page_identifier.clone(),
            recipient_id: config.notifier.recipient_id.clone(),
        }
    }
}

/// Fetch, extract, compare with the stored state, then persist and notify
/// when the patch changed.
///
/// The state is written before the notification is sent. If the push fails
/// the new state stays persisted and the change is not announced again on
/// the next run.
///
/// # Errors
///
/// Returns the first failing step's error; nothing is retried.
pub async fn run_check(
    deps: &CheckerDeps<'_>,
    target: &CheckTarget,
) -> Result<CheckOutcome, WatchError> {
    let html = deps.fetcher.fetch(&target.url).await?;

    let Some(record) = extract_latest_patch(&html, &target.url) else {
        info!(url = %target.url, "No patch container found on page");
        return Ok(CheckOutcome::NoPatchFound);
    };
    info!(
        date = %record.date,
        title = %record.title,
        anchor_id = %record.anchor_id,
        "Extracted latest patch"
    );

    let previous = deps.store.get(&target.page_identifier).await?;
    if !changed(previous.as_ref(), &record) {
        info!("Latest patch unchanged since last check");
        return Ok(CheckOutcome::Unchanged { record });
    }

    info!(first_run = previous.is_none(), "New patch detected");
    deps.store.put(&target.page_identifier, &record).await?;
    notify_update(deps.messenger, &target.recipient_id).await?;

    Ok(CheckOutcome::Notified { record })
}

/// Production dependencies, built once at cold start.
pub struct CheckerApp {
    pub target: CheckTarget,
    pub fetcher: HttpPageFetcher,
    pub store: DynamoStateStore,
    pub messenger: LineClient,
}

impl CheckerApp {
    /// # Errors
    ///
    /// Returns a configuration error, or `FetchError` if the HTTP client
    /// cannot be built.
    pub async fn from_env() -> Result<Self, WatchError> {
        let config = CheckerConfig::from_env()?;
        Ok(Self {
            target: CheckTarget::from(&config),
            fetcher: HttpPageFetcher::new()?,
            store: DynamoStateStore::from_config(&config).await,
            messenger: LineClient::new(config.notifier.channel_access_token.clone()),
        })
    }

    #[must_use]
    pub fn deps(&self) -> CheckerDeps<'_> {
        CheckerDeps {
            fetcher: &self.fetcher,
            store: &self.store,
            messenger: &self.messenger,
        }
    }
}

/// Lambda handler for the scheduled update check.
///
/// # Errors
///
/// Never returns `Err`; failures are logged and returned as a structured
/// `{statusCode, body}` result.
#[tracing::instrument(level = "info", skip(app, event))]
pub async fn function_handler(
    app: &Result<CheckerApp, WatchError>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Update checker triggered: {:?}", event.payload);

    let app = match app {
        Ok(app) => app,
        Err(e) => {
            error!("Config error: {}", e);
            return Ok(response::from_error(e));
        }
    };

    match run_check(&app.deps(), &app.target).await {
        Ok(outcome) => {
            info!("Update check finished: {:?}", outcome);
            Ok(response::ok_json(&outcome))
        }
        Err(e) => {
            error!("Update check failed: {}", e);
            Ok(response::from_error(&e))
        }
    }
}

pub use self::function_handler as handler;
