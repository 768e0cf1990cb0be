use std::env;

use chrono_tz::Tz;
use url::Url;

use crate::errors::WatchError;

pub const DEFAULT_PAGE_IDENTIFIER: &str = "latest_patch_info";
pub const DEFAULT_CHECK_TIMEZONE: &str = "Asia/Tokyo";

/// Reads environment variables, treating empty values as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Collects required values and remembers every name that was missing, so a
/// loader can report them all at once.
struct Required<F> {
    lookup: F,
    missing: Vec<String>,
}

impl<F> Required<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: F) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
        }
    }

    fn get(&mut self, name: &str) -> String {
        match (self.lookup)(name).filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn finish(self) -> Result<(), WatchError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(WatchError::ConfigMissing(self.missing))
        }
    }
}

/// Credentials and recipient for server-initiated push messages.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub channel_access_token: String,
    pub recipient_id: String,
}

impl NotifierConfig {
    /// # Errors
    ///
    /// Returns `ConfigMissing` naming every absent variable.
    pub fn from_env() -> Result<Self, WatchError> {
        Self::from_lookup(env_lookup)
    }

    /// # Errors
    ///
    /// Returns `ConfigMissing` naming every absent variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut req = Required::new(lookup);
        let channel_access_token = req.get("LINE_CHANNEL_ACCESS_TOKEN");
        let recipient_id = req.get("LINE_TO_ID");
        req.finish()?;

        Ok(Self {
            channel_access_token,
            recipient_id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub model_id: String,
    pub model_region: String,
}

impl WebhookConfig {
    /// # Errors
    ///
    /// Returns `ConfigMissing` naming every absent variable.
    pub fn from_env() -> Result<Self, WatchError> {
        Self::from_lookup(env_lookup)
    }

    /// # Errors
    ///
    /// Returns `ConfigMissing` naming every absent variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut req = Required::new(lookup);
        let channel_access_token = req.get("LINE_CHANNEL_ACCESS_TOKEN");
        let channel_secret = req.get("LINE_CHANNEL_SECRET");
        let model_id = req.get("BEDROCK_MODEL_ID");
        let model_region = req.get("BEDROCK_REGION");
        req.finish()?;

        Ok(Self {
            channel_access_token,
            channel_secret,
            model_id,
            model_region,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub notifier: NotifierConfig,
    pub target_url: String,
    pub table_name: String,
    pub page_identifier: String,
    pub timezone: Tz,
}

impl CheckerConfig {
    /// # Errors
    ///
    /// Returns `ConfigMissing` naming every absent variable, or `ConfigInvalid`
    /// if the target URL or timezone cannot be parsed.
    pub fn from_env() -> Result<Self, WatchError> {
        Self::from_lookup(env_lookup)
    }

    /// # Errors
    ///
    /// Returns `ConfigMissing` naming every absent variable, or `ConfigInvalid`
    /// if the target URL or timezone cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut req = Required::new(lookup);
        let channel_access_token = req.get("LINE_CHANNEL_ACCESS_TOKEN");
        let recipient_id = req.get("LINE_TO_ID");
        let target_url = req.get("TARGET_SCRAPING_URL");
        let table_name = req.get("PATCH_TABLE_NAME");
        let page_identifier = req
            .optional("PAGE_IDENTIFIER")
            .unwrap_or_else(|| DEFAULT_PAGE_IDENTIFIER.to_string());
        let timezone_name = req
            .optional("CHECK_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_CHECK_TIMEZONE.to_string());
        req.finish()?;

        validate_target_url(&target_url)?;
        let timezone = timezone_name.parse::<Tz>().map_err(|e| {
            WatchError::ConfigInvalid(format!("CHECK_TIMEZONE '{timezone_name}': {e}"))
        })?;

        Ok(Self {
            notifier: NotifierConfig {
                channel_access_token,
                recipient_id,
            },
            target_url,
            table_name,
            page_identifier,
            timezone,
        })
    }
}

fn validate_target_url(raw: &str) -> Result<(), WatchError> {
    let parsed = Url::parse(raw)
        .map_err(|e| WatchError::ConfigInvalid(format!("TARGET_SCRAPING_URL '{raw}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(WatchError::ConfigInvalid(format!(
            "TARGET_SCRAPING_URL must be http(s), got scheme '{other}'"
        ))),
    }
}
