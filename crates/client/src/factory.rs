use std::sync::Arc;

use browser_use_core::config::ENV_API_KEY;
use browser_use_core::Config;

use crate::{BrowserUseClient, TaskApi};

/// Build a client from config.
pub fn create_client(config: &Config) -> anyhow::Result<BrowserUseClient> {
    config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "Browser Use API key is not configured. Set 'browserUse.apiKey' in config \
             or the {} environment variable.",
            ENV_API_KEY
        )
    })?;

    let client = BrowserUseClient::new(&config.browser_use.api_key)?
        .with_base_url(&config.api_base())
        .with_timeout(config.browser_use.timeout_secs);

    Ok(client)
}

/// Application-wide handle; clone the `Arc` wherever the API is needed.
pub fn create_task_api(config: &Config) -> anyhow::Result<Arc<dyn TaskApi>> {
    Ok(Arc::new(create_client(config)?))
}
