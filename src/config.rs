use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_BASE_URL: &str = "https://osu.instructure.com/api/v1";
pub const DEFAULT_OUTPUT: &str = "index.html";

/// Everything the workflow needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub token: String,
    pub output: PathBuf,
    pub include_self: bool,
}

impl Config {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        output: PathBuf,
        include_self: bool,
    ) -> anyhow::Result<Self> {
        let token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .context("CANVAS_API_TOKEN must be set to a Canvas access token")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            output,
            include_self,
        })
    }

    pub fn excluded_id(&self, current_user_id: i64) -> Option<i64> {
        if self.include_self {
            None
        } else {
            Some(current_user_id)
        }
    }
}
