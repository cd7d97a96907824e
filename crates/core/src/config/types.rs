use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub forum: ForumConfig,
    /// Login credentials. When present the client logs in right after construction.
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Forum connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForumConfig {
    /// Site root; the forum lives under `<base_url>/forum/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout applied to every request, in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://nnmclub.to/".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Forum account credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

/// Search defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// How many result pages to walk. 0 means no limit.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

fn default_max_pages() -> u32 {
    1
}

impl SearchConfig {
    /// Page limit in the form `NnmClub::search` takes it.
    pub fn page_limit(&self) -> Option<u32> {
        match self.max_pages {
            0 => None,
            n => Some(n),
        }
    }
}

/// Sanitized config for logging (password redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub forum: ForumConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SanitizedCredentialsConfig>,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCredentialsConfig {
    pub username: String,
    pub password_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            forum: config.forum.clone(),
            credentials: config
                .credentials
                .as_ref()
                .map(|c| SanitizedCredentialsConfig {
                    username: c.username.clone(),
                    password_configured: !c.password.is_empty(),
                }),
            search: config.search.clone(),
        }
    }
}
