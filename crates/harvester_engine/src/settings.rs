use std::fs;
use std::path::Path;
use std::time::Duration;

use ron::extensions::Extensions;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://tlidb.com/cn/";

/// Site root that reference ids are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot {
    url: Url,
}

impl SiteRoot {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|err| ConfigError::BaseUrl {
            url: raw.to_string(),
            message: err.to_string(),
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl {
                url: raw.to_string(),
                message: "not an http(s) base".into(),
            });
        }
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Absolute ids are used as-is; anything else is appended to the root verbatim.
    pub fn resolve(&self, reference: &str) -> Result<Url, url::ParseError> {
        let reference = reference.trim();
        if is_absolute_http(reference) {
            Url::parse(reference)
        } else {
            Url::parse(&format!("{}{}", self.url.as_str(), reference))
        }
    }
}

impl Default for SiteRoot {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_BASE_URL).expect("default base url"),
        }
    }
}

fn is_absolute_http(reference: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        reference
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Whether the harvest keeps records in listing order or in completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    #[default]
    Completion,
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    pub site: SiteRoot,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_body_bytes: u64,
    /// Idle connections kept in the pool per host. This does not cap open
    /// connections; the number of simultaneous requests is bounded by
    /// `concurrency_limit` instead.
    pub idle_per_host_limit: usize,
    pub concurrency_limit: usize,
    /// Wall-clock budget for a whole harvest; `None` waits for every item.
    pub harvest_budget: Option<Duration>,
    pub order: OrderPolicy,
    pub user_agent: String,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            site: SiteRoot::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            redirect_limit: 5,
            max_body_bytes: 5 * 1024 * 1024,
            idle_per_host_limit: 50,
            concurrency_limit: 30,
            harvest_budget: None,
            order: OrderPolicy::Completion,
            user_agent: concat!("harvester/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url {url}: {message}")]
    BaseUrl { url: String, message: String },
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// On-disk shape; every field is optional and overrides the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    base_url: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    redirect_limit: Option<usize>,
    max_body_bytes: Option<u64>,
    idle_per_host_limit: Option<usize>,
    concurrency_limit: Option<usize>,
    harvest_budget_secs: Option<u64>,
    order: Option<OrderPolicy>,
    user_agent: Option<String>,
}

impl HarvestSettings {
    /// Parses a RON settings document, e.g. `(concurrency_limit: 8, order: input)`.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)?;
        let mut settings = Self::default();
        if let Some(raw) = file.base_url {
            settings.site = SiteRoot::parse(&raw)?;
        }
        if let Some(secs) = file.connect_timeout_secs {
            settings.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = file.redirect_limit {
            settings.redirect_limit = limit;
        }
        if let Some(bytes) = file.max_body_bytes {
            settings.max_body_bytes = bytes;
        }
        if let Some(limit) = file.idle_per_host_limit {
            settings.idle_per_host_limit = limit;
        }
        if let Some(limit) = file.concurrency_limit {
            settings.concurrency_limit = limit;
        }
        if let Some(secs) = file.harvest_budget_secs {
            settings.harvest_budget = Some(Duration::from_secs(secs));
        }
        if let Some(order) = file.order {
            settings.order = order;
        }
        if let Some(agent) = file.user_agent {
            settings.user_agent = agent;
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text)
    }
}
