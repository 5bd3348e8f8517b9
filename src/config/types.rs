use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for careermap
///
/// Every section has built-in defaults, so the binary runs without a config
/// file at all; a TOML file overrides sections, and a handful of environment
/// variables (see [`crate::config::apply_env_overrides`]) override both for
/// container deployments.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    #[serde(default = "default_leagues", rename = "league")]
    pub leagues: Vec<LeagueEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig::default(),
            site: SiteConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
            proxy: None,
            leagues: default_leagues(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// First season to enumerate
    #[serde(rename = "start-year")]
    pub start_year: i32,

    /// Last season to enumerate (inclusive)
    #[serde(rename = "end-year")]
    pub end_year: i32,

    /// Attempts per fetch before the key is given up for this run
    /// (env: `RETRY_ATTEMPTS`)
    #[serde(rename = "retry-attempts")]
    pub retry_attempts: u32,

    /// Backoff grows linearly from this base… (milliseconds)
    #[serde(rename = "retry-base-delay-ms")]
    pub retry_base_delay_ms: u64,

    /// …up to this cap (milliseconds)
    #[serde(rename = "retry-delay-cap-ms")]
    pub retry_delay_cap_ms: u64,

    /// Lower bound of the randomized delay after each unit (milliseconds)
    #[serde(rename = "page-delay-min-ms")]
    pub page_delay_min_ms: u64,

    /// Upper bound of the randomized delay after each unit (milliseconds)
    #[serde(rename = "page-delay-max-ms")]
    pub page_delay_max_ms: u64,

    /// Units of work between cooldowns
    #[serde(rename = "batch-size")]
    pub batch_size: u64,

    /// Fixed cooldown after each batch (milliseconds, env: `BATCH_COOLDOWN_MS`)
    #[serde(rename = "batch-cooldown-ms")]
    pub batch_cooldown_ms: u64,

    /// Per-request timeout (milliseconds); expiry is a retryable failure
    #[serde(rename = "fetch-timeout-ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_year: 2006,
            end_year: 2025,
            retry_attempts: 3,
            retry_base_delay_ms: 5_000,
            retry_delay_cap_ms: 30_000,
            page_delay_min_ms: 2_000,
            page_delay_max_ms: 5_000,
            batch_size: 10,
            batch_cooldown_ms: 60_000,
            fetch_timeout_ms: 30_000,
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.transfermarkt.com".to_string(),
        }
    }
}

/// Output document paths
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Clubs-stage checkpoint document (env: `CLUBS_FILE`)
    #[serde(rename = "clubs-path")]
    pub clubs_path: PathBuf,

    /// Players-stage document with the final dataset (env: `PLAYERS_FILE`)
    #[serde(rename = "players-path")]
    pub players_path: PathBuf,

    /// Append-only error log (env: `ERROR_LOG`)
    #[serde(rename = "error-log-path")]
    pub error_log_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clubs_path: PathBuf::from("./data/clubs.json"),
            players_path: PathBuf::from("./data/players.json"),
            error_log_path: PathBuf::from("./data/errors.jsonl"),
        }
    }
}

/// Status server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen port (env: `PORT`)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Upstream proxy, optional
/// (env: `PROXY_URL`, `PROXY_USER`, `PROXY_PASS`)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// One crawled league: site competition code plus URL slug
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeagueEntry {
    pub code: String,
    pub slug: String,
}

/// The league set crawled when the config file names none: the top two tiers
/// of England, Italy, Spain, Germany, France, the Netherlands, and Portugal.
pub fn default_leagues() -> Vec<LeagueEntry> {
    const LEAGUES: &[(&str, &str)] = &[
        ("GB1", "premier-league"),
        ("GB2", "championship"),
        ("IT1", "serie-a"),
        ("IT2", "serie-b"),
        ("ES1", "laliga"),
        ("ES2", "laliga2"),
        ("L1", "bundesliga"),
        ("L2", "2-bundesliga"),
        ("FR1", "ligue-1"),
        ("FR2", "ligue-2"),
        ("NL1", "eredivisie"),
        ("NL2", "eerste-divisie"),
        ("PO1", "liga-portugal"),
        ("PO2", "liga-portugal-2"),
    ];
    LEAGUES
        .iter()
        .map(|(code, slug)| LeagueEntry {
            code: code.to_string(),
            slug: slug.to_string(),
        })
        .collect()
}
