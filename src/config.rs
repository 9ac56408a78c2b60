use crate::error::ConfigurationError;
use crate::util;
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn default_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|it| it.parse().ok())
        .unwrap_or(4000)
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_environment() -> String {
    env::var("NODE_ENV").unwrap_or("development".to_string())
}

fn default_static_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from(env::var("STATIC_DIST_PATH").unwrap_or("./dist".to_string())),
        PathBuf::from(env::var("PUBLIC_CONTENT_PATH").unwrap_or("./public".to_string())),
    ]
}

fn default_auth_api_url() -> String {
    env::var("AUTH_API_URL").unwrap_or("http://localhost:5001".to_string())
}

fn default_auth_timeout_secs() -> u64 {
    30
}

fn default_session_ttl_minutes() -> i64 {
    24 * 60
}

fn default_max_sessions() -> usize {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    file_path: PathBuf,

    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Checked in order; the first one that exists is served.
    #[serde(default = "default_static_roots")]
    pub static_roots: Vec<PathBuf>,

    #[serde(default = "default_auth_api_url")]
    pub auth_api_url: String,
    #[serde(default = "default_auth_timeout_secs")]
    pub auth_timeout_secs: u64,

    /// Drafts and student sessions older than this are dropped.
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    /// Upper bound on open drafts, and separately on student sessions.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            port: default_port(),
            address: default_address(),
            environment: default_environment(),
            static_roots: default_static_roots(),
            auth_api_url: default_auth_api_url(),
            auth_timeout_secs: default_auth_timeout_secs(),
            session_ttl_minutes: default_session_ttl_minutes(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        let config_file = util::find_first_subpath(
            config_dir(),
            &["settings.yml", "settings.yaml"],
            Path::exists,
        )
        .ok_or_else(|| ConfigurationError::NotFound(config_dir()))?;

        Config::load_from(config_file, |key| env::var(key).ok())
    }

    /// Reads `path`, then lets variables found through `var` override saved values.
    pub fn load_from(
        path: PathBuf,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigurationError> {
        let file = File::open(&path)?;
        let mut config: Config = serde_yaml::from_reader(BufReader::new(file))?;
        config.file_path = path;
        config.apply_overrides(var);

        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value '{}'", port),
            }
        }
        if let Some(environment) = var("NODE_ENV") {
            self.environment = environment;
        }
        if let Some(url) = var("AUTH_API_URL") {
            self.auth_api_url = url;
        }

        let dist = var("STATIC_DIST_PATH").map(PathBuf::from);
        let public = var("PUBLIC_CONTENT_PATH").map(PathBuf::from);
        if dist.is_some() || public.is_some() {
            let saved = std::mem::take(&mut self.static_roots);
            self.static_roots = vec![
                dist.or_else(|| saved.get(0).cloned())
                    .unwrap_or_else(|| PathBuf::from("./dist")),
                public
                    .or_else(|| saved.get(1).cloned())
                    .unwrap_or_else(|| PathBuf::from("./public")),
            ];
        }
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }

    /// First configured static root that exists on disk.
    pub fn static_root(&self) -> Option<PathBuf> {
        self.static_roots.iter().find(|it| it.is_dir()).cloned()
    }
}
