use std::env::VarError;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;

pub const BASE_URL_ENV: &str = "BACKEND_BASE_URL";
pub const API_KEY_ENV: &str = "SCHEDULER_API_KEY";
/// Request timeout in whole seconds, unset means wait forever
pub const REQUEST_TIMEOUT_ENV: &str = "SCHEDULER_REQUEST_TIMEOUT";

const OVERRIDE_ENV_PATH: &str = "override.env";

#[derive(Clone, Default)]
pub struct NotifierOpt {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout: Option<Duration>,
}

// The api key must never reach the logs.
impl fmt::Debug for NotifierOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierOpt")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl NotifierOpt {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| read_var(key, dotenv::var(key)))
    }

    /// Build options from any key/value source, missing keys fall back to
    /// an empty base url, no api key and no timeout.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: lookup(BASE_URL_ENV).unwrap_or_default(),
            api_key: lookup(API_KEY_ENV),
            request_timeout: parse_timeout(lookup(REQUEST_TIMEOUT_ENV)),
        }
    }
}

// A set but non-unicode value is treated as missing. The value itself is
// not logged since it may be the api key.
fn read_var(key: &str, value: Result<String, dotenv::Error>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(dotenv::Error::EnvVar(VarError::NotUnicode(_))) => {
            log::warn!("Ignoring {}: value is set but not valid unicode", key);
            None
        }
        Err(_) => None,
    }
}

fn parse_timeout(raw: Option<String>) -> Option<Duration> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            log::warn!(
                "Ignoring invalid {}: {:?}, request will not time out",
                REQUEST_TIMEOUT_ENV,
                raw
            );
            None
        }
    }
}

/// Merge override.env (when present) and .env into ENV, then read options.
/// Precedence: ENV, then override.env, then .env.
pub fn load_option() -> NotifierOpt {
    // dotenv never replaces a variable that is already set, so the file
    // loaded first wins.
    let override_env_path = PathBuf::from(OVERRIDE_ENV_PATH);
    let override_loaded =
        override_env_path.exists() && dotenv::from_path(&override_env_path).is_ok();
    let env_path = dotenv::dotenv().ok();

    setup_logger();

    match env_path {
        Some(path) => log::debug!("loaded env from file: {:?}", path),
        None => log::debug!("no .env file found, loading env from ENV"),
    }
    if override_loaded {
        log::debug!("loaded override env from file: {:?}", override_env_path);
    }

    let opt = NotifierOpt::from_env();
    log::debug!("load opt: {:?}", opt);
    opt
}

fn setup_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:5} [{}:{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.file().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                &record.args()
            )
        })
        .init();
}
