use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use dotenvy::dotenv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateBackend {
    File,
    Memory,
}

impl FromStr for StateBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StateBackend::File),
            "memory" => Ok(StateBackend::Memory),
            other => Err(anyhow!("unknown state backend `{other}` (expected file or memory)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    pub state_backend: StateBackend,
    pub state_dir: PathBuf,
    pub log_dir: PathBuf,

    pub chat_typing_delay: Duration,

    // Rate limiting
    pub rate_session_per_min: u32,
    pub rate_chat_per_min: u32,
    pub rate_protected_per_min: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            api_prefix: "/api".to_string(),
            state_backend: StateBackend::File,
            state_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            chat_typing_delay: Duration::from_millis(1000),
            rate_session_per_min: 60,
            rate_chat_per_min: 120,
            rate_protected_per_min: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let typing_ms: u64 = parse_or(
            &lookup,
            "CHAT_TYPING_DELAY_MS",
            defaults.chat_typing_delay.as_millis() as u64,
        )?;

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: lookup("API_PREFIX").unwrap_or(defaults.api_prefix),

            state_backend: parse_or(&lookup, "STATE_BACKEND", defaults.state_backend)?,
            state_dir: lookup("STATE_DIR").map(PathBuf::from).unwrap_or(defaults.state_dir),
            log_dir: lookup("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),

            chat_typing_delay: Duration::from_millis(typing_ms),

            rate_session_per_min: parse_or(
                &lookup,
                "RATE_SESSION_PER_MIN",
                defaults.rate_session_per_min,
            )?,
            rate_chat_per_min: parse_or(&lookup, "RATE_CHAT_PER_MIN", defaults.rate_chat_per_min)?,
            rate_protected_per_min: parse_or(
                &lookup,
                "RATE_PROTECTED_PER_MIN",
                defaults.rate_protected_per_min,
            )?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: `{raw}`")),
        None => Ok(default),
    }
}
