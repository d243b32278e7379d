use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub content: ContentConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `BRIGHTPATH_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("BRIGHTPATH_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            storage: StorageConfig::from_env_profiled(p),
            content: ContentConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:   {}:{} (max upload {} MB)", self.server.host, self.server.port, self.server.max_upload_mb);
        tracing::info!("  storage:  data_dir={}, persist={}", self.storage.data_dir.display(), self.storage.persist);
        tracing::info!("  content:  collection={}, default_category={}", self.content.collection, self.content.default_category);
    }

    /// Return a view safe for API responses.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "max_upload_mb": self.server.max_upload_mb,
            },
            "storage": { "data_dir": self.storage.data_dir, "persist": self.storage.persist },
            "content": {
                "collection": self.content.collection,
                "default_category": self.content.default_category,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_profile("")
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_mb: u32,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 3001),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: profiled_env_u32(p, "MAX_UPLOAD_MB", 50),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb as usize * 1024 * 1024
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// When false the document store lives in memory only.
    pub persist: bool,
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            data_dir: PathBuf::from(profiled_env_or(p, "DATA_DIR", "data")),
            persist: profiled_env_or(p, "PERSIST", "true") != "false",
        }
    }
}

// ── Content ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Store collection that holds lesson/quiz drafts.
    pub collection: String,
    /// Category assigned when an upload does not name one.
    pub default_category: String,
}

impl ContentConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            collection: profiled_env_or(p, "CONTENTS_COLLECTION", "contents"),
            default_category: profiled_env_or(p, "DEFAULT_CATEGORY", "general"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiled_lookup_prefers_prefixed_key() {
        env::set_var("ZZTEST_BP_MARKER", "plain");
        env::set_var("QA_ZZTEST_BP_MARKER", "profiled");
        assert_eq!(profiled_env_or("QA", "ZZTEST_BP_MARKER", "x"), "profiled");
        assert_eq!(profiled_env_or("", "ZZTEST_BP_MARKER", "x"), "plain");
        assert_eq!(profiled_env_or("QA", "ZZTEST_BP_MISSING", "x"), "x");
        env::remove_var("ZZTEST_BP_MARKER");
        env::remove_var("QA_ZZTEST_BP_MARKER");
    }

    #[test]
    fn numeric_fallback_on_garbage() {
        env::set_var("ZZTEST_BP_PORT", "not-a-number");
        assert_eq!(profiled_env_u16("", "ZZTEST_BP_PORT", 3001), 3001);
        env::remove_var("ZZTEST_BP_PORT");
    }

    #[test]
    fn upload_limit_in_bytes() {
        let server = ServerConfig {
            host: "127.0.0.1".into(),
            port: 3001,
            cors_origin: "*".into(),
            max_upload_mb: 2,
        };
        assert_eq!(server.max_upload_bytes(), 2 * 1024 * 1024);
    }
}
