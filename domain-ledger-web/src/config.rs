//! 服务配置
//!
//! 先读取 TOML 文件，再用环境变量覆盖。环境变量名沿用旧部署的 `.env` 约定。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail, ensure};
use serde::Deserialize;

use domain_ledger_provider::{
    ClientOptions, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LIST_MAX_RETRIES,
    DEFAULT_REQUEST_TIMEOUT_SECS, PORKBUN_API_BASE, RegistrarCredentials,
};

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "DOMAIN_LEDGER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 会话密钥最短长度（字节）
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub registrar: RegistrarConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            workers: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite://...` 或 `postgres://...`
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://domain-ledger.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    pub base_url: String,
    pub api_key: String,
    pub secret_api_key: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub list_max_retries: u32,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            base_url: PORKBUN_API_BASE.to_string(),
            api_key: String::new(),
            secret_api_key: String::new(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            list_max_retries: DEFAULT_LIST_MAX_RETRIES,
        }
    }
}

impl std::fmt::Debug for RegistrarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("secret_api_key", &"***")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("list_max_retries", &self.list_max_retries)
            .finish()
    }
}

impl RegistrarConfig {
    pub fn credentials(&self) -> RegistrarCredentials {
        RegistrarCredentials::Porkbun {
            api_key: self.api_key.clone(),
            secret_api_key: self.secret_api_key.clone(),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            list_max_retries: self.list_max_retries,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 唯一允许访问的操作员登录名
    pub admin_name: String,
    /// 会话 Cookie 签名密钥
    pub session_secret: String,
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_name: String::new(),
            session_secret: String::new(),
            cookie_name: "user-cookie".to_string(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_name", &self.admin_name)
            .field("session_secret", &"***")
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` 指令，`RUST_LOG` 优先
    pub level: String,
    pub format: LogFormat,
    /// 设置后额外按天滚动写入该目录
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 前端访问地址，展示在仪表盘上
    pub public_url: String,
}

impl Config {
    /// 从默认位置加载配置并应用环境变量
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 读取 TOML 文件；文件不存在时返回默认配置
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// 用环境变量覆盖配置项
    ///
    /// `lookup` 通常是 `std::env::var`，测试时传入固定表。
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(key) = lookup("DOMAIN_API_KEY") {
            self.registrar.api_key = key;
        }
        if let Some(secret) = lookup("DOMAIN_API_SECRET") {
            self.registrar.secret_api_key = secret;
        }
        if let Some(admin) = lookup("ADMIN_NAME") {
            self.auth.admin_name = admin;
        }
        if let Some(secret) = lookup("AUTH_SECRET") {
            self.auth.session_secret = secret;
        }
        if let Some(url) = lookup("VITE_BASE_URL") {
            self.app.public_url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{port}'"))?;
        }
        Ok(())
    }

    /// 启动前检查必填项
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.server.workers > 0, "server.workers must be at least 1");
        ensure!(!self.database.url.is_empty(), "database.url (DATABASE_URL) is required");
        ensure!(
            !self.registrar.api_key.is_empty() && !self.registrar.secret_api_key.is_empty(),
            "registrar credentials (DOMAIN_API_KEY / DOMAIN_API_SECRET) are required"
        );
        ensure!(
            !self.auth.admin_name.is_empty(),
            "auth.admin_name (ADMIN_NAME) is required"
        );
        if self.auth.session_secret.len() < MIN_SESSION_SECRET_LEN {
            bail!(
                "auth.session_secret (AUTH_SECRET) must be at least {MIN_SESSION_SECRET_LEN} bytes"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.server.workers >= 1);
        assert_eq!(config.auth.cookie_name, "user-cookie");
        assert_eq!(config.registrar.base_url, PORKBUN_API_BASE);
        assert_eq!(config.registrar.list_max_retries, DEFAULT_LIST_MAX_RETRIES);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn toml_sections_are_read() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 8080
            workers = 2

            [registrar]
            base_url = "http://localhost:9000/api/"
            request_timeout_secs = 5

            [logging]
            format = "json"
            directory = "/var/log/domain-ledger"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.workers, 2);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/var/log/domain-ledger"))
        );

        let options = config.registrar.client_options();
        assert_eq!(options.base_url, "http://localhost:9000/api");
        assert_eq!(options.request_timeout, Duration::from_secs(5));
        assert_eq!(
            options.connect_timeout,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn legacy_env_names_override_file() {
        let mut config = Config::from_toml_str("[server]\nport = 8080").unwrap();

        config
            .apply_overrides(env(&[
                ("DATABASE_URL", "postgres://ledger@db/ledger"),
                ("DOMAIN_API_KEY", "pk1_abc"),
                ("DOMAIN_API_SECRET", "sk1_def"),
                ("ADMIN_NAME", "octocat"),
                ("AUTH_SECRET", SECRET),
                ("VITE_BASE_URL", "https://admin.example.com"),
                ("PORT", "4000"),
            ]))
            .unwrap();

        assert_eq!(config.database.url, "postgres://ledger@db/ledger");
        assert_eq!(config.registrar.api_key, "pk1_abc");
        assert_eq!(config.registrar.secret_api_key, "sk1_def");
        assert_eq!(config.auth.admin_name, "octocat");
        assert_eq!(config.app.public_url, "https://admin.example.com");
        assert_eq!(config.server.port, 4000);
        config.validate().unwrap();
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut config = Config::default();

        let err = config.apply_overrides(env(&[("PORT", "http")])).unwrap_err();

        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("DOMAIN_API_KEY", "pk1_abc"),
                ("DOMAIN_API_SECRET", "sk1_def"),
                ("ADMIN_NAME", "octocat"),
                ("AUTH_SECRET", "too-short"),
            ]))
            .unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("session_secret"));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("ADMIN_NAME", "octocat"), ("AUTH_SECRET", SECRET)]))
            .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_masks_secrets() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("DOMAIN_API_SECRET", "sk1_def"), ("AUTH_SECRET", SECRET)]))
            .unwrap();

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("sk1_def"));
        assert!(!rendered.contains(SECRET));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::from_file(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::from_file(&path).unwrap_err();

        assert!(format!("{err:#}").contains("config.toml"));
    }
}
