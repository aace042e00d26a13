//! 注册商客户端公共工具函数

use reqwest::Client;

use crate::error::{RegistrarError, Result};
use crate::types::ClientOptions;

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(registrar: &str, options: &ClientOptions) -> Result<Client> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .build()
        .map_err(|e| RegistrarError::ClientSetup {
            registrar: registrar.to_string(),
            detail: e.to_string(),
        })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点并转为小写
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// 拼接 API 地址，容忍 base 末尾的 `/`
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_dot() {
        assert_eq!(normalize_domain_name("Example.COM."), "example.com");
        assert_eq!(normalize_domain_name(" a.io "), "a.io");
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(
            join_url("https://api.test/v3/", "/domain/listAll"),
            "https://api.test/v3/domain/listAll"
        );
        assert_eq!(join_url("http://x", "ping"), "http://x/ping");
    }

    #[test]
    fn client_builds_with_default_options() {
        assert!(create_http_client("test", &ClientOptions::default()).is_ok());
    }
}
