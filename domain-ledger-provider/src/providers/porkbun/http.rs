//! Porkbun HTTP 请求方法

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{RegistrarError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::join_url;

use super::{Authenticated, Envelope, PorkbunClient, REGISTRAR_NAME};

/// Envelope status of a successful call.
const STATUS_SUCCESS: &str = "SUCCESS";

impl PorkbunClient {
    /// 执行 Porkbun API 请求
    ///
    /// `max_retries` 为 0 时只发送一次（非幂等接口必须如此）。
    pub(crate) async fn post<T, B>(&self, path: &str, body: B, max_retries: u32) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        // 1. 序列化请求体（日志中不输出凭证）
        let payload = serde_json::to_string(&Authenticated {
            secretapikey: &self.secret_api_key,
            apikey: &self.api_key,
            body,
        })
        .map_err(|e| RegistrarError::SerializationError {
            registrar: REGISTRAR_NAME.to_string(),
            detail: e.to_string(),
        })?;

        // 2. 发送请求
        let url = join_url(&self.base_url, path);
        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload);

        let response =
            HttpUtils::execute_request_with_retry(request, REGISTRAR_NAME, path, max_retries)
                .await?;

        // 3. 检查响应信封
        let envelope: Envelope = HttpUtils::parse_json(&response.body, REGISTRAR_NAME)?;
        if envelope.status != STATUS_SUCCESS {
            log::warn!(
                "[{REGISTRAR_NAME}] {path} rejected: {} {}",
                envelope.status,
                envelope.message.as_deref().unwrap_or_default()
            );
            return Err(RegistrarError::ApiError {
                registrar: REGISTRAR_NAME.to_string(),
                status_code: response.status_code,
                status: envelope.status,
                body: response.body,
            });
        }

        // 4. 解析数据
        HttpUtils::parse_json(&response.body, REGISTRAR_NAME)
    }
}
