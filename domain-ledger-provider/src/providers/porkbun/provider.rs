//! Porkbun `RegistrarClient` 实现

use async_trait::async_trait;

use crate::error::{RegistrarError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::RegistrarClient;
use crate::types::{CreateRecordRequest, CreatedRecord, RegistrarDomain};

use super::{
    CreateRecordBody, CreateRecordResponse, ListAllBody, ListAllResponse, PingResponse,
    PorkbunClient, REGISTRAR_NAME,
};

#[async_trait]
impl RegistrarClient for PorkbunClient {
    fn id(&self) -> &'static str {
        REGISTRAR_NAME
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self
            .post::<PingResponse, _>("ping", serde_json::Map::new(), 0)
            .await
        {
            Ok(resp) => {
                log::debug!(
                    "[{REGISTRAR_NAME}] ping ok, caller ip {}",
                    resp.your_ip.as_deref().unwrap_or("unknown")
                );
                Ok(true)
            }
            // 凭证错误时 Porkbun 返回 400 + status ERROR
            Err(RegistrarError::ApiError { status_code, .. })
                if (400..500).contains(&status_code) =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_domains(&self, start: usize) -> Result<Vec<RegistrarDomain>> {
        let body = ListAllBody {
            start: start.to_string(),
            include_labels: "no",
        };
        let resp: ListAllResponse = self
            .post("domain/listAll", body, self.list_max_retries)
            .await?;

        log::debug!(
            "[{REGISTRAR_NAME}] listAll start={start} returned {} domains",
            resp.domains.len()
        );
        Ok(resp.domains)
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<CreatedRecord> {
        let domain = normalize_domain_name(&req.domain);
        let path = format!("dns/create/{}", urlencoding::encode(&domain));
        let body = CreateRecordBody {
            record_type: &req.record_type,
            content: &req.content,
            ttl: req.ttl.to_string(),
            name: req.name.label(),
        };

        // 非幂等：不重试，避免注册商侧重复记录
        let resp: CreateRecordResponse = self.post(&path, body, 0).await?;

        let id = resp.id.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        log::info!(
            "[{REGISTRAR_NAME}] created {} record under {domain} (id: {})",
            req.record_type,
            id.as_deref().unwrap_or("-")
        );
        Ok(CreatedRecord { id })
    }
}
