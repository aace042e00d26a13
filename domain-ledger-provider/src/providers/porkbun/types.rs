//! Porkbun wire types

use serde::{Deserialize, Serialize};

use crate::types::RegistrarDomain;

/// Every request body carries the key pair next to the endpoint fields.
#[derive(Serialize)]
pub(crate) struct Authenticated<'a, B> {
    pub secretapikey: &'a str,
    pub apikey: &'a str,
    #[serde(flatten)]
    pub body: B,
}

/// `POST /domain/listAll`
#[derive(Debug, Serialize)]
pub(crate) struct ListAllBody {
    pub start: String,
    #[serde(rename = "includeLabels")]
    pub include_labels: &'static str,
}

/// `POST /dns/create/{domain}`
#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub content: &'a str,
    /// Porkbun expects the TTL as a decimal string.
    pub ttl: String,
    /// Omitted for apex records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// Common response envelope, checked before the typed body is decoded.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListAllResponse {
    #[serde(default)]
    pub domains: Vec<RegistrarDomain>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordResponse {
    /// Numeric on the wire today; strings are accepted too.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PingResponse {
    #[serde(rename = "yourIp", default)]
    pub your_ip: Option<String>,
}
