//! 操作员鉴权
//!
//! 登录流程（OAuth）由外部组件负责，这里只校验它签发的会话 Cookie。

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, CookieJar, Key};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use anyhow::ensure;

use crate::config::MIN_SESSION_SECRET_LEN;
use crate::error::ApiError;

/// 已通过鉴权的操作员
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub login: String,
}

/// 判断请求是否来自已登录的操作员
pub trait OperatorGate: Send + Sync {
    fn authenticate(&self, req: &HttpRequest) -> Option<Operator>;
}

/// 基于签名 Cookie 的鉴权
///
/// Cookie 的值是操作员登录名，只接受签名有效且等于 `admin_name` 的 Cookie。
pub struct SessionCookieGate {
    key: Key,
    cookie_name: String,
    admin_name: String,
}

impl SessionCookieGate {
    pub fn new(
        session_secret: &[u8],
        cookie_name: impl Into<String>,
        admin_name: impl Into<String>,
    ) -> anyhow::Result<Self> {
        ensure!(
            session_secret.len() >= MIN_SESSION_SECRET_LEN,
            "session secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
        );
        Ok(Self {
            key: Key::derive_from(session_secret),
            cookie_name: cookie_name.into(),
            admin_name: admin_name.into(),
        })
    }

    /// 为 `login` 签发会话 Cookie，供登录回调使用
    pub fn issue_cookie(&self, login: &str) -> Cookie<'static> {
        let mut jar = CookieJar::new();
        let mut cookie = Cookie::new(self.cookie_name.clone(), login.to_string());
        cookie.set_http_only(true);
        cookie.set_path("/");
        jar.signed_mut(&self.key).add(cookie);
        jar.get(&self.cookie_name)
            .cloned()
            .unwrap_or_else(|| Cookie::new(self.cookie_name.clone(), ""))
    }
}

impl OperatorGate for SessionCookieGate {
    fn authenticate(&self, req: &HttpRequest) -> Option<Operator> {
        let cookie = req.cookie(&self.cookie_name)?;

        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let verified = jar.signed(&self.key).get(&self.cookie_name)?;

        (verified.value() == self.admin_name).then(|| Operator {
            login: verified.value().to_string(),
        })
    }
}

impl FromRequest for Operator {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let operator = req
            .app_data::<web::Data<dyn OperatorGate>>()
            .and_then(|gate| gate.authenticate(req));

        if operator.is_none() {
            tracing::warn!(path = req.path(), "Rejected unauthenticated request");
        }
        ready(operator.ok_or(ApiError::Unauthorized))
    }
}
