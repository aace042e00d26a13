//! 页面渲染
//!
//! 前端是服务端驱动的 SPA：后端只返回页面名和 props，由前端选择组件。

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::Value;

/// 渲染命名页面
pub trait ViewRenderer: Send + Sync {
    fn render(&self, req: &HttpRequest, component: &str, props: Value) -> HttpResponse;
}

/// 以 JSON 页面对象响应：`{component, props, url, version}`
pub struct JsonPageRenderer {
    version: String,
}

#[derive(Serialize)]
struct Page<'a> {
    component: &'a str,
    props: Value,
    url: String,
    version: &'a str,
}

impl JsonPageRenderer {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl Default for JsonPageRenderer {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl ViewRenderer for JsonPageRenderer {
    fn render(&self, req: &HttpRequest, component: &str, props: Value) -> HttpResponse {
        let url = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_string(), ToString::to_string);

        HttpResponse::Ok().json(Page {
            component,
            props,
            url,
            version: &self.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;
    use serde_json::json;

    #[actix_web::test]
    async fn page_object_carries_component_props_and_url() {
        let req = TestRequest::get()
            .uri("/dashboard?tab=1")
            .to_http_request();

        let resp = JsonPageRenderer::new("1.2.3").render(&req, "Dashboard", json!({"a": 1}));
        let body = to_bytes(resp.into_body()).await.unwrap();
        let page: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            page,
            json!({
                "component": "Dashboard",
                "props": {"a": 1},
                "url": "/dashboard?tab=1",
                "version": "1.2.3",
            })
        );
    }
}
