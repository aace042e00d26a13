use async_trait::async_trait;

use crate::error::{RegistrarError, Result};
use crate::types::{CreateRecordRequest, CreatedRecord, RegistrarDomain};

/// Page size used by the registrar listing endpoint.
pub const LIST_PAGE_SIZE: usize = 1000;

/// 分页拉取的最大页数，超过即视为注册商分页异常
pub const MAX_LIST_PAGES: usize = 100;

/// 域名注册商 Trait
#[async_trait]
pub trait RegistrarClient: Send + Sync {
    /// 注册商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// 获取一页域名列表，`start` 为起始偏移量
    async fn list_domains(&self, start: usize) -> Result<Vec<RegistrarDomain>>;

    /// 获取全部域名
    ///
    /// 默认实现从偏移量 0 开始逐页拉取（每页 [`LIST_PAGE_SIZE`]），
    /// 直到某一页少于一整页为止。
    ///
    /// 拉满 [`MAX_LIST_PAGES`] 页仍未结束时返回 [`RegistrarError::ParseError`]。
    async fn list_all_domains(&self) -> Result<Vec<RegistrarDomain>> {
        let mut all = Vec::new();

        for page_index in 0..MAX_LIST_PAGES {
            let page = self.list_domains(page_index * LIST_PAGE_SIZE).await?;
            let page_len = page.len();
            all.extend(page);

            if page_len < LIST_PAGE_SIZE {
                return Ok(all);
            }
        }

        log::error!(
            "[{}] Domain listing still full after {MAX_LIST_PAGES} pages, giving up",
            self.id()
        );
        Err(RegistrarError::ParseError {
            registrar: self.id().to_string(),
            detail: format!(
                "domain listing did not end after {MAX_LIST_PAGES} pages of {LIST_PAGE_SIZE}"
            ),
        })
    }

    /// 创建 DNS 记录（不重试）
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<CreatedRecord>;
}
