//! 发布器配置
//!
//! 平台端点都是固定的非公开接口，可能随时变化；这里集中成显式配置，
//! 不读配置文件也不读环境变量。

const DEFAULT_API_BASE: &str = "https://www.tiktok.com";
const DEFAULT_SHORT_LINK_HOST: &str = "vm.tiktok.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// 发布器配置
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// 平台主站地址（也用作 Origin 头）
    pub api_base: String,
    /// 短链接域名
    pub short_link_host: String,
    /// User-Agent 头
    pub user_agent: String,
    /// Accept-Language 头
    pub accept_language: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            short_link_host: DEFAULT_SHORT_LINK_HOST.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl PublisherConfig {
    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// 评论发布端点
    pub fn comment_url(&self) -> String {
        format!("{}/api/comment/publish/", self.base())
    }

    /// 用户详情端点（会话探测与校验使用）
    pub fn user_detail_url(&self) -> String {
        format!("{}/api/user/detail/", self.base())
    }

    /// 视频详情端点
    pub fn post_detail_url(&self, video_id: &str) -> String {
        format!("{}/api/post/detail/?aweme_id={}", self.base(), video_id)
    }

    /// 主站首页（Referer 头使用）
    pub fn home_url(&self) -> String {
        format!("{}/", self.base())
    }
}
