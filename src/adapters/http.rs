use crate::config::target::{self, Overrides, TargetConfig};
use crate::core::commands::VERSION;
use crate::domain::ports::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
use crate::utils::error::{CraneError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Response header carrying the minimum client version the server accepts.
pub const VERSION_HEADER: &str = "Supported-Crane";

enum TargetSource {
    Resolved(Option<TargetConfig>),
    /// Flags, env and `config.toml` are read when the first request is sent.
    Deferred(Overrides),
}

/// reqwest 實作的 Transport；未設定 target 時，送出請求才會失敗
pub struct HttpClient {
    client: Client,
    source: TargetSource,
}

impl HttpClient {
    pub fn new(target: Option<TargetConfig>) -> Result<Self> {
        Self::build(TargetSource::Resolved(target))
    }

    /// 延後載入設定：只有真的送出請求的命令才會因設定錯誤而失敗
    pub fn from_overrides(overrides: Overrides) -> Result<Self> {
        Self::build(TargetSource::Deferred(overrides))
    }

    fn build(source: TargetSource) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("crane/{}", VERSION))
            .build()?;
        Ok(Self { client, source })
    }

    fn target(&self) -> Result<TargetConfig> {
        let target = match &self.source {
            TargetSource::Resolved(target) => target.clone(),
            TargetSource::Deferred(overrides) => target::load(overrides.clone())?,
        };
        target.ok_or_else(|| {
            CraneError::config(
                "no target defined. Set CRANE_TARGET, pass --target or add `target` to config.toml",
            )
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let target = self.target()?;

        let url = build_url(&target.target, &request.segments)?;
        tracing::debug!("Sending {} {}", request.method.as_str(), url);

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if let Some(timeout) = target.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        if let Some(token) = &target.token {
            builder = builder.header(AUTHORIZATION, format!("bearer {}", token));
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Raw(bytes) => builder.body(bytes),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        tracing::debug!("API response status: {}", status);

        let supported_version = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse {
            status,
            body,
            supported_version,
        })
    }
}

/// Appends `segments` to the target URL, keeping any path prefix it has.
pub fn build_url(base: &str, segments: &[String]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| CraneError::config(format!("invalid target {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| CraneError::config(format!("target {} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
