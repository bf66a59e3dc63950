// VK API client: authenticated method calls over HTTP.
//
// A thin reqwest wrapper with one generic `call_method` helper: build the
// URL, attach parameters, check the status, then unwrap VK's
// `{"response": ...}` / `{"error": ...}` envelope into either a typed
// payload or a `VkError`.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::error::{Result, VkError};
use super::gateway::PageGateway;
use super::rate_limiter::RateLimiter;
use super::types::{PageId, PageMetadata, PostRecord};

/// Default VK API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.vk.com/method";

/// API version pinned for all calls. `groups.getById` changed its payload
/// shape after this version; both shapes are accepted below anyway.
pub const DEFAULT_API_VERSION: &str = "5.131";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for the VK API.
pub struct VkClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    access_token: String,
    rate_limiter: RateLimiter,
}

impl VkClient {
    /// Create a client for `base_url` that authenticates with `access_token`.
    ///
    /// Fails with `VkError::Configuration` on an empty token, before any
    /// request is made.
    pub fn new(
        base_url: &str,
        api_version: &str,
        access_token: &str,
        requests_per_second: f64,
    ) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(VkError::Configuration(
                "VK access token is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent("pagescout/0.1 (community-discovery)")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VkError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
            access_token: access_token.to_string(),
            rate_limiter: RateLimiter::new(requests_per_second),
        })
    }

    /// Call a VK API method and deserialize the `response` payload.
    ///
    /// `method` is the dotted method name (e.g. "groups.search"). Exactly
    /// one HTTP request is made; failures are returned, never retried.
    pub async fn call_method<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);

        self.rate_limiter.acquire().await;
        debug!(method = method, "VK API request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("v", self.api_version.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VkError::Request {
                code: i64::from(status.as_u16()),
                message: format!("{method} returned HTTP {status}: {body}"),
            });
        }

        decode_envelope(&body)
    }
}

#[async_trait]
impl PageGateway for VkClient {
    async fn search_pages(&self, query: &str, count: u32) -> Result<Vec<PageId>> {
        require_positive(count)?;
        let count = count.to_string();

        let output: ItemList<RawGroupRef> = self
            .call_method(
                "groups.search",
                &[("q", query), ("type", "page"), ("count", &count)],
            )
            .await?;

        Ok(output.items.into_iter().map(|g| PageId(g.id)).collect())
    }

    async fn wall_posts(&self, page: PageId, count: u32) -> Result<Vec<PostRecord>> {
        require_positive(count)?;
        let owner_id = community_owner_id(page)?.to_string();
        let count = count.to_string();

        let output: ItemList<RawPost> = self
            .call_method(
                "wall.get",
                &[("owner_id", &owner_id), ("filter", "owner"), ("count", &count)],
            )
            .await?;

        Ok(output.items.into_iter().map(PostRecord::from).collect())
    }

    async fn page_metadata(&self, page: PageId) -> Result<PageMetadata> {
        let group_id = page.to_string();

        let output: GroupsById = self
            .call_method(
                "groups.getById",
                &[("group_id", &group_id), ("fields", "description")],
            )
            .await?;

        output
            .into_groups()
            .into_iter()
            .next()
            .map(PageMetadata::from)
            .ok_or_else(|| VkError::Decode(format!("groups.getById returned no group for {page}")))
    }
}

/// Owner id of a community's wall: VK addresses communities with negative ids.
/// Ids that do not fit a signed 64-bit owner id are rejected.
fn community_owner_id(page: PageId) -> Result<i64> {
    i64::try_from(page.0)
        .map(|id| -id)
        .map_err(|_| VkError::invalid_parameter(format!("page id {page} is out of range")))
}

fn require_positive(count: u32) -> Result<()> {
    if count == 0 {
        return Err(VkError::invalid_parameter("count must be positive"));
    }
    Ok(())
}

/// Unwrap VK's response envelope.
///
/// A present `error` object wins over everything else; a missing
/// `response` or a payload of the wrong shape is a decode error.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.error {
        return Err(VkError::Request {
            code: err.error_code,
            message: err.error_msg,
        });
    }

    let payload = envelope
        .response
        .ok_or_else(|| VkError::Decode("response field missing".to_string()))?;

    Ok(serde_json::from_value(payload)?)
}

// -- Serde types for the wire format --

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<serde_json::Value>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawGroupRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: u64,
    from_id: i64,
    date: i64,
    #[serde(default)]
    text: String,
}

impl From<RawPost> for PostRecord {
    fn from(raw: RawPost) -> Self {
        PostRecord {
            id: raw.id,
            author_id: raw.from_id,
            text: raw.text,
            timestamp: raw.date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

impl From<RawGroup> for PageMetadata {
    fn from(raw: RawGroup) -> Self {
        PageMetadata {
            id: PageId(raw.id),
            name: raw.name,
            description: raw.description,
        }
    }
}

/// `groups.getById` returns a bare list up to 5.131 and `{"groups": [...]}`
/// in later versions.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GroupsById {
    List(Vec<RawGroup>),
    Wrapped { groups: Vec<RawGroup> },
}

impl GroupsById {
    fn into_groups(self) -> Vec<RawGroup> {
        match self {
            GroupsById::List(groups) => groups,
            GroupsById::Wrapped { groups } => groups,
        }
    }
}
