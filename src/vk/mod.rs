// VK API gateway: the only place that speaks the remote protocol.
//
// Everything outside this module works with `PageId`, `PostRecord` and
// `PageMetadata`. The loosely-typed JSON envelopes, the negative owner-id
// convention for communities, and bearer authentication all stay in here.

pub mod client;
pub mod error;
pub mod gateway;
pub mod rate_limiter;
pub mod types;

pub use client::VkClient;
pub use error::VkError;
pub use gateway::PageGateway;
pub use types::{PageId, PageMetadata, PageSet, PostRecord};
