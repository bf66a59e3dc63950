// Typed records the pipeline works with.
//
// These are the fixed-shape translations of VK's JSON. They are produced
// by `VkClient` and never mutated afterwards.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a community page, as returned by `groups.search`.
///
/// Always the positive form. The negative "owner" form used by `wall.get`
/// is derived inside the client and never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of pages. Ordered so serialized output is stable and sorted,
/// but callers should treat it as a plain set.
pub type PageSet = BTreeSet<PageId>;

/// One wall post of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// Post id, unique within the owning wall.
    pub id: u64,
    /// Signed author id in VK's addressing scheme: negative for
    /// communities, positive for users. Differs from the queried page
    /// when the post was made by someone else.
    pub author_id: i64,
    pub text: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

/// Descriptive fields of a page, used by the spam check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub id: PageId,
    pub name: String,
    pub description: String,
}
