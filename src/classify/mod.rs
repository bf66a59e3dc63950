// Page classifiers: rejection predicates consulted by the filter pipeline.
//
// Each classifier answers one question about a page ("is it dead?", "is it
// spam?") through the gateway. The decision rules themselves are plain
// functions over typed records so they can be tested without a gateway.

pub mod liveness;
pub mod spam;
pub mod traits;
