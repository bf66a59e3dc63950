// Discovery pipeline: search -> liveness filter -> spam filter.
//
// `discovery` turns search queries into a set of candidate pages,
// `filter` applies one classifier to a set, and `run` composes the two
// filter stages. `collect` is the follow-up step that pulls recent posts
// from the accepted pages into a post store.

pub mod collect;
pub mod discovery;
pub mod filter;
pub mod run;
