// pagescout: find active programming communities on VK.
//
// This is the library root. Each module corresponds to one stage or
// collaborator of the discovery pipeline.

pub mod bot;
pub mod classify;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod vk;
