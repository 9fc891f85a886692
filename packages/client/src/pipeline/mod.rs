//! Pipeline abstraction the tunnel handler is installed into
//!
//! A pipeline is an ordered chain of stages over one transport. The handler sees it
//! through [`PipelineContext`]: outbound request parts go further down the chain,
//! inbound response parts can be forwarded up, and a stage can deregister itself.

mod context;
mod message;
mod promise;

pub use context::PipelineContext;
pub use message::{RequestHead, RequestPart, ResponseHead, ResponsePart};
pub use promise::WritePromise;
