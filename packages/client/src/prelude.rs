//! Connect Tunnel Prelude
//!
//! The types needed to configure, install and drive a tunnel handler.

pub use crate::config::{ConnectionConfig, HandshakeConfig, ProxyConfig, ServerAddress};
pub use crate::connect::{TunnelStream, establish_tunnel};
pub use crate::error::{Error, Kind, Result};
pub use crate::pipeline::{
    PipelineContext, RequestHead, RequestPart, ResponseHead, ResponsePart, WritePromise,
};
pub use crate::tunnel::{HandshakeState, TunnelHandler};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};
