//! Infrastructure layer: delivery providers and the HTTP surface

pub mod email;
pub mod http;
