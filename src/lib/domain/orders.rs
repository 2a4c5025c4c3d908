//! Order lifecycle notifications

pub mod emails;
pub mod notifications;
