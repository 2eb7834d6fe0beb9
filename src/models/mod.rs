//! Data models for the practice services backend.
//!
//! Field names serialize in camelCase to match the portal's TypeScript interfaces.

mod catalog;
mod notification;
mod request;
mod service;

pub use catalog::*;
pub use notification::*;
pub use request::*;
pub use service::*;
