//! HTTP adapter: handlers, request/response schemas, and session plumbing.

pub mod catalog;
pub mod error;
pub mod health;
pub mod recipes;
pub mod relations;
pub mod schemas;
pub mod session;
pub mod short_link;
pub mod state;
pub mod subscriptions;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
pub use state::HttpState;
