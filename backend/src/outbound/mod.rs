//! Driven adapters: PostgreSQL persistence and the filesystem blob store.

pub mod blobstore;
pub mod persistence;
