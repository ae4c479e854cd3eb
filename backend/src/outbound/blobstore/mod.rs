//! Filesystem blob store for uploaded images.

mod fs_store;

pub use fs_store::FsBlobStore;
