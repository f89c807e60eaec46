//! Formintake Storage Library
//!
//! This crate provides the file intake abstraction for uploaded images: the
//! `Storage` trait and a local filesystem implementation.
//!
//! # Storage key format
//!
//! Keys are flat generated filenames, `{unix_millis}-{8 hex chars}{.ext}`,
//! stored directly below the uploads directory. The public URL of a key is
//! `{url_prefix}/{key}`, which is what submissions record as `imagePath`.
//! Keys must not contain `..`, a path separator, or a leading `/`.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_upload_filename;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
