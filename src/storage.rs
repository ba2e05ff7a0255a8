//! Upload forwarder: the storage HTTP client and the worker thread that
//! pushes staged files to the bucket.

mod client;
mod worker;

pub use client::{RemoteObject, StorageClient, StorageError, object_name_for, unix_millis};
pub use worker::{UploadEvent, UploadJob, Uploader};

#[cfg(test)]
mod tests;
