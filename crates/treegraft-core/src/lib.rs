//! Core types and traits for treegraft.
//!
//! This crate provides the vocabulary shared by the tree operations:
//! entry kinds, the error taxonomy, notifications and their sinks, and
//! operation configuration.

mod config;
mod error;
mod kind;
mod notify;

pub use config::{OpsConfig, OpsConfigBuilder};
pub use error::{ErrorKind, FsOp, Result, TreeError};
pub use kind::EntryKind;
pub use notify::{
    ChannelSink, MemorySink, Notification, NotificationKind, NotificationSink, Notifier,
};
