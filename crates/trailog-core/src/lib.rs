//! Core types and operations for the trailog activity log.
//!
//! This crate holds the activity model, the in-memory store, the persistence
//! adapter and the edit reconciler. It has no database or terminal
//! dependencies; storage and display are reached through the
//! [`persist::KeyValueStorage`] and [`sink::ActivitySink`] traits.

pub mod activity;
pub mod error;
pub mod factory;
pub mod persist;
pub mod reconcile;
pub mod sink;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
