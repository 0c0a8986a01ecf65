//! Shared types for the tessen contact-sync bridge.
//!
//! This crate carries everything the codec exchanges with its
//! collaborators: the [`contact::ContactRecord`] schema, the codec
//! configuration, the core error type, and small utilities such as the
//! default file-as builder.

pub mod config;
pub mod constants;
pub mod contact;
pub mod error;
pub mod util;
