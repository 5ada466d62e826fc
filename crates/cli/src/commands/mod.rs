//! CLI Commands

pub mod config;
pub mod validate;
pub mod webhook;
