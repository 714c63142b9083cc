//! Command implementations for the adbundle CLI

pub mod clear;
pub mod completions;
pub mod convert;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod package;
pub mod preview;
pub mod serve;
pub mod show;
pub mod version;
