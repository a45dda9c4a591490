//! Shared test fixtures for the asset-sync workspace.

pub mod project;

pub use project::{AssetProject, write_file};
