// File: src/lib.rs
pub mod client;
pub mod config;
pub mod explore;
pub mod model;
pub mod paths;
pub mod platform;
pub mod presenter;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;

// --- ANDROID SUPPORT ---
#[cfg(target_os = "android")]
pub mod mobile;

#[cfg(target_os = "android")]
uniffi::setup_scaffolding!();
