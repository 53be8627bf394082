//! Runtime adapters for scry (config/auth, HTTP remote, CLI snapshot poster).

pub mod config;
pub mod poster;
pub mod remote;

pub use config::Config;
pub use remote::{HttpRemote, OutputPage, Remote, ANALYSIS_CONFIG};
