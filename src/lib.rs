uniffi::setup_scaffolding!();

pub mod api;
pub mod trace_init;

pub use xlit_core;
