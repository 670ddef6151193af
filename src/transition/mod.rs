pub mod context;
pub mod crossfade;
pub mod orchestrator;
pub mod session;
