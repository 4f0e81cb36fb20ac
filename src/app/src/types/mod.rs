//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - gateway: observed gateway state and poll loop state
//! - unlock: unlock prompt, manual check and PIN submission types
//! - config: frontend configuration served by the backend

pub mod config;
pub mod gateway;
pub mod unlock;

pub use config::*;
pub use gateway::*;
pub use unlock::*;
