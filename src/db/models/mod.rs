//! Entity models split into domain-specific modules.

pub mod booking;
pub mod common;
pub mod help_request;
pub mod pledge;
pub mod professional;
pub mod project;

pub use booking::*;
pub use common::*;
pub use help_request::*;
pub use pledge::*;
pub use professional::*;
pub use project::*;
