// Sub-modules organized by functional domain
pub mod api;
pub mod auth;
pub mod board;
pub mod label;
pub mod report;
pub mod task;
pub mod workspace;
pub mod workspace_member;

pub use api::*;
pub use auth::*;
pub use board::*;
pub use label::*;
pub use report::*;
pub use task::*;
pub use workspace::*;
pub use workspace_member::*;
