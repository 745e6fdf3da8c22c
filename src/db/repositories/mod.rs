pub mod boards;
pub mod labels;
pub mod store;
pub mod tasks;
pub mod users;
pub mod workspace_members;
pub mod workspaces;
