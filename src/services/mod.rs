pub mod auth_service;
pub mod boards_service;
pub mod invitations_service;
pub mod labels_service;
pub mod membership_registry;
pub mod reports_service;
pub mod tasks_service;
pub mod workspaces_service;

pub use auth_service::AuthService;
pub use boards_service::BoardsService;
pub use invitations_service::InvitationsService;
pub use labels_service::LabelsService;
pub use membership_registry::MembershipRegistry;
pub use reports_service::ReportsService;
pub use tasks_service::TasksService;
pub use workspaces_service::WorkspacesService;
