//! Routed pages

pub mod dashboard;
pub mod entry;
pub mod maintenance;
pub mod users;

pub use dashboard::DashboardPage;
pub use entry::EntryPage;
pub use maintenance::MaintenancePage;
pub use users::UsersPage;
