pub mod context;
pub mod list_service;
pub mod task_service;

pub use context::ServiceContext;
pub use list_service::ListService;
pub use task_service::TaskService;
