pub mod base;
pub mod base_traits;
pub mod cascade;
mod context;
pub mod error;
pub mod id_allocator;
pub mod list_dao;
pub mod membership_dao;
pub mod task_dao;

pub use base::{DaoBase, DaoPager, PaginatedResponse};
pub use base_traits::{HasIdActiveModel, HasIdColumn};
pub use cascade::CascadeOutcome;
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use id_allocator::{IdAllocator, next_id};
pub use list_dao::{ListChanges, ListDao, NewList};
pub use membership_dao::MembershipDao;
pub use task_dao::{NewTask, TaskChanges, TaskDao};
