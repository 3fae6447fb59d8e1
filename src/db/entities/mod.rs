#[allow(unused_imports)]
pub mod prelude {
    pub use super::id_sequence::Entity as IdSequence;
    pub use super::list::Entity as List;
    pub use super::membership::Entity as Membership;
    pub use super::task::Entity as Task;
}

pub mod id_sequence;
pub mod list;
pub mod membership;
pub mod task;
