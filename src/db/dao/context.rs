use sea_orm::DatabaseConnection;

use super::{DaoBase, IdAllocator, ListDao, MembershipDao, TaskDao};

/// Hands out DAOs that share one connection pool and one [`IdAllocator`],
/// so every write path in the process serializes on the same guard.
#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
    ids: IdAllocator,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            db: db.clone(),
            ids: IdAllocator::new(),
        }
    }

    pub fn list(&self) -> ListDao {
        DaoBase::new(&self.db, &self.ids)
    }

    pub fn task(&self) -> TaskDao {
        DaoBase::new(&self.db, &self.ids)
    }

    pub fn membership(&self) -> MembershipDao {
        DaoBase::new(&self.db, &self.ids)
    }
}
