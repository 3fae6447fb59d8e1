use std::sync::Arc;

use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::base_traits::HasIdColumn;
use super::error::{DaoLayerError, DaoResult};
use crate::db::entities::id_sequence;
use crate::db::entities::prelude::IdSequence;

/// Process-wide write gate for the store.
///
/// Identifiers are reserved inside the writing transaction, and every write
/// transaction (inserts, updates, unlinks, deletes and the list cascade)
/// runs while holding the single [`WriteGuard`]. Two writers in this process
/// therefore never read the same high-water mark, and a cascade never races
/// a concurrent link to the task it is about to delete.
#[derive(Clone, Default)]
pub struct IdAllocator {
    gate: Arc<AsyncMutex<()>>,
}

/// Held from the first read of a write transaction until it commits or
/// rolls back.
pub struct WriteGuard {
    _guard: OwnedMutexGuard<()>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn write(&self) -> WriteGuard {
        WriteGuard {
            _guard: Arc::clone(&self.gate).lock_owned().await,
        }
    }
}

/// Reserves the next identifier for `E`: one past the larger of the current
/// maximum row id and the recorded high-water mark, `1` for a table that
/// never held a row. The reservation is written on `conn`, so it commits or
/// rolls back together with the insert that uses it.
pub async fn next_id<E, C>(conn: &C) -> DaoResult<i32>
where
    E: EntityTrait + HasIdColumn,
    C: ConnectionTrait,
{
    let table = E::default().table_name();

    let highest_row = E::find()
        .select_only()
        .column(E::id_column())
        .order_by_desc(E::id_column())
        .limit(1)
        .into_tuple::<i32>()
        .one(conn)
        .await?
        .unwrap_or(0);
    let recorded = IdSequence::find_by_id(table.to_string())
        .one(conn)
        .await?
        .map_or(0, |sequence| sequence.last_id);

    let next = highest_row
        .max(recorded)
        .checked_add(1)
        .ok_or(DaoLayerError::IdSpaceExhausted { entity: table })?;

    IdSequence::insert(id_sequence::ActiveModel {
        table_name: Set(table.to_string()),
        last_id: Set(next),
    })
    .on_conflict(
        OnConflict::column(id_sequence::Column::TableName)
            .update_column(id_sequence::Column::LastId)
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    Ok(next)
}
