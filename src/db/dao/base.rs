use chrono::Utc;
use sea_orm::entity::prelude::Date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityName, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait,
};

use super::base_traits::{DaoEntity, HasIdActiveModel, HasIdColumn};
use super::error::{DaoLayerError, DaoResult};
use super::id_allocator::{IdAllocator, next_id};

#[derive(Debug, serde::Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
}

pub struct DaoPager<D, F>
where
    D: DaoBase,
    F: Fn(Select<D::Entity>) -> Select<D::Entity> + Clone + Send,
{
    dao: D,
    page: u64,
    page_size: u64,
    order: Option<(<D::Entity as EntityTrait>::Column, Order)>,
    apply: F,
    done: bool,
}

impl<D, F> DaoPager<D, F>
where
    D: DaoBase,
    F: Fn(Select<D::Entity>) -> Select<D::Entity> + Clone + Send,
    <D::Entity as EntityTrait>::Column: Clone,
{
    pub async fn next_page(
        &mut self,
    ) -> DaoResult<Option<PaginatedResponse<<D::Entity as EntityTrait>::Model>>> {
        if self.done {
            return Ok(None);
        }

        let response = self
            .dao
            .find(
                self.page,
                self.page_size,
                self.order.clone(),
                self.apply.clone(),
            )
            .await?;

        if !response.has_next {
            self.done = true;
        }
        self.page = self.page.saturating_add(1);

        Ok(Some(response))
    }

    /// Drains every remaining page into one vector.
    pub async fn collect_all(mut self) -> DaoResult<Vec<<D::Entity as EntityTrait>::Model>> {
        let mut rows = Vec::new();
        while let Some(mut response) = self.next_page().await? {
            rows.append(&mut response.data);
        }
        Ok(rows)
    }
}

#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: DaoEntity;
    const MAX_PAGE_SIZE: u64 = 100;

    fn new(db: &DatabaseConnection, ids: &IdAllocator) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn ids(&self) -> &IdAllocator;

    /// Reserves the next identifier and inserts `data` under it, all inside
    /// one transaction held under the store's write guard.
    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let _guard = self.ids().write().await;
        let txn = self.db().begin().await?;
        let result = insert_with_next_id::<Self::Entity, _, _>(&txn, data).await;
        finish(txn, result).await
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        Ok(Self::Entity::find_by_id(id).one(self.db()).await?)
    }

    async fn find(
        &self,
        page: u64,
        page_size: u64,
        order: Option<(<Self::Entity as EntityTrait>::Column, Order)>,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<PaginatedResponse<<Self::Entity as EntityTrait>::Model>> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, Self::MAX_PAGE_SIZE);

        let base = Self::Entity::find();
        let filtered = apply(base);
        let ordered = match order {
            Some((column, order)) => filtered.order_by(column, order),
            None => filtered.order_by_asc(Self::Entity::id_column()),
        };
        let fetch_size = page_size.saturating_add(1);
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let mut data = ordered
            .limit(fetch_size)
            .offset(offset)
            .all(self.db())
            .await?;

        let has_next = data.len() > page_size as usize;
        if has_next {
            data.truncate(page_size as usize);
        }

        Ok(PaginatedResponse {
            data,
            page,
            page_size,
            has_next,
        })
    }

    fn find_iter<F>(
        &self,
        page_size: Option<u64>,
        order: Option<(<Self::Entity as EntityTrait>::Column, Order)>,
        apply: F,
    ) -> DaoPager<Self, F>
    where
        Self: Clone,
        F: Fn(Select<Self::Entity>) -> Select<Self::Entity> + Clone + Send,
        <Self::Entity as EntityTrait>::Column: Clone,
    {
        DaoPager {
            dao: self.clone(),
            page: 1,
            page_size: page_size.unwrap_or(Self::MAX_PAGE_SIZE),
            order,
            apply,
            done: false,
        }
    }

    async fn update<F>(&self, id: i32, apply: F) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let _guard = self.ids().write().await;
        let model = Self::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::Entity::default().table_name(),
                id,
            })?;

        let mut active = model.into_active_model();
        apply(&mut active);

        Ok(active.update(self.db()).await?)
    }

    async fn count(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<u64> {
        Ok(apply(Self::Entity::find()).count(self.db()).await?)
    }
}

/// Assigns the next identifier of `E` to `data` and inserts it on `conn`.
/// The caller owns the transaction and the write guard.
pub(crate) async fn insert_with_next_id<E, C, A>(conn: &C, data: A) -> DaoResult<E::Model>
where
    E: DaoEntity,
    C: ConnectionTrait,
    A: IntoActiveModel<E::ActiveModel>,
{
    let mut active = data.into_active_model();
    active.set_id(next_id::<E, C>(conn).await?);
    Ok(active.insert(conn).await?)
}

/// Fails with `NotFound` unless a row of `E` with `id` exists.
pub(crate) async fn require_row<E, C>(conn: &C, id: i32) -> DaoResult<()>
where
    E: DaoEntity,
    C: ConnectionTrait,
{
    let found = E::find()
        .filter(E::id_column().eq(id))
        .count(conn)
        .await?;
    if found == 0 {
        return Err(DaoLayerError::NotFound {
            entity: E::default().table_name(),
            id,
        });
    }
    Ok(())
}

/// Deletes the row of `E` with `id`; `NotFound` when nothing was deleted.
pub(crate) async fn delete_row<E, C>(conn: &C, id: i32) -> DaoResult<()>
where
    E: DaoEntity,
    C: ConnectionTrait,
{
    let result = E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(DaoLayerError::NotFound {
            entity: E::default().table_name(),
            id,
        });
    }
    Ok(())
}

/// Commits on success, rolls back on failure. A failed rollback is logged
/// and the original error is returned.
pub(crate) async fn finish<T>(txn: DatabaseTransaction, result: DaoResult<T>) -> DaoResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

pub(crate) fn today() -> Date {
    Utc::now().date_naive()
}
