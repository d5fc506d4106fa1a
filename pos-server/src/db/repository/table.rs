//! Dining table repository

use crate::db::RepoResult;
use async_trait::async_trait;
use shared::models::Table;

#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Insert a new table. Fails with `Duplicate` when the number is taken.
    async fn insert(&self, table: Table) -> RepoResult<Table>;

    /// Replace an existing table by id
    async fn update(&self, table: Table) -> RepoResult<Table>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Table>>;

    async fn find_by_number(&self, number: u32) -> RepoResult<Option<Table>>;

    /// All tables ordered by number
    async fn find_all(&self) -> RepoResult<Vec<Table>>;
}
