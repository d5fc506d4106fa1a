//! Menu item repository

use crate::db::RepoResult;
use async_trait::async_trait;
use shared::models::MenuItem;

#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn insert(&self, item: MenuItem) -> RepoResult<MenuItem>;

    /// Replace an existing item by id
    async fn update(&self, item: MenuItem) -> RepoResult<MenuItem>;

    /// Hard delete. Orders keep their captured name/price, so removal is safe.
    async fn delete(&self, id: &str) -> RepoResult<bool>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>>;

    /// All items ordered by category then name
    async fn find_all(&self) -> RepoResult<Vec<MenuItem>>;

    async fn find_by_category(&self, category: &str) -> RepoResult<Vec<MenuItem>>;
}
