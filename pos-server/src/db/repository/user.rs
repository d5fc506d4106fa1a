//! Staff account repository

use crate::db::RepoResult;
use async_trait::async_trait;
use shared::models::{Role, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Duplicate` on an email collision.
    async fn insert(&self, user: User) -> RepoResult<User>;

    /// Replace an existing account by id
    async fn update(&self, user: User) -> RepoResult<User>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn find_by_role(&self, role: Role) -> RepoResult<Vec<User>>;

    /// All accounts, active and inactive
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    async fn count(&self) -> RepoResult<usize>;
}
