//! Company store abstraction / 公司数据存储
//!
//! The search core only reads through `CompanyStore`. `SqliteStore` is the
//! production backend; `MemoryStore` evaluates the same predicate in memory.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::Company;
use crate::search::SearchPredicate;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Distinct companies matching `predicate`, in id order, with details and financials loaded
    async fn search(&self, predicate: &SearchPredicate) -> Result<Vec<Company>, StoreError>;
}
