//! Company search / 公司搜索
//!
//! - `fields`: registry of searchable columns across the three tables
//! - `predicate`: OR of per-field "contains" conditions, rendered to SQL or evaluated in memory
//! - `assemble`: matched company → result record
//! - `query`: inbound frame validation
//!
//! Call direction: connection handler → search → store

pub mod assemble;
pub mod fields;
pub mod predicate;
pub mod query;
pub mod types;

pub use assemble::assemble;
pub use fields::{search_fields, verify_against_schema, FieldKind, Relation, SearchField};
pub use predicate::{build_search_predicate, Condition, SearchPredicate};
pub use query::extract_query;
pub use types::{DetailsRecord, FinancialRecord, ResultRecord, SearchResponse};

use crate::error::StoreError;
use crate::store::CompanyStore;

/// Run a validated query against the store and assemble the results
pub async fn execute(store: &dyn CompanyStore, query: &str) -> Result<Vec<ResultRecord>, StoreError> {
    let predicate = build_search_predicate(query);
    let companies = store.search(&predicate).await?;
    Ok(companies.iter().map(assemble).collect())
}
