use async_trait::async_trait;
use parking_lot::RwLock;

use super::CompanyStore;
use crate::error::StoreError;
use crate::models::Company;
use crate::search::SearchPredicate;

/// In-memory store evaluating predicates with `SearchPredicate::matches`
#[derive(Default)]
pub struct MemoryStore {
    companies: RwLock<Vec<Company>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a company by id
    pub fn insert(&self, company: Company) {
        let mut companies = self.companies.write();
        companies.retain(|existing| existing.id != company.id);
        companies.push(company);
        companies.sort_by_key(|c| c.id);
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn search(&self, predicate: &SearchPredicate) -> Result<Vec<Company>, StoreError> {
        Ok(self
            .companies
            .read()
            .iter()
            .filter(|company| predicate.matches(company))
            .cloned()
            .collect())
    }
}
