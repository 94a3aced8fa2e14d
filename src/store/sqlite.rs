use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;

use super::CompanyStore;
use crate::error::StoreError;
use crate::models::{
    canonical_amount, Company, CompanyDetails, CompanyDetailsRow, CompanyRow, FinancialData,
    FinancialDataRow, NewCompany, NewCompanyDetails, NewFinancialData,
};
use crate::search::SearchPredicate;

/// Max bound ids per `IN (...)` list
const ID_BATCH: usize = 500;

const SEARCH_SELECT: &str = r#"
    SELECT DISTINCT c.id, c.name, c.country, c.industry, c.founded_year
    FROM companies c
    LEFT JOIN company_details d ON d.company_id = c.id
    LEFT JOIN financial_data f ON f.company_id = c.id
    WHERE "#;

/// SQLite-backed company store / SQLite 公司存储
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool on `database_url`, creating the file if needed
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to company database: {}", database_url);
        Ok(Self { pool })
    }

    /// Private in-memory database on a single long-lived connection
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Every new connection would see a fresh empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn insert_company(&self, company: &NewCompany) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO companies (name, country, industry, founded_year) VALUES (?, ?, ?, ?)",
        )
        .bind(&company.name)
        .bind(&company.country)
        .bind(&company.industry)
        .bind(company.founded_year)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn insert_details(
        &self,
        company_id: i64,
        details: &NewCompanyDetails,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO company_details (company_id, company_type, size, ceo_name, headquarters)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(company_id)
        .bind(details.company_type.as_str())
        .bind(details.size.as_str())
        .bind(&details.ceo_name)
        .bind(&details.headquarters)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Amounts are stored as two-place decimal text so `5` is searchable as `5.00`
    pub async fn insert_financial(
        &self,
        company_id: i64,
        financial: &NewFinancialData,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO financial_data (company_id, year, revenue, net_income) VALUES (?, ?, ?, ?)",
        )
        .bind(company_id)
        .bind(financial.year)
        .bind(canonical_amount(financial.revenue).to_string())
        .bind(canonical_amount(financial.net_income).to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count_companies(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn load_details(&self, ids: &[i64]) -> Result<HashMap<i64, CompanyDetails>, StoreError> {
        let mut details = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(ID_BATCH) {
            let mut builder = QueryBuilder::<Sqlite>::new(
                "SELECT company_id, company_type, size, ceo_name, headquarters FROM company_details WHERE company_id IN (",
            );
            push_id_list(&mut builder, chunk);
            builder.push(")");

            let rows: Vec<CompanyDetailsRow> = builder.build_query_as().fetch_all(&self.pool).await?;
            for row in rows {
                let company_id = row.company_id;
                details.insert(company_id, CompanyDetails::from(row));
            }
        }

        Ok(details)
    }

    async fn load_financials(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<FinancialData>>, StoreError> {
        let mut financials: HashMap<i64, Vec<FinancialData>> = HashMap::new();

        for chunk in ids.chunks(ID_BATCH) {
            let mut builder = QueryBuilder::<Sqlite>::new(
                "SELECT id, company_id, year, revenue, net_income FROM financial_data WHERE company_id IN (",
            );
            push_id_list(&mut builder, chunk);
            builder.push(") ORDER BY company_id, id");

            let rows: Vec<FinancialDataRow> = builder.build_query_as().fetch_all(&self.pool).await?;
            for row in rows {
                let company_id = row.company_id;
                financials
                    .entry(company_id)
                    .or_default()
                    .push(FinancialData::try_from(row)?);
            }
        }

        Ok(financials)
    }
}

fn push_id_list(builder: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
}

#[async_trait]
impl CompanyStore for SqliteStore {
    async fn search(&self, predicate: &SearchPredicate) -> Result<Vec<Company>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SEARCH_SELECT);
        predicate.push_sql(&mut builder);
        builder.push(" ORDER BY c.id");

        let rows: Vec<CompanyRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut details = self.load_details(&ids).await?;
        let mut financials = self.load_financials(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| Company {
                details: details.remove(&row.id),
                financials: financials.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                country: row.country,
                industry: row.industry,
                founded_year: row.founded_year,
            })
            .collect())
    }
}
