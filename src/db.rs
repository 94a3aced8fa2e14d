use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::models::{CompanySize, CompanyType, NewCompany, NewCompanyDetails, NewFinancialData};
use crate::store::SqliteStore;

/// Run database migrations / 运行数据库迁移
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            country TEXT NOT NULL,
            industry TEXT NOT NULL,
            founded_year INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One-to-one: at most one details row per company / 一对一
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS company_details (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_id INTEGER NOT NULL UNIQUE,
            company_type TEXT NOT NULL,
            size TEXT NOT NULL,
            ceo_name TEXT NOT NULL,
            headquarters TEXT NOT NULL,
            FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Decimals are stored as canonical text, e.g. 1000000.00
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS financial_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_id INTEGER NOT NULL,
            year INTEGER NOT NULL,
            revenue TEXT NOT NULL,
            net_income TEXT NOT NULL,
            FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_financial_data_company ON financial_data(company_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// Insert the sample companies when the database is empty / 写入示例数据
///
/// Returns whether anything was inserted.
pub async fn seed_demo_data(store: &SqliteStore) -> Result<bool> {
    if store.count_companies().await? > 0 {
        return Ok(false);
    }

    let test_company = store
        .insert_company(&NewCompany {
            name: "Test Company".to_string(),
            country: "USA".to_string(),
            industry: "Technology".to_string(),
            founded_year: 2010,
        })
        .await?;
    store
        .insert_details(
            test_company,
            &NewCompanyDetails {
                company_type: CompanyType::Public,
                size: CompanySize::Large,
                ceo_name: "John Doe".to_string(),
                headquarters: "New York".to_string(),
            },
        )
        .await?;
    store
        .insert_financial(
            test_company,
            &NewFinancialData {
                year: 2022,
                revenue: Decimal::new(100000000, 2),
                net_income: Decimal::new(50000000, 2),
            },
        )
        .await?;

    let another_corp = store
        .insert_company(&NewCompany {
            name: "Another Corp".to_string(),
            country: "Canada".to_string(),
            industry: "Finance".to_string(),
            founded_year: 2015,
        })
        .await?;
    store
        .insert_details(
            another_corp,
            &NewCompanyDetails {
                company_type: CompanyType::Private,
                size: CompanySize::Medium,
                ceo_name: "Jane Smith".to_string(),
                headquarters: "Toronto".to_string(),
            },
        )
        .await?;

    store
        .insert_financial(
            test_company,
            &NewFinancialData {
                year: 2021,
                revenue: Decimal::new(100040000, 2),
                net_income: Decimal::new(50200000, 2),
            },
        )
        .await?;

    tracing::info!("Seeded demo companies");
    Ok(true)
}
