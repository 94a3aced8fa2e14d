use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::StoreError;

/// Decimal places of stored amounts / 金额小数位
pub const AMOUNT_SCALE: u32 = 2;

/// Company ownership type / 公司类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyType {
    Public,
    Private,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Public => "Public",
            CompanyType::Private => "Private",
        }
    }
}

/// Company size / 公司规模
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
            CompanySize::Large => "Large",
        }
    }
}

/// Round half away from zero and pad to two decimal places, e.g. `5` → `5.00`
pub fn canonical_amount(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(AMOUNT_SCALE);
    amount
}

/// Company with its related records loaded / 公司及其关联数据
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub industry: String,
    pub founded_year: i64,
    pub details: Option<CompanyDetails>,
    pub financials: Vec<FinancialData>,
}

impl Company {
    /// Text rendering of a scalar column, as the store casts it for matching
    pub fn field_text(&self, column: &str) -> Option<String> {
        match column {
            "name" => Some(self.name.clone()),
            "country" => Some(self.country.clone()),
            "industry" => Some(self.industry.clone()),
            "founded_year" => Some(self.founded_year.to_string()),
            _ => None,
        }
    }
}

/// One-to-one company details / 公司详情
///
/// Choice columns keep the stored text as is; rows may be written by other tools.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetails {
    pub company_type: String,
    pub size: String,
    pub ceo_name: String,
    pub headquarters: String,
}

impl CompanyDetails {
    pub fn field_text(&self, column: &str) -> Option<String> {
        match column {
            "company_type" => Some(self.company_type.clone()),
            "size" => Some(self.size.clone()),
            "ceo_name" => Some(self.ceo_name.clone()),
            "headquarters" => Some(self.headquarters.clone()),
            _ => None,
        }
    }
}

/// Yearly financial figures / 年度财务数据
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialData {
    pub id: i64,
    pub year: i64,
    pub revenue: Decimal,
    pub net_income: Decimal,
}

impl FinancialData {
    pub fn field_text(&self, column: &str) -> Option<String> {
        match column {
            "year" => Some(self.year.to_string()),
            "revenue" => Some(canonical_amount(self.revenue).to_string()),
            "net_income" => Some(canonical_amount(self.net_income).to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub industry: String,
    pub founded_year: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompanyDetailsRow {
    pub company_id: i64,
    pub company_type: String,
    pub size: String,
    pub ceo_name: String,
    pub headquarters: String,
}

impl From<CompanyDetailsRow> for CompanyDetails {
    fn from(row: CompanyDetailsRow) -> Self {
        CompanyDetails {
            company_type: row.company_type,
            size: row.size,
            ceo_name: row.ceo_name,
            headquarters: row.headquarters,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FinancialDataRow {
    pub id: i64,
    pub company_id: i64,
    pub year: i64,
    pub revenue: String,
    pub net_income: String,
}

fn parse_decimal(column: &'static str, value: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(value).map_err(|_| StoreError::InvalidDecimal {
        column,
        value: value.to_string(),
    })
}

impl TryFrom<FinancialDataRow> for FinancialData {
    type Error = StoreError;

    fn try_from(row: FinancialDataRow) -> Result<Self, Self::Error> {
        Ok(FinancialData {
            id: row.id,
            year: row.year,
            revenue: parse_decimal("revenue", &row.revenue)?,
            net_income: parse_decimal("net_income", &row.net_income)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub country: String,
    pub industry: String,
    pub founded_year: i64,
}

#[derive(Debug, Clone)]
pub struct NewCompanyDetails {
    pub company_type: CompanyType,
    pub size: CompanySize,
    pub ceo_name: String,
    pub headquarters: String,
}

#[derive(Debug, Clone)]
pub struct NewFinancialData {
    pub year: i64,
    pub revenue: Decimal,
    pub net_income: Decimal,
}
