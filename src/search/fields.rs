//! Searchable field registry / 可搜索字段注册表
//!
//! Every scalar column of the three tables is listed here. Relation columns
//! (`id`, `company_id`) are never searchable. `verify_against_schema` compares
//! the registry with the live tables so that a column added to the schema but
//! missing here fails start-up.

use sqlx::SqlitePool;
use std::collections::BTreeSet;

use crate::error::StoreError;

/// Table a search field lives on, seen from the company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Company,
    Details,
    Financials,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Company, Relation::Details, Relation::Financials];

    pub fn table(&self) -> &'static str {
        match self {
            Relation::Company => "companies",
            Relation::Details => "company_details",
            Relation::Financials => "financial_data",
        }
    }

    /// Alias used in the search query joins
    pub fn alias(&self) -> &'static str {
        match self {
            Relation::Company => "c",
            Relation::Details => "d",
            Relation::Financials => "f",
        }
    }

    /// Relation name as seen from a company, `None` for the company itself
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Relation::Company => None,
            Relation::Details => Some("details"),
            Relation::Financials => Some("financials"),
        }
    }

    pub fn fields(&self) -> &'static [SearchField] {
        match self {
            Relation::Company => COMPANY_FIELDS,
            Relation::Details => DETAILS_FIELDS,
            Relation::Financials => FINANCIAL_FIELDS,
        }
    }
}

/// Storage kind of a column / 字段存储类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Canonical decimal text
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    pub relation: Relation,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl SearchField {
    const fn new(relation: Relation, column: &'static str, kind: FieldKind) -> Self {
        Self { relation, column, kind }
    }

    /// Dotted path from the company, e.g. `details.ceo_name`
    pub fn path(&self) -> String {
        match self.relation.name() {
            Some(relation) => format!("{}.{}", relation, self.column),
            None => self.column.to_string(),
        }
    }

    /// SQL expression yielding the column's text value
    pub fn sql_expr(&self) -> String {
        match self.kind {
            FieldKind::Text | FieldKind::Decimal => {
                format!("{}.{}", self.relation.alias(), self.column)
            }
            FieldKind::Integer => {
                format!("CAST({}.{} AS TEXT)", self.relation.alias(), self.column)
            }
        }
    }
}

pub const COMPANY_FIELDS: &[SearchField] = &[
    SearchField::new(Relation::Company, "name", FieldKind::Text),
    SearchField::new(Relation::Company, "country", FieldKind::Text),
    SearchField::new(Relation::Company, "industry", FieldKind::Text),
    SearchField::new(Relation::Company, "founded_year", FieldKind::Integer),
];

pub const DETAILS_FIELDS: &[SearchField] = &[
    SearchField::new(Relation::Details, "company_type", FieldKind::Text),
    SearchField::new(Relation::Details, "size", FieldKind::Text),
    SearchField::new(Relation::Details, "ceo_name", FieldKind::Text),
    SearchField::new(Relation::Details, "headquarters", FieldKind::Text),
];

pub const FINANCIAL_FIELDS: &[SearchField] = &[
    SearchField::new(Relation::Financials, "year", FieldKind::Integer),
    SearchField::new(Relation::Financials, "revenue", FieldKind::Decimal),
    SearchField::new(Relation::Financials, "net_income", FieldKind::Decimal),
];

/// Columns that link tables rather than hold data
const RELATION_COLUMNS: &[&str] = &["id", "company_id"];

/// All searchable fields, company first / 所有可搜索字段
pub fn search_fields() -> impl Iterator<Item = &'static SearchField> {
    Relation::ALL.into_iter().flat_map(|relation| relation.fields().iter())
}

/// Check the registry against the scalar columns actually present in the database
pub async fn verify_against_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for relation in Relation::ALL {
        let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info(?)")
            .bind(relation.table())
            .fetch_all(pool)
            .await?;

        let actual: BTreeSet<String> = columns
            .into_iter()
            .map(|(name,)| name)
            .filter(|name| !RELATION_COLUMNS.contains(&name.as_str()))
            .collect();
        let registered: BTreeSet<String> = relation
            .fields()
            .iter()
            .map(|field| field.column.to_string())
            .collect();

        if actual != registered {
            return Err(StoreError::SchemaDrift {
                table: relation.table(),
                missing: registered.difference(&actual).cloned().collect(),
                unregistered: actual.difference(&registered).cloned().collect(),
            });
        }
    }

    tracing::debug!("Search field registry matches schema ({} fields)", search_fields().count());
    Ok(())
}
