//! "Any field contains" predicate / 任意字段包含查询
//!
//! Matching is case-insensitive for ASCII letters, the same rule SQLite's
//! `lower()` applies, so the SQL rendering and `matches` agree. The SQL side uses
//! `instr` rather than `LIKE`: the needle is a plain substring with no wildcards
//! and no pattern-length limit.

use sqlx::{QueryBuilder, Sqlite};

use super::fields::{search_fields, Relation, SearchField};
use crate::models::Company;

/// Single "field contains needle" condition
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: &'static SearchField,
    pub needle: String,
}

impl Condition {
    pub fn contains(field: &'static SearchField, needle: &str) -> Self {
        Self {
            field,
            needle: needle.to_string(),
        }
    }

    /// Needle as bound into SQL, lowercased to compare against `lower(expr)`
    pub fn sql_needle(&self) -> String {
        self.needle.to_ascii_lowercase()
    }

    pub fn matches(&self, company: &Company) -> bool {
        let column = self.field.column;
        match self.field.relation {
            Relation::Company => company
                .field_text(column)
                .is_some_and(|text| contains_ignore_case(&text, &self.needle)),
            Relation::Details => company
                .details
                .as_ref()
                .and_then(|details| details.field_text(column))
                .is_some_and(|text| contains_ignore_case(&text, &self.needle)),
            Relation::Financials => company.financials.iter().any(|financial| {
                financial
                    .field_text(column)
                    .is_some_and(|text| contains_ignore_case(&text, &self.needle))
            }),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Disjunction of per-field conditions / 条件的逻辑或
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPredicate {
    conditions: Vec<Condition>,
}

impl SearchPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, company: &Company) -> bool {
        self.conditions.iter().any(|condition| condition.matches(company))
    }

    /// Append the predicate as a parenthesized SQL expression with bound needles.
    ///
    /// An empty predicate renders as `0` and matches nothing.
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        if self.conditions.is_empty() {
            builder.push("0");
            return;
        }

        builder.push("(");
        {
            let mut separated = builder.separated(" OR ");
            for condition in &self.conditions {
                separated.push(format!("instr(lower({}), ", condition.field.sql_expr()));
                separated.push_bind_unseparated(condition.sql_needle());
                separated.push_unseparated(") > 0");
            }
        }
        builder.push(")");
    }
}

/// Build the predicate matching a company when any searchable field contains `query`
pub fn build_search_predicate(query: &str) -> SearchPredicate {
    search_fields().fold(SearchPredicate::new(), |predicate, field| {
        predicate.or(Condition::contains(field, query))
    })
}
