//! Error types / 错误类型

use thiserror::Error;

/// Data store failures / 数据存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid decimal {value:?} in column {column}")]
    InvalidDecimal { column: &'static str, value: String },

    #[error("search fields out of sync with table {table}: missing {missing:?}, unregistered {unregistered:?}")]
    SchemaDrift {
        table: &'static str,
        missing: Vec<String>,
        unregistered: Vec<String>,
    },
}

/// Per-message search failures / 单条消息的搜索错误
///
/// Everything except `Store` is answered on the same connection and leaves it open.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input format.")]
    MalformedPayload,

    #[error("{0}")]
    InvalidPayload(String),

    #[error("Query must be at least {0} characters long.")]
    ShortQuery(usize),

    #[error(transparent)]
    Store(#[from] StoreError),
}
