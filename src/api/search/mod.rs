//! Search over WebSocket / WebSocket 搜索
//!
//! One task per connection; frames on a connection are answered strictly in order.

mod ws;

pub use ws::ws_search;

use company_search::error::{SearchError, StoreError};
use company_search::search::{self, extract_query, ResultRecord, SearchResponse};

use crate::state::AppState;

/// Answer one inbound text frame.
///
/// Validation errors become an error frame; only store failures are returned as `Err`.
pub async fn respond(state: &AppState, text: &str) -> Result<SearchResponse, StoreError> {
    match run_search(state, text).await {
        Ok(results) => Ok(SearchResponse::success(results)),
        Err(SearchError::Store(e)) => Err(e),
        Err(e) => {
            tracing::debug!("Rejected search message: {}", e);
            Ok(SearchResponse::error(e.to_string()))
        }
    }
}

async fn run_search(state: &AppState, text: &str) -> Result<Vec<ResultRecord>, SearchError> {
    let query = extract_query(text, state.min_query_length())?;
    tracing::debug!("Searching companies for {:?}", query);

    let results = search::execute(state.store.as_ref(), &query).await?;
    tracing::debug!("Found {} companies for {:?}", results.len(), query);
    Ok(results)
}
