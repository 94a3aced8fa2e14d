use serde::{Deserialize, Serialize};

/// One matched company as sent to the client / 搜索结果项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub company_name: String,
    pub industry: String,
    pub country: String,
    pub details: Option<DetailsRecord>,
    pub financials: Vec<FinancialRecord>,
}

/// Unset values serialize as `null`, never omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsRecord {
    pub company_type: Option<String>,
    pub size: Option<String>,
    pub ceo_name: Option<String>,
    pub headquarters: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub year: f64,
    pub revenue: f64,
    pub net_income: f64,
}

/// Outbound frame / 响应帧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<ResultRecord>,
}

impl SearchResponse {
    pub fn success(results: Vec<ResultRecord>) -> Self {
        Self { error: None, results }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            results: Vec::new(),
        }
    }
}
