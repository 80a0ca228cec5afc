use serde::{Deserialize, Serialize};

/// One entry for a dropdown; the source data uses the raw value as its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub last_fetched: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub count: u64,
    pub cumulative: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Deserialize)]
pub struct RegionsQuery {
    pub province: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub province: Option<String>,
    pub region: Option<String>,
}
