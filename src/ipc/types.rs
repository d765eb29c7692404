use chrono::NaiveDate;
use serde::Deserialize;

use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: Store,
    /// Fixed "today" from configuration; `None` reads the local clock.
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn today(&self) -> String {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }
}
