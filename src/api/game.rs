use serde_json::Value;

use super::client::ApiClient;
use super::error::Result;

impl ApiClient {
    pub async fn sessions(&self) -> Result<Value> {
        self.get_json("/game/sessions").await
    }

    pub async fn events(&self) -> Result<Value> {
        self.get_json("/game/events").await
    }

    pub async fn battles(&self) -> Result<Value> {
        self.get_json("/game/battles").await
    }
}
