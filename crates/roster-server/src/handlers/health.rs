use axum::Json;
use chrono::Utc;
use roster_types::{format_timestamp, HealthResult};

pub async fn handle_health() -> Json<HealthResult> {
    Json(HealthResult {
        status: "OK".to_string(),
        timestamp: format_timestamp(&Utc::now()),
    })
}
