use contracts::domain::a006_monthly_closing::{CreateMonthlyClosingRequest, MonthlyClosing};
use contracts::domain::common::AggregateRoot;

use crate::shared::api::{self, ApiError};

fn collection() -> String {
    format!("/{}", MonthlyClosing::collection_name())
}

pub async fn fetch_monthly_closings() -> Result<Vec<MonthlyClosing>, ApiError> {
    api::get_json(&collection()).await
}

pub async fn create_monthly_closing(
    request: &CreateMonthlyClosingRequest,
) -> Result<MonthlyClosing, ApiError> {
    api::post_json(&collection(), request).await
}
