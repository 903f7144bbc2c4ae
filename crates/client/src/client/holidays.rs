//! Holiday calendar operations.

use async_trait::async_trait;

use leavecal_core::holiday::Holiday;
use leavecal_core::ports::{HolidayProvider, TransportError};

use super::LeavecalClient;
use crate::error::Result;

impl LeavecalClient {
    /// Get every holiday falling in `year`.
    pub async fn holidays(&self, year: i32) -> Result<Vec<Holiday>> {
        let response = self
            .client
            .get(self.url("/holidays")?)
            .query(&[("year", year)])
            .send()
            .await?;
        self.handle_response(response, &format!("holidays for {year}"))
            .await
    }
}

#[async_trait]
impl HolidayProvider for LeavecalClient {
    async fn holidays_for_year(&self, year: i32) -> std::result::Result<Vec<Holiday>, TransportError> {
        let holidays = self.holidays(year).await?;
        tracing::debug!(year, count = holidays.len(), "Fetched holidays");
        Ok(holidays)
    }
}
