use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{AppointmentApi, ApiError, Booking, BookingConfirmation, BookingRequest};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::paths;

#[derive(Clone)]
pub struct AppointmentClient {
    api: ApiClient,
}

impl AppointmentClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AppointmentApi for AppointmentClient {
    async fn book(
        &self,
        req: BookingRequest,
        cancel: &CancellationToken,
    ) -> Result<BookingConfirmation, ApiError> {
        self.api.post(paths::APPOINTMENT_BOOK, &req, cancel).await
    }

    async fn my_bookings(&self, cancel: &CancellationToken) -> Result<Vec<Booking>, ApiError> {
        self.api.get(paths::APPOINTMENT_MINE, cancel).await
    }
}
