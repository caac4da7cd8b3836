use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

// Booking form fields as the backend expects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service_name: String,
    pub customer_name: String,
    // YYYY-MM-DD
    pub appointment_date: String,
    // HH:MM AM/PM
    pub appointment_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub gender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub booking_ref: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: Option<String>,
    pub booking_ref: String,
    #[serde(flatten)]
    pub request: BookingRequest,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[async_trait]
pub trait AppointmentApi: Send + Sync {
    async fn book(
        &self,
        req: BookingRequest,
        cancel: &CancellationToken,
    ) -> Result<BookingConfirmation, ApiError>;

    async fn my_bookings(&self, cancel: &CancellationToken) -> Result<Vec<Booking>, ApiError>;
}
