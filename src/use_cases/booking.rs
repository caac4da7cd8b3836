use std::sync::Arc;

use crate::domain::{AppointmentApi, Booking, BookingConfirmation, BookingRequest};
use crate::use_cases::error_message::{Access, UserMessage};
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const REQUIRED_BOOKING_TEXT: &str = "Please fill in all required fields";

// Names of the required fields left empty, in form order.
pub fn missing_fields(req: &BookingRequest) -> Vec<&'static str> {
    [
        ("service", &req.service_name),
        ("name", &req.customer_name),
        ("date", &req.appointment_date),
        ("time", &req.appointment_time),
        ("gender", &req.gender),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

// Service booking form plus the user's own bookings.
pub struct BookingView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn AppointmentApi>,
    state: ViewState<BookingConfirmation>,
    bookings: ViewState<Vec<Booking>>,
}

impl BookingView {
    pub fn new(ctx: ViewContext, api: Arc<dyn AppointmentApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            state: ViewState::new(),
            bookings: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState<BookingConfirmation> {
        &self.state
    }

    pub fn bookings(&self) -> &ViewState<Vec<Booking>> {
        &self.bookings
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Returns the booking reference on success.
    #[tracing::instrument(skip_all, fields(service = %req.service_name))]
    pub async fn book(&mut self, req: BookingRequest) -> Option<String> {
        let missing = missing_fields(&req);
        if !missing.is_empty() {
            tracing::debug!(?missing, "booking form incomplete");
            self.state
                .fail(UserMessage::validation(REQUIRED_BOOKING_TEXT));
            return None;
        }

        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move { api.book(req, &token).await };

        let booked = self
            .ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await;
        if !booked {
            return None;
        }
        let reference = self.state.data.as_ref().map(|done| done.booking_ref.clone());
        tracing::info!(booking_ref = ?reference, "appointment booked");
        reference
    }

    #[tracing::instrument(skip_all)]
    pub async fn load_bookings(&mut self) -> bool {
        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move { api.my_bookings(&token).await };

        self.ctx
            .run(&self.scope, &mut self.bookings, Access::Protected, fetch)
            .await
    }
}
