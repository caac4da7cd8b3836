use std::sync::Arc;

use crate::domain::{
    AnalysisApi, AppointmentApi, AuthApi, ChatApi, PremiumApi, SecurityApi, SettingsApi,
};
use crate::interface_adapters::clients::{
    AnalysisClient, AppointmentClient, AuthClient, ChatClient, PremiumClient, SecurityClient,
    SettingsClient,
};
use crate::interface_adapters::http::ApiClient;
use crate::use_cases::demo::DemoHandoff;
use crate::use_cases::{Navigator, SessionStore, ViewContext};

// Everything a screen can be built from. Ports are trait objects so tests can swap them.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub navigator: Arc<Navigator>,
    pub demo: Arc<DemoHandoff>,
    pub auth: Arc<dyn AuthApi>,
    pub analysis: Arc<dyn AnalysisApi>,
    pub chat: Arc<dyn ChatApi>,
    pub settings: Arc<dyn SettingsApi>,
    pub security: Arc<dyn SecurityApi>,
    pub premium: Arc<dyn PremiumApi>,
    pub appointments: Arc<dyn AppointmentApi>,
}

impl AppState {
    // Wire every port to the same HTTP client, and so to the same session.
    pub fn from_client(api: ApiClient) -> Self {
        let session = api.session().clone();
        Self {
            navigator: Arc::new(Navigator::new(session.clone())),
            session,
            demo: Arc::new(DemoHandoff::new()),
            auth: Arc::new(AuthClient::new(api.clone())),
            analysis: Arc::new(AnalysisClient::new(api.clone())),
            chat: Arc::new(ChatClient::new(api.clone())),
            settings: Arc::new(SettingsClient::new(api.clone())),
            security: Arc::new(SecurityClient::new(api.clone())),
            premium: Arc::new(PremiumClient::new(api.clone())),
            appointments: Arc::new(AppointmentClient::new(api)),
        }
    }

    pub fn view_context(&self) -> ViewContext {
        ViewContext::new(self.session.clone(), self.navigator.clone())
    }
}
