mod analysis;
mod appointments;
mod auth;
mod chat;
mod premium;
mod security;
mod settings;

pub use analysis::AnalysisClient;
pub use appointments::AppointmentClient;
pub use auth::AuthClient;
pub use chat::ChatClient;
pub use premium::PremiumClient;
pub use security::SecurityClient;
pub use settings::SettingsClient;
