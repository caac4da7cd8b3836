mod analysis;
mod appointments;
mod auth;
mod chat;
mod demo;
mod errors;
mod premium;
mod route;
mod security;
mod session;
mod settings;

// Re-export the domain boundary types and ports.
pub use analysis::{
    AnalysisApi, AnalysisResult, ColorAnalysis, HistoryEntry, HistoryPayload, ImageUpload,
    parse_analysis_response, percent,
};
pub use appointments::{AppointmentApi, Booking, BookingConfirmation, BookingRequest};
pub use auth::{AuthApi, Credentials, LoginResponse, SignupResponse};
pub use chat::{ChatApi, ChatReply, ChatRequest};
pub use demo::{DemoSample, demo_sample, demo_samples};
pub use errors::{ApiError, StorageError};
pub use premium::{Plan, PremiumApi, Pricing, RoleInfo, UpgradeOutcome, UpgradeRequest, Usage};
pub use route::{Navigation, Route, guard};
pub use security::{
    Acknowledgement, BackupCodes, ChangePasswordRequest, ResetPasswordRequest, SecurityApi,
    TwoFactorCode, TwoFactorSetup, TwoFactorStatus,
};
pub use session::{AccessState, StoredSession, TokenStorage};
pub use settings::{
    AccessibilitySettings, AiModelSettings, AnalysisPreferences, CameraSettings, GoalsSettings,
    NotificationSettings, PrivacySettings, ProductPreferences, ProfileSettings, Settings,
    SettingsApi, SettingsPatch,
};
