use serde::Serialize;

// Backend endpoint paths, relative to the configured base URL.
pub mod paths {
    pub const SIGNUP: &str = "/api/auth/signup";
    pub const LOGIN: &str = "/api/auth/login";

    pub const ANALYZE: &str = "/analyze";
    pub const HISTORY: &str = "/history";
    pub const CHAT: &str = "/chat";

    // The trailing slash is part of the route on the backend.
    pub const SETTINGS: &str = "/api/settings/";
    pub const SETTINGS_EXPORT: &str = "/api/settings/export";

    pub const CHANGE_PASSWORD: &str = "/api/auth/change-password";
    pub const PASSWORD_STRENGTH: &str = "/api/auth/password-strength";
    pub const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";
    pub const RESET_PASSWORD: &str = "/api/auth/reset-password";

    pub const TWO_FACTOR_ENABLE: &str = "/api/auth/2fa/enable";
    pub const TWO_FACTOR_VERIFY: &str = "/api/auth/2fa/verify";
    pub const TWO_FACTOR_DISABLE: &str = "/api/auth/2fa/disable";
    pub const TWO_FACTOR_STATUS: &str = "/api/auth/2fa/status";
    pub const TWO_FACTOR_REGENERATE: &str = "/api/auth/2fa/backup-codes/regenerate";

    pub const USER_ROLE: &str = "/api/user/role";
    pub const USER_STATS: &str = "/api/user/stats";
    pub const USER_FEATURES: &str = "/api/user/features";
    pub const USER_USAGE: &str = "/api/user/usage";
    pub const USER_PRICING: &str = "/api/user/pricing";
    pub const USER_UPGRADE: &str = "/api/user/upgrade";
    pub const USER_DOWNGRADE: &str = "/api/user/downgrade";

    pub const APPOINTMENT_BOOK: &str = "/api/appointments/book";
    pub const APPOINTMENT_MINE: &str = "/api/appointments/my-bookings";
}

// Multipart field name the analyze endpoint reads the upload from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}
