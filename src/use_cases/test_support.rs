use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::domain::{
    Acknowledgement, AnalysisApi, AnalysisResult, ApiError, AppointmentApi, AuthApi, BackupCodes,
    Booking, BookingConfirmation, BookingRequest, ChangePasswordRequest, ChatApi, ChatReply,
    ChatRequest, Credentials, HistoryEntry, ImageUpload, LoginResponse, Plan, PremiumApi, Pricing,
    ResetPasswordRequest, RoleInfo, SecurityApi, Settings, SettingsApi, SettingsPatch,
    SignupResponse, StorageError, StoredSession, TokenStorage, TwoFactorCode, TwoFactorSetup,
    TwoFactorStatus, UpgradeOutcome, UpgradeRequest, Usage,
};
use crate::interface_adapters::storage::MemoryTokenStorage;
use crate::use_cases::{Navigator, SessionStore, ViewContext};

// Storage whose writes always fail; loads see an empty store.
pub(crate) struct FailingStorage;

impl TokenStorage for FailingStorage {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        Ok(None)
    }

    fn save(&self, _session: &StoredSession) -> Result<(), StorageError> {
        Err(std::io::Error::other("save failed").into())
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(std::io::Error::other("clear failed").into())
    }
}

// Session, navigator and view context over in-memory storage.
pub(crate) fn context(token: Option<&str>) -> (ViewContext, Arc<MemoryTokenStorage>) {
    let storage = Arc::new(MemoryTokenStorage::new());
    let session = Arc::new(SessionStore::init(storage.clone()).expect("init should succeed"));
    if let Some(token) = token {
        session
            .login(token, Some("ana@example.com".to_string()))
            .expect("login should succeed");
    }
    let navigator = Arc::new(Navigator::new(session.clone()));
    (ViewContext::new(session, navigator), storage)
}

pub(crate) fn sample_result(face_shape: &str, hydration: f64) -> AnalysisResult {
    AnalysisResult {
        face_shape: face_shape.to_string(),
        confidence: Some(0.9),
        gender: Some("female".to_string()),
        skin_scores: [("hydration".to_string(), hydration), ("acne".to_string(), 0.2)]
            .into_iter()
            .collect(),
        color_analysis: None,
        recommendations: vec!["Use a light moisturizer".to_string()],
        image_url: None,
        annotated_image_url: None,
    }
}

pub(crate) fn history_entry(id: &str, created_at: &str, hydration: f64) -> HistoryEntry {
    HistoryEntry {
        id: Some(id.to_string()),
        created_at: Some(created_at.to_string()),
        result: sample_result("Oval", hydration),
    }
}

pub(crate) fn booking_request() -> BookingRequest {
    BookingRequest {
        service_name: "Hydrating Facial".to_string(),
        customer_name: "Ana".to_string(),
        appointment_date: "2026-11-02".to_string(),
        appointment_time: "10:30 AM".to_string(),
        category: Some("skin".to_string()),
        gender: "female".to_string(),
    }
}

// Canned responses handed out by the fake backend.
#[derive(Clone)]
pub(crate) struct FakeData {
    pub token: String,
    pub analysis: AnalysisResult,
    pub history: Vec<HistoryEntry>,
    pub reply: String,
    pub settings: Settings,
    pub two_factor: TwoFactorStatus,
    pub role: RoleInfo,
    pub pricing: Pricing,
    pub usage: Usage,
    pub booking_ref: String,
    pub bookings: Vec<Booking>,
}

impl Default for FakeData {
    fn default() -> Self {
        Self {
            token: "fake-token".to_string(),
            analysis: sample_result("Oval", 0.8),
            history: vec![
                history_entry("h2", "2026-10-02T10:00:00", 0.7),
                history_entry("h1", "2026-10-01T10:00:00", 0.5),
            ],
            reply: "Try a gentle cleanser.".to_string(),
            settings: Settings {
                user_email: "ana@example.com".to_string(),
                ..Settings::default()
            },
            two_factor: TwoFactorStatus::default(),
            role: RoleInfo {
                role: "free".to_string(),
                ..RoleInfo::default()
            },
            pricing: Pricing {
                plans: vec![Plan {
                    name: "Premium".to_string(),
                    price: 9.99,
                    currency: Some("USD".to_string()),
                    period: Some("month".to_string()),
                    features: vec!["Unlimited analyses".to_string()],
                    limits: Value::Null,
                }],
            },
            usage: Usage {
                analysis: json!({ "used": 2, "limit": 5 }),
                can_analyze: true,
            },
            booking_ref: "BK-1001".to_string(),
            bookings: Vec::new(),
        }
    }
}

// One fake standing in for every backend port. Records each endpoint it serves
// and fails the ones registered through `fail`.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    calls: Arc<Mutex<Vec<&'static str>>>,
    failures: Arc<Mutex<HashMap<&'static str, ApiError>>>,
    data: Arc<Mutex<FakeData>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail(&self, endpoint: &'static str, err: ApiError) {
        lock(&self.failures).insert(endpoint, err);
    }

    pub(crate) fn with_data(self, update: impl FnOnce(&mut FakeData)) -> Self {
        update(&mut lock(&self.data));
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    pub(crate) fn data(&self) -> FakeData {
        lock(&self.data).clone()
    }

    fn serve(&self, endpoint: &'static str) -> Result<FakeData, ApiError> {
        lock(&self.calls).push(endpoint);
        if let Some(err) = lock(&self.failures).get(endpoint) {
            return Err(err.clone());
        }
        Ok(self.data())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("fake backend mutex poisoned")
}

fn ack(message: &str) -> Acknowledgement {
    Acknowledgement {
        message: Some(message.to_string()),
        ..Acknowledgement::default()
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn signup(
        &self,
        _req: Credentials,
        _cancel: &CancellationToken,
    ) -> Result<SignupResponse, ApiError> {
        self.serve("signup")?;
        Ok(SignupResponse {
            message: Some("User created".to_string()),
        })
    }

    async fn login(
        &self,
        _req: Credentials,
        _cancel: &CancellationToken,
    ) -> Result<LoginResponse, ApiError> {
        let data = self.serve("login")?;
        Ok(LoginResponse {
            access_token: data.token,
        })
    }
}

#[async_trait]
impl AnalysisApi for FakeBackend {
    async fn analyze(
        &self,
        _image: ImageUpload,
        _cancel: &CancellationToken,
    ) -> Result<AnalysisResult, ApiError> {
        Ok(self.serve("analyze")?.analysis)
    }

    async fn history(&self, _cancel: &CancellationToken) -> Result<Vec<HistoryEntry>, ApiError> {
        Ok(self.serve("history")?.history)
    }
}

#[async_trait]
impl ChatApi for FakeBackend {
    async fn send(
        &self,
        _req: ChatRequest,
        _cancel: &CancellationToken,
    ) -> Result<ChatReply, ApiError> {
        Ok(ChatReply {
            reply: self.serve("chat")?.reply,
        })
    }
}

#[async_trait]
impl SettingsApi for FakeBackend {
    async fn get(&self, _cancel: &CancellationToken) -> Result<Settings, ApiError> {
        Ok(self.serve("settings.get")?.settings)
    }

    async fn save(
        &self,
        settings: &Settings,
        _cancel: &CancellationToken,
    ) -> Result<Settings, ApiError> {
        self.serve("settings.save")?;
        lock(&self.data).settings = settings.clone();
        Ok(settings.clone())
    }

    async fn update(
        &self,
        patch: &SettingsPatch,
        _cancel: &CancellationToken,
    ) -> Result<Settings, ApiError> {
        self.serve("settings.update")?;
        let mut data = lock(&self.data);
        if let Some(language) = &patch.language {
            data.settings.language = language.clone();
        }
        if let Some(dark_mode) = patch.dark_mode {
            data.settings.dark_mode = dark_mode;
        }
        Ok(data.settings.clone())
    }

    async fn reset(&self, _cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.serve("settings.reset")?;
        lock(&self.data).settings = Settings::default();
        Ok(json!({ "message": "Settings reset to defaults" }))
    }

    async fn export(&self, _cancel: &CancellationToken) -> Result<Value, ApiError> {
        let data = self.serve("settings.export")?;
        Ok(json!({ "settings": data.settings }))
    }
}

#[async_trait]
impl SecurityApi for FakeBackend {
    async fn change_password(
        &self,
        _req: ChangePasswordRequest,
        _cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.serve("password.change")?;
        Ok(ack("Password changed successfully"))
    }

    async fn password_strength(
        &self,
        _password: &str,
        _cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        self.serve("password.strength")?;
        Ok(json!({ "strength": "strong", "score": 4 }))
    }

    async fn forgot_password(
        &self,
        _email: &str,
        _cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.serve("password.forgot")?;
        Ok(ack("Reset link sent"))
    }

    async fn reset_password(
        &self,
        _req: ResetPasswordRequest,
        _cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.serve("password.reset")?;
        Ok(ack("Password reset successfully"))
    }

    async fn enable_two_factor(
        &self,
        _cancel: &CancellationToken,
    ) -> Result<TwoFactorSetup, ApiError> {
        self.serve("2fa.enable")?;
        Ok(TwoFactorSetup {
            qr_code: "data:image/png;base64,AAAA".to_string(),
            secret: "JBSWY3DPEHPK3PXP".to_string(),
            backup_codes: vec!["11111111".to_string(), "22222222".to_string()],
        })
    }

    async fn verify_two_factor(
        &self,
        _code: TwoFactorCode,
        _cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.serve("2fa.verify")?;
        let mut data = lock(&self.data);
        data.two_factor = TwoFactorStatus {
            enabled: true,
            activated_at: Some("2026-10-16T09:00:00".to_string()),
            backup_codes_remaining: 2,
        };
        Ok(ack("2FA enabled successfully"))
    }

    async fn disable_two_factor(
        &self,
        _code: TwoFactorCode,
        _cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.serve("2fa.disable")?;
        lock(&self.data).two_factor = TwoFactorStatus::default();
        Ok(ack("2FA disabled successfully"))
    }

    async fn two_factor_status(
        &self,
        _cancel: &CancellationToken,
    ) -> Result<TwoFactorStatus, ApiError> {
        Ok(self.serve("2fa.status")?.two_factor)
    }

    async fn regenerate_backup_codes(
        &self,
        _code: TwoFactorCode,
        _cancel: &CancellationToken,
    ) -> Result<BackupCodes, ApiError> {
        self.serve("2fa.regenerate")?;
        Ok(BackupCodes {
            backup_codes: vec!["33333333".to_string()],
            message: Some("Backup codes regenerated".to_string()),
        })
    }
}

#[async_trait]
impl PremiumApi for FakeBackend {
    async fn role(&self, _cancel: &CancellationToken) -> Result<RoleInfo, ApiError> {
        Ok(self.serve("user.role")?.role)
    }

    async fn stats(&self, _cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.serve("user.stats")?;
        Ok(json!({ "total_analyses": 2 }))
    }

    async fn features(&self, _cancel: &CancellationToken) -> Result<Value, ApiError> {
        let data = self.serve("user.features")?;
        Ok(json!({ "features": data.role.features }))
    }

    async fn usage(&self, _cancel: &CancellationToken) -> Result<Usage, ApiError> {
        Ok(self.serve("user.usage")?.usage)
    }

    async fn pricing(&self, _cancel: &CancellationToken) -> Result<Pricing, ApiError> {
        Ok(self.serve("user.pricing")?.pricing)
    }

    async fn upgrade(
        &self,
        req: UpgradeRequest,
        _cancel: &CancellationToken,
    ) -> Result<UpgradeOutcome, ApiError> {
        self.serve("user.upgrade")?;
        let mut data = lock(&self.data);
        data.role.role = "premium".to_string();
        data.role.is_premium = true;
        Ok(UpgradeOutcome {
            success: Some(true),
            message: Some(format!("Upgraded for {} days", req.duration_days)),
            subscription_end: Some("2026-11-15".to_string()),
        })
    }

    async fn downgrade(&self, _cancel: &CancellationToken) -> Result<UpgradeOutcome, ApiError> {
        self.serve("user.downgrade")?;
        let mut data = lock(&self.data);
        data.role.role = "free".to_string();
        data.role.is_premium = false;
        Ok(UpgradeOutcome {
            success: Some(true),
            message: Some("Subscription cancelled".to_string()),
            subscription_end: None,
        })
    }
}

#[async_trait]
impl AppointmentApi for FakeBackend {
    async fn book(
        &self,
        req: BookingRequest,
        _cancel: &CancellationToken,
    ) -> Result<BookingConfirmation, ApiError> {
        let data = self.serve("appointments.book")?;
        lock(&self.data).bookings.push(Booking {
            id: None,
            booking_ref: data.booking_ref.clone(),
            request: req,
            created_at: None,
        });
        Ok(BookingConfirmation {
            status: Some("success".to_string()),
            message: Some("Appointment booked successfully".to_string()),
            booking_ref: data.booking_ref,
            data: Value::Null,
        })
    }

    async fn my_bookings(&self, _cancel: &CancellationToken) -> Result<Vec<Booking>, ApiError> {
        Ok(self.serve("appointments.mine")?.bookings)
    }
}
