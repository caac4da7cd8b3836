use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

// Complete user settings, round-tripped wholesale. Missing sections fall back to
// the backend defaults; unknown keys, top-level or nested, are kept and sent back on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub user_email: String,
    pub language: String,
    pub dark_mode: bool,
    pub profile: ProfileSettings,
    pub analysis: AnalysisPreferences,
    pub camera: CameraSettings,
    pub ai_model: AiModelSettings,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub goals: GoalsSettings,
    pub products: ProductPreferences,
    pub accessibility: AccessibilitySettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_email: String::new(),
            language: "en".to_string(),
            dark_mode: false,
            profile: ProfileSettings::default(),
            analysis: AnalysisPreferences::default(),
            camera: CameraSettings::default(),
            ai_model: AiModelSettings::default(),
            notifications: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
            goals: GoalsSettings::default(),
            products: ProductPreferences::default(),
            accessibility: AccessibilitySettings::default(),
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub age_range: String,
    pub gender: String,
    pub skin_concerns: Vec<String>,
    pub allergies: String,
    pub budget_preference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            age_range: "25-34".to_string(),
            gender: "prefer-not-to-say".to_string(),
            skin_concerns: Vec::new(),
            allergies: String::new(),
            budget_preference: "medium".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPreferences {
    pub skin_type: String,
    pub analysis_detail: String,
    pub auto_save: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AnalysisPreferences {
    fn default() -> Self {
        Self {
            skin_type: "combination".to_string(),
            analysis_detail: "detailed".to_string(),
            auto_save: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub default_camera: String,
    pub image_quality: String,
    pub lighting_guidance: bool,
    pub grid_overlay: bool,
    pub auto_capture: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            default_camera: "front".to_string(),
            image_quality: "high".to_string(),
            lighting_guidance: true,
            grid_overlay: false,
            auto_capture: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiModelSettings {
    pub model_version: String,
    pub analysis_speed: String,
    pub confidence_threshold: u32,
    pub beta_features: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AiModelSettings {
    fn default() -> Self {
        Self {
            model_version: "latest".to_string(),
            analysis_speed: "balanced".to_string(),
            confidence_threshold: 70,
            beta_features: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub push_notifications: bool,
    pub email_notifications: bool,
    pub skin_routine_reminder: bool,
    pub reanalysis_reminder: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            push_notifications: true,
            email_notifications: false,
            skin_routine_reminder: false,
            reanalysis_reminder: "weekly".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    pub data_sharing: bool,
    pub auto_delete: String,
    pub history_retention: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            data_sharing: false,
            auto_delete: "never".to_string(),
            history_retention: "forever".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsSettings {
    pub skin_goals: Vec<String>,
    pub target_timeline: String,
    pub progress_photos: bool,
    pub goal_reminders: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GoalsSettings {
    fn default() -> Self {
        Self {
            skin_goals: vec!["clear-skin".to_string()],
            target_timeline: "3-months".to_string(),
            progress_photos: true,
            goal_reminders: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPreferences {
    pub ingredient_prefs: Vec<String>,
    pub price_range: Vec<u32>,
    pub show_sponsored: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProductPreferences {
    fn default() -> Self {
        Self {
            ingredient_prefs: vec!["natural".to_string()],
            price_range: vec![0, 100],
            show_sponsored: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilitySettings {
    pub font_size: String,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font_size: "medium".to_string(),
            high_contrast: false,
            reduce_motion: false,
            extra: Map::new(),
        }
    }
}

// Partial update; only the populated sections are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<AiModelSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalsSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<ProductPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilitySettings>,
}

#[async_trait]
pub trait SettingsApi: Send + Sync {
    async fn get(&self, cancel: &CancellationToken) -> Result<Settings, ApiError>;

    async fn save(&self, settings: &Settings, cancel: &CancellationToken)
    -> Result<Settings, ApiError>;

    async fn update(
        &self,
        patch: &SettingsPatch,
        cancel: &CancellationToken,
    ) -> Result<Settings, ApiError>;

    // Backend answers with a free-form acknowledgement.
    async fn reset(&self, cancel: &CancellationToken) -> Result<Value, ApiError>;

    async fn export(&self, cancel: &CancellationToken) -> Result<Value, ApiError>;
}
