use std::sync::Arc;

use crate::domain::{AnalysisApi, AnalysisResult, ImageUpload};
use crate::use_cases::error_message::{Access, ErrorCategory, UserMessage};
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const SELECT_IMAGE_TEXT: &str = "Please select an image";
pub const ANALYSIS_TIMEOUT_TEXT: &str = "Analysis took too long. Please try with a smaller image.";

// What the results card shows for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub face_shape: String,
    pub confidence: Option<String>,
    pub gender: Option<String>,
    pub skin_scores: Vec<(String, String)>,
    pub recommendations: Vec<String>,
    pub undertone: Option<String>,
    pub season: Option<String>,
    pub annotated_image_url: Option<String>,
}

impl From<&AnalysisResult> for AnalysisSummary {
    fn from(result: &AnalysisResult) -> Self {
        let color = result.color_analysis.as_ref();
        Self {
            face_shape: result.face_shape.clone(),
            confidence: result.confidence_percent(),
            gender: result.gender.clone(),
            skin_scores: result.score_percents(),
            recommendations: result.recommendations.clone(),
            undertone: color.and_then(|color| color.undertone.clone()),
            season: color.and_then(|color| color.season.clone()),
            annotated_image_url: result
                .annotated_image_url
                .clone()
                .or_else(|| result.image_url.clone()),
        }
    }
}

// Upload one picture and show the result.
pub struct AnalyzeView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn AnalysisApi>,
    image: Option<ImageUpload>,
    state: ViewState<AnalysisResult>,
}

impl AnalyzeView {
    pub fn new(ctx: ViewContext, api: Arc<dyn AnalysisApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            image: None,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState<AnalysisResult> {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // A new pick replaces the previous one and hides the old result.
    pub fn select_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
        self.state = ViewState::new();
    }

    pub fn summary(&self) -> Option<AnalysisSummary> {
        self.state.data.as_ref().map(AnalysisSummary::from)
    }

    #[tracing::instrument(skip_all)]
    pub async fn analyze(&mut self) -> bool {
        let Some(image) = self.image.clone() else {
            self.state.fail(UserMessage::validation(SELECT_IMAGE_TEXT));
            return false;
        };
        tracing::debug!(file = %image.file_name, bytes = image.bytes.len(), "uploading image");

        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move { api.analyze(image, &token).await };

        let done = self
            .ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await;
        // Uploads are what usually time out; point at the image size.
        if let Some(message) = self.state.error.as_mut() {
            if message.category == ErrorCategory::Timeout {
                message.text = ANALYSIS_TIMEOUT_TEXT.to_string();
            }
        }
        done
    }
}
