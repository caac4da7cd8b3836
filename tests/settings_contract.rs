mod support;

use axum::http::Method;
use serde_json::json;

use beauty_client::domain::{SecurityApi, SettingsPatch};
use beauty_client::use_cases::settings::{SAVED_TEXT, SettingsView};
use support::MockBackend;
use tokio_util::sync::CancellationToken;

fn settings_body() -> serde_json::Value {
    json!({
        "user_email": "ana@example.com",
        "language": "en",
        "dark_mode": false,
        "profile": {"age_range": "25-34", "gender": "female", "skin_concerns": ["acne"]},
        "camera": {"default_camera": "front"},
        "theme_accent": "rose"
    })
}

#[tokio::test]
async fn when_settings_are_read_twice_then_both_reads_match() {
    let backend = MockBackend::new()
        .on(Method::GET, "/api/settings/", 200, settings_body())
        .on(Method::GET, "/api/auth/2fa/status", 200, json!({"enabled": false}))
        .on(Method::GET, "/api/user/role", 200, json!({"role": "free", "is_premium": false}))
        .start()
        .await;
    let (state, _) = backend.state(Some("tok"));

    let mut first = SettingsView::new(
        state.view_context(),
        state.settings.clone(),
        state.security.clone(),
        state.premium.clone(),
    );
    let mut second = SettingsView::new(
        state.view_context(),
        state.settings.clone(),
        state.security.clone(),
        state.premium.clone(),
    );
    assert!(first.load().await);
    assert!(second.load().await);

    let first = first.state().data.as_ref().expect("first read");
    let second = second.state().data.as_ref().expect("second read");
    assert_eq!(first.settings, second.settings);
    assert_eq!(first.settings.profile.skin_concerns, vec!["acne".to_string()]);
    assert!(!first.is_premium());
    assert_eq!(backend.requests_to("/api/settings/").len(), 2);
}

#[tokio::test]
async fn when_settings_are_saved_then_unknown_keys_go_back_to_backend() {
    let backend = MockBackend::new()
        .on(Method::GET, "/api/settings/", 200, settings_body())
        .on(Method::POST, "/api/settings/", 200, settings_body())
        .on(Method::GET, "/api/auth/2fa/status", 500, json!({"detail": "down"}))
        .on(Method::GET, "/api/user/role", 500, json!({"detail": "down"}))
        .start()
        .await;
    let (state, _) = backend.state(Some("tok"));
    let mut view = SettingsView::new(
        state.view_context(),
        state.settings.clone(),
        state.security.clone(),
        state.premium.clone(),
    );

    assert!(view.load().await);
    let loaded = view.state().data.as_ref().expect("settings");
    assert_eq!(loaded.two_factor, None);
    let settings = loaded.settings.clone();
    assert!(view.save(settings).await);

    assert_eq!(view.notice(), Some(SAVED_TEXT));
    let saved = backend
        .requests()
        .into_iter()
        .find(|req| req.method == Method::POST && req.path == "/api/settings/")
        .expect("save request");
    assert_eq!(saved.json()["theme_accent"], "rose");
    assert_eq!(saved.json()["profile"]["gender"], "female");
}

#[tokio::test]
async fn when_a_section_has_unknown_keys_then_save_sends_them_back() {
    let body = json!({"profile": {"age_range": "18-24", "nickname": "Ana"}, "theme_v2": "x"});
    let backend = MockBackend::new()
        .on(Method::GET, "/api/settings/", 200, body.clone())
        .on(Method::POST, "/api/settings/", 200, body)
        .on(Method::GET, "/api/auth/2fa/status", 200, json!({"enabled": false}))
        .on(Method::GET, "/api/user/role", 200, json!({"role": "free", "is_premium": false}))
        .start()
        .await;
    let (state, _) = backend.state(Some("tok"));
    let mut view = SettingsView::new(
        state.view_context(),
        state.settings.clone(),
        state.security.clone(),
        state.premium.clone(),
    );

    assert!(view.load().await);
    let settings = view.state().data.as_ref().expect("settings").settings.clone();
    assert!(view.save(settings).await);

    let saved = backend
        .requests()
        .into_iter()
        .find(|req| req.method == Method::POST && req.path == "/api/settings/")
        .expect("save request")
        .json();
    assert_eq!(saved["profile"]["nickname"], "Ana");
    assert_eq!(saved["profile"]["age_range"], "18-24");
    assert_eq!(saved["theme_v2"], "x");
}

#[tokio::test]
async fn when_only_language_changes_then_patch_carries_only_that_field() {
    let backend = MockBackend::new()
        .on(Method::PATCH, "/api/settings/", 200, settings_body())
        .start()
        .await;
    let (state, _) = backend.state(Some("tok"));
    let mut view = SettingsView::new(
        state.view_context(),
        state.settings.clone(),
        state.security.clone(),
        state.premium.clone(),
    );

    let patch = SettingsPatch {
        language: Some("lt".to_string()),
        ..SettingsPatch::default()
    };
    assert!(view.update(patch).await);

    let request = &backend.requests_to("/api/settings/")[0];
    assert_eq!(request.json(), json!({"language": "lt"}));
}

#[tokio::test]
async fn when_password_has_reserved_characters_then_path_is_escaped() {
    let backend = MockBackend::new()
        .on(
            Method::GET,
            "/api/auth/password-strength/a%2Fb%20c%3F",
            200,
            json!({"score": 2, "strength": "weak"}),
        )
        .start()
        .await;
    let (state, _) = backend.state(None);

    let report = state
        .security
        .password_strength("a/b c?", &CancellationToken::new())
        .await
        .expect("strength report");

    assert_eq!(report["strength"], "weak");
}
