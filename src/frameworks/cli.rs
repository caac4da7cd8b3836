use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::domain::{
    BookingRequest, ImageUpload, Navigation, PremiumApi, Route, Settings, SettingsPatch,
};
use crate::frameworks::app::AppError;
use crate::interface_adapters::state::AppState;
use crate::use_cases::analysis::AnalyzeView;
use crate::use_cases::auth::{LoginView, SignupForm, SignupView, logout};
use crate::use_cases::booking::BookingView;
use crate::use_cases::chat::ChatView;
use crate::use_cases::dashboard::DashboardView;
use crate::use_cases::history::{HistoryView, NOT_ENOUGH_DATA_TEXT, TrendsView};
use crate::use_cases::premium::PremiumView;
use crate::use_cases::security::{PasswordForm, SecurityView, TwoFactorStep, describe_status};
use crate::use_cases::settings::SettingsView;
use crate::use_cases::{Access, ViewState, demo};

#[derive(Debug, Parser)]
#[command(name = "beauty_client")]
#[command(about = "Client for the AI beauty analysis service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Log in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Status,

    /// Resolve a screen path through the route guard
    Open { path: String },

    /// Upload a face image for analysis
    Analyze { image: PathBuf },

    /// List past analyses
    History,

    /// Show how scores changed over time
    Trends,

    /// Recent analyses, plan and usage
    Dashboard,

    /// Ask the beauty consultant
    Chat { message: String },

    #[command(subcommand)]
    Settings(SettingsCommand),

    #[command(subcommand)]
    Password(PasswordCommand),

    #[command(subcommand)]
    TwoFactor(TwoFactorCommand),

    #[command(subcommand)]
    Premium(PremiumCommand),

    /// Book a salon appointment
    Book {
        #[arg(long)]
        service: String,
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        gender: String,
    },

    /// List my appointments
    Bookings,

    /// Browse demo results without an account
    Demo { id: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show settings, two-factor state and plan
    Get,
    /// Replace all settings with a JSON document
    Save { file: PathBuf },
    /// Change a few top-level fields
    Update {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        dark_mode: Option<bool>,
    },
    /// Restore defaults
    Reset,
    /// Print everything the backend stores about the account
    Export,
    /// Drop back to the free plan
    CancelSubscription,
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    Change {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    Strength { password: String },
    /// Request a reset link
    Forgot { email: String },
    Reset {
        #[arg(long)]
        token: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TwoFactorCommand {
    Status,
    /// Start setup and print the secret and backup codes
    Enable,
    Verify { code: String },
    Disable { code: String },
    Regenerate { code: String },
}

#[derive(Debug, Subcommand)]
pub enum PremiumCommand {
    /// Current plan and subscription dates
    Role,
    /// Available plans
    Pricing,
    Usage,
    /// Account statistics
    Stats,
    /// Features unlocked by the current plan
    Features,
    Upgrade {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    Cancel,
}

// Screens are built per command; the route guard runs first for protected ones.
pub async fn execute(state: &AppState, command: Command) -> Result<(), AppError> {
    let ctx = state.view_context();
    match command {
        Command::Signup {
            email,
            password,
            confirm,
        } => {
            enter(state, Route::Signup)?;
            let mut view = SignupView::new(ctx, state.auth.clone());
            view.submit(SignupForm {
                email,
                password,
                confirm_password: confirm,
            })
            .await;
            println!("{}", loaded(view.state())?);
        }
        Command::Login { email, password } => {
            enter(state, Route::Login)?;
            let mut view = LoginView::new(ctx, state.auth.clone());
            view.submit(&email, &password).await;
            loaded(view.state())?;
            println!("Logged in as {}", email.trim());
        }
        Command::Logout => {
            logout(&ctx);
            println!("Logged out");
        }
        Command::Status => match (state.session.is_authenticated(), state.session.email()) {
            (true, Some(email)) => println!("Logged in as {email}"),
            (true, None) => println!("Logged in"),
            (false, _) => println!("Not logged in"),
        },
        Command::Open { path } => {
            let route = Route::from_path(&path).ok_or(AppError::UnknownRoute(path))?;
            match state.navigator.navigate(route) {
                Navigation::Render(route) => println!("{}", route.path()),
                Navigation::Redirect(to) => println!("{} (redirected)", to.path()),
            }
        }
        Command::Analyze { image } => {
            enter(state, Route::Analyze)?;
            let mut view = AnalyzeView::new(ctx, state.analysis.clone());
            view.select_image(read_image(&image).await?);
            view.analyze().await;
            loaded(view.state())?;
            if let Some(summary) = view.summary() {
                println!("Face shape: {}", summary.face_shape);
                if let Some(confidence) = summary.confidence {
                    println!("Confidence: {confidence}");
                }
                if let Some(gender) = summary.gender {
                    println!("Gender: {gender}");
                }
                for (name, score) in summary.skin_scores {
                    println!("  {name}: {score}");
                }
                if let Some(undertone) = summary.undertone {
                    println!("Undertone: {undertone}");
                }
                if let Some(season) = summary.season {
                    println!("Season: {season}");
                }
                for tip in summary.recommendations {
                    println!("- {tip}");
                }
            }
        }
        Command::History => {
            enter(state, Route::History)?;
            let mut view = HistoryView::new(ctx, state.analysis.clone());
            view.load().await;
            let entries = loaded(view.state())?;
            if entries.is_empty() {
                println!("No analyses yet");
            }
            for entry in entries {
                println!(
                    "{}  {}  {}",
                    entry.created_at.as_deref().unwrap_or("-"),
                    entry.result.face_shape,
                    entry.result.confidence_percent().unwrap_or_default()
                );
            }
        }
        Command::Trends => {
            enter(state, Route::Trends)?;
            let mut view = TrendsView::new(ctx, state.analysis.clone());
            view.load().await;
            match loaded(view.state())? {
                Some(report) => {
                    println!("{} analyses", report.entries.len());
                    for metric in &report.metrics {
                        println!("  {}: {} ({:+})", metric.name, metric.latest, metric.change);
                    }
                }
                None => println!("{NOT_ENOUGH_DATA_TEXT}"),
            }
        }
        Command::Dashboard => {
            enter(state, Route::Dashboard)?;
            let mut view = DashboardView::new(ctx, state.analysis.clone(), state.premium.clone());
            view.load().await;
            let summary = loaded(view.state())?;
            println!("Plan: {}", summary.role.role);
            println!("Analyses: {}", summary.total_analyses);
            println!(
                "Can analyze: {}",
                if summary.usage.can_analyze { "yes" } else { "no" }
            );
            for entry in &summary.recent {
                println!("  {}", entry.result.face_shape);
            }
        }
        Command::Chat { message } => {
            enter(state, Route::Dashboard)?;
            let mut view = ChatView::new(ctx, state.chat.clone());
            if let Some(reply) = view.send(&message).await {
                println!("{}", reply.text);
            }
        }
        Command::Settings(command) => settings(state, command).await?,
        Command::Password(command) => password(state, command).await?,
        Command::TwoFactor(command) => two_factor(state, command).await?,
        Command::Premium(command) => premium(state, command).await?,
        Command::Book {
            service,
            name,
            date,
            time,
            category,
            gender,
        } => {
            enter(state, Route::Services)?;
            let mut view = BookingView::new(ctx, state.appointments.clone());
            let request = BookingRequest {
                service_name: service,
                customer_name: name,
                appointment_date: date,
                appointment_time: time,
                category,
                gender,
            };
            match view.book(request).await {
                Some(reference) => println!("Booked: {reference}"),
                None => {
                    loaded(view.state())?;
                }
            }
        }
        Command::Bookings => {
            enter(state, Route::Services)?;
            let mut view = BookingView::new(ctx, state.appointments.clone());
            view.load_bookings().await;
            for booking in loaded(view.bookings())? {
                println!(
                    "{}  {} {} {}",
                    booking.booking_ref,
                    booking.request.appointment_date,
                    booking.request.appointment_time,
                    booking.request.service_name
                );
            }
        }
        Command::Demo { id: None } => {
            for sample in demo::samples() {
                println!("{}  {}: {}", sample.id, sample.name, sample.description);
            }
        }
        Command::Demo { id: Some(id) } => {
            if demo::select(&ctx, &state.demo, &id).is_none() {
                return Err(AppError::UnknownSample(id));
            }
            if let Some(sample) = demo::open_results(&ctx, &state.demo) {
                println!("{} ({})", sample.name, sample.result.face_shape);
                for (name, score) in sample.result.score_percents() {
                    println!("  {name}: {score}");
                }
            }
        }
    }
    Ok(())
}

async fn settings(state: &AppState, command: SettingsCommand) -> Result<(), AppError> {
    enter(state, Route::Settings)?;
    let mut view = SettingsView::new(
        state.view_context(),
        state.settings.clone(),
        state.security.clone(),
        state.premium.clone(),
    );
    match command {
        SettingsCommand::Get => {
            view.load().await;
            let screen = loaded(view.state())?;
            println!("{}", serde_json::to_string_pretty(&screen.settings)?);
            if let Some(status) = &screen.two_factor {
                println!("Two-factor: {}", describe_status(status));
            }
            println!("Premium: {}", if screen.is_premium() { "yes" } else { "no" });
        }
        SettingsCommand::Save { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .map_err(|source| AppError::ReadFile { path: file, source })?;
            let settings: Settings = serde_json::from_str(&contents)?;
            view.save(settings).await;
            failed(view.state())?;
        }
        SettingsCommand::Update {
            language,
            dark_mode,
        } => {
            view.update(SettingsPatch {
                language,
                dark_mode,
                ..SettingsPatch::default()
            })
            .await;
            failed(view.state())?;
        }
        SettingsCommand::Reset => {
            view.reset().await;
            failed(view.state())?;
        }
        SettingsCommand::Export => {
            let export = view.export().await;
            match export {
                Some(export) => println!("{}", serde_json::to_string_pretty(&export)?),
                None => {
                    failed(view.state())?;
                }
            }
        }
        SettingsCommand::CancelSubscription => {
            view.cancel_subscription().await;
            failed(view.state())?;
        }
    }
    print_notice(view.notice());
    Ok(())
}

async fn password(state: &AppState, command: PasswordCommand) -> Result<(), AppError> {
    let mut view = SecurityView::new(state.view_context(), state.security.clone());
    match command {
        PasswordCommand::Change {
            current,
            new,
            confirm,
        } => {
            enter(state, Route::Settings)?;
            view.change_password(PasswordForm {
                current_password: current,
                new_password: new,
                confirm_password: confirm,
            })
            .await;
        }
        PasswordCommand::Strength { password } => {
            if let Some(report) = view.password_strength(&password).await {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        PasswordCommand::Forgot { email } => {
            view.forgot_password(&email).await;
        }
        PasswordCommand::Reset {
            token,
            new,
            confirm,
        } => {
            view.reset_password(&token, &new, &confirm).await;
        }
    }
    failed(view.state())?;
    print_notice(view.notice());
    Ok(())
}

async fn two_factor(state: &AppState, command: TwoFactorCommand) -> Result<(), AppError> {
    enter(state, Route::Settings)?;
    let mut view = SecurityView::new(state.view_context(), state.security.clone());
    match command {
        TwoFactorCommand::Status => {
            view.load_status().await;
            println!("Two-factor: {}", describe_status(loaded(view.state())?));
        }
        TwoFactorCommand::Enable => {
            view.start_two_factor().await;
            if let TwoFactorStep::Setup(setup) = view.step() {
                println!("Secret: {}", setup.secret);
                println!("QR code: {}", setup.qr_code);
                println!("Backup codes:");
                for code in &setup.backup_codes {
                    println!("  {code}");
                }
            }
        }
        TwoFactorCommand::Verify { code } => {
            view.verify_two_factor(&code).await;
        }
        TwoFactorCommand::Disable { code } => {
            view.disable_two_factor(&code).await;
        }
        TwoFactorCommand::Regenerate { code } => {
            if let Some(codes) = view.regenerate_backup_codes(&code).await {
                for code in codes {
                    println!("  {code}");
                }
            }
        }
    }
    failed(view.state())?;
    print_notice(view.notice());
    Ok(())
}

async fn premium(state: &AppState, command: PremiumCommand) -> Result<(), AppError> {
    enter(state, Route::Premium)?;
    let ctx = state.view_context();
    let mut view = PremiumView::new(ctx.clone(), state.premium.clone());
    match command {
        PremiumCommand::Role => {
            view.load().await;
            let role = &loaded(view.state())?.role;
            println!("Plan: {}", role.role);
            if let Some(start) = &role.subscription_start {
                println!("Subscribed since: {start}");
            }
            if let Some(end) = &role.subscription_end {
                println!("Renews until: {end}");
            }
            for feature in &role.features {
                println!("  {feature}");
            }
        }
        PremiumCommand::Pricing => {
            view.load().await;
            for plan in &loaded(view.state())?.pricing.plans {
                println!(
                    "{}: {} {}{}",
                    plan.name,
                    plan.price,
                    plan.currency.as_deref().unwrap_or(""),
                    plan.period.as_deref().map(|period| format!(" / {period}")).unwrap_or_default()
                );
                for feature in &plan.features {
                    println!("  {feature}");
                }
            }
        }
        PremiumCommand::Usage => {
            let usage = ctx
                .call(view.scope(), Access::Protected, state.premium.usage(view.scope().token()))
                .await
                .map_err(AppError::View)?;
            println!("Can analyze: {}", if usage.can_analyze { "yes" } else { "no" });
            println!("{}", serde_json::to_string_pretty(&usage.analysis)?);
        }
        PremiumCommand::Stats => {
            let stats = ctx
                .call(view.scope(), Access::Protected, state.premium.stats(view.scope().token()))
                .await
                .map_err(AppError::View)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        PremiumCommand::Features => {
            let features = ctx
                .call(view.scope(), Access::Protected, state.premium.features(view.scope().token()))
                .await
                .map_err(AppError::View)?;
            println!("{}", serde_json::to_string_pretty(&features)?);
        }
        PremiumCommand::Upgrade { days } => {
            view.upgrade(days).await;
            failed(view.state())?;
        }
        PremiumCommand::Cancel => {
            view.cancel().await;
            failed(view.state())?;
        }
    }
    print_notice(view.message());
    Ok(())
}

fn enter(state: &AppState, route: Route) -> Result<(), AppError> {
    match state.navigator.navigate(route) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(to) => Err(AppError::Redirected(to)),
    }
}

// Data of a finished load, or the message the screen would show.
fn loaded<T>(state: &ViewState<T>) -> Result<&T, AppError> {
    failed(state)?;
    state.data.as_ref().ok_or(AppError::NoData)
}

fn failed<T>(state: &ViewState<T>) -> Result<(), AppError> {
    match &state.error {
        Some(message) => Err(AppError::View(message.clone())),
        None => Ok(()),
    }
}

fn print_notice(notice: Option<&str>) {
    if let Some(notice) = notice {
        println!("{notice}");
    }
}

async fn read_image(path: &Path) -> Result<ImageUpload, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| AppError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.jpg".to_string());
    Ok(ImageUpload::new(file_name, bytes))
}
