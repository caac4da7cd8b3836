use crate::domain::session::AccessState;

// Screens of the application, addressed by their browser-style paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Signup,
    Login,
    DemoResults,
    Dashboard,
    Analyze,
    LiveAnalyze,
    HairStyling,
    NailStyling,
    History,
    Trends,
    Services,
    Settings,
    Premium,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Landing,
        Route::Signup,
        Route::Login,
        Route::DemoResults,
        Route::Dashboard,
        Route::Analyze,
        Route::LiveAnalyze,
        Route::HairStyling,
        Route::NailStyling,
        Route::History,
        Route::Trends,
        Route::Services,
        Route::Settings,
        Route::Premium,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::DemoResults => "/demo-results",
            Route::Dashboard => "/dashboard",
            Route::Analyze => "/dashboard/analyze",
            Route::LiveAnalyze => "/dashboard/live",
            Route::HairStyling => "/dashboard/hair",
            Route::NailStyling => "/dashboard/nails",
            Route::History => "/dashboard/history",
            Route::Trends => "/dashboard/trends",
            Route::Services => "/dashboard/services",
            Route::Settings => "/dashboard/settings",
            Route::Premium => "/premium",
        }
    }

    // Trailing slashes are ignored; unknown paths yield None.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
    }

    pub fn is_protected(self) -> bool {
        !matches!(
            self,
            Route::Landing | Route::Signup | Route::Login | Route::DemoResults
        )
    }
}

// Outcome of asking the guard whether a route may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn destination(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

// Anonymous users are sent to login; the requested path is not remembered.
pub fn guard(route: Route, access: AccessState) -> Navigation {
    match (route.is_protected(), access) {
        (true, AccessState::Anonymous) => Navigation::Redirect(Route::Login),
        _ => Navigation::Render(route),
    }
}
