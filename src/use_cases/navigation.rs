use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{Navigation, Route, guard};
use crate::use_cases::SessionStore;

// Current screen plus the guard check applied on every move.
pub struct Navigator {
    current: Mutex<Route>,
    session: Arc<SessionStore>,
}

impl Navigator {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            current: Mutex::new(Route::Landing),
            session,
        }
    }

    pub fn navigate(&self, route: Route) -> Navigation {
        let outcome = guard(route, self.session.access_state());
        if let Navigation::Redirect(to) = outcome {
            tracing::info!(from = route.path(), to = to.path(), "navigation redirected");
        }
        *self.lock() = outcome.destination();
        outcome
    }

    // Used once a protected call reports the session is gone.
    pub fn force_login(&self) {
        tracing::info!("redirecting to login");
        *self.lock() = Route::Login;
    }

    pub fn current(&self) -> Route {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Route> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
