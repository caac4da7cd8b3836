use std::sync::{Mutex, MutexGuard};

use crate::domain::{DemoSample, Navigation, Route, demo_sample, demo_samples};
use crate::use_cases::view::ViewContext;

// One-shot slot carrying the chosen sample from the picker to the results screen.
// Reading it empties it.
#[derive(Debug, Default)]
pub struct DemoHandoff {
    slot: Mutex<Option<DemoSample>>,
}

impl DemoHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stash(&self, sample: DemoSample) {
        *self.lock() = Some(sample);
    }

    pub fn take(&self) -> Option<DemoSample> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<DemoSample>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn samples() -> Vec<DemoSample> {
    demo_samples()
}

// Pick a sample and open the public results screen. Unknown ids change nothing.
pub fn select(ctx: &ViewContext, handoff: &DemoHandoff, id: &str) -> Option<Navigation> {
    let sample = demo_sample(id)?;
    tracing::debug!(id, "demo sample selected");
    handoff.stash(sample);
    Some(ctx.navigator().navigate(Route::DemoResults))
}

// Results screen: shows the stashed sample, or sends the visitor back to the landing page.
pub fn open_results(ctx: &ViewContext, handoff: &DemoHandoff) -> Option<DemoSample> {
    match handoff.take() {
        Some(sample) => Some(sample),
        None => {
            ctx.navigator().navigate(Route::Landing);
            None
        }
    }
}
