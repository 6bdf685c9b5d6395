use std::rc::Rc;

use dioxus::prelude::*;
use review_core::{AnalysisService, AnalysisStore, RequestState, ReviewSession};

use crate::api::{browser_config, HttpAnalysisService};

/// Shared handles for the whole dashboard, provided once at the root.
#[derive(Clone)]
pub struct DashboardContext {
    pub session: ReviewSession,
    pub service: Rc<dyn AnalysisService>,
}

pub fn use_dashboard_provider() -> DashboardContext {
    use_context_provider(|| {
        let config = browser_config();
        dioxus_logger::tracing::info!("Analysis service at {:?}", config.api_base);
        let service: Rc<dyn AnalysisService> = Rc::new(HttpAnalysisService::new(config.clone()));
        DashboardContext {
            session: ReviewSession::new(service.clone(), config),
            service,
        }
    })
}

pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>()
}

/// Mirror the store into a signal for as long as the calling component is
/// mounted. The subscription is released with the hook.
pub fn use_request_state(store: AnalysisStore) -> Signal<RequestState> {
    let state = use_signal(|| store.current_state());

    use_hook(move || {
        let subscription = store.subscribe(move |next| {
            let mut state = state;
            state.set(next.clone());
        });
        Rc::new(subscription)
    });

    state
}
