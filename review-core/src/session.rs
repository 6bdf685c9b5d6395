use std::rc::Rc;

use crate::bridge::RewriteBridge;
use crate::chat::ChatInputController;
use crate::client::AnalysisService;
use crate::config::ReviewConfig;
use crate::gate::RecommendationGate;
use crate::presenter::ResultPresenter;
use crate::store::AnalysisStore;

/// All collaborators of one dashboard, wired through constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    pub store: AnalysisStore,
    pub bridge: RewriteBridge,
    pub chat: ChatInputController,
    pub presenter: ResultPresenter,
    pub gate: RecommendationGate,
}

impl ReviewSession {
    pub fn new(service: Rc<dyn AnalysisService>, config: ReviewConfig) -> Self {
        let store = AnalysisStore::new(service);
        let bridge = RewriteBridge::new();
        Self {
            chat: ChatInputController::new(store.clone(), config),
            presenter: ResultPresenter::new(bridge.clone()),
            gate: RecommendationGate,
            store,
            bridge,
        }
    }
}
