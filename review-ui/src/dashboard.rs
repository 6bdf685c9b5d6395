//! Dashboard layout
//!
//! Chat on the left, analysis on the right, block toast floating on top.
//! Every panel reads the shared `ReviewSession` from context and subscribes
//! to the store on its own; none of them talk to each other directly.

mod analysis;
mod diagnostics;
mod toast;

use dioxus::prelude::*;

pub use analysis::AnalysisPanel;
pub use diagnostics::DiagnosticsPanel;
pub use toast::BlockToast;

use crate::components::ChatPanel;
use crate::state::use_dashboard_provider;

#[component]
pub fn Dashboard() -> Element {
    use_dashboard_provider();

    rsx! {
        div {
            class: "dashboard",
            style: "display: flex; flex-direction: column; height: 100vh; gap: 1rem; padding: 1rem; box-sizing: border-box;",

            header {
                style: "display: flex; align-items: center; gap: 0.5rem; flex-shrink: 0;",
                span { style: "font-size: 1.5rem;", "🛡️" }
                h1 { style: "margin: 0; font-size: 1.25rem; font-weight: 700;", "Prompt Review" }
                span {
                    style: "color: var(--text-secondary, #9ca3af); font-size: 0.875rem;",
                    "Safety and quality analysis for your prompts"
                }
            }

            div {
                style: "flex: 1; min-height: 0; display: grid; grid-template-columns: minmax(0, 3fr) minmax(0, 2fr); gap: 1rem;",

                ChatPanel {}

                div {
                    style: "display: flex; flex-direction: column; gap: 1rem; min-height: 0;",
                    AnalysisPanel {}
                    DiagnosticsPanel {}
                }
            }

            BlockToast {}
        }
    }
}
