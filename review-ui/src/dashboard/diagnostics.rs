use dioxus::prelude::*;
use review_core::diagnostics::CheckStatus;
use review_core::{run_self_test, DiagnosticReport};

use crate::state::use_dashboard;

/// Collapsible self-test against the live service. Never touches the
/// dashboard's analysis state.
#[component]
pub fn DiagnosticsPanel() -> Element {
    let context = use_dashboard();
    let mut open = use_signal(|| false);
    let mut running = use_signal(|| false);
    let mut report = use_signal(|| None::<DiagnosticReport>);

    let run = use_callback(move |_| {
        if running() {
            return;
        }
        running.set(true);
        let service = context.service.clone();
        let bridge = context.session.bridge.clone();
        spawn(async move {
            let result = run_self_test(&*service, &bridge).await;
            if !result.passed() {
                dioxus_logger::tracing::warn!("Self-test failed:\n{}", result.render());
            }
            report.set(Some(result));
            running.set(false);
        });
    });

    rsx! {
        div {
            class: "diagnostics-panel",
            style: "padding: 0.75rem 1rem; background: var(--window-bg, #1f2937); border-radius: var(--radius-md, 8px);",

            div {
                style: "display: flex; align-items: center; justify-content: space-between;",
                button {
                    style: "background: transparent; border: none; color: var(--text-secondary, #9ca3af); cursor: pointer; font-size: 0.875rem; padding: 0;",
                    onclick: move |_| open.toggle(),
                    if open() { "▾ Diagnostics" } else { "▸ Diagnostics" }
                }
                if open() {
                    button {
                        style: "padding: 0.25rem 0.75rem; background: var(--accent-bg, #3b82f6); color: white; border: none; border-radius: var(--radius-sm, 4px); cursor: pointer; font-size: 0.8rem;",
                        disabled: running(),
                        onclick: move |_| run.call(()),
                        if running() { "Running..." } else { "Run self-test" }
                    }
                }
            }

            if open() {
                if let Some(report) = report() {
                    div {
                        style: "margin-top: 0.5rem; font-family: ui-monospace, monospace; font-size: 0.8rem; display: flex; flex-direction: column; gap: 0.25rem;",
                        for check in report.checks.iter() {
                            div {
                                key: "{check.name}",
                                style: if check.status == CheckStatus::Failed {
                                    "color: #fca5a5;"
                                } else {
                                    "color: var(--text-primary, white);"
                                },
                                "{check.line()}"
                            }
                        }
                        div {
                            style: "margin-top: 0.25rem; font-weight: 600;",
                            if report.passed() { "🎉 All checks passed" } else { "Self-test failed" }
                        }
                    }
                }
            }
        }
    }
}
