use dioxus::prelude::*;
use review_core::presenter::{HighlightLine, LogLine};
use review_core::{PanelView, Report, RewriteFeedback, RewriteMode};

use crate::state::{use_dashboard, use_request_state};

#[component]
pub fn AnalysisPanel() -> Element {
    let session = use_dashboard().session;
    let state = use_request_state(session.store.clone());
    let mut feedback = use_signal(|| None::<RewriteFeedback>);

    // Feedback belongs to the result it was produced for
    use_effect(move || {
        let _ = state.read();
        feedback.set(None);
    });

    let presenter = session.presenter.clone();
    let apply_rewrite = use_callback(move |mode: RewriteMode| {
        let current = state.read().clone();
        let outcome = presenter.apply_rewrite(&current, mode);
        if !outcome.is_applied() {
            dioxus_logger::tracing::warn!("Rewrite not applied: {}", outcome.message());
        }
        feedback.set(Some(outcome));
    });

    let view = session.presenter.view(&state.read());

    rsx! {
        div {
            class: "analysis-panel",
            style: "display: flex; flex-direction: column; gap: 1rem; padding: 1rem; background: var(--window-bg, #1f2937); border-radius: var(--radius-md, 8px); overflow-y: auto;",

            h2 {
                style: "margin: 0; font-size: 1rem; font-weight: 600;",
                "🔍 Analysis"
            }

            {match view {
                PanelView::Empty => rsx! {
                    div {
                        style: "color: var(--text-muted, #64748b); text-align: center; padding: 2rem 0;",
                        "Submit a prompt to see its analysis"
                    }
                },
                PanelView::Loading => rsx! {
                    div {
                        style: "color: var(--text-secondary, #9ca3af); text-align: center; padding: 2rem 0;",
                        "◐ Analyzing prompt..."
                    }
                },
                PanelView::Failed { message } => rsx! {
                    div {
                        style: "padding: 0.75rem; background: rgba(239, 68, 68, 0.2); color: #fca5a5; border-radius: var(--radius-sm, 4px);",
                        "❌ {message}"
                    }
                },
                PanelView::Report(report) => rsx! {
                    ReportView { report, on_rewrite: apply_rewrite }
                },
            }}

            if let Some(outcome) = feedback() {
                div {
                    style: if outcome.is_applied() {
                        "font-size: 0.8rem; color: #6ee7b7;"
                    } else {
                        "font-size: 0.8rem; color: #fcd34d;"
                    },
                    "{outcome.message()}"
                }
            }
        }
    }
}

#[component]
fn ReportView(report: Report, on_rewrite: Callback<RewriteMode>) -> Element {
    let style = report.style;
    let card_style = format!(
        "display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem; background: {}; border-radius: var(--radius-md, 8px);",
        style.tone.background()
    );
    let score_style = format!(
        "font-size: 1.5rem; font-weight: 700; color: {};",
        report.band.tone().color()
    );
    let stars = stars(report.stars);

    rsx! {
        div {
            style: "{card_style}",
            span { style: "font-size: 1.75rem;", "{style.icon}" }
            div {
                div {
                    style: "font-weight: 700; color: {style.tone.color()};",
                    "{style.label}"
                }
                div {
                    style: "font-size: 0.8rem; color: var(--text-secondary, #9ca3af);",
                    "{style.summary}"
                }
            }
        }

        div {
            style: "display: flex; align-items: baseline; gap: 0.5rem;",
            span { style: "{score_style}", "{report.score}" }
            span { style: "color: var(--text-secondary, #9ca3af);", "/ 100" }
            span { style: "margin-left: auto; color: #fbbf24;", "{stars}" }
        }

        Section { title: "COSTAR",
            div {
                style: "display: grid; grid-template-columns: auto 1fr; gap: 0.25rem 0.75rem; font-size: 0.85rem;",
                for (key, value) in report.costar.iter() {
                    span {
                        style: "color: var(--text-secondary, #9ca3af);",
                        "{key.label()}"
                    }
                    span { "{value}" }
                }
            }
        }

        if !report.highlights.is_empty() {
            Section { title: "Highlights",
                for (index, line) in report.highlights.iter().enumerate() {
                    HighlightRow { key: "{index}", line: line.clone() }
                }
            }
        }

        if !report.log.is_empty() {
            Section { title: "Safety log",
                for (index, line) in report.log.iter().enumerate() {
                    LogRow { key: "{index}", line: line.clone() }
                }
            }
        }

        if !report.rewrite.trim().is_empty() {
            Section { title: "Suggested rewrite",
                div {
                    style: "padding: 0.625rem; background: var(--input-bg, #111827); border: 1px solid var(--border-color, #374151); border-radius: var(--radius-sm, 4px); font-size: 0.875rem; white-space: pre-wrap;",
                    "{report.rewrite}"
                }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 0.375rem; margin-top: 0.5rem;",
                    for mode in RewriteMode::ALL {
                        button {
                            key: "{mode.label()}",
                            style: if mode == RewriteMode::Normal {
                                "padding: 0.375rem 0.75rem; background: var(--accent-bg, #3b82f6); color: white; border: none; border-radius: var(--radius-sm, 4px); cursor: pointer; font-size: 0.8rem;"
                            } else {
                                "padding: 0.375rem 0.75rem; background: transparent; color: var(--text-primary, white); border: 1px solid var(--border-color, #374151); border-radius: var(--radius-sm, 4px); cursor: pointer; font-size: 0.8rem;"
                            },
                            onclick: move |_| on_rewrite.call(mode),
                            "{mode.label()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Section(title: &'static str, children: Element) -> Element {
    rsx! {
        div {
            div {
                style: "font-size: 0.75rem; font-weight: 600; text-transform: uppercase; letter-spacing: 0.05em; color: var(--text-secondary, #9ca3af); margin-bottom: 0.375rem;",
                "{title}"
            }
            {children}
        }
    }
}

#[component]
fn HighlightRow(line: HighlightLine) -> Element {
    rsx! {
        div {
            style: "display: flex; gap: 0.5rem; font-size: 0.85rem; padding: 0.125rem 0;",
            span {
                style: "padding: 0 0.375rem; background: rgba(245, 158, 11, 0.2); color: #fcd34d; border-radius: var(--radius-sm, 4px);",
                "{line.kind}"
            }
            if let Some(detail) = line.detail {
                span { "{detail}" }
            }
        }
    }
}

#[component]
fn LogRow(line: LogLine) -> Element {
    let marker = line.marker.unwrap_or_else(|| "•".to_string());

    rsx! {
        div {
            style: "display: flex; gap: 0.5rem; font-size: 0.85rem; padding: 0.125rem 0;",
            span { style: "width: 1.25rem; flex-shrink: 0;", "{marker}" }
            span { "{line.text}" }
        }
    }
}

fn stars(filled: u8) -> String {
    let filled = usize::from(filled.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_fill_from_left() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
