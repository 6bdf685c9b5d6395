use std::time::Duration;

use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use review_core::notifier::NoticeState;
use review_core::{BlockNotifier, NoticeChange};

use crate::state::{use_dashboard, use_request_state};

/// Floating warning shown for a blocked prompt. Hides itself after the
/// notifier timeout, on dismiss, or as soon as a newer state arrives.
#[component]
pub fn BlockToast() -> Element {
    let session = use_dashboard().session;
    let state = use_request_state(session.store.clone());
    let mut notifier = use_signal(BlockNotifier::new);
    let mut timer = use_signal(|| None::<Task>);

    use_effect(move || {
        let current = state.read().clone();
        let change = notifier.write().observe(&current, Utc::now());

        match change {
            NoticeChange::Shown {
                generation,
                timeout,
                ..
            } => {
                if let Some(task) = timer.write().take() {
                    task.cancel();
                }
                let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
                let task = spawn(async move {
                    TimeoutFuture::new(millis).await;
                    if notifier.write().expire(generation) {
                        dioxus_logger::tracing::debug!("Block notice {} expired", generation);
                    }
                });
                timer.set(Some(task));
            }
            NoticeChange::Hidden => {
                if let Some(task) = timer.write().take() {
                    task.cancel();
                }
            }
            NoticeChange::Unchanged => {}
        }
    });

    let dismiss = move |_| {
        notifier.write().dismiss();
        if let Some(task) = timer.write().take() {
            task.cancel();
        }
    };

    let (message, generation) = match notifier.read().state() {
        NoticeState::Visible {
            message,
            generation,
            ..
        } => (message.clone(), *generation),
        NoticeState::Hidden => return rsx! {},
    };
    let timeout = notifier.read().timeout();
    let remaining = notifier.read().remaining(Utc::now()).unwrap_or(Duration::ZERO);

    rsx! {
        style { {TOAST_STYLES} }

        div {
            class: "block-toast",
            role: "alert",

            div {
                style: "display: flex; align-items: flex-start; gap: 0.75rem;",
                span { style: "font-size: 1.25rem;", "🚫" }
                div {
                    style: "flex: 1; font-size: 0.875rem; line-height: 1.4;",
                    div { style: "font-weight: 700; margin-bottom: 0.25rem;", "Prompt Blocked" }
                    "{message}"
                }
                button {
                    class: "block-toast-close",
                    title: "Dismiss",
                    onclick: dismiss,
                    "✕"
                }
            }

            div {
                class: "block-toast-track",
                // a new generation remounts the bar so its animation restarts
                CountdownBar { key: "{generation}", remaining, timeout }
            }
        }
    }
}

#[component]
fn CountdownBar(remaining: Duration, timeout: Duration) -> Element {
    rsx! {
        div {
            class: "block-toast-progress",
            style: "{countdown_style(remaining, timeout)}",
        }
    }
}

/// Bar starts at the fraction of the window still left and drains over the
/// same remaining time.
fn countdown_style(remaining: Duration, timeout: Duration) -> String {
    let fraction = if timeout.is_zero() {
        0.0
    } else {
        (remaining.as_secs_f32() / timeout.as_secs_f32()).clamp(0.0, 1.0)
    };
    let start = fraction * 100.0;
    format!(
        "--countdown-start: {start:.1}%; width: {start:.1}%; animation-duration: {:.1}s;",
        remaining.as_secs_f32()
    )
}

const TOAST_STYLES: &str = r#"
.block-toast {
    position: fixed;
    top: 1rem;
    right: 1rem;
    z-index: 1000;
    width: min(380px, calc(100vw - 2rem));
    padding: 0.875rem 1rem 1rem;
    background: #7f1d1d;
    color: #fee2e2;
    border: 1px solid #ef4444;
    border-radius: var(--radius-md, 8px);
    box-shadow: 0 10px 25px rgba(0, 0, 0, 0.4);
    overflow: hidden;
}

.block-toast-close {
    background: transparent;
    border: none;
    color: inherit;
    cursor: pointer;
    font-size: 1rem;
}

.block-toast-track {
    position: absolute;
    left: 0;
    right: 0;
    bottom: 0;
    height: 3px;
}

.block-toast-progress {
    height: 100%;
    background: #ef4444;
    animation-name: block-toast-countdown;
    animation-timing-function: linear;
    animation-fill-mode: forwards;
}

@keyframes block-toast-countdown {
    from { width: var(--countdown-start, 100%); }
    to { width: 0%; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use review_core::RequestState;
    use shared_types::{AnalysisResult, Costar, Highlight, Verdict};
    use std::rc::Rc;

    fn blocked() -> RequestState {
        RequestState::Success(Rc::new(AnalysisResult {
            verdict: Verdict::Block,
            score: 15,
            costar: Costar::default(),
            highlights: vec![Highlight::new("harmful")],
            suggested_rewrite: String::new(),
            reasons: vec!["harmful: hack".into()],
        }))
    }

    #[test]
    fn test_countdown_drains_from_remaining_fraction() {
        assert_eq!(
            countdown_style(Duration::from_secs(6), Duration::from_secs(10)),
            "--countdown-start: 60.0%; width: 60.0%; animation-duration: 6.0s;"
        );
        assert_eq!(
            countdown_style(Duration::ZERO, Duration::ZERO),
            "--countdown-start: 0.0%; width: 0.0%; animation-duration: 0.0s;"
        );
    }

    #[test]
    fn test_second_block_restarts_full_countdown() {
        let mut notifier = BlockNotifier::new();
        let t0 = Utc::now();
        notifier.observe(&blocked(), t0);

        let t1 = t0 + TimeDelta::seconds(7);
        let first = notifier.remaining(t1).unwrap();
        assert_eq!(
            countdown_style(first, notifier.timeout()),
            "--countdown-start: 30.0%; width: 30.0%; animation-duration: 3.0s;"
        );

        notifier.observe(&blocked(), t1);
        let restarted = notifier.remaining(t1).unwrap();
        assert_eq!(
            countdown_style(restarted, notifier.timeout()),
            "--countdown-start: 100.0%; width: 100.0%; animation-duration: 10.0s;"
        );
    }
}
