use crate::api::ApiError;
use leptos::*;

/// Inline failure banner. Validation errors list each field message and
/// `on_retry`, when given, re-runs the failed load.
#[component]
pub fn InlineErrorMessage(
    error: Signal<Option<ApiError>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=move || ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="flex items-start justify-between gap-3">
                    <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                    {on_retry.map(|retry| view! {
                        <button
                            type="button"
                            class="text-sm underline"
                            on:click=move |_| retry.call(())
                        >
                            {"Retry"}
                        </button>
                    })}
                </div>
                {move || error.get().map(|e| {
                    let messages = e.validation_messages();
                    if e.code == "VALIDATION_ERROR" && !messages.is_empty() {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {messages.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                            </ul>
                        }.into_view()
                    } else if e.code != "UNKNOWN" && !e.code.is_empty() {
                        view! { <div class="text-xs opacity-75">{"Code: "}{e.code.clone()}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_validation_details() {
        let html = render_to_string(move || {
            let error = ApiError {
                error: "Validation failed: name: not_blank".into(),
                code: "VALIDATION_ERROR".into(),
                details: Some(json!({
                    "errors": ["name: not_blank", "email: email"]
                })),
            };
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("name: not_blank"));
        assert!(html.contains("email: email"));
    }

    #[test]
    fn inline_error_renders_code_and_retry() {
        let html = render_to_string(move || {
            let error = ApiError::request_failed("Request failed");
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} on_retry=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("Request failed"));
        assert!(html.contains("Code: REQUEST_FAILED"));
        assert!(html.contains("Retry"));
    }

    #[test]
    fn inline_error_is_empty_without_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(!html.contains("Retry"));
        assert!(!html.contains("Code:"));
    }
}
