use leptos::*;

/// Summary tile with a label and a derived value.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] hint: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg px-4 py-5 sm:p-6">
            <dt class="text-sm font-medium text-fg-muted truncate">{label}</dt>
            <dd class="mt-1 text-2xl font-semibold text-fg">{move || value.get()}</dd>
            {hint.map(|hint| view! { <p class="mt-1 text-xs text-fg-muted">{move || hint.get()}</p> })}
        </div>
    }
}

#[component]
pub fn StatGrid(children: Children) -> impl IntoView {
    view! { <dl class="grid grid-cols-2 gap-4 md:grid-cols-4 mb-6">{children()}</dl> }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn stat_card_renders_label_value_and_hint() {
        let html = render_to_string(move || {
            view! {
                <StatGrid>
                    <StatCard
                        label="Revenue"
                        value=Signal::derive(|| "1,200.00".to_string())
                        hint=Signal::derive(|| "excluding cancelled".to_string())
                    />
                </StatGrid>
            }
        });
        assert!(html.contains("Revenue"));
        assert!(html.contains("1,200.00"));
        assert!(html.contains("excluding cancelled"));
    }
}
