use leptos::*;

use crate::components::toast::ToastHost;

pub const NAV_LINKS: [(&str, &str); 6] = [
    ("/", "Home"),
    ("/employees", "Employees"),
    ("/attendance", "Attendance"),
    ("/kss", "Training"),
    ("/inventory", "Inventory"),
    ("/sales", "Sales"),
];

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let (menu_open, set_menu_open) = create_signal(false);
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">"Back-office"</a>
                    <nav class="hidden lg:flex space-x-4">
                        {NAV_LINKS
                            .iter()
                            .map(|(href, label)| view! { <a href=*href class=NAV_LINK_CLASS>{*label}</a> })
                            .collect_view()}
                    </nav>
                    <button
                        type="button"
                        class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                        on:click=toggle_menu
                        aria-expanded=move || menu_open.get()
                        aria-controls="mobile-nav"
                    >
                        <span class="sr-only">
                            {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                        </span>
                        <svg class="h-6 w-6" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"/>
                        </svg>
                    </button>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            {NAV_LINKS
                                .iter()
                                .map(|(href, label)| {
                                    view! {
                                        <a
                                            href=*href
                                            class=format!("block {}", NAV_LINK_CLASS)
                                            on:click=move |_| set_menu_open.set(false)
                                        >
                                            {*label}
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
            <ToastHost/>
        </div>
    }
}

/// Page title row with an optional action slot on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-2 md:flex-row md:items-end md:justify-between mb-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">{title}</h1>
                {subtitle.map(|text| view! { <p class="mt-1 text-sm text-fg-muted">{text}</p> })}
            </div>
            <div class="flex gap-2">{children.map(|children| children())}</div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_renders_every_section_link() {
        let html = render_to_string(move || view! { <Header /> });
        for (href, label) in NAV_LINKS {
            assert!(html.contains(&format!("href=\"{}\"", href)));
            assert!(html.contains(label));
        }
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || view! { <Layout><div>"child"</div></Layout> });
        assert!(html.contains("child"));
        assert!(html.contains("Back-office"));
    }

    #[test]
    fn page_header_renders_subtitle_and_actions() {
        let html = render_to_string(move || {
            view! {
                <PageHeader title="Orders" subtitle="All sales orders">
                    <button>"New order"</button>
                </PageHeader>
            }
        });
        assert!(html.contains("Orders"));
        assert!(html.contains("All sales orders"));
        assert!(html.contains("New order"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error" />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("bg-status-error-bg"));
    }
}
