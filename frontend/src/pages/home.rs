use leptos::*;

use crate::components::layout::Layout;

pub const SECTIONS: [(&str, &str, &str); 5] = [
    ("/employees", "Employees", "Staff directory and departments"),
    ("/attendance", "Attendance", "Monthly calendar, records and CSV export"),
    ("/kss", "Training", "KSS modules, lessons, quizzes and assignments"),
    ("/inventory", "Inventory", "Suppliers, components, products and import batches"),
    ("/sales", "Sales", "Customers, orders and invoices"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Layout>
            <div class="py-8">
                <h1 class="text-3xl font-extrabold text-fg">{"Back-office"}</h1>
                <p class="mt-2 text-fg-muted">{"HR, inventory and sales in one place."}</p>
                <div class="mt-6 grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                    {SECTIONS
                        .into_iter()
                        .map(|(href, title, blurb)| {
                            view! {
                                <a
                                    href=href
                                    class="block rounded-lg bg-surface-elevated p-5 shadow hover:bg-action-ghost-bg-hover"
                                >
                                    <h2 class="text-lg font-semibold text-fg">{title}</h2>
                                    <p class="mt-1 text-sm text-fg-muted">{blurb}</p>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </Layout>
    }
}

/// Landing spot after the idle watchdog clears the session.
#[component]
pub fn SignedOutPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-2xl font-semibold text-fg">{"You have been signed out"}</h1>
                <p class="mt-2 text-fg-muted">{"Your session ended after a period of inactivity."}</p>
                <a href="/" class="mt-4 inline-block text-action-primary-bg underline">{"Back to the start page"}</a>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Layout>
            <div class="py-12 text-center">
                <h1 class="text-2xl font-semibold text-fg">{"Page not found"}</h1>
                <a href="/" class="mt-4 inline-block text-action-primary-bg underline">{"Go home"}</a>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn home_links_every_section() {
        let html = render_to_string(|| view! { <HomePage /> });
        for (href, title, _) in SECTIONS {
            assert!(html.contains(&format!("href=\"{}\"", href)));
            assert!(html.contains(title));
        }
    }

    #[test]
    fn signed_out_page_links_home() {
        let html = render_to_string(|| view! { <SignedOutPage /> });
        assert!(html.contains("signed out"));
        assert!(html.contains("href=\"/\""));
    }
}
