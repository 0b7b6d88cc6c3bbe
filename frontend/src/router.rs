use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::toast::use_toasts,
    config,
    pages::{
        attendance::AttendancePage,
        employees::EmployeesPage,
        home::{HomePage, NotFoundPage, SignedOutPage},
        inventory::InventoryPage,
        kss::KssPage,
        sales::SalesPage,
    },
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/employees",
    "/attendance",
    "/kss",
    "/inventory",
    "/sales",
    "/login",
];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    use_toasts();
    let sign_in = config::current().sign_in_url;
    view! {
        <Title text="Back-office" />
        <Router>
            <Routes>
                <Route path="/" view=HomePage />
                <Route path="/employees" view=EmployeesPage />
                <Route path="/attendance" view=AttendancePage />
                <Route path="/kss" view=KssPage />
                <Route path="/inventory" view=InventoryPage />
                <Route path="/sales" view=SalesPage />
                <Route path=sign_in view=SignedOutPage />
                <Route path="/*any" view=NotFoundPage />
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layout::NAV_LINKS;
    use crate::pages::home::SECTIONS;
    use std::collections::HashSet;

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn every_navigation_link_is_routed() {
        for (href, _) in NAV_LINKS {
            assert!(ROUTE_PATHS.contains(&href), "nav link without route: {}", href);
        }
        for (href, _, _) in SECTIONS {
            assert!(ROUTE_PATHS.contains(&href), "home link without route: {}", href);
        }
    }

    #[test]
    fn default_sign_in_url_is_routed() {
        assert!(ROUTE_PATHS.contains(&config::DEFAULT_SIGN_IN_URL));
    }
}
