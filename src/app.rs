//! Waste Dashboard App
//!
//! Router shell: every location goes through the access table, which picks
//! the login screen, a redirect, or a role page inside the sidebar layout.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

use crate::access::{resolve, Page, Resolution, HOME_PATH, LOGIN_PATH};
use crate::components::Sidebar;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::pages::*;
use crate::storage::BrowserSessionStorage;
use crate::store::{store_is_authenticated, AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let store = AppStore::new(AppState::restore(&BrowserSessionStorage));
    provide_context(store);
    provide_context(AppContext::new(&config, store));
    tracing::info!(api = %config.api_base_url, "app started");

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path=LOGIN_PATH /> }>
                <Route path=path!("/") view=Shell />
                <Route path=path!("/*any") view=Shell />
            </Routes>
        </Router>
    }
}

/// Access decision for the current location, re-evaluated on navigation and sign-in/out
#[component]
fn Shell() -> impl IntoView {
    let store = expect_context::<AppStore>();
    let location = use_location();
    let resolution = Memo::new(move |_| {
        let path = location.pathname.get();
        store.session().with(|session| resolve(session, &path))
    });
    let authenticated = Memo::new(move |_| store_is_authenticated(&store));

    view! {
        <Show
            when=move || authenticated.get()
            fallback=move || match resolution.get() {
                Resolution::Login => view! { <LoginPage /> }.into_any(),
                _ => view! { <Redirect path=LOGIN_PATH /> }.into_any(),
            }
        >
            <div class="app-layout" class:sidebar-collapsed=move || !store.sidebar_open().get()>
                <Sidebar />
                <main class="main-content">
                    {move || match resolution.get() {
                        Resolution::Page(page) => render_page(page),
                        Resolution::RedirectToLogin => view! { <Redirect path=LOGIN_PATH /> }.into_any(),
                        Resolution::Login | Resolution::RedirectHome => view! { <Redirect path=HOME_PATH /> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}

fn render_page(page: Page) -> AnyView {
    match page {
        Page::AdminDashboard => view! { <AdminDashboard /> }.into_any(),
        Page::AdminAddRecord => view! { <AdminAddRecord /> }.into_any(),
        Page::WasteCategories => view! { <WasteCategoriesPage /> }.into_any(),
        Page::FinalWasteTypes => view! { <FinalWasteTypesPage /> }.into_any(),
        Page::Wastes => view! { <WastesPage /> }.into_any(),
        Page::WasteRecords => view! { <WasteRecordsPage /> }.into_any(),
        Page::FinalProcessingReports => view! { <FinalProcessingPage /> }.into_any(),
        Page::Users => view! { <UsersPage /> }.into_any(),
        Page::ModeratorDashboard => view! { <ModeratorDashboard /> }.into_any(),
        Page::AddCompany => view! { <AddCompanyPage /> }.into_any(),
        Page::ModeratorAddRecord => view! { <ModeratorAddRecord /> }.into_any(),
        Page::CompanyDashboard => view! { <CompanyDashboard /> }.into_any(),
        Page::CompanyReports => view! { <CompanyReports /> }.into_any(),
    }
}
