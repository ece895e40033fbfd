//! Pages
//!
//! One component per routed screen, grouped by the role that reaches it.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::{Alert, DataGrid};
use crate::filters::ReportScope;
use crate::hooks::{session_scope, ReportHook};
use crate::store::{use_app_store, AppStateStoreFields};

pub mod admin;
pub mod company;
pub mod login;
pub mod moderator;

pub use admin::*;
pub use company::*;
pub use login::LoginPage;
pub use moderator::*;

/// Delay before a successful form bounces back to the dashboard
pub(crate) const REDIRECT_DELAY_MS: u32 = 2_000;

/// Report scope of the signed-in user, or the message to show instead
pub(crate) fn signed_in_scope() -> Result<ReportScope, String> {
    use_app_store().session().with_untracked(session_scope).map_err(|err| err.to_string())
}

/// Id of the signed-in moderator
pub(crate) fn signed_in_moderator() -> Result<u64, String> {
    match signed_in_scope()? {
        ReportScope::Moderator { moderator_id } => Ok(moderator_id),
        _ => Err(WRONG_ROLE.to_string()),
    }
}

const WRONG_ROLE: &str = "Страница недоступна для текущей роли";

/// Arms a redirect to `path`; setting the returned signal fires it after `delay_ms`
pub(crate) fn use_delayed_redirect(path: &'static str, delay_ms: u32) -> WriteSignal<bool> {
    let navigate = use_navigate();
    let (armed, arm) = signal(false);
    Effect::new(move |_| {
        if armed.get() {
            let navigate = navigate.clone();
            Timeout::new(delay_ms, move || navigate(path, Default::default())).forget();
        }
    });
    arm
}

/// Placeholder for a report page whose session lacks the user block
#[component]
pub(crate) fn MissingSession(message: String) -> impl IntoView {
    view! {
        <div class="page">
            <div class="alert alert-error">{message}</div>
        </div>
    }
}

/// Error banner, spinner, and the category grid of a role-scoped report
#[component]
pub(crate) fn ReportResults(report: ReportHook) -> impl IntoView {
    view! {
        <Alert
            message=Signal::derive(move || report.state.with(|s| s.error.clone()))
            on_close=Callback::new(move |_| report.state.update(|s| s.clear_error()))
        />
        <Show
            when=move || report.state.with(|s| s.data.is_some())
            fallback=move || {
                view! {
                    <Show
                        when=move || report.state.with(|s| s.loading)
                        fallback=|| view! {
                            <p class="panel hint">"Выберите период и нажмите \"Показать\" для просмотра отчетов"</p>
                        }
                    >
                        <div class="spinner">"Загрузка..."</div>
                    </Show>
                }
            }
        >
            <h2 class="section-title">"Отчеты по отходам"</h2>
            <DataGrid report=Signal::derive(move || report.state.with(|s| s.data.clone())) />
        </Show>
    }
}
