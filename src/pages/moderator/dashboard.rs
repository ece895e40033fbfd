//! Moderator Dashboard
//!
//! Two tabs: the report over the moderator's own companies, and the list of
//! those companies.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::{CompanyPicker, DateRange};
use crate::filters::{today, ReportFilters, ReportScope};
use crate::hooks::{use_moderator_companies, use_month_report, CompaniesHook, ReportHook};
use crate::pages::{signed_in_moderator, MissingSession, ReportResults};
use crate::store::{store_user, use_app_store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Reports,
    Companies,
}

#[component]
pub fn ModeratorDashboard() -> impl IntoView {
    let moderator_id = match signed_in_moderator() {
        Ok(id) => id,
        Err(message) => return view! { <MissingSession message=message /> }.into_any(),
    };
    let store = use_app_store();
    let name = store_user(&store).map(|u| u.name).unwrap_or_else(|| "Модератор".into());

    let report = use_month_report(ReportScope::Moderator { moderator_id });
    let companies = use_moderator_companies(moderator_id);
    let (tab, set_tab) = signal(Tab::Reports);

    let tab_button = move |which: Tab, label: &'static str| {
        view! {
            <button
                class="tab"
                class:active=move || tab.get() == which
                on:click=move |_| set_tab.set(which)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="page">
            <h1 class="page-title">"Панель управления модератора: " {name}</h1>
            <div class="tabs">
                {tab_button(Tab::Reports, "Статистика и отчеты")}
                {tab_button(Tab::Companies, "Управление компаниями")}
            </div>
            <Show
                when=move || tab.get() == Tab::Reports
                fallback=move || view! { <CompaniesTab companies=companies /> }
            >
                <ReportsTab report=report companies=companies />
            </Show>
        </div>
    }
    .into_any()
}

#[component]
fn ReportsTab(report: ReportHook, companies: CompaniesHook) -> impl IntoView {
    let filters = report.filters;

    view! {
        <div class="cards">
            <div class="card card-blue">
                <h3>"Всего компаний"</h3>
                <div class="card-value">{move || companies.state.with(|s| s.data.len())}</div>
                <p>"Под управлением"</p>
            </div>
        </div>
        <div class="panel filters">
            <DateRange filters=filters />
            <CompanyPicker
                filters=filters
                companies=Signal::derive(move || companies.state.with(|s| s.data.clone()))
                loading=Signal::derive(move || companies.state.with(|s| s.loading))
            />
            <div class="filter-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || !report.is_ready() || report.state.with(|s| s.loading)
                    on:click=move |_| report.search()
                >
                    "Показать"
                </button>
                <button class="btn btn-success" disabled=move || report.exporting.get() on:click=move |_| report.export()>
                    {move || if report.exporting.get() { "Экспорт..." } else { "Экспорт" }}
                </button>
                <button class="btn btn-danger" on:click=move |_| report.reset(ReportFilters::current_month(today()))>
                    "Очистить"
                </button>
            </div>
        </div>
        <ReportResults report=report />
    }
}

#[component]
fn CompaniesTab(companies: CompaniesHook) -> impl IntoView {
    let navigate = use_navigate();
    let to_report = navigate.clone();

    view! {
        <div class="page-actions">
            <button class="btn btn-primary" on:click=move |_| navigate("/add-company", Default::default())>
                "Добавить новую компанию"
            </button>
            <button class="btn" on:click=move |_| to_report("/add-report", Default::default())>
                "Добавить запись"
            </button>
        </div>
        <Show
            when=move || !companies.state.with(|s| s.loading)
            fallback=|| view! { <div class="spinner">"Загрузка..."</div> }
        >
            <Show
                when=move || companies.state.with(|s| !s.data.is_empty())
                fallback=|| view! {
                    <p class="panel hint">
                        "У вас пока нет компаний. Нажмите \"Добавить новую компанию\" чтобы создать компанию."
                    </p>
                }
            >
                <div class="company-cards">
                    <For
                        each=move || companies.state.with(|s| s.data.clone())
                        key=|company| company.id
                        let:company
                    >
                        <div class="card company-card">
                            <h3>{company.name}</h3>
                            <p class="muted">"БИН: " {company.bin_company.unwrap_or_else(|| "Не указан".into())}</p>
                            <p>{company.description.unwrap_or_else(|| "Описание отсутствует".into())}</p>
                        </div>
                    </For>
                </div>
            </Show>
        </Show>
    }
}
