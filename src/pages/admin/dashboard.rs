//! Admin Dashboard
//!
//! Category report over chosen moderator and companies, with export.

use leptos::prelude::*;

use crate::components::{Alert, CompanyPicker, DataGrid, DateRange};
use crate::filters::{ReportFilters, ReportScope};
use crate::hooks::{use_companies, use_moderators, use_report};

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let report = use_report(ReportScope::Admin, ReportFilters::default());
    let moderators = use_moderators();
    let companies = use_companies(None);
    let filters = report.filters;

    let select_moderator = move |value: String| {
        filters.update(|f| f.set_moderator(value.clone()));
        companies.load((!value.is_empty()).then_some(value));
    };

    let clear = move |_| {
        report.reset(ReportFilters::default());
        companies.load(None);
    };

    view! {
        <div class="page">
            <h1 class="page-title">"Отчеты"</h1>
            <div class="panel filters">
                <DateRange filters=filters />
                <label class="field">
                    <span>"Модератор"</span>
                    <select on:change=move |ev| select_moderator(event_target_value(&ev))>
                        <option value="" selected=move || filters.with(|f| f.moderator_id.is_empty())>
                            "Все модераторы"
                        </option>
                        {move || {
                            let selected = filters.with(|f| f.moderator_id.clone());
                            moderators
                                .with(|s| s.data.clone())
                                .into_iter()
                                .map(|m| {
                                    let id = m.id.to_string();
                                    let is_selected = id == selected;
                                    view! { <option value=id selected=is_selected>{m.name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <CompanyPicker
                    filters=filters
                    companies=Signal::derive(move || companies.state.with(|s| s.data.clone()))
                    loading=Signal::derive(move || companies.state.with(|s| s.loading))
                />
                <label class="field">
                    <span>"Поиск по номеру машины"</span>
                    <input
                        type="text"
                        prop:value=move || filters.with(|f| f.car_num.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filters.update(|f| f.car_num = value);
                        }
                    />
                </label>
                <label class="field">
                    <span>"Поиск по имени водителя"</span>
                    <input
                        type="text"
                        prop:value=move || filters.with(|f| f.driv_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filters.update(|f| f.driv_name = value);
                        }
                    />
                </label>
                <div class="filter-actions">
                    <button class="btn btn-primary" disabled=move || !report.is_ready() on:click=move |_| report.search()>
                        "Поиск"
                    </button>
                    <button class="btn btn-success" disabled=move || report.exporting.get() on:click=move |_| report.export()>
                        {move || if report.exporting.get() { "Экспорт..." } else { "Экспорт" }}
                    </button>
                    <button class="btn btn-danger" on:click=clear>"Очистить"</button>
                </div>
            </div>

            <Alert
                message=Signal::derive(move || report.state.with(|s| s.error.clone()))
                on_close=Callback::new(move |_| report.state.update(|s| s.clear_error()))
            />
            <Show when=move || report.state.with(|s| s.loading)>
                <div class="spinner">"Загрузка..."</div>
            </Show>
            <Show when=move || report.state.with(|s| s.data.is_some())>
                <DataGrid report=Signal::derive(move || report.state.with(|s| s.data.clone())) />
            </Show>
        </div>
    }
}
