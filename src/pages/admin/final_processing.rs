//! Admin: Final-Processing Reports (table 5)

use leptos::prelude::*;

use crate::components::{Alert, DateRange, OperationsGrid};
use crate::hooks::{use_final_processing_report, use_moderators};

#[component]
pub fn FinalProcessingPage() -> impl IntoView {
    let report = use_final_processing_report();
    let moderators = use_moderators();
    let filters = report.filters;

    view! {
        <div class="page">
            <h1 class="page-title">"Отчет по конечной переработке"</h1>
            <div class="panel filters">
                <DateRange filters=filters />
                <label class="field">
                    <span>"Модератор"</span>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| f.set_moderator(value));
                    }>
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
                <div class="filter-actions">
                    <button class="btn btn-primary" disabled=move || !report.is_ready() on:click=move |_| report.search()>
                        "Сформировать"
                    </button>
                    <button
                        class="btn btn-success"
                        disabled=move || !report.is_ready() || report.exporting.get()
                        on:click=move |_| report.export()
                    >
                        {move || if report.exporting.get() { "Экспорт..." } else { "Экспорт в Excel" }}
                    </button>
                    <button class="btn btn-danger" on:click=move |_| report.clear()>"Очистить фильтры"</button>
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
                <OperationsGrid report=Signal::derive(move || report.state.with(|s| s.data.clone())) />
            </Show>
        </div>
    }
}
