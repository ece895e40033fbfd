//! Company Dashboard

use leptos::prelude::*;

use crate::components::DateRange;
use crate::filters::{today, ReportFilters};
use crate::hooks::use_month_report;
use crate::pages::{signed_in_scope, MissingSession, ReportResults};
use crate::pivot::ReportSummary;
use crate::store::{store_user, use_app_store};

/// `"3.75 м³"`; a missing or zero value reads as `"0 м³"`
fn volume_card(value: f64) -> String {
    if value == 0.0 {
        "0 м³".to_string()
    } else {
        format!("{} м³", value)
    }
}

#[component]
pub fn CompanyDashboard() -> impl IntoView {
    let scope = match signed_in_scope() {
        Ok(scope) => scope,
        Err(message) => return view! { <MissingSession message=message /> }.into_any(),
    };
    let store = use_app_store();
    let name = store_user(&store).map(|u| u.name).unwrap_or_else(|| "Компания".into());

    let report = use_month_report(scope);
    let summary = Memo::new(move |_| {
        report
            .state
            .with(|s| s.data.as_ref().and_then(|r| r.summary.clone()))
            .unwrap_or_default()
    });
    let card = move |read: fn(&ReportSummary) -> f64| move || volume_card(summary.with(read));

    view! {
        <div class="page">
            <h1 class="page-title">"Панель управления " {name}</h1>
            <div class="cards">
                <div class="card card-green">
                    <h3>"Текущий месяц"</h3>
                    <div class="card-value">{card(|s| s.current_month)}</div>
                    <p>"Объем отходов"</p>
                </div>
                <div class="card card-blue">
                    <h3>"Всего переработано"</h3>
                    <div class="card-value">{card(|s| s.total)}</div>
                    <p>"За все время"</p>
                </div>
                <div class="card card-orange">
                    <h3>"Всего отчетов"</h3>
                    <div class="card-value">{move || summary.with(|s| s.reports_count.round() as u64)}</div>
                    <p>"Количество записей"</p>
                </div>
            </div>

            <div class="panel filters">
                <DateRange filters=report.filters />
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
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_card() {
        assert_eq!(volume_card(0.0), "0 м³");
        assert_eq!(volume_card(3.75), "3.75 м³");
    }
}
