//! Company: Reports
//!
//! Current-month report, loaded as soon as the page opens.

use leptos::prelude::*;

use crate::hooks::use_month_report;
use crate::pages::{signed_in_scope, MissingSession, ReportResults};

#[component]
pub fn CompanyReports() -> impl IntoView {
    let scope = match signed_in_scope() {
        Ok(scope) => scope,
        Err(message) => return view! { <MissingSession message=message /> }.into_any(),
    };
    let report = use_month_report(scope);
    report.search();

    view! {
        <div class="page">
            <h1 class="page-title">"Отчеты за текущий месяц"</h1>
            <div class="page-actions">
                <button class="btn btn-success" disabled=move || report.exporting.get() on:click=move |_| report.export()>
                    {move || if report.exporting.get() { "Экспорт..." } else { "Экспорт" }}
                </button>
            </div>
            <ReportResults report=report />
        </div>
    }
    .into_any()
}
