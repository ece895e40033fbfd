//! Report Period Inputs

use leptos::prelude::*;

use crate::filters::ReportFilters;

/// Start/end date pickers bound to the report filters
#[component]
pub fn DateRange(filters: RwSignal<ReportFilters>) -> impl IntoView {
    view! {
        <label class="field">
            <span>"Дата начала"</span>
            <input
                type="date"
                prop:value=move || filters.with(|f| f.start_date.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filters.update(|f| f.start_date = value);
                }
            />
        </label>
        <label class="field">
            <span>"Дата окончания"</span>
            <input
                type="date"
                prop:value=move || filters.with(|f| f.end_date.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filters.update(|f| f.end_date = value);
                }
            />
        </label>
    }
}
