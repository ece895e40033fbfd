//! Company Multi-Select

use leptos::prelude::*;

use crate::filters::ReportFilters;
use crate::models::Company;

/// Checkbox list writing into `filters.company_ids`
#[component]
pub fn CompanyPicker(
    filters: RwSignal<ReportFilters>,
    #[prop(into)] companies: Signal<Vec<Company>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let summary = move || {
        if loading.get() {
            return "Загрузка компаний...".to_string();
        }
        match filters.with(|f| f.company_ids.len()) {
            0 => "Компании".to_string(),
            n => format!("Выбрано компаний: {}", n),
        }
    };

    view! {
        <details class="field company-picker">
            <summary>{summary}</summary>
            <div class="company-picker-list">
                {move || {
                    companies
                        .get()
                        .into_iter()
                        .map(|company| {
                            let id = company.id.to_string();
                            let checked_id = id.clone();
                            view! {
                                <label class="checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || filters.with(|f| f.company_ids.contains(&checked_id))
                                        on:change=move |_| filters.update(|f| f.toggle_company(&id))
                                    />
                                    {company.name}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </details>
    }
}
