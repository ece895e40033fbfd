//! Final-Processing Report Grid
//!
//! One row per (company, waste, operation); the company cell spans its rows.

use leptos::prelude::*;

use crate::pivot::{format_volume, OperationsPivot, OperationsReport, NO_DATA};

#[component]
pub fn OperationsGrid(#[prop(into)] report: Signal<Option<OperationsReport>>) -> impl IntoView {
    let pivot = Memo::new(move |_| report.with(|r| r.as_ref().map(OperationsPivot::build).unwrap_or_default()));

    move || {
        let pivot = pivot.get();
        if pivot.is_empty() {
            return view! { <p class="no-data">{NO_DATA}</p> }.into_any();
        }

        let legend = pivot
            .legend
            .iter()
            .map(|(operation, color)| {
                view! {
                    <span class="legend-item">
                        <span class="legend-swatch" style:background-color=*color></span>
                        {operation.clone()}
                    </span>
                }
            })
            .collect_view();

        let body = pivot
            .companies
            .into_iter()
            .flat_map(|group| {
                let span = group.rows.len();
                let company = group.company;
                group.rows.into_iter().enumerate().map(move |(index, row)| {
                    let company_cell = (index == 0).then(|| {
                        view! { <td rowspan=span.to_string() class="company-cell">{company.clone()}</td> }
                    });
                    view! {
                        <tr>
                            {company_cell}
                            <td>{row.waste}</td>
                            <td class="number-cell">{format_volume(row.quantity)}</td>
                            <td style:background-color=row.color>{row.operation}</td>
                        </tr>
                    }
                })
            })
            .collect_view();

        view! {
            <div class="legend">{legend}</div>
            <div class="grid-scroll">
                <table class="data-grid operations-grid">
                    <thead>
                        <tr>
                            <th>"Компания"</th>
                            <th>"Отход"</th>
                            <th>"Количество"</th>
                            <th>"Операция"</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                    <tfoot>
                        <tr>
                            <td colspan="2" class="total-cell">"Общий итог"</td>
                            <td class="number-cell total-cell">{format_volume(pivot.grand_total)}</td>
                            <td></td>
                        </tr>
                    </tfoot>
                </table>
            </div>
        }
        .into_any()
    }
}
