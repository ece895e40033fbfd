//! Category Report Grid
//!
//! Two header rows: category groups, then their waste columns.

use leptos::prelude::*;

use crate::pivot::{format_volume, CategoryPivot, CategoryReport, NO_DATA};

#[component]
pub fn DataGrid(#[prop(into)] report: Signal<Option<CategoryReport>>) -> impl IntoView {
    let pivot = Memo::new(move |_| report.with(|r| r.as_ref().map(CategoryPivot::build).unwrap_or_default()));

    move || {
        let pivot = pivot.get();
        if pivot.is_empty() {
            return view! { <p class="no-data">{NO_DATA}</p> }.into_any();
        }

        let group_headers = pivot
            .groups
            .iter()
            .map(|group| {
                view! {
                    <th colspan=group.columns.len().to_string() style:background-color=group.color>
                        {group.name.clone()}
                    </th>
                }
            })
            .collect_view();

        let column_headers = pivot
            .groups
            .iter()
            .flat_map(|group| group.columns.iter().map(move |column| (group.color, column)))
            .map(|(color, column)| {
                view! {
                    <th class:total-cell=column.is_total style:background-color=color>
                        {column.label.clone()}
                    </th>
                }
            })
            .collect_view();

        let rows = pivot
            .rows
            .into_iter()
            .map(|row| {
                let cells = row
                    .cells
                    .into_iter()
                    .map(|cell| {
                        view! {
                            <td class:total-cell=cell.is_total style:background-color=cell.color>
                                {format_volume(cell.value)}
                            </td>
                        }
                    })
                    .collect_view();
                view! {
                    <tr>
                        <td class="company-cell">{row.company}</td>
                        {cells}
                    </tr>
                }
            })
            .collect_view();

        view! {
            <div class="grid-scroll">
                <table class="data-grid">
                    <thead>
                        <tr>
                            <th rowspan="2" class="company-cell">"Компания"</th>
                            {group_headers}
                        </tr>
                        <tr>{column_headers}</tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </div>
        }
        .into_any()
    }
}
