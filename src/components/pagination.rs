//! Pagination Bar Component

use leptos::prelude::*;

use crate::config::PAGE_SIZE_CHOICES;

/// Prev/next pager with a rows-per-page selector. Pages are 1-based here.
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] last_page: Signal<u32>,
    #[prop(into)] per_page: Signal<u32>,
    #[prop(into)] total: Signal<u64>,
    #[prop(into)] on_page: Callback<u32>,
    #[prop(into)] on_per_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <label class="pagination-size">
                "Строк на странице: "
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_per_page.run(size);
                    }
                }>
                    {PAGE_SIZE_CHOICES
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option value=size.to_string() selected=move || per_page.get() == size>
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <span class="pagination-info">
                {move || format!("Страница {} из {} (всего {})", page.get(), last_page.get().max(1), total.get())}
            </span>
            <button
                class="btn"
                disabled=move || page.get() <= 1
                on:click=move |_| on_page.run(page.get_untracked().saturating_sub(1).max(1))
            >
                "‹"
            </button>
            <button
                class="btn"
                disabled=move || page.get() >= last_page.get()
                on:click=move |_| on_page.run(page.get_untracked() + 1)
            >
                "›"
            </button>
        </div>
    }
}
