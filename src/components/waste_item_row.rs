//! Waste Line Item Row

use leptos::prelude::*;

use crate::models::Waste;
use crate::record_form::{ItemDraft, RecordForm};

/// One editable line item of a record form, addressed by position
#[component]
pub fn WasteItemRow(
    index: usize,
    form: RwSignal<RecordForm>,
    #[prop(into)] wastes: Signal<Vec<Waste>>,
) -> impl IntoView {
    let field = move |read: fn(&ItemDraft) -> &String| {
        form.with(|f| f.items.get(index).map(|item| read(item).clone()).unwrap_or_default())
    };
    let write = move |apply: fn(&mut ItemDraft, String), value: String| {
        form.update(|f| {
            if let Some(item) = f.items.get_mut(index) {
                apply(item, value);
            }
        });
    };

    view! {
        <div class="waste-item-row">
            <span class="waste-item-number">{format!("#{}", index + 1)}</span>
            <label class="field grow">
                <span>"Отход"</span>
                <select on:change=move |ev| write(|item, v| item.waste_id = v, event_target_value(&ev))>
                    <option value="" selected=move || field(|i| &i.waste_id).is_empty()>"Выберите отход"</option>
                    {move || {
                        let selected = field(|i| &i.waste_id);
                        wastes
                            .get()
                            .into_iter()
                            .map(|waste| {
                                let id = waste.id.to_string();
                                let is_selected = id == selected;
                                view! {
                                    <option value=id selected=is_selected>{waste.name}</option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <label class="field">
                <span>"Объем (м³)"</span>
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || field(|i| &i.amount)
                    on:input=move |ev| write(|item, v| item.amount = v, event_target_value(&ev))
                />
            </label>
            <label class="field">
                <span>"Коэффициент"</span>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="по умолчанию"
                    prop:value=move || field(|i| &i.factor)
                    on:input=move |ev| write(|item, v| item.factor = v, event_target_value(&ev))
                />
            </label>
            <button
                type="button"
                class="btn btn-danger"
                title="Удалить отход"
                on:click=move |_| form.update(|f| f.remove_item(index))
            >
                "×"
            </button>
        </div>
    }
}
