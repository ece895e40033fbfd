//! Waste Record Editor
//!
//! Header fields plus line items. Used by both "add record" pages and the
//! edit dialog of the record list.

use leptos::prelude::*;

use crate::components::{Alert, WasteItemRow};
use crate::models::{Company, Moderator, Waste};
use crate::record_form::{RecordForm, WasteRecordPayload};

/// # Arguments
/// * `moderators` - Some on the admin form (moderator is picked); None when it is fixed
/// * `on_moderator_change` - lets the page reload the company list
/// * `on_submit` - receives the validated payload
#[component]
pub fn RecordEditor(
    form: RwSignal<RecordForm>,
    #[prop(into)] companies: Signal<Vec<Company>>,
    #[prop(into)] wastes: Signal<Vec<Waste>>,
    #[prop(optional, into)] moderators: Option<Signal<Vec<Moderator>>>,
    #[prop(optional, into)] on_moderator_change: Option<Callback<String>>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] submit_label: String,
    #[prop(into)] on_submit: Callback<WasteRecordPayload>,
) -> impl IntoView {
    let needs_moderator = moderators.is_some();
    let (invalid, set_invalid) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.with_untracked(RecordForm::validate) {
            Ok(payload) => {
                set_invalid.set(None);
                on_submit.run(payload);
            }
            Err(err) => set_invalid.set(Some(err.user_message(""))),
        }
    };

    let moderator_select = moderators.map(|moderators| {
        view! {
            <label class="field">
                <span>"Модератор *"</span>
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| {
                        if f.moderator_id != value {
                            f.company_id.clear();
                        }
                        f.moderator_id = value.clone();
                    });
                    if let Some(changed) = on_moderator_change {
                        changed.run(value);
                    }
                }>
                    <option value="">"Выберите модератора"</option>
                    {move || {
                        let selected = form.with(|f| f.moderator_id.clone());
                        moderators
                            .get()
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
        }
    });

    view! {
        <form class="record-editor" on:submit=submit>
            <Alert message=invalid on_close=Callback::new(move |_| set_invalid.set(None)) />
            <div class="form-grid">
                {moderator_select}
                <label class="field">
                    <span>"Компания *"</span>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.company_id = value);
                    }>
                        <option value="">"Выберите компанию"</option>
                        {move || {
                            let selected = form.with(|f| f.company_id.clone());
                            companies
                                .get()
                                .into_iter()
                                .map(|c| {
                                    let id = c.id.to_string();
                                    let is_selected = id == selected;
                                    view! { <option value=id selected=is_selected>{c.name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <label class="field">
                    <span>"Дата *"</span>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.record_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.record_date = value);
                        }
                    />
                </label>
                <label class="field">
                    <span>"Номер машины"</span>
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.car_num.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.car_num = value);
                        }
                    />
                </label>
                <label class="field">
                    <span>"Имя водителя"</span>
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.driv_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.driv_name = value);
                        }
                    />
                </label>
            </div>

            <h3>"Отходы"</h3>
            <div class="waste-items">
                {move || {
                    let count = form.with(|f| f.items.len());
                    (0..count)
                        .map(|index| view! { <WasteItemRow index=index form=form wastes=wastes /> })
                        .collect_view()
                }}
            </div>
            <div class="form-actions">
                <button
                    type="button"
                    class="btn"
                    disabled=move || !form.with(|f| f.can_add_item(needs_moderator))
                    on:click=move |_| form.update(RecordForm::add_item)
                >
                    "+ Добавить отход"
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Сохранение...".to_string() } else { submit_label.clone() }}
                </button>
            </div>
        </form>
    }
}
