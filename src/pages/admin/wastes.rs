//! Admin: Wastes

use leptos::prelude::*;

use crate::components::{Alert, ConfirmDialog, Modal};
use crate::hooks::{use_waste_categories, use_wastes};
use crate::models::{Waste, WastePayload};
use crate::slug::slugify;

#[derive(Debug, Clone, Default, PartialEq)]
struct Draft {
    name: String,
    slug: String,
    category_id: String,
    final_waste_type_id: String,
}

impl Draft {
    fn from_waste(waste: &Waste) -> Self {
        Self {
            name: waste.name.clone(),
            slug: waste.slug.clone(),
            category_id: waste.effective_category_id().map(|id| id.to_string()).unwrap_or_default(),
            final_waste_type_id: waste.effective_final_type_id().map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    fn payload(&self) -> Result<WastePayload, &'static str> {
        let name = self.name.trim();
        let category_id = self.category_id.parse::<u64>().ok();
        let (false, Some(category_id)) = (name.is_empty(), category_id) else {
            return Err("Заполните название и категорию");
        };
        Ok(WastePayload {
            name: name.to_string(),
            slug: self.slug.clone(),
            category_id,
            final_waste_type_id: self.final_waste_type_id.parse::<u64>().ok(),
        })
    }
}

#[component]
pub fn WastesPage() -> impl IntoView {
    let wastes = use_wastes();
    let categories = use_waste_categories();

    let (editing, set_editing) = signal::<Option<Option<u64>>>(None);
    let draft = RwSignal::new(Draft::default());
    let deleting = RwSignal::new(None::<u64>);
    let close = move || set_editing.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get_untracked() else { return };
        match draft.with_untracked(Draft::payload) {
            Ok(payload) => wastes.save(id, payload, close),
            Err(message) => wastes.state.update(|s| s.fail(message)),
        }
    };

    let error = Signal::derive(move || {
        wastes
            .state
            .with(|s| s.error.clone())
            .or_else(|| wastes.final_types.with(|s| s.error.clone()))
            .or_else(|| categories.state.with(|s| s.error.clone()))
    });

    view! {
        <div class="page">
            <div class="page-header">
                <h1 class="page-title">"Отходы"</h1>
                <div class="page-actions">
                    <button
                        class="btn"
                        on:click=move |_| {
                            wastes.refresh(true);
                            categories.refresh(true);
                        }
                    >
                        "Обновить"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            draft.set(Draft::default());
                            set_editing.set(Some(None));
                        }
                    >
                        "Добавить отход"
                    </button>
                </div>
            </div>

            <Alert
                message=error
                on_close=Callback::new(move |_| {
                    wastes.state.update(|s| s.clear_error());
                    wastes.final_types.update(|s| s.clear_error());
                    categories.state.update(|s| s.clear_error());
                })
            />
            <Show when=move || wastes.state.with(|s| s.loading)>
                <div class="spinner">"Загрузка..."</div>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Название"</th>
                        <th>"Slug"</th>
                        <th>"Категория"</th>
                        <th>"Тип таб.5"</th>
                        <th>"Действия"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        wastes
                            .state
                            .with(|s| s.data.clone())
                            .into_iter()
                            .map(|waste| {
                                let id = waste.id;
                                let prefill = Draft::from_waste(&waste);
                                let category = waste.category_name().to_string();
                                let final_type = waste.final_type_name().to_string();
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{waste.name}</td>
                                        <td>{waste.slug}</td>
                                        <td>{category}</td>
                                        <td>{final_type}</td>
                                        <td class="row-actions">
                                            <button
                                                class="btn btn-small"
                                                on:click=move |_| {
                                                    draft.set(prefill.clone());
                                                    set_editing.set(Some(Some(id)));
                                                }
                                            >
                                                "Изменить"
                                            </button>
                                            <button class="btn btn-small btn-danger" on:click=move |_| deleting.set(Some(id))>
                                                "Удалить"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <Modal
                open=Signal::derive(move || editing.get().is_some())
                title=Signal::derive(move || {
                    if matches!(editing.get(), Some(Some(_))) { "Редактировать отход" } else { "Новый отход" }.to_string()
                })
                on_close=Callback::new(move |_| close())
            >
                <form class="form" on:submit=save>
                    <label class="field">
                        <span>"Название *"</span>
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| {
                                    d.slug = slugify(&value);
                                    d.name = value;
                                });
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Slug"</span>
                        <input type="text" readonly=true prop:value=move || draft.with(|d| d.slug.clone()) />
                    </label>
                    <label class="field">
                        <span>"Категория *"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.category_id = value);
                        }>
                            <option value="">"Выберите категорию"</option>
                            {move || {
                                let selected = draft.with(|d| d.category_id.clone());
                                categories
                                    .state
                                    .with(|s| s.data.clone())
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
                        <span>"Тип таб.5"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.final_waste_type_id = value);
                        }>
                            <option value="">"Не указан"</option>
                            {move || {
                                let selected = draft.with(|d| d.final_waste_type_id.clone());
                                wastes
                                    .final_types
                                    .with(|s| s.data.clone())
                                    .into_iter()
                                    .map(|t| {
                                        let id = t.id.to_string();
                                        let is_selected = id == selected;
                                        view! { <option value=id selected=is_selected>{t.final_name}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                    <div class="modal-actions">
                        <button type="button" class="btn" on:click=move |_| close()>"Отмена"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || wastes.state.with(|s| s.loading)>
                            "Сохранить"
                        </button>
                    </div>
                </form>
            </Modal>

            <ConfirmDialog
                pending=deleting
                message="Вы уверены, что хотите удалить этот отход?"
                on_confirm=Callback::new(move |id: u64| wastes.delete(id))
            />
        </div>
    }
}
