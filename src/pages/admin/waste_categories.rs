//! Admin: Waste Categories

use leptos::prelude::*;

use crate::components::{Alert, ConfirmDialog, Modal};
use crate::hooks::use_waste_categories;
use crate::models::{CategoryPayload, WasteCategory};
use crate::slug::slugify;

#[component]
pub fn WasteCategoriesPage() -> impl IntoView {
    let categories = use_waste_categories();

    // None = closed, Some(None) = create, Some(Some(id)) = edit
    let (editing, set_editing) = signal::<Option<Option<u64>>>(None);
    let (name, set_name) = signal(String::new());
    let (slug, set_slug) = signal(String::new());
    let deleting = RwSignal::new(None::<u64>);

    let open_create = move |_| {
        set_name.set(String::new());
        set_slug.set(String::new());
        set_editing.set(Some(None));
    };
    let open_edit = move |category: WasteCategory| {
        set_name.set(category.name);
        set_slug.set(category.slug);
        set_editing.set(Some(Some(category.id)));
    };
    let close = move || set_editing.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = CategoryPayload {
            name: name.get_untracked().trim().to_string(),
            slug: slug.get_untracked(),
        };
        if payload.name.is_empty() {
            categories.state.update(|s| s.fail("Введите название категории"));
            return;
        }
        match editing.get_untracked() {
            Some(Some(id)) => categories.update(id, payload, close),
            Some(None) => categories.create(payload, close),
            None => {}
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1 class="page-title">"Категории отходов"</h1>
                <div class="page-actions">
                    <button class="btn" on:click=move |_| categories.refresh(true)>"Обновить"</button>
                    <button class="btn btn-primary" on:click=open_create>"Добавить категорию"</button>
                </div>
            </div>

            <Alert
                message=Signal::derive(move || categories.state.with(|s| s.error.clone()))
                on_close=Callback::new(move |_| categories.state.update(|s| s.clear_error()))
            />
            <Show when=move || categories.state.with(|s| s.loading)>
                <div class="spinner">"Загрузка..."</div>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Название"</th>
                        <th>"Slug"</th>
                        <th>"Действия"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || categories.state.with(|s| s.data.clone())
                        key=|c| (c.id, c.name.clone(), c.slug.clone())
                        let:category
                    >
                        {
                            let id = category.id;
                            let row = category.clone();
                            view! {
                                <tr>
                                    <td>{category.id}</td>
                                    <td>{category.name}</td>
                                    <td>{category.slug}</td>
                                    <td class="row-actions">
                                        <button class="btn btn-small" on:click=move |_| open_edit(row.clone())>
                                            "Изменить"
                                        </button>
                                        <button class="btn btn-small btn-danger" on:click=move |_| deleting.set(Some(id))>
                                            "Удалить"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    </For>
                </tbody>
            </table>

            <Modal
                open=Signal::derive(move || editing.get().is_some())
                title=Signal::derive(move || {
                    if matches!(editing.get(), Some(Some(_))) { "Редактировать категорию" } else { "Новая категория" }.to_string()
                })
                on_close=Callback::new(move |_| close())
            >
                <form class="form" on:submit=save>
                    <label class="field">
                        <span>"Название *"</span>
                        <input
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_slug.set(slugify(&value));
                                set_name.set(value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Slug"</span>
                        <input type="text" readonly=true prop:value=move || slug.get() />
                    </label>
                    <div class="modal-actions">
                        <button type="button" class="btn" on:click=move |_| close()>"Отмена"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || categories.state.with(|s| s.loading)>
                            "Сохранить"
                        </button>
                    </div>
                </form>
            </Modal>

            <ConfirmDialog
                pending=deleting
                message="Вы уверены, что хотите удалить эту категорию?"
                on_confirm=Callback::new(move |id: u64| categories.delete(id))
            />
        </div>
    }
}
