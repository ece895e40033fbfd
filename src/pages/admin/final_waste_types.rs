//! Admin: Final Waste Types (table 5 buckets)

use leptos::prelude::*;

use crate::components::{Alert, ConfirmDialog, Modal};
use crate::hooks::use_final_waste_types;
use crate::models::{FinalWasteType, FinalWasteTypePayload};

#[derive(Debug, Clone, Default, PartialEq)]
struct Draft {
    final_name: String,
    type_operation: String,
    factor: String,
}

impl Draft {
    fn from_type(final_type: &FinalWasteType) -> Self {
        Self {
            final_name: final_type.final_name.clone(),
            type_operation: final_type.type_operation.clone(),
            factor: final_type.factor.to_string(),
        }
    }

    fn payload(&self) -> Result<FinalWasteTypePayload, &'static str> {
        if self.final_name.trim().is_empty() || self.type_operation.trim().is_empty() {
            return Err("Заполните все обязательные поля");
        }
        let factor = self
            .factor
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|f| *f >= 0.0)
            .ok_or("Коэффициент должен быть неотрицательным числом")?;
        Ok(FinalWasteTypePayload {
            final_name: self.final_name.trim().to_string(),
            type_operation: self.type_operation.trim().to_string(),
            factor,
        })
    }
}

#[component]
pub fn FinalWasteTypesPage() -> impl IntoView {
    let types = use_final_waste_types();

    let (editing, set_editing) = signal::<Option<Option<u64>>>(None);
    let draft = RwSignal::new(Draft::default());
    let deleting = RwSignal::new(None::<u64>);
    let close = move || set_editing.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get_untracked() else { return };
        match draft.with_untracked(Draft::payload) {
            Ok(payload) => types.save(id, payload, close),
            Err(message) => types.state.update(|s| s.fail(message)),
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1 class="page-title">"Типы таб.5"</h1>
                <div class="page-actions">
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            draft.set(Draft::default());
                            set_editing.set(Some(None));
                        }
                    >
                        "Добавить тип"
                    </button>
                </div>
            </div>

            <Alert
                message=Signal::derive(move || types.state.with(|s| s.error.clone()))
                on_close=Callback::new(move |_| types.state.update(|s| s.clear_error()))
            />
            <Show when=move || types.state.with(|s| s.loading)>
                <div class="spinner">"Загрузка..."</div>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Название"</th>
                        <th>"Операция"</th>
                        <th>"Коэффициент"</th>
                        <th>"Действия"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        types
                            .state
                            .with(|s| s.data.clone())
                            .into_iter()
                            .map(|final_type| {
                                let id = final_type.id;
                                let prefill = Draft::from_type(&final_type);
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{final_type.final_name}</td>
                                        <td>{final_type.type_operation}</td>
                                        <td>{final_type.factor}</td>
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
                    if matches!(editing.get(), Some(Some(_))) { "Редактировать тип" } else { "Новый тип" }.to_string()
                })
                on_close=Callback::new(move |_| close())
            >
                <form class="form" on:submit=save>
                    <label class="field">
                        <span>"Название *"</span>
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.final_name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.final_name = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Тип операции *"</span>
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.type_operation.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.type_operation = value);
                            }
                        />
                    </label>
                    <label class="field">
                        <span>"Коэффициент *"</span>
                        <input
                            type="text"
                            inputmode="decimal"
                            prop:value=move || draft.with(|d| d.factor.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.factor = value);
                            }
                        />
                    </label>
                    <div class="modal-actions">
                        <button type="button" class="btn" on:click=move |_| close()>"Отмена"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || types.state.with(|s| s.loading)>
                            "Сохранить"
                        </button>
                    </div>
                </form>
            </Modal>

            <ConfirmDialog
                pending=deleting
                message="Вы уверены, что хотите удалить этот тип?"
                on_confirm=Callback::new(move |id: u64| types.delete(id))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_accepts_comma_factor() {
        let draft = Draft {
            final_name: " Вторсырьё ".into(),
            type_operation: "Переработка".into(),
            factor: "0,75".into(),
        };

        let payload = draft.payload().unwrap();

        assert_eq!(payload.final_name, "Вторсырьё");
        assert_eq!(payload.factor, 0.75);
    }

    #[test]
    fn test_draft_rejects_missing_fields_and_bad_factor() {
        let mut draft = Draft { factor: "1".into(), ..Default::default() };
        assert_eq!(draft.payload(), Err("Заполните все обязательные поля"));

        draft.final_name = "Захоронение".into();
        draft.type_operation = "Захоронение".into();
        draft.factor = "-1".into();
        assert!(draft.payload().is_err());
    }
}
