//! Confirm Dialog Component
//!
//! Every delete goes through this dialog.

use leptos::prelude::*;

/// Yes/no confirmation.
///
/// # Arguments
/// * `pending` - id (or any key) awaiting confirmation; the dialog is open while it is Some
/// * `message` - question shown in the body
/// * `on_confirm` - receives the pending key; the dialog closes either way
#[component]
pub fn ConfirmDialog<K>(
    pending: RwSignal<Option<K>>,
    #[prop(into)] message: String,
    #[prop(into)] on_confirm: Callback<K>,
) -> impl IntoView
where
    K: Clone + Send + Sync + 'static,
{
    view! {
        <Show when=move || pending.with(Option::is_some)>
            <div class="modal-backdrop" on:click=move |_| pending.set(None)>
                <div class="modal modal-small" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>"Подтверждение удаления"</h2>
                    </div>
                    <div class="modal-body">
                        <p>{message.clone()}</p>
                    </div>
                    <div class="modal-actions">
                        <button class="btn" on:click=move |_| pending.set(None)>
                            "Отмена"
                        </button>
                        <button
                            class="btn btn-danger"
                            on:click=move |_| {
                                if let Some(key) = pending.get_untracked() {
                                    pending.set(None);
                                    on_confirm.run(key);
                                }
                            }
                        >
                            "Удалить"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
