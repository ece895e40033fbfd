//! Moderator: New Waste Record

use leptos::prelude::*;

use crate::access::HOME_PATH;
use crate::components::{Alert, RecordEditor, Severity};
use crate::filters::today;
use crate::hooks::{use_moderator_companies, use_record_submission, use_waste_options};
use crate::pages::{signed_in_moderator, use_delayed_redirect, MissingSession, REDIRECT_DELAY_MS};
use crate::record_form::{RecordForm, WasteRecordPayload};

#[component]
pub fn ModeratorAddRecord() -> impl IntoView {
    let moderator_id = match signed_in_moderator() {
        Ok(id) => id,
        Err(message) => return view! { <MissingSession message=message /> }.into_any(),
    };

    let form = RwSignal::new(RecordForm::for_moderator(moderator_id, today()));
    let companies = use_moderator_companies(moderator_id);
    let wastes = use_waste_options();
    let submission = use_record_submission();
    let redirect = use_delayed_redirect(HOME_PATH, REDIRECT_DELAY_MS);
    let (success, set_success) = signal::<Option<String>>(None);

    let on_submit = move |payload: WasteRecordPayload| {
        set_success.set(None);
        submission.submit(payload, move || {
            form.set(RecordForm::for_moderator(moderator_id, today()));
            set_success.set(Some("Запись успешно создана!".into()));
            redirect.set(true);
        });
    };

    view! {
        <div class="page">
            <h1 class="page-title">"Добавить запись"</h1>
            <div class="panel">
                <Alert message=success severity=Severity::Success />
                <Alert message=Signal::derive(move || submission.state.with(|s| s.error.clone())) />
                <Alert message=Signal::derive(move || companies.state.with(|s| s.error.clone())) />
                <Alert message=Signal::derive(move || wastes.with(|s| s.error.clone())) />
                <RecordEditor
                    form=form
                    companies=Signal::derive(move || companies.state.with(|s| s.data.clone()))
                    wastes=Signal::derive(move || wastes.with(|s| s.data.clone()))
                    submitting=Signal::derive(move || submission.state.with(|s| s.loading))
                    submit_label="Создать запись"
                    on_submit=on_submit
                />
            </div>
        </div>
    }
    .into_any()
}
