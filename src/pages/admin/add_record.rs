//! Admin: New Waste Record

use leptos::prelude::*;

use crate::components::{Alert, RecordEditor, Severity};
use crate::hooks::{use_companies, use_moderators, use_record_submission, use_waste_options};
use crate::record_form::{RecordForm, WasteRecordPayload};

#[component]
pub fn AdminAddRecord() -> impl IntoView {
    let form = RwSignal::new(RecordForm::default());
    let moderators = use_moderators();
    let companies = use_companies(None);
    let wastes = use_waste_options();
    let submission = use_record_submission();
    let (success, set_success) = signal::<Option<String>>(None);

    let on_submit = move |payload: WasteRecordPayload| {
        set_success.set(None);
        submission.submit(payload, move || {
            form.set(RecordForm::default());
            companies.load(None);
            set_success.set(Some("Запись успешно создана!".into()));
        });
    };

    view! {
        <div class="page">
            <h1 class="page-title">"Добавление отчета"</h1>
            <div class="panel">
                <Alert message=success severity=Severity::Success on_close=Callback::new(move |_| set_success.set(None)) />
                <Alert message=Signal::derive(move || submission.state.with(|s| s.error.clone())) />
                <Alert message=Signal::derive(move || wastes.with(|s| s.error.clone())) />
                <RecordEditor
                    form=form
                    moderators=Signal::derive(move || moderators.with(|s| s.data.clone()))
                    on_moderator_change=Callback::new(move |id: String| companies.load((!id.is_empty()).then_some(id)))
                    companies=Signal::derive(move || companies.state.with(|s| s.data.clone()))
                    wastes=Signal::derive(move || wastes.with(|s| s.data.clone()))
                    submitting=Signal::derive(move || submission.state.with(|s| s.loading))
                    submit_label="Создать запись"
                    on_submit=on_submit
                />
            </div>
        </div>
    }
}
