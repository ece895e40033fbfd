//! Moderator: Register Company

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::access::HOME_PATH;
use crate::components::{Alert, Severity};
use crate::hooks::use_company_registration;
use crate::models::NewUser;
use crate::pages::{use_delayed_redirect, REDIRECT_DELAY_MS};
use crate::session::Role;

#[derive(Debug, Clone, Default, PartialEq)]
struct CompanyForm {
    name: String,
    email: String,
    password: String,
    bin_company: String,
    description: String,
}

const REQUIRED: &str = "Заполните все обязательные поля";

impl CompanyForm {
    /// Name, email, password and BIN are all required
    fn is_valid(&self) -> bool {
        [&self.name, &self.email, &self.password, &self.bin_company]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    fn new_user(&self) -> Result<NewUser, &'static str> {
        if !self.is_valid() {
            return Err(REQUIRED);
        }
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: Role::Company.as_str().to_string(),
            bin_company: self.bin_company.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[component]
pub fn AddCompanyPage() -> impl IntoView {
    let registration = use_company_registration();
    let cancel = use_navigate();
    let redirect = use_delayed_redirect(HOME_PATH, REDIRECT_DELAY_MS);

    let form = RwSignal::new(CompanyForm::default());
    let (success, set_success) = signal::<Option<String>>(None);
    let (invalid, set_invalid) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_success.set(None);
        let company = match form.with_untracked(CompanyForm::new_user) {
            Ok(company) => company,
            Err(message) => {
                set_invalid.set(Some(message.to_string()));
                return;
            }
        };
        set_invalid.set(None);
        registration.submit(company, move || {
            form.set(CompanyForm::default());
            set_success.set(Some("Компания успешно добавлена".into()));
            redirect.set(true);
        });
    };

    let field = move |label: &'static str, kind: &'static str, read: fn(&CompanyForm) -> &String, write: fn(&mut CompanyForm, String)| {
        view! {
            <label class="field">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || form.with(|f| read(f).clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| write(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="page">
            <h1 class="page-title">"Добавить новую компанию"</h1>
            <div class="panel narrow">
                <Alert message=Signal::derive(move || registration.state.with(|s| s.error.clone())) />
                <Alert message=invalid />
                <Alert message=success severity=Severity::Success />
                <form class="form" on:submit=submit>
                    {field("Название компании *", "text", |f| &f.name, |f, v| f.name = v)}
                    {field("БИН компании *", "text", |f| &f.bin_company, |f, v| f.bin_company = v)}
                    {field("Email *", "email", |f| &f.email, |f, v| f.email = v)}
                    {field("Пароль *", "password", |f| &f.password, |f, v| f.password = v)}
                    {field("Описание", "text", |f| &f.description, |f, v| f.description = v)}
                    <div class="form-actions">
                        <button type="button" class="btn" on:click=move |_| cancel(HOME_PATH, Default::default())>
                            "Отмена"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || registration.state.with(|s| s.loading)
                        >
                            {move || if registration.state.with(|s| s.loading) { "Сохранение..." } else { "Добавить компанию" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
