//! Alert Banner Component

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
    Info,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Error => "alert alert-error",
            Severity::Success => "alert alert-success",
            Severity::Info => "alert alert-info",
        }
    }
}

/// Inline banner, hidden while `message` is None.
/// With `on_close` it gets a dismiss button.
#[component]
pub fn Alert(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(default = Severity::Error)] severity: Severity,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class=severity.class() role="alert">
                    <span class="alert-text">{text}</span>
                    {on_close.map(|close| view! {
                        <button class="alert-close" on:click=move |_| close.run(())>"×"</button>
                    })}
                </div>
            }
        })
    }
}
