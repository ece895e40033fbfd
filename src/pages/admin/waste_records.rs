//! Admin: Waste Record Search & Edit

use leptos::prelude::*;

use crate::components::{Alert, ConfirmDialog, Modal, Pagination, RecordEditor};
use crate::filters::RecordFilters;
use crate::hooks::{use_companies, use_moderators, use_waste_options, use_waste_records};
use crate::models::WasteRecord;
use crate::record_form::{RecordForm, WasteRecordPayload};

/// "ПЭТ: 2.5; Стекло: 1" for the items column
fn items_summary(record: &WasteRecord) -> String {
    record
        .items
        .iter()
        .map(|item| {
            let name = item
                .waste
                .as_ref()
                .map(|w| w.name.clone())
                .unwrap_or_else(|| format!("#{}", item.waste_id));
            format!("{}: {}", name, item.amount)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Text input bound to one field of the record filters
fn filter_input(
    filters: RwSignal<RecordFilters>,
    label: &'static str,
    kind: &'static str,
    read: fn(&RecordFilters) -> &String,
    write: fn(&mut RecordFilters, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type=kind
                prop:value=move || filters.with(|f| read(f).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filters.update(|f| write(f, value));
                }
            />
        </label>
    }
}

#[component]
pub fn WasteRecordsPage() -> impl IntoView {
    let records = use_waste_records();
    let moderators = use_moderators();
    let companies = use_companies(None);
    let wastes = use_waste_options();
    let filters = records.filters;

    let (editing, set_editing) = signal::<Option<u64>>(None);
    let form = RwSignal::new(RecordForm::default());
    let deleting = RwSignal::new(None::<u64>);

    let open_edit = move |record: WasteRecord| {
        form.set(RecordForm::from_record(&record));
        companies.load(Some(record.moderator_id.to_string()));
        set_editing.set(Some(record.id));
    };
    let close = move || set_editing.set(None);

    let on_save = move |payload: WasteRecordPayload| {
        if let Some(id) = editing.get_untracked() {
            records.save(Some(id), payload, close);
        }
    };

    let total = Signal::derive(move || records.state.with(|s| s.data.meta.as_ref().map(|m| m.total).unwrap_or(0)));

    view! {
        <div class="page">
            <h1 class="page-title">"Редактирование записей отходов"</h1>

            <form
                class="panel filters"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    records.search();
                }
            >
                {filter_input(filters, "Название компании", "text", |f| &f.company_name, |f, v| f.company_name = v)}
                {filter_input(filters, "БИН", "text", |f| &f.bin, |f, v| f.bin = v)}
                {filter_input(filters, "Дата от", "date", |f| &f.start_date, |f, v| f.start_date = v)}
                {filter_input(filters, "Дата до", "date", |f| &f.end_date, |f, v| f.end_date = v)}
                <label class="field">
                    <span>"Модератор"</span>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| f.moderator_id = value);
                    }>
                        <option value="" selected=move || filters.with(|f| f.moderator_id.is_empty())>"Все"</option>
                        {move || {
                            let selected = filters.with(|f| f.moderator_id.clone());
                            moderators
                                .with(|s| s.data.clone())
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
                {filter_input(filters, "Имя водителя", "text", |f| &f.driv_name, |f, v| f.driv_name = v)}
                {filter_input(filters, "Номер машины", "text", |f| &f.car_num, |f, v| f.car_num = v)}
                <div class="filter-actions">
                    <button type="submit" class="btn btn-primary">"Поиск"</button>
                    <button type="button" class="btn btn-danger" on:click=move |_| records.reset_filters()>
                        "Сбросить"
                    </button>
                </div>
            </form>

            <Alert
                message=Signal::derive(move || records.state.with(|s| s.error.clone()))
                on_close=Callback::new(move |_| records.state.update(|s| s.clear_error()))
            />
            <Show when=move || records.state.with(|s| s.loading)>
                <div class="spinner">"Загрузка..."</div>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Дата"</th>
                        <th>"Компания"</th>
                        <th>"Модератор"</th>
                        <th>"Номер машины"</th>
                        <th>"Водитель"</th>
                        <th>"Отходы"</th>
                        <th>"Действия"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = records.state.with(|s| s.data.data.clone());
                        if rows.is_empty() {
                            return view! {
                                <tr><td colspan="7" class="no-data">"Записи не найдены"</td></tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|record| {
                                let id = record.id;
                                let summary = items_summary(&record);
                                let date = record.date_only().to_string();
                                let company = record.company.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                                let moderator = record.moderator.as_ref().map(|m| m.name.clone()).unwrap_or_default();
                                let car_num = record.car_num.clone().unwrap_or_default();
                                let driv_name = record.driv_name.clone().unwrap_or_default();
                                view! {
                                    <tr>
                                        <td>{date}</td>
                                        <td>{company}</td>
                                        <td>{moderator}</td>
                                        <td>{car_num}</td>
                                        <td>{driv_name}</td>
                                        <td>{summary}</td>
                                        <td class="row-actions">
                                            <button class="btn btn-small" on:click=move |_| open_edit(record.clone())>
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
                            .into_any()
                    }}
                </tbody>
            </table>

            <Pagination
                page=records.page
                last_page=Signal::derive(move || records.last_page())
                per_page=Signal::derive(move || filters.with(|f| f.per_page))
                total=total
                on_page=Callback::new(move |page: u32| records.go_to(page))
                on_per_page=Callback::new(move |size: u32| records.set_per_page(size))
            />

            <Modal
                open=Signal::derive(move || editing.get().is_some())
                title="Редактирование записи".to_string()
                on_close=Callback::new(move |_| close())
            >
                <RecordEditor
                    form=form
                    moderators=Signal::derive(move || moderators.with(|s| s.data.clone()))
                    on_moderator_change=Callback::new(move |id: String| companies.load((!id.is_empty()).then_some(id)))
                    companies=Signal::derive(move || companies.state.with(|s| s.data.clone()))
                    wastes=Signal::derive(move || wastes.with(|s| s.data.clone()))
                    submitting=Signal::derive(move || records.state.with(|s| s.loading))
                    submit_label="Сохранить"
                    on_submit=on_save
                />
            </Modal>

            <ConfirmDialog
                pending=deleting
                message="Вы уверены, что хотите удалить эту запись?"
                on_confirm=Callback::new(move |id: u64| records.delete(id))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NamedRef, WasteRecordItem};

    #[test]
    fn test_items_summary_falls_back_to_id() {
        let record = WasteRecord {
            id: 1,
            company_id: 2,
            moderator_id: 3,
            car_num: None,
            driv_name: None,
            record_date: "2024-01-05T00:00:00Z".into(),
            items: vec![
                WasteRecordItem {
                    waste_id: 4,
                    amount: 2.5,
                    factor: None,
                    waste: Some(NamedRef { id: 4, name: "ПЭТ".into() }),
                },
                WasteRecordItem { waste_id: 9, amount: 1.0, factor: Some(0.5), waste: None },
            ],
            company: None,
            moderator: None,
        };

        assert_eq!(items_summary(&record), "ПЭТ: 2.5; #9: 1");
    }
}
