//! File Download
//!
//! Saves an exported spreadsheet through a temporary object URL and anchor.

use gloo_timers::callback::Timeout;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::config::OBJECT_URL_REVOKE_MS;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Не удалось сохранить файл: {0}")]
pub struct DownloadError(String);

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        DownloadError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// Trigger a browser download of `bytes` named `file_name`
pub fn save_bytes(bytes: &[u8], file_name: &str) -> Result<(), DownloadError> {
    let window = web_sys::window().ok_or_else(|| DownloadError("no window".into()))?;
    let document = window.document().ok_or_else(|| DownloadError("no document".into()))?;
    let body = document.body().ok_or_else(|| DownloadError("no body".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).into());
    let options = BlobPropertyBag::new();
    options.set_type(XLSX_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();

    tracing::info!(file_name, size = bytes.len(), "export downloaded");

    Timeout::new(OBJECT_URL_REVOKE_MS, move || {
        if Url::revoke_object_url(&url).is_err() {
            tracing::warn!("failed to revoke object url");
        }
        anchor.remove();
    })
    .forget();

    Ok(())
}
