//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod alert;
mod company_picker;
mod confirm_dialog;
mod data_grid;
mod date_range;
mod modal;
mod operations_grid;
mod pagination;
mod record_editor;
mod sidebar;
mod waste_item_row;

pub use alert::{Alert, Severity};
pub use company_picker::CompanyPicker;
pub use confirm_dialog::ConfirmDialog;
pub use data_grid::DataGrid;
pub use date_range::DateRange;
pub use modal::Modal;
pub use operations_grid::OperationsGrid;
pub use pagination::Pagination;
pub use record_editor::RecordEditor;
pub use sidebar::Sidebar;
pub use waste_item_row::WasteItemRow;
