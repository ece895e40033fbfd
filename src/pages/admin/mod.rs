//! Admin Pages

mod add_record;
mod dashboard;
mod final_processing;
mod final_waste_types;
mod users;
mod waste_categories;
mod waste_records;
mod wastes;

pub use add_record::AdminAddRecord;
pub use dashboard::AdminDashboard;
pub use final_processing::FinalProcessingPage;
pub use final_waste_types::FinalWasteTypesPage;
pub use users::UsersPage;
pub use waste_categories::WasteCategoriesPage;
pub use waste_records::WasteRecordsPage;
pub use wastes::WastesPage;
