//! Moderator Pages

mod add_company;
mod add_record;
mod dashboard;

pub use add_company::AddCompanyPage;
pub use add_record::ModeratorAddRecord;
pub use dashboard::ModeratorDashboard;
