//! Company Pages

mod dashboard;
mod reports;

pub use dashboard::CompanyDashboard;
pub use reports::CompanyReports;
