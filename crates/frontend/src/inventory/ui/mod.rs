pub mod dashboard;
pub mod detail_modal;
pub mod filter_bar;
pub mod metrics_header;
pub mod tab_bar;
pub mod table;

pub use dashboard::DashboardPage;
