pub mod order_form;
pub mod panel;
pub mod transfer_form;

pub use order_form::OrderForm;
pub use panel::CartPanel;
pub use transfer_form::TransferForm;
