pub mod error_banner;
pub mod loading_bar;
pub mod pagination_controls;
pub mod summary_card;
