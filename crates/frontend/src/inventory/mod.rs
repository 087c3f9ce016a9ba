pub mod api;
pub mod enrich;
pub mod fetch;
pub mod intent;
pub mod loading;
pub mod normalize;
pub mod part_detail;
pub mod reconcile;
pub mod store;
pub mod ui;
