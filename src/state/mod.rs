pub mod app_settings;
pub mod app_state;
pub mod dashboard;
pub mod detail_cache;
pub mod focus;
pub mod messages;
pub mod network;
pub mod refresher;
pub mod store;
pub mod view;
