pub mod actions;
#[cfg(feature = "egui-desktop")]
pub mod app;
pub mod driver;
#[cfg(feature = "egui-desktop")]
pub mod list_view;
pub mod prefs;
pub mod sample;
pub mod state;
#[cfg(feature = "egui-desktop")]
pub mod theme;

#[cfg(feature = "egui-desktop")]
pub use app::launch;
