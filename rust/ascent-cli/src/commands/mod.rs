pub mod apps;
pub mod auth;
pub mod builds;
pub mod localizations;
pub mod screenshot_sets;
pub mod screenshots;
pub mod testflight;
pub mod versions;
