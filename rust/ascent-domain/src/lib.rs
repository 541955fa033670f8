//! Domain model types for the Ascent CLI.
//!
//! Pure value types mirroring the App Store Connect resource model. This
//! crate performs no I/O; the wire layer lives in `ascent-api`.

pub mod affordances;
pub mod app;
pub mod build;
pub mod page;
pub mod screenshot;
pub mod submission;
pub mod testflight;
pub mod version;

pub use affordances::*;
pub use app::*;
pub use build::*;
pub use page::*;
pub use screenshot::*;
pub use submission::*;
pub use testflight::*;
pub use version::*;
