//! Domain models for Maghrib Companion

mod location;
mod notification;
mod prayer;
mod settings;
mod weather;

pub use location::*;
pub use notification::*;
pub use prayer::*;
pub use settings::*;
pub use weather::*;
