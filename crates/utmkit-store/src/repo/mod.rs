pub mod links;
pub mod options;
pub mod settings;

pub use links::{LinkNew, LinksRepo};
pub use options::{OptionNew, OptionUpdate, OptionsRepo};
pub use settings::SettingsRepo;
