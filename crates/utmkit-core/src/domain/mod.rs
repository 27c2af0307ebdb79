pub mod fields;
pub mod ids;
pub mod link;
pub mod option;
pub mod settings;

pub use fields::{CustomParam, UtmFieldSet};
pub use ids::{LinkId, OptionId};
pub use link::UtmLink;
pub use option::{OptionKind, UtmOption};
pub use settings::{NormalizationConfig, SettingKey, Settings};
