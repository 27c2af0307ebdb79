pub mod draft;
pub mod normalize;
pub mod options;
pub mod slug;
mod text;
pub mod url_builder;

pub use draft::{LinkDraft, ResolvedLink};
pub use normalize::normalize;
pub use options::{derive_option_value, next_display_order, normalize_option_label};
pub use slug::{format_event_template, slugify};
pub use url_builder::{build_url, is_valid_url, parse_absolute_url, NormalizedUtm};
