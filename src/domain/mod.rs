pub mod display;
pub mod filters;
pub mod itinerary;
pub mod range;
pub mod salespeople;
pub mod settings;
pub mod sorting;
pub mod title;
pub mod visit;

pub use display::FormatterConfig;
pub use itinerary::Formatter;
pub use salespeople::extract_salespeople;
pub use settings::{Dialect, FilterSettings};
pub use visit::VisitsResponse;
