// ABOUTME: Shared types and configuration for cellflex.
// ABOUTME: Defines flex factors, lengths, style maps, widget descriptors, and config handling.

pub mod config;
pub mod descriptor;
pub mod flex;
pub mod length;
pub mod style;

pub use config::{ConfigError, LayoutConfig, MinSizeFallback, SplitSettings, WindowSettings};
pub use descriptor::{WidgetDescriptor, WidgetKind};
pub use flex::{is_autoflex, is_natural, Axis, AUTOFLEX};
pub use length::{Length, Size};
pub use style::{ClassList, Style, VENDOR_PREFIXES};
