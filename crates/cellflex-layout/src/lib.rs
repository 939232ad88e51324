// ABOUTME: Flex-weighted grid layout and resizable split management.
// ABOUTME: Owns the widget tree, table and flexbox layout passes, splitters, and resize scheduling.

mod adapt;
mod container;
mod drag;
mod element;
mod error;
mod flex;
mod policy;
mod scheduler;
mod split;
mod table;
mod tree;

pub use adapt::adapt_row_heights;
pub use container::{Container, ContainerKind, FlexboxLayout};
pub use drag::DragState;
pub use element::{Element, WidgetId};
pub use error::LayoutError;
pub use flex::{FlexPlan, PaneFlex};
pub use policy::{CellFlex, CellPolicy, CellStyle};
pub use scheduler::{Scheduler, SizeChanged};
pub use split::{Divider, Indicator, Offset, SplitLayout, SplitPane};
pub use table::{Cell, Placement, Row, TableLayout, MAX_GRID_TRACKS};
pub use tree::WidgetTree;
