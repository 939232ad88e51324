// ABOUTME: Widget creation descriptors consumed by the element factory.
// ABOUTME: Names the widget kinds and the fields a new widget is built from.

use serde::{Deserialize, Serialize};

/// Kind of widget to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Plain element with no layout of its own
    #[default]
    Widget,
    Label,
    Button,
    /// Flexbox row
    RowBox,
    /// Flexbox column
    ColumnBox,
    /// Single-row table
    TableRow,
    /// Single-column table
    TableColumn,
    /// Two-column label/value table
    Form,
    /// Table addressed by child position
    Grid,
    /// Absolutely positioned children (pin board)
    Freeform,
    /// Horizontal splitter with draggable dividers
    Split,
    /// Vertical splitter with draggable dividers
    VSplit,
}

impl WidgetKind {
    pub fn is_container(&self) -> bool {
        !matches!(self, WidgetKind::Widget | WidgetKind::Label | WidgetKind::Button)
    }
}

/// Everything needed to create one widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetDescriptor {
    /// Unique id used to address the widget afterwards
    pub id: String,
    pub kind: WidgetKind,
    pub class_name: String,
    /// Parent id; `None` attaches the widget to the window
    pub parent: Option<String>,
    /// Position `[x, y]`; above 1 means pixels, otherwise a fraction.
    /// Grid containers read it as `[column, row]`.
    pub pos: [f64; 2],
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub hflex: f64,
    pub vflex: f64,
    /// Raw inline style text appended after the computed properties
    pub css: String,
    /// Text content for labels and buttons
    pub text: Option<String>,
    /// Container padding in pixels
    pub margin: Option<f64>,
    /// Gap between children in pixels
    pub spacing: Option<f64>,
}

impl Default for WidgetDescriptor {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: WidgetKind::default(),
            class_name: String::new(),
            parent: None,
            pos: [0.0, 0.0],
            min_width: None,
            min_height: None,
            hflex: 0.0,
            vflex: 0.0,
            css: String::new(),
            text: None,
            margin: None,
            spacing: None,
        }
    }
}

impl WidgetDescriptor {
    pub fn new(id: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn flex(mut self, hflex: f64, vflex: f64) -> Self {
        self.hflex = hflex;
        self.vflex = vflex;
        self
    }

    pub fn pos(mut self, x: f64, y: f64) -> Self {
        self.pos = [x, y];
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = Some(width);
        self.min_height = Some(height);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
