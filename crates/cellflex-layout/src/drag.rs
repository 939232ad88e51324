// ABOUTME: Divider drag session state machine.
// ABOUTME: Tracks which divider, if any, the pointer has captured.

/// Idle -> Dragging(i) -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        divider: usize,
    },
}

impl DragState {
    /// Capture `divider`. Fails if a drag is already in progress.
    pub fn begin(&mut self, divider: usize) -> bool {
        match self {
            DragState::Idle => {
                *self = DragState::Dragging { divider };
                true
            }
            DragState::Dragging { .. } => false,
        }
    }

    pub fn captured(&self) -> Option<usize> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { divider } => Some(*divider),
        }
    }

    /// A pane was inserted at `index`: dividers from `index` on move up one,
    /// so the capture follows the boundary it was holding
    pub fn pane_inserted(&mut self, index: usize) {
        if let DragState::Dragging { divider } = self {
            if *divider >= index {
                *divider += 1;
            }
        }
    }

    /// Release the capture, returning the divider that was held
    pub fn end(&mut self) -> Option<usize> {
        let captured = self.captured();
        *self = DragState::Idle;
        captured
    }
}
