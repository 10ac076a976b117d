use crate::core::geo::Point;
use crate::data::records::{BaseId, ContinentId};
use serde::{Deserialize, Serialize};

/// Input events that can be handled by the map renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap; position in viewport pixels
    Click {
        position: Point,
        button: MouseButton,
    },
    /// Double click/tap
    DoubleClick { position: Point },
    /// Mouse/finger move
    MouseMove { position: Point },
    /// Start of drag operation
    DragStart { position: Point },
    /// Drag in progress; delta in viewport pixels
    Drag { delta: Point },
    /// End of drag operation
    DragEnd,
    /// Scroll wheel or pinch zoom; only the sign of `delta` matters
    Scroll { delta: f64, position: Point },
    /// Viewport/window resize
    Resize { size: Point },
    /// Touch events (multi-touch)
    Touch {
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
    },
}

/// Types of touch events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Click { position, .. } => Some(*position),
            InputEvent::DoubleClick { position } => Some(*position),
            InputEvent::MouseMove { position } => Some(*position),
            InputEvent::DragStart { position } => Some(*position),
            InputEvent::Scroll { position, .. } => Some(*position),
            InputEvent::Touch { touches, .. } => touches.first().map(|t| t.position),
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            InputEvent::Click { .. }
                | InputEvent::DoubleClick { .. }
                | InputEvent::MouseMove { .. }
                | InputEvent::DragStart { .. }
                | InputEvent::Drag { .. }
                | InputEvent::DragEnd
                | InputEvent::Scroll { .. }
        )
    }

    /// Checks if this is a touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(self, InputEvent::Touch { .. })
    }
}

/// Events emitted by the map renderer for external collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Camera target or zoom has changed
    ViewChanged { target: Point, zoom: f64 },
    /// The pointer is over a base marker; emitted once per base entered
    BaseHovered { base_id: BaseId },
    /// The pointer left whatever base it was hovering
    HoverCleared,
    /// A continent switch completed
    ContinentChanged { continent_id: ContinentId },
    /// Layer was added to the map
    LayerAdded { layer_id: String },
    /// Layer was removed from the map
    LayerRemoved { layer_id: String },
}
