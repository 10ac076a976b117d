pub mod events;
pub mod gestures;

// Re-export the essential types
pub use events::{InputEvent, MapEvent, MouseButton, TouchEventType, TouchPoint};
pub use gestures::GestureRecognizer;
