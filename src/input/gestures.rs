//! Minimal touch-gesture recognition.
//!
//! Translates raw touch streams into the same drag/scroll vocabulary the
//! mouse path uses: one finger pans, two fingers pinch-zoom. Anything
//! fancier is out of scope.

use crate::{
    core::geo::Point,
    input::events::{InputEvent, TouchEventType, TouchPoint},
    traits::PointMath,
};

/// Relative pinch-distance change required before a zoom step is emitted
const PINCH_STEP_RATIO: f64 = 0.25;

/// Tracks active touches and converts them into pointer-equivalent events
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    touches: Vec<TouchPoint>,
    pinch_reference: Option<f64>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one touch event; returns the pointer-equivalent events to apply
    pub fn process(&mut self, event_type: TouchEventType, touches: Vec<TouchPoint>) -> Vec<InputEvent> {
        let mut out = Vec::new();

        match event_type {
            TouchEventType::Start => {
                if self.touches.is_empty() {
                    if let Some(first) = touches.first() {
                        out.push(InputEvent::DragStart {
                            position: first.position,
                        });
                    }
                }
                self.touches = touches;
                self.pinch_reference = self.pinch_distance();
            }
            TouchEventType::Move => {
                match (self.touches.len(), touches.len()) {
                    (1, 1) => {
                        let delta = touches[0].position.subtract(&self.touches[0].position);
                        out.push(InputEvent::Drag { delta });
                    }
                    (2, 2) => {
                        if let (Some(reference), Some(current)) =
                            (self.pinch_reference, pinch_distance_of(&touches))
                        {
                            let center = pinch_center_of(&touches);
                            if current >= reference * (1.0 + PINCH_STEP_RATIO) {
                                out.push(InputEvent::Scroll {
                                    delta: 1.0,
                                    position: center,
                                });
                                self.pinch_reference = Some(current);
                            } else if current <= reference * (1.0 - PINCH_STEP_RATIO) {
                                out.push(InputEvent::Scroll {
                                    delta: -1.0,
                                    position: center,
                                });
                                self.pinch_reference = Some(current);
                            }
                        }
                    }
                    _ => {}
                }
                self.touches = touches;
                if self.touches.len() != 2 {
                    self.pinch_reference = None;
                } else if self.pinch_reference.is_none() {
                    self.pinch_reference = self.pinch_distance();
                }
            }
            TouchEventType::End | TouchEventType::Cancel => {
                if !self.touches.is_empty() && touches.is_empty() {
                    out.push(InputEvent::DragEnd);
                }
                self.touches = touches;
                self.pinch_reference = self.pinch_distance();
            }
        }

        out
    }

    fn pinch_distance(&self) -> Option<f64> {
        pinch_distance_of(&self.touches)
    }
}

fn pinch_distance_of(touches: &[TouchPoint]) -> Option<f64> {
    if touches.len() == 2 {
        Some(touches[0].position.distance_to(&touches[1].position))
    } else {
        None
    }
}

fn pinch_center_of(touches: &[TouchPoint]) -> Point {
    let sum = touches
        .iter()
        .fold(Point::new(0.0, 0.0), |acc, t| acc.add(&t.position));
    sum.multiply(1.0 / touches.len().max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint {
            id,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_single_finger_drag() {
        let mut recognizer = GestureRecognizer::new();

        let started = recognizer.process(TouchEventType::Start, vec![touch(1, 100.0, 100.0)]);
        assert!(matches!(started[0], InputEvent::DragStart { .. }));

        let moved = recognizer.process(TouchEventType::Move, vec![touch(1, 110.0, 95.0)]);
        assert_eq!(
            moved[0],
            InputEvent::Drag {
                delta: Point::new(10.0, -5.0)
            }
        );

        let ended = recognizer.process(TouchEventType::End, vec![]);
        assert_eq!(ended[0], InputEvent::DragEnd);
    }

    #[test]
    fn test_pinch_zoom_in() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.process(
            TouchEventType::Start,
            vec![touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)],
        );

        // Fingers spreading well past the step ratio emits a zoom-in scroll
        let events = recognizer.process(
            TouchEventType::Move,
            vec![touch(1, 50.0, 100.0), touch(2, 250.0, 100.0)],
        );
        assert_eq!(events.len(), 1);
        match &events[0] {
            InputEvent::Scroll { delta, position } => {
                assert!(*delta > 0.0);
                assert_eq!(*position, Point::new(150.0, 100.0));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_small_pinch_is_ignored() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.process(
            TouchEventType::Start,
            vec![touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)],
        );

        let events = recognizer.process(
            TouchEventType::Move,
            vec![touch(1, 98.0, 100.0), touch(2, 202.0, 100.0)],
        );
        assert!(events.is_empty());
    }
}
