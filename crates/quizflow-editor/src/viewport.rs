use quizflow_model::{Node, Position};

const FOCUS_ZOOM: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Maps pointer coordinates to canvas coordinates.
pub trait Project {
    fn project(&self, point: ScreenPoint) -> Position;
}

/// Pan offset and zoom of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Where the canvas sits on screen and how it is currently panned.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasFrame {
    pub origin: ScreenPoint,
    pub viewport: Viewport,
}

impl Project for CanvasFrame {
    fn project(&self, point: ScreenPoint) -> Position {
        let zoom = if self.viewport.zoom == 0.0 {
            1.0
        } else {
            self.viewport.zoom
        };
        Position::new(
            (point.x - self.origin.x - self.viewport.x) / zoom,
            (point.y - self.origin.y - self.viewport.y) / zoom,
        )
    }
}

/// Double-click zoom: the first toggle zooms onto a node and remembers the
/// view it left, the second goes back to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FocusToggle {
    saved: Option<Viewport>,
}

impl FocusToggle {
    pub fn toggle(&mut self, current: Viewport, node: &Node, window: (f32, f32)) -> Viewport {
        match self.saved.take() {
            Some(saved) => saved,
            None => {
                self.saved = Some(current);
                Viewport {
                    x: -node.position.x + window.0 / 2.0,
                    y: -node.position.y + window.1 / 2.0,
                    zoom: FOCUS_ZOOM,
                }
            }
        }
    }
}
