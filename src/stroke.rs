use egui::{Color32, Pos2};

/// How a segment combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ink {
    /// Source-over with the given color
    Paint(Color32),
    /// Destination-out: covered pixels become transparent
    Erase,
}

/// Width and ink a single dot or segment is rendered with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub ink: Ink,
}

/// Transient per-gesture state
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Painting {
        last_point: Pos2,
    },
}

impl GestureState {
    pub fn is_painting(&self) -> bool {
        matches!(self, Self::Painting { .. })
    }

    pub fn last_point(&self) -> Option<Pos2> {
        match self {
            Self::Painting { last_point } => Some(*last_point),
            Self::Idle => None,
        }
    }

    /// Begin (or restart) a gesture at `pos`
    pub fn begin(&mut self, pos: Pos2) {
        *self = Self::Painting { last_point: pos };
    }

    /// Advance to `pos`, returning the segment to render, or `None` while idle
    pub fn advance(&mut self, pos: Pos2) -> Option<(Pos2, Pos2)> {
        match self {
            Self::Painting { last_point } => {
                let from = std::mem::replace(last_point, pos);
                Some((from, pos))
            }
            Self::Idle => None,
        }
    }

    /// End the gesture; returns whether one was active
    pub fn end(&mut self) -> bool {
        std::mem::take(self).is_painting()
    }
}
