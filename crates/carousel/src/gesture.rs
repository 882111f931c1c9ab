//! Pointer input and gesture flags.

use bitflags::bitflags;

/// The two press zones of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    /// Offset change of one press: top scrolls back, bottom forward.
    pub fn step(self) -> f64 {
        match self {
            Edge::Top => -1.0,
            Edge::Bottom => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Input reported by the host.
///
/// `Release` is document-wide: hosts deliver it wherever the pointer went up,
/// otherwise an auto-repeat started on a band never stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { edge: Edge, kind: PointerKind },
    Release,
    Enter(Edge),
    Leave(Edge),
}

impl PointerEvent {
    pub fn mouse_down(edge: Edge) -> Self {
        PointerEvent::Press {
            edge,
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch_start(edge: Edge) -> Self {
        PointerEvent::Press {
            edge,
            kind: PointerKind::Touch,
        }
    }
}

bitflags! {
    /// Live state of a band's interaction.
    ///
    /// Hover is tracked per edge and survives between gestures; the other
    /// flags belong to the current gesture.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GestureFlags: u8 {
        /// A press is held
        const PRESSED      = 0b0000_0001;
        /// A single-step animation is in flight
        const SCROLLING    = 0b0000_0010;
        /// Pointer is over the top edge
        const HOVER_TOP    = 0b0000_0100;
        /// Pointer is over the bottom edge
        const HOVER_BOTTOM = 0b0000_1000;
    }
}

impl GestureFlags {
    pub fn hover(edge: Edge) -> Self {
        match edge {
            Edge::Top => GestureFlags::HOVER_TOP,
            Edge::Bottom => GestureFlags::HOVER_BOTTOM,
        }
    }

    /// True while either the press or its animation is still running.
    pub fn is_busy(self) -> bool {
        self.intersects(GestureFlags::PRESSED | GestureFlags::SCROLLING)
    }
}

/// Which highlight an edge should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampState {
    #[default]
    None,
    Hover,
    Press,
}
