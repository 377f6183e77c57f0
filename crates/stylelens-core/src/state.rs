#![forbid(unsafe_code)]

//! Inspection state machine.
//!
//! ```text
//!            pointer-enter             click
//!   Idle ───────────────────▶ Hovering ──────▶ Inspecting { pointer_inside }
//!    ▲  ◀─────────────────────    ▲                │   │
//!    │        pointer-leave       └──── click ─────┘   │ (pointer inside)
//!    └──────────────────────── close ──────────────────┘
//! ```
//!
//! Leaving the wrapper while inspecting keeps the panel open; only the
//! `pointer_inside` flag changes. A click inside the panel never changes the
//! state.

/// Display state of one inspector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectionState {
    /// Pointer outside, nothing rendered.
    #[default]
    Idle,
    /// Pointer over the wrapper, badge shown.
    Hovering,
    /// Panel open.
    Inspecting {
        /// Whether the pointer is currently over the wrapper.
        pointer_inside: bool,
    },
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorEvent {
    PointerEnter,
    PointerLeave,
    /// Click on the wrapper (outside the panel).
    Click,
    /// Click anywhere inside the panel.
    PanelClick,
    /// The panel's close control.
    Close,
}

impl InspectorEvent {
    /// Stable string representation for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerEnter => "pointer_enter",
            Self::PointerLeave => "pointer_leave",
            Self::Click => "click",
            Self::PanelClick => "panel_click",
            Self::Close => "close",
        }
    }
}

/// Result of feeding one event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: InspectionState,
    pub to: InspectionState,
    /// The event was consumed by the inspector; the host must stop it from
    /// propagating to ancestors.
    pub handled: bool,
}

impl Transition {
    /// A transition that leaves `state` untouched and lets the event through.
    pub const fn ignored(state: InspectionState) -> Self {
        Self {
            from: state,
            to: state,
            handled: false,
        }
    }

    /// Check if the state changed.
    #[inline]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Check if this transition opened the panel.
    #[inline]
    pub fn started_inspecting(&self) -> bool {
        !self.from.is_inspecting() && self.to.is_inspecting()
    }

    /// Check if this transition closed the panel.
    #[inline]
    pub fn stopped_inspecting(&self) -> bool {
        self.from.is_inspecting() && !self.to.is_inspecting()
    }
}

impl InspectionState {
    /// Compute the next state for `event`.
    #[must_use]
    pub fn on(self, event: InspectorEvent) -> Transition {
        use InspectionState::*;
        use InspectorEvent::*;

        let (to, handled) = match (self, event) {
            (Idle, PointerEnter) => (Hovering, false),
            (Hovering, PointerLeave) => (Idle, false),
            (Inspecting { .. }, PointerEnter) => (
                Inspecting {
                    pointer_inside: true,
                },
                false,
            ),
            (Inspecting { .. }, PointerLeave) => (
                Inspecting {
                    pointer_inside: false,
                },
                false,
            ),
            (Hovering, Click) => (
                Inspecting {
                    pointer_inside: true,
                },
                true,
            ),
            (
                Inspecting {
                    pointer_inside: true,
                },
                Click,
            ) => (Hovering, true),
            (Inspecting { .. }, PanelClick) => (self, true),
            (Inspecting { .. }, Close) => (Idle, true),
            (state, _) => (state, false),
        };

        Transition {
            from: self,
            to,
            handled,
        }
    }

    /// Check if the panel is open.
    #[inline]
    pub fn is_inspecting(self) -> bool {
        matches!(self, Self::Inspecting { .. })
    }

    /// Check if the hover badge should be shown.
    #[inline]
    pub fn shows_badge(self) -> bool {
        self == Self::Hovering
    }

    /// Check if the pointer is over the wrapper.
    #[inline]
    pub fn pointer_inside(self) -> bool {
        match self {
            Self::Idle => false,
            Self::Hovering => true,
            Self::Inspecting { pointer_inside } => pointer_inside,
        }
    }

    /// Stable string representation for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hovering => "hovering",
            Self::Inspecting { .. } => "inspecting",
        }
    }
}
