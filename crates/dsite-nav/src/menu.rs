//! Menu presentation state machine.
//!
//! The machine is a plain `Copy` value: [`MenuStateMachine::transition`]
//! returns the next machine without touching the current one, and
//! [`MenuStateMachine::handle`] applies it in place.

use std::fmt;
use std::str::FromStr;

use crate::NavError;

/// Viewport breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Enormous,
}

impl Breakpoint {
    /// Whether the menu is shown as an overlay at this breakpoint.
    pub fn is_compact(self) -> bool {
        matches!(self, Self::Tiny | Self::Small)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
            Self::Enormous => "enormous",
        }
    }
}

impl FromStr for Breakpoint {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "huge" => Ok(Self::Huge),
            "enormous" => Ok(Self::Enormous),
            _ => Err(NavError::UnknownBreakpoint(s.to_owned())),
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// Compact breakpoint, overlay hidden.
    Collapsed,
    /// Compact breakpoint, overlay visible.
    CompactOpen,
    /// Regular breakpoint, menu visible.
    PinnedOpen,
    /// Regular breakpoint, menu hidden by the user.
    PinnedClosed,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::CompactOpen | Self::PinnedOpen)
    }

    pub fn is_compact(self) -> bool {
        matches!(self, Self::Collapsed | Self::CompactOpen)
    }
}

/// Input to the menu state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The viewport moved to a new breakpoint.
    BreakpointChanged(Breakpoint),
    Open,
    Close,
    /// Toolbar toggle: open when hidden, close when visible.
    Toggle,
    /// A leaf menu item was selected.
    TerminalSelection,
    /// Focus left the overlay.
    DismissOutside,
}

/// Menu state plus the breakpoint and the remembered pinned preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuStateMachine {
    state: MenuState,
    breakpoint: Breakpoint,
    /// Whether the regular layout should show the menu; kept across
    /// compact periods.
    pinned_open: bool,
}

impl MenuStateMachine {
    /// Start a session at `breakpoint`: `PinnedOpen`, or `Collapsed` when
    /// compact.
    pub fn new(breakpoint: Breakpoint) -> Self {
        let state = if breakpoint.is_compact() {
            MenuState::Collapsed
        } else {
            MenuState::PinnedOpen
        };
        Self {
            state,
            breakpoint,
            pinned_open: true,
        }
    }

    /// Next machine after `event`.
    #[must_use]
    pub fn transition(self, event: MenuEvent) -> Self {
        let compact = self.state.is_compact();
        let mut next = self;
        match event {
            MenuEvent::BreakpointChanged(breakpoint) => {
                next.breakpoint = breakpoint;
                if breakpoint.is_compact() && !compact {
                    next.state = MenuState::Collapsed;
                } else if !breakpoint.is_compact() && compact {
                    next.state = if self.pinned_open {
                        MenuState::PinnedOpen
                    } else {
                        MenuState::PinnedClosed
                    };
                }
            }
            MenuEvent::Open if compact => next.state = MenuState::CompactOpen,
            MenuEvent::Open => {
                next.state = MenuState::PinnedOpen;
                next.pinned_open = true;
            }
            MenuEvent::Close if compact => next.state = MenuState::Collapsed,
            MenuEvent::Close => {
                next.state = MenuState::PinnedClosed;
                next.pinned_open = false;
            }
            MenuEvent::Toggle => {
                let event = if self.state.is_open() {
                    MenuEvent::Close
                } else {
                    MenuEvent::Open
                };
                return self.transition(event);
            }
            MenuEvent::TerminalSelection | MenuEvent::DismissOutside => {
                if self.state == MenuState::CompactOpen {
                    next.state = MenuState::Collapsed;
                }
            }
        }
        next
    }

    /// Apply `event` and return the new state.
    pub fn handle(&mut self, event: MenuEvent) -> MenuState {
        let previous = self.state;
        *self = self.transition(event);
        if previous != self.state {
            tracing::debug!(?event, from = ?previous, to = ?self.state, "Menu state changed");
        }
        self.state
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Whether the regular layout will show the menu.
    pub fn is_pinned_open(&self) -> bool {
        self.pinned_open
    }
}
