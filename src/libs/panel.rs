//! Which detail panel is open.
//!
//! At most one panel is open at a time, and the state says which one and for
//! what. Transitions are a pure function of the current state and an event.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Maintenance,
    Downtime,
    Equipment,
    Summary,
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelKind::Maintenance => "maintenance",
            PanelKind::Downtime => "downtime",
            PanelKind::Equipment => "equipment",
            PanelKind::Summary => "summary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelState {
    #[default]
    Closed,
    Open { panel: PanelKind, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Open { panel: PanelKind, target: String },
    Close,
    Toggle { panel: PanelKind, target: String },
}

impl PanelState {
    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open { .. })
    }

    /// Target of the open panel of the given kind.
    pub fn target_of(&self, kind: PanelKind) -> Option<&str> {
        match self {
            PanelState::Open { panel, target } if *panel == kind => Some(target),
            _ => None,
        }
    }
}

pub fn reduce(state: PanelState, event: PanelEvent) -> PanelState {
    match event {
        PanelEvent::Open { panel, target } => PanelState::Open { panel, target },
        PanelEvent::Close => PanelState::Closed,
        PanelEvent::Toggle { panel, target } => match state {
            PanelState::Open {
                panel: open,
                target: ref current,
            } if open == panel && *current == target => PanelState::Closed,
            _ => PanelState::Open { panel, target },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(panel: PanelKind, target: &str) -> PanelEvent {
        PanelEvent::Open {
            panel,
            target: target.into(),
        }
    }

    fn toggle(panel: PanelKind, target: &str) -> PanelEvent {
        PanelEvent::Toggle {
            panel,
            target: target.into(),
        }
    }

    #[test]
    fn opening_replaces_other_panel() {
        let state = reduce(PanelState::Closed, open(PanelKind::Maintenance, "P1"));
        let state = reduce(state, open(PanelKind::Equipment, "CNC-2"));
        assert_eq!(state.target_of(PanelKind::Equipment), Some("CNC-2"));
        assert_eq!(state.target_of(PanelKind::Maintenance), None);
    }

    #[test]
    fn toggle_closes_only_same_panel_and_target() {
        let state = reduce(PanelState::Closed, toggle(PanelKind::Downtime, "P1"));
        assert!(state.is_open());

        let other = reduce(state.clone(), toggle(PanelKind::Downtime, "P2"));
        assert_eq!(other.target_of(PanelKind::Downtime), Some("P2"));

        assert_eq!(reduce(state, toggle(PanelKind::Downtime, "P1")), PanelState::Closed);
    }

    #[test]
    fn close_is_idempotent() {
        assert_eq!(reduce(PanelState::Closed, PanelEvent::Close), PanelState::Closed);
        let state = reduce(PanelState::Closed, open(PanelKind::Summary, "P1"));
        assert_eq!(reduce(state, PanelEvent::Close), PanelState::Closed);
    }
}
