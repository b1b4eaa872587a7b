use crate::model::Orientation;

/// Identifies one load started by an orientation change. Completions
/// carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub orientation: Orientation,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct OrientationSwitch {
    active: Orientation,
    generation: u64,
}

impl OrientationSwitch {
    pub fn new(initial: Orientation) -> Self {
        Self {
            active: initial,
            generation: 0,
        }
    }

    pub fn active(&self) -> Orientation {
        self.active
    }

    /// Ticket for the load of the current key, e.g. on first mount.
    pub fn current_ticket(&self) -> LoadTicket {
        LoadTicket {
            orientation: self.active,
            generation: self.generation,
        }
    }

    /// Returns a ticket only when the orientation actually changed.
    pub fn observe(&mut self, orientation: Orientation) -> Option<LoadTicket> {
        if orientation == self.active {
            return None;
        }
        self.active = orientation;
        self.generation += 1;
        log::debug!("orientation -> {orientation} (generation {})", self.generation);
        Some(self.current_ticket())
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.orientation == self.active
    }
}
