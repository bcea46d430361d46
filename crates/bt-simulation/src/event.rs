use bt_core::PlantId;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    /// A plant was added to the population.
    PlantSpawned {
        /// The new plant.
        plant: PlantId,
        /// Its template type.
        kind: String,
    },
    /// A plant's inputs could not be met after a healthy tick.
    PlantWithered {
        /// The plant that went without.
        plant: PlantId,
    },
    /// A plant's inputs were met again after an unhealthy tick.
    PlantRecovered {
        /// The plant that recovered.
        plant: PlantId,
    },
    /// A plant's health reached zero.
    PlantDied {
        /// The plant that died.
        plant: PlantId,
        /// Its age at death, in ticks.
        age: u64,
    },
}

impl SimEventKind {
    /// The plant this event concerns.
    pub fn plant(&self) -> PlantId {
        match self {
            Self::PlantSpawned { plant, .. }
            | Self::PlantWithered { plant }
            | Self::PlantRecovered { plant }
            | Self::PlantDied { plant, .. } => *plant,
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events concerning the given plant.
    pub fn events_for_plant(&self, id: PlantId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.plant() == id).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
