//! Economy and world state touched by encounters: credits, statistics, log.

use serde::{Deserialize, Serialize};

use crate::encounter::EncounterKind;

/// Per-kind encounter counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterStats {
    pub evaded: u32,
    pub negotiated: u32,
    pub fled: u32,
    pub victory: u32,
    pub harassment: u32,
    pub boarding: u32,
}

impl EncounterStats {
    pub fn record(&mut self, kind: EncounterKind) {
        *self.counter_mut(kind) += 1;
    }

    pub fn count(&self, kind: EncounterKind) -> u32 {
        match kind {
            EncounterKind::Evaded => self.evaded,
            EncounterKind::Negotiated => self.negotiated,
            EncounterKind::Fled => self.fled,
            EncounterKind::Victory => self.victory,
            EncounterKind::Harassment => self.harassment,
            EncounterKind::Boarding => self.boarding,
        }
    }

    pub fn total(&self) -> u32 {
        EncounterKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    fn counter_mut(&mut self, kind: EncounterKind) -> &mut u32 {
        match kind {
            EncounterKind::Evaded => &mut self.evaded,
            EncounterKind::Negotiated => &mut self.negotiated,
            EncounterKind::Fled => &mut self.fled,
            EncounterKind::Victory => &mut self.victory,
            EncounterKind::Harassment => &mut self.harassment,
            EncounterKind::Boarding => &mut self.boarding,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Encounter,
    LevelUp,
    Arrival,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sim time in hours.
    pub timestamp: f64,
    pub kind: LogKind,
    pub text: String,
    /// Who or what the entry is about, usually a vessel name.
    pub subject: Option<String>,
}

/// Append-only game log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn append(&mut self, timestamp: f64, kind: LogKind, text: String, subject: Option<String>) {
        self.entries.push(LogEntry {
            timestamp,
            kind,
            text,
            subject,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn of_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldState {
    /// Never negative; debits clamp at zero.
    pub credits: u64,
    pub lifetime_earned: u64,
    /// Created on the first resolved encounter.
    pub encounter_stats: Option<EncounterStats>,
    pub log: EventLog,
    /// Hours since the game began.
    pub sim_time: f64,
    /// Piloting mastery-pool fill, 0–100 percent.
    pub piloting_mastery: f64,
}

impl WorldState {
    pub fn new(credits: u64) -> Self {
        Self {
            credits,
            ..Self::default()
        }
    }

    pub fn credit(&mut self, amount: u64) {
        self.credits = self.credits.saturating_add(amount);
        self.lifetime_earned = self.lifetime_earned.saturating_add(amount);
    }

    /// Remove up to `amount` credits; returns what was actually taken.
    pub fn debit(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.credits);
        self.credits -= taken;
        taken
    }

    pub fn stats(&self) -> Option<&EncounterStats> {
        self.encounter_stats.as_ref()
    }
}
