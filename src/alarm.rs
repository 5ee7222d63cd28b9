use std::collections::HashMap;
use tracing::info;

/// Per-offer notification switches for the current session.
///
/// Keys appear on first toggle and are never removed; ids are not checked
/// against the loaded offers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlarmState {
    alarms: HashMap<String, bool>,
}

impl AlarmState {
    pub fn toggle(&mut self, offer_id: &str, new_state: bool) {
        self.alarms.insert(offer_id.to_string(), new_state);
    }

    pub fn is_active(&self, offer_id: &str) -> bool {
        self.get(offer_id).unwrap_or(false)
    }

    pub fn get(&self, offer_id: &str) -> Option<bool> {
        self.alarms.get(offer_id).copied()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &HashMap<String, bool> {
        &self.alarms
    }

    pub fn active_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .alarms
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Side effect run after an alarm toggles.
pub trait AlarmHook: Send + Sync {
    fn on_toggle(&self, offer_id: &str, active: bool);
}

/// Only records the change; nothing is scheduled or delivered.
pub struct LoggingAlarmHook;

impl AlarmHook for LoggingAlarmHook {
    fn on_toggle(&self, offer_id: &str, active: bool) {
        info!(
            "Alarm for offer {} is now {}",
            offer_id,
            if active { "ON" } else { "OFF" }
        );
    }
}
