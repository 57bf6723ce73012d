//! Watering coordinator — the single authority for pending watering
//! commands.
//!
//! The coordinator owns a lock-guarded map from plant id to the one pending
//! command for that plant. HTTP handlers queue into it; the device-poll
//! endpoint consumes from it. Every operation is an unconditional in-memory
//! step: nothing here performs IO, so collaborator failures cannot corrupt
//! this state.
//!
//! The map is process-local and lost on restart. For a single device on a
//! polling cadence that is acceptable: the next manual trigger or
//! auto-watering evaluation recreates the command.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use sprout_domain::command::PendingCommand;
use sprout_domain::id::PlantId;
use sprout_domain::moisture::{self, MoistureLevel};

/// Arbitrates the one-shot hand-off of watering commands to the polling
/// device, and hosts the pure moisture-evaluation helpers.
///
/// At most one command is pending per plant; queueing a second replaces the
/// first (latest request wins). A command is delivered at most once:
/// [`consume`](Self::consume) checks and removes under a single lock
/// acquisition, so two concurrent pollers can never both receive it.
#[derive(Debug, Default)]
pub struct WateringCoordinator {
    pending: Mutex<HashMap<PlantId, PendingCommand>>,
}

impl WateringCoordinator {
    /// Create a coordinator with no pending commands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the pending command for its plant.
    ///
    /// Returns the command that was displaced, if any, so the caller can
    /// log the dropped request. Validation (a positive duration) happened
    /// when the command was built; nothing here can fail.
    pub fn queue(&self, command: PendingCommand) -> Option<PendingCommand> {
        let mut pending = self.lock();
        pending.insert(command.plant_id.clone(), command)
    }

    /// Whether a command is waiting for this plant.
    ///
    /// Pure read; safe to call any number of times without affecting a
    /// later [`consume`](Self::consume).
    pub fn has_pending(&self, plant_id: &PlantId) -> bool {
        self.lock().contains_key(plant_id)
    }

    /// Atomically check for and remove the pending command.
    ///
    /// `None` means nothing was pending — an expected, non-exceptional
    /// state, not an error.
    pub fn consume(&self, plant_id: &PlantId) -> Option<PendingCommand> {
        self.lock().remove(plant_id)
    }

    /// Number of plants with a pending command.
    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    /// Classify a moisture reading. Pure; delegates to
    /// [`MoistureLevel::classify`].
    #[must_use]
    pub fn evaluate_moisture(
        moisture_percent: u8,
        threshold_percent: u8,
        critical_percent: u8,
    ) -> MoistureLevel {
        MoistureLevel::classify(moisture_percent, threshold_percent, critical_percent)
    }

    /// Decide whether a reading should raise an automatic command. Pure;
    /// delegates to [`moisture::should_auto_water`].
    #[must_use]
    pub fn should_auto_water(moisture_percent: u8, threshold_percent: u8, enabled: bool) -> bool {
        moisture::should_auto_water(moisture_percent, threshold_percent, enabled)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PlantId, PendingCommand>> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the map itself is always in a consistent state between operations.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_domain::command::CommandSource;
    use std::sync::{Arc, Barrier};

    fn command(duration: u32, source: CommandSource) -> PendingCommand {
        PendingCommand::builder()
            .duration_seconds(duration)
            .source(source)
            .build()
            .unwrap()
    }

    #[test]
    fn should_consume_nothing_when_never_queued() {
        let coordinator = WateringCoordinator::new();
        assert!(coordinator.consume(&PlantId::main()).is_none());
    }

    #[test]
    fn should_deliver_queued_command_exactly_once() {
        let coordinator = WateringCoordinator::new();
        coordinator.queue(command(5, CommandSource::Manual));

        assert!(coordinator.has_pending(&PlantId::main()));

        let delivered = coordinator.consume(&PlantId::main()).unwrap();
        assert_eq!(delivered.duration_seconds, 5);
        assert_eq!(delivered.source, CommandSource::Manual);

        assert!(coordinator.consume(&PlantId::main()).is_none());
    }

    #[test]
    fn should_keep_only_the_latest_command() {
        let coordinator = WateringCoordinator::new();
        coordinator.queue(command(5, CommandSource::Manual));
        let displaced = coordinator.queue(command(8, CommandSource::Automatic));

        assert_eq!(displaced.unwrap().duration_seconds, 5);

        let delivered = coordinator.consume(&PlantId::main()).unwrap();
        assert_eq!(delivered.duration_seconds, 8);
        assert!(coordinator.consume(&PlantId::main()).is_none());
    }

    #[test]
    fn should_not_change_state_when_checking_has_pending() {
        let coordinator = WateringCoordinator::new();
        coordinator.queue(command(3, CommandSource::Manual));

        for _ in 0..10 {
            assert!(coordinator.has_pending(&PlantId::main()));
        }

        assert!(coordinator.consume(&PlantId::main()).is_some());
        assert!(!coordinator.has_pending(&PlantId::main()));
    }

    #[test]
    fn should_track_pending_commands_per_plant() {
        let coordinator = WateringCoordinator::new();
        let balcony = PlantId::new("balcony").unwrap();

        coordinator.queue(command(3, CommandSource::Manual));
        coordinator.queue(
            PendingCommand::builder()
                .plant_id(balcony.clone())
                .duration_seconds(7)
                .build()
                .unwrap(),
        );

        assert_eq!(coordinator.pending_count(), 2);
        assert_eq!(coordinator.consume(&balcony).unwrap().duration_seconds, 7);
        assert_eq!(coordinator.pending_count(), 1);
        assert!(coordinator.has_pending(&PlantId::main()));
    }

    #[test]
    fn should_deliver_to_exactly_one_of_many_concurrent_consumers() {
        let coordinator = Arc::new(WateringCoordinator::new());
        coordinator.queue(command(5, CommandSource::Manual));

        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    coordinator.consume(&PlantId::main())
                })
            })
            .collect();

        let delivered = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap())
            .count();
        assert_eq!(delivered, 1);
    }

    #[test]
    fn should_evaluate_moisture_through_the_coordinator() {
        assert_eq!(
            WateringCoordinator::evaluate_moisture(15, 30, 20),
            MoistureLevel::Critical
        );
        assert_eq!(
            WateringCoordinator::evaluate_moisture(25, 30, 20),
            MoistureLevel::Low
        );
        assert_eq!(
            WateringCoordinator::evaluate_moisture(35, 30, 20),
            MoistureLevel::Normal
        );
    }

    #[test]
    fn should_gate_auto_watering_on_flag_and_threshold() {
        assert!(WateringCoordinator::should_auto_water(25, 30, true));
        assert!(!WateringCoordinator::should_auto_water(35, 30, true));
        assert!(!WateringCoordinator::should_auto_water(10, 30, false));
    }
}
