use super::*;
use crate::{Event, EventBus, FavoriteEntry, TorchStep};
use tracing::info;

impl GameSession {
    fn reject_finalize(
        &self,
        reason: FinalizeError,
        step: TorchStep,
        events: &mut EventBus,
    ) -> FinalizeError {
        debug!(?reason, ?step, "finalize rejected");
        events.push(Event::FinalizeRejected { reason, step });
        reason
    }

    /// Left torch: lights the gate when the hand is complete.
    pub fn arm(&mut self, events: &mut EventBus) -> Result<(), FinalizeError> {
        if self.gameplay_locked() {
            return Err(self.reject_finalize(
                FinalizeError::AlreadyFinalized,
                TorchStep::Arm,
                events,
            ));
        }
        if !self.check_ready_for_finalize() {
            return Err(self.reject_finalize(
                FinalizeError::RequirementsNotMet,
                TorchStep::Arm,
                events,
            ));
        }
        self.left_torch_lit = true;
        events.push(Event::FinalizeArmed);
        Ok(())
    }

    /// Right torch: re-checks readiness before looking at the gate, so a hand
    /// broken up after arming reports `RequirementsNotMet`. Locks gameplay and
    /// returns the snapshot of all eight slots.
    pub fn confirm(&mut self, events: &mut EventBus) -> Result<FavoriteEntry, FinalizeError> {
        if self.gameplay_locked() {
            return Err(self.reject_finalize(
                FinalizeError::AlreadyFinalized,
                TorchStep::Confirm,
                events,
            ));
        }
        if !self.check_ready_for_finalize() {
            return Err(self.reject_finalize(
                FinalizeError::RequirementsNotMet,
                TorchStep::Confirm,
                events,
            ));
        }
        if !self.left_torch_lit {
            return Err(self.reject_finalize(FinalizeError::NotArmed, TorchStep::Confirm, events));
        }
        self.stage = FinalizeStage::Confirmed;
        let entry = self.snapshot();
        info!(generation = self.generation, hand = %entry, "game finalized");
        events.push(Event::FinalizeConfirmed { entry });
        Ok(entry)
    }

    pub fn snapshot(&self) -> FavoriteEntry {
        FavoriteEntry::new(self.slots.snapshot())
    }

    /// Marks the confirmed game as recorded. Has no effect before confirm.
    pub fn complete_finalize(&mut self) {
        if self.stage == FinalizeStage::Confirmed {
            self.stage = FinalizeStage::Completed;
        }
    }
}
