use super::*;
use crate::{choose_slot, Event, EventBus, PlacedCard};

impl GameSession {
    fn draw_precondition(&self) -> Result<(), DrawRejected> {
        if self.gameplay_locked() {
            return Err(DrawRejected::Finalizing);
        }
        if self.draw_in_flight {
            return Err(DrawRejected::AlreadyDrawing);
        }
        if self.counters.draws_done >= self.max_total_draws {
            return Err(DrawRejected::DrawLimitReached);
        }
        if self.deck.is_empty() {
            return Err(DrawRejected::DeckEmpty);
        }
        if self.slots.is_full() {
            return Err(DrawRejected::SlotsFull);
        }
        Ok(())
    }

    /// Takes the front card and picks its slot. The slot table is left alone
    /// until [`GameSession::commit_placement`]; no other draw is accepted in
    /// between.
    pub fn request_draw(&mut self, events: &mut EventBus) -> Result<Draw, DrawRejected> {
        if let Err(reason) = self.draw_precondition() {
            debug!(?reason, "draw rejected");
            events.push(Event::DrawRejected { reason });
            return Err(reason);
        }
        let Some(card_type) = self.deck.draw_front() else {
            events.push(Event::DrawRejected {
                reason: DrawRejected::DeckEmpty,
            });
            return Err(DrawRejected::DeckEmpty);
        };
        self.draw_in_flight = true;
        self.counters.draws_done += 1;
        if self.counters.initial_picks_done < self.initial_picks {
            self.counters.initial_picks_done += 1;
        }
        let card_id = self.alloc_card_id();
        let slot = choose_slot(card_type, &self.slots, &self.preferred_slots);
        debug!(
            card_id,
            %card_type,
            %slot,
            draws_done = self.counters.draws_done,
            "card drawn"
        );
        events.push(Event::CardRevealed {
            card_id,
            card_type,
            slot,
        });
        Ok(Draw {
            card_id,
            card_type,
            slot,
            draws_done: self.counters.draws_done,
        })
    }

    /// Lands a drawn card and releases the draw lock. Writes unconditionally;
    /// the caller is trusted to pass the slot chosen at draw time.
    pub fn commit_placement(&mut self, draw: Draw, events: &mut EventBus) -> Option<PlacedCard> {
        let replaced = self.slots.place(
            draw.slot,
            PlacedCard {
                id: draw.card_id,
                card_type: draw.card_type,
            },
        );
        self.draw_in_flight = false;
        debug!(card_id = draw.card_id, slot = %draw.slot, "card placed");
        events.push(Event::CardPlaced {
            card_id: draw.card_id,
            card_type: draw.card_type,
            slot: draw.slot,
            draws_done: draw.draws_done,
            max_draws: self.max_total_draws,
        });
        replaced
    }

    /// Empties a slot and puts out the left torch. Empty slots are ignored.
    pub fn discard_slot(&mut self, slot: SlotIndex, events: &mut EventBus) -> Option<PlacedCard> {
        if self.gameplay_locked() {
            return None;
        }
        let card = self.slots.take(slot)?;
        self.left_torch_lit = false;
        debug!(%slot, card_id = card.id, "slot discarded");
        events.push(Event::SlotDiscarded {
            slot,
            card_type: card.card_type,
        });
        Some(card)
    }
}
