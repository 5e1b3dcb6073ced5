use super::Game;
use crate::types::*;
use rand::Rng;

/// Remove and return a uniformly random card, keeping the rest in order
fn pull<T, R: Rng>(deck: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if deck.is_empty() {
        return None;
    }
    let i = rng.random_range(0..deck.len());
    Some(deck.remove(i))
}

impl Game {
    /// Pick a random prompt card from the prompt deck
    pub(crate) fn pull_prompt_card(&mut self) -> Option<PromptCard> {
        pull(&mut self.prompt_deck, &mut self.rng)
    }

    /// Top up hands from the response deck, one card per player per pass in
    /// join order, until every hand is full or the deck runs out.
    /// `skip` (the round's host) is not dealt to.
    pub(crate) fn deal_hands(&mut self, skip: Option<&str>) {
        let limit = self.hand_limit;
        let mut dealt = 0;

        loop {
            let mut pulled_any = false;

            for i in 0..self.players.len() {
                let player = &self.players[i];
                if skip == Some(player.id.as_str()) || player.hand.len() >= limit {
                    continue;
                }

                let Some(card) = pull(&mut self.response_deck, &mut self.rng) else {
                    tracing::debug!("Response deck exhausted after dealing {} cards", dealt);
                    return;
                };

                self.players[i].hand.push(card);
                dealt += 1;
                pulled_any = true;
            }

            if !pulled_any {
                break;
            }
        }

        tracing::debug!(
            "Dealt {} response cards, {} left in deck",
            dealt,
            self.response_deck.len()
        );
    }
}
