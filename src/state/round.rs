use super::{Game, GameError, GameResult};
use crate::types::*;

impl Game {
    /// Start a new round:
    /// - pulls a prompt card
    /// - deals response cards to everyone but the host
    /// - switches the game to `AwaitingResponses`
    ///
    /// Only the host may start a round. Before the first round the host is
    /// the first player to have joined.
    ///
    /// A lone player can start a round, but nobody else can answer it, so the
    /// game stays in `AwaitingResponses` for good.
    pub fn start_round(&mut self, caller_id: &str) -> GameResult<()> {
        if !matches!(
            self.stage,
            Stage::New | Stage::AwaitingWinner | Stage::Final
        ) {
            return Err(GameError::BadStage {
                action: "start a round",
                stage: self.stage,
            });
        }

        if self.find_player(caller_id).is_none() {
            return Err(GameError::PlayerNotFound(caller_id.to_string()));
        }
        if self.current_host().map(|h| h.id.as_str()) != Some(caller_id) {
            return Err(GameError::NotHost(caller_id.to_string()));
        }

        // Nothing has been touched yet if this fails
        let Some(prompt) = self.pull_prompt_card() else {
            return Err(GameError::DeckExhausted);
        };

        tracing::info!(
            "Host {} starting round {}/{}: {}",
            caller_id,
            self.rounds_played + 1,
            self.rounds_total,
            prompt.text()
        );

        self.host = Some(caller_id.to_string());
        self.current_prompt = Some(prompt);
        self.deal_hands(Some(caller_id));
        self.answers.clear();
        self.stage = Stage::AwaitingResponses;

        Ok(())
    }

    /// Record a player's answer for the current round.
    /// Answering again replaces the previous answer. Once every non-host
    /// player has answered the game switches to `AwaitingWinner`.
    ///
    /// Returns whether all answers are in.
    pub fn answer(&mut self, caller_id: &str, card_id: &str) -> GameResult<bool> {
        if self.stage != Stage::AwaitingResponses {
            return Err(GameError::BadStage {
                action: "answer",
                stage: self.stage,
            });
        }

        let player = self
            .find_player(caller_id)
            .ok_or_else(|| GameError::PlayerNotFound(caller_id.to_string()))?;
        if self.host.as_deref() == Some(caller_id) {
            return Err(GameError::HostCannotAnswer);
        }

        let card = player
            .find_card(card_id)
            .cloned()
            .ok_or_else(|| GameError::CardNotHeld {
                player_id: caller_id.to_string(),
                card_id: card_id.to_string(),
            })?;

        if self.answers.insert(caller_id.to_string(), card).is_some() {
            tracing::debug!("Player {} replaced their answer", caller_id);
        }

        let all_answered = self.answers.len() == self.players.len().saturating_sub(1);
        if all_answered {
            tracing::info!("All {} answers received", self.answers.len());
            self.stage = Stage::AwaitingWinner;
        }

        Ok(all_answered)
    }

    /// Award the round to `winner_id`. Only the host may announce, and the
    /// host can never win their own round.
    ///
    /// When the last round has been played the game becomes `Final`; otherwise
    /// the host role passes to the next player, who starts the next round.
    /// The round's answers are cleared either way, so a decided round can't be
    /// announced twice.
    ///
    /// Returns whether the game is over.
    pub fn announce_winner(&mut self, caller_id: &str, winner_id: &str) -> GameResult<bool> {
        if self.stage != Stage::AwaitingWinner {
            return Err(GameError::BadStage {
                action: "announce round winner",
                stage: self.stage,
            });
        }
        // Answers are cleared once a winner is announced
        if self.answers.is_empty() {
            return Err(GameError::BadStage {
                action: "announce a winner twice",
                stage: self.stage,
            });
        }
        if self.host.as_deref() != Some(caller_id) {
            return Err(GameError::NotHost(caller_id.to_string()));
        }
        if caller_id == winner_id {
            return Err(GameError::HostCannotWin);
        }
        if self.find_player(winner_id).is_none() {
            return Err(GameError::PlayerNotFound(winner_id.to_string()));
        }

        let game_over = self.rounds_played + 1 >= self.rounds_total;
        let next_host = if game_over {
            None
        } else {
            Some(self.next_host()?.id.clone())
        };

        let Some(winner) = self.find_player_mut(winner_id) else {
            return Err(GameError::PlayerNotFound(winner_id.to_string()));
        };
        winner.score += 1;
        tracing::info!("Round won by {} (score {})", winner, winner.score);

        self.rounds_played += 1;
        self.answers.clear();
        match next_host {
            Some(id) => {
                tracing::info!("Host passes to {}", id);
                self.host = Some(id);
            }
            None => {
                tracing::info!("Game over after {} rounds", self.rounds_played);
                self.stage = Stage::Final;
            }
        }

        Ok(game_over)
    }
}
