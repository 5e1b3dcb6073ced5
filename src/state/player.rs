use super::{Game, GameError, GameResult};
use crate::types::*;

/// Normalize a display name for duplicate comparison (trim whitespace, lowercase)
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Game {
    /// Add a new player by name. Only allowed before the first round.
    pub fn join(&mut self, name: &str) -> GameResult<PlayerId> {
        if self.stage != Stage::New {
            return Err(GameError::BadStage {
                action: "join the game",
                stage: self.stage,
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        let normalized = normalize(name);
        if self.players.iter().any(|p| normalize(&p.name) == normalized) {
            return Err(GameError::DuplicateName(name.to_string()));
        }

        let player = Player::new(name);
        let id = player.id.clone();
        tracing::info!("Player joined: {}", player);
        self.players.push(player);

        Ok(id)
    }

    /// Player with the given ID, if participating
    pub fn find_player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn find_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The host, or the first joiner while the game has not started
    pub fn current_host(&self) -> Option<&Player> {
        match &self.host {
            Some(id) => self.find_player(id),
            None if self.stage == Stage::New => self.players.first(),
            None => None,
        }
    }

    /// Player following the current host in join order, wrapping around.
    /// Without an established host this is the first joiner.
    pub fn next_host(&self) -> GameResult<&Player> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let Some(host_id) = &self.host else {
            return Ok(&self.players[0]);
        };

        self.players
            .iter()
            .position(|p| &p.id == host_id)
            .map(|i| &self.players[(i + 1) % self.players.len()])
            .ok_or(GameError::HostDesync)
    }

    /// Non-host players that have not answered this round, in join order
    pub fn awaiting_answers(&self) -> Vec<&Player> {
        if self.stage != Stage::AwaitingResponses {
            return Vec::new();
        }

        self.players
            .iter()
            .filter(|p| Some(&p.id) != self.host.as_ref() && !self.answers.contains_key(&p.id))
            .collect()
    }
}
