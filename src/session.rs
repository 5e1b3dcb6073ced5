use crate::action::{Action, ActionOutcome};
use crate::state::{Game, GameResult};
use crate::view::PlayerView;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to one game session.
///
/// Every action runs under the write lock, so callers on different tasks are
/// applied one at a time. Clones share the same game.
#[derive(Clone)]
pub struct Session {
    pub game: Arc<RwLock<Game>>,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self {
            game: Arc::new(RwLock::new(game)),
        }
    }

    /// Apply an action to the session's game
    pub async fn apply(&self, action: Action) -> GameResult<ActionOutcome> {
        let mut game = self.game.write().await;
        tracing::debug!("Applying {} to {}", action.name(), *game);
        action.apply(&mut game)
    }

    /// Build a player's view of the current state
    pub async fn view(&self, player_id: &str) -> GameResult<PlayerView> {
        PlayerView::new(&*self.game.read().await, player_id)
    }

    /// Copy of the current game state
    pub async fn snapshot(&self) -> Game {
        self.game.read().await.clone()
    }
}
