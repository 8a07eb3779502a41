//! Shared playback state for the web app's persistent player bar.
//!
//! The context tracks the queue and playback flags; actual audio output is
//! the embedding application's concern. Observers subscribe to a watch
//! channel instead of polling.

use crate::contracts::Playback;
use crate::models::EpisodeViewModel;
use rand::Rng;
use tokio::sync::watch;

/// Everything an observer needs to render the player bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub episodes: Vec<EpisodeViewModel>,
    pub current_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

impl PlayerState {
    pub fn current_episode(&self) -> Option<&EpisodeViewModel> {
        self.episodes.get(self.current_index)
    }

    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.episodes.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }
}

/// The injected player collaborator shared by every episode page.
pub struct PlayerContext {
    state: watch::Sender<PlayerState>,
}

impl PlayerContext {
    pub fn new() -> PlayerContext {
        let (state, _) = watch::channel(PlayerState::default());
        PlayerContext { state }
    }

    /// Observe every change to the player state.
    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state.subscribe()
    }

    /// A copy of the state as of this call.
    pub fn snapshot(&self) -> PlayerState {
        self.state.borrow().clone()
    }

    /// Play a single episode, replacing the current queue.
    pub fn play(&self, episode: EpisodeViewModel) {
        self.state.send_modify(|state| {
            state.episodes = vec![episode];
            state.current_index = 0;
            state.is_playing = true;
        });
    }

    /// Play `episodes` starting from the one at `index`.
    pub fn play_list(&self, episodes: Vec<EpisodeViewModel>, index: usize) {
        self.state.send_modify(|state| {
            state.current_index = if index < episodes.len() { index } else { 0 };
            state.episodes = episodes;
            state.is_playing = true;
        });
    }

    pub fn toggle_play(&self) {
        self.state
            .send_modify(|state| state.is_playing = !state.is_playing);
    }

    /// For surfaces whose audio element reports play/pause on its own.
    pub fn set_playing_state(&self, playing: bool) {
        self.state.send_modify(|state| state.is_playing = playing);
    }

    pub fn toggle_loop(&self) {
        self.state
            .send_modify(|state| state.is_looping = !state.is_looping);
    }

    pub fn toggle_shuffle(&self) {
        self.state
            .send_modify(|state| state.is_shuffling = !state.is_shuffling);
    }

    pub fn has_next(&self) -> bool {
        self.state.borrow().has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.borrow().has_previous()
    }

    /// Skip forward: a random queue entry while shuffling, the next entry
    /// otherwise. Skipping past the end is a no-op.
    pub fn play_next(&self) {
        self.state.send_modify(|state| {
            if state.is_shuffling && !state.episodes.is_empty() {
                state.current_index = rand::rng().random_range(0..state.episodes.len());
            } else if state.current_index + 1 < state.episodes.len() {
                state.current_index += 1;
            }
        });
    }

    /// Skip backward; a no-op on the first queue entry.
    pub fn play_previous(&self) {
        self.state.send_modify(|state| {
            if state.current_index > 0 {
                state.current_index -= 1;
            }
        });
    }

    /// The audio element finished the current episode. Looping replays it,
    /// otherwise the queue advances, and after the last entry the player
    /// resets entirely.
    pub fn handle_episode_ended(&self) {
        if self.state.borrow().is_looping {
            return;
        }
        if self.has_next() {
            self.play_next();
        } else {
            self.clear();
        }
    }

    /// Drop the queue and reset every flag except shuffle/loop preferences.
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            state.episodes = Vec::new();
            state.current_index = 0;
            state.is_playing = false;
        });
    }
}

impl Default for PlayerContext {
    fn default() -> Self {
        PlayerContext::new()
    }
}

impl Playback for PlayerContext {
    fn play(&self, episode: EpisodeViewModel) {
        PlayerContext::play(self, episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::RenderSurface;

    fn episode(id: &str) -> EpisodeViewModel {
        EpisodeViewModel {
            id: String::from(id),
            title: format!("Faladev | {}", id),
            members: String::from("Diego Fernandes"),
            thumbnail: String::from("https://cdn.example.org/cover.jpg"),
            published_at: String::from("15 mar 21"),
            duration: 3600,
            duration_as_string: String::from("01:00:00"),
            description: String::from("Sem descrição."),
            url: String::from("https://cdn.example.org/audio.mp3"),
        }
    }

    fn queued_player(ids: &[&str]) -> PlayerContext {
        let player = PlayerContext::new();
        player.play_list(ids.iter().map(|id| episode(id)).collect(), 0);
        player
    }

    #[test]
    fn play_replaces_the_queue_with_one_episode() {
        // Arrange
        let player = queued_player(&["faladev-30", "speechless"]);

        // Act
        player.play(episode("a-arte-de-escutar"));

        // Assert
        let state = player.snapshot();
        assert_eq!(1, state.episodes.len());
        assert_eq!(0, state.current_index);
        assert!(state.is_playing);
        assert_eq!("a-arte-de-escutar", state.current_episode().unwrap().id)
    }

    #[test]
    fn play_list_starts_at_the_given_index() {
        // Arrange
        let player = PlayerContext::new();

        // Act
        player.play_list(vec![episode("a"), episode("b"), episode("c")], 1);

        // Assert
        let state = player.snapshot();
        assert_eq!("b", state.current_episode().unwrap().id);
        assert!(state.is_playing)
    }

    #[test]
    fn play_list_with_an_out_of_range_index_starts_at_the_beginning() {
        // Arrange
        let player = PlayerContext::new();

        // Act
        player.play_list(vec![episode("a"), episode("b")], 9);

        // Assert
        assert_eq!("a", player.snapshot().current_episode().unwrap().id)
    }

    #[test]
    fn toggle_play_flips_the_playing_flag() {
        // Arrange
        let player = queued_player(&["a"]);

        // Act
        player.toggle_play();

        // Assert
        assert!(!player.snapshot().is_playing);
        player.toggle_play();
        assert!(player.snapshot().is_playing)
    }

    #[test]
    fn play_next_advances_linearly() {
        // Arrange
        let player = queued_player(&["a", "b", "c"]);

        // Act
        player.play_next();

        // Assert
        assert_eq!("b", player.snapshot().current_episode().unwrap().id)
    }

    #[test]
    fn play_next_past_the_end_is_a_noop() {
        // Arrange
        let player = queued_player(&["a", "b"]);
        player.play_next();

        // Act
        player.play_next();

        // Assert
        assert_eq!("b", player.snapshot().current_episode().unwrap().id)
    }

    #[test]
    fn play_previous_on_the_first_entry_is_a_noop() {
        // Arrange
        let player = queued_player(&["a", "b"]);

        // Act
        player.play_previous();

        // Assert
        assert_eq!("a", player.snapshot().current_episode().unwrap().id)
    }

    #[test]
    fn shuffling_always_offers_a_next_episode() {
        // Arrange
        let player = queued_player(&["a"]);
        assert!(!player.has_next());

        // Act
        player.toggle_shuffle();

        // Assert
        assert!(player.has_next())
    }

    #[test]
    fn play_next_while_shuffling_stays_inside_the_queue() {
        // Arrange
        let player = queued_player(&["a", "b", "c"]);
        player.toggle_shuffle();

        // Act
        player.play_next();

        // Assert
        assert!(player.snapshot().current_index < 3)
    }

    #[test]
    fn an_ended_episode_replays_while_looping() {
        // Arrange
        let player = queued_player(&["a", "b"]);
        player.toggle_loop();

        // Act
        player.handle_episode_ended();

        // Assert
        let state = player.snapshot();
        assert_eq!("a", state.current_episode().unwrap().id);
        assert!(state.is_playing)
    }

    #[test]
    fn the_last_ended_episode_resets_the_player() {
        // Arrange
        let player = queued_player(&["a"]);

        // Act
        player.handle_episode_ended();

        // Assert
        let state = player.snapshot();
        assert!(state.episodes.is_empty());
        assert_eq!(0, state.current_index);
        assert!(!state.is_playing)
    }

    #[test]
    fn subscribers_observe_state_changes() {
        // Arrange
        let player = PlayerContext::new();
        let mut changes = player.subscribe();

        // Act
        player.play(episode("faladev-30"));

        // Assert
        assert!(changes.has_changed().unwrap());
        assert_eq!(
            "faladev-30",
            changes.borrow_and_update().current_episode().unwrap().id
        );
    }

    #[test]
    fn a_render_surface_can_start_playback_through_the_capability() {
        // Arrange
        struct PlayButtonSurface;

        impl RenderSurface for PlayButtonSurface {
            fn render(&self, episode: &EpisodeViewModel, playback: &dyn Playback) {
                playback.play(episode.clone());
            }
        }

        let player = PlayerContext::new();
        let page_episode = episode("faladev-30");

        // Act
        PlayButtonSurface.render(&page_episode, &player);

        // Assert
        let state = player.snapshot();
        assert!(state.is_playing);
        assert_eq!("faladev-30", state.current_episode().unwrap().id)
    }
}
