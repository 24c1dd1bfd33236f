//! Rotation state machine.
//!
//! Pure, synchronous state: the timer lives in [`crate::ticker`] and the
//! collection lives in the gallery store. The controller only tracks the
//! current pointer and play state, and remaps the pointer whenever the
//! collection is mutated out from under it.

use tracing::debug;

use crate::error::{Result, RotationError};

/// Whether automatic rotation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Tracks the "current" item of an ordered collection.
///
/// The pointer is always a valid index while the collection is non-empty and
/// `None` while it is empty. It is re-derived on every order change, never
/// left stale.
#[derive(Debug, Clone)]
pub struct RotationController {
    state: PlayState,
    current_index: Option<usize>,
    len: usize,
}

impl RotationController {
    /// Create a controller for an empty collection, in the Playing state.
    pub fn new() -> Self {
        Self {
            state: PlayState::Playing,
            current_index: None,
            len: 0,
        }
    }

    /// Current play state.
    pub fn play_state(&self) -> PlayState {
        self.state
    }

    /// Returns `true` while automatic rotation is active.
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Index of the current item, or `None` while the collection is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Size of the collection as last reported via [`Self::on_order_changed`].
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the timer should be running: rotation only makes
    /// sense while Playing with more than one item.
    pub fn wants_ticks(&self) -> bool {
        self.is_playing() && self.len > 1
    }

    /// Timer-driven advance. A no-op unless Playing with more than one item.
    ///
    /// Returns the new index when the pointer moved.
    pub fn tick(&mut self) -> Option<usize> {
        if !self.wants_ticks() {
            return None;
        }

        let next = (self.current_index? + 1) % self.len;
        self.current_index = Some(next);
        Some(next)
    }

    /// Stop automatic rotation. The pointer is untouched.
    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    /// Restart automatic rotation from the unchanged pointer.
    pub fn resume(&mut self) {
        self.state = PlayState::Playing;
    }

    /// Explicit user jump to `index`. Play state is unchanged.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if `index` is not a valid position.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(RotationError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        self.current_index = Some(index);
        Ok(())
    }

    /// Manual advance with wraparound. Works while Paused.
    pub fn next(&mut self) -> Option<usize> {
        let next = (self.current_index? + 1) % self.len;
        self.current_index = Some(next);
        Some(next)
    }

    /// Manual step back with wraparound. Works while Paused.
    pub fn previous(&mut self) -> Option<usize> {
        let current = self.current_index?;
        let prev = if current == 0 { self.len - 1 } else { current - 1 };
        self.current_index = Some(prev);
        Some(prev)
    }

    /// Remap the pointer after a committed insert/remove/reorder.
    ///
    /// Keeps pointing at the same logical item whenever it still exists. If
    /// the current item itself was removed, the pointer stays at the removed
    /// item's old position (clamped to the new end), i.e. it lands on the item
    /// that slid into that slot. An emptied collection clears the pointer; a
    /// collection that just became non-empty starts at index 0.
    pub fn on_order_changed(&mut self, old_ids: &[String], new_ids: &[String]) {
        self.len = new_ids.len();

        if new_ids.is_empty() {
            self.current_index = None;
            return;
        }

        let remapped = match self.current_index {
            None => 0,
            Some(index) => match old_ids.get(index) {
                Some(current_id) => new_ids
                    .iter()
                    .position(|id| id == current_id)
                    .unwrap_or_else(|| index.min(new_ids.len() - 1)),
                // Pointer was stale relative to the reported old order; clamp.
                None => index.min(new_ids.len() - 1),
            },
        };

        if self.current_index != Some(remapped) {
            debug!(
                from = ?self.current_index,
                to = remapped,
                "Remapped rotation pointer"
            );
        }
        self.current_index = Some(remapped);
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn controller_with(names: &[&str]) -> RotationController {
        let mut controller = RotationController::new();
        controller.on_order_changed(&[], &ids(names));
        controller
    }

    #[test]
    fn test_starts_empty_and_playing() {
        let controller = RotationController::new();
        assert!(controller.is_playing());
        assert_eq!(controller.current_index(), None);
        assert!(!controller.wants_ticks());
    }

    #[test]
    fn test_first_item_sets_index_zero() {
        let controller = controller_with(&["a"]);
        assert_eq!(controller.current_index(), Some(0));
        // A single item never rotates.
        assert!(!controller.wants_ticks());
    }

    #[test]
    fn test_tick_cycles_through_collection() {
        let mut controller = controller_with(&["a", "b", "c"]);

        assert_eq!(controller.tick(), Some(1));
        assert_eq!(controller.tick(), Some(2));
        assert_eq!(controller.tick(), Some(0));
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.pause();

        assert_eq!(controller.tick(), None);
        assert_eq!(controller.current_index(), Some(0));

        controller.resume();
        assert_eq!(controller.tick(), Some(1));
    }

    #[test]
    fn test_pause_resume_do_not_move_pointer() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.select(2).unwrap();

        controller.pause();
        assert_eq!(controller.current_index(), Some(2));
        controller.resume();
        assert_eq!(controller.current_index(), Some(2));
    }

    #[test]
    fn test_select_bounds() {
        let mut controller = controller_with(&["a", "b"]);

        assert!(controller.select(1).is_ok());
        assert!(matches!(
            controller.select(2),
            Err(RotationError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(controller.current_index(), Some(1));
    }

    #[test]
    fn test_select_keeps_play_state() {
        let mut controller = controller_with(&["a", "b"]);
        controller.pause();
        controller.select(1).unwrap();
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_manual_navigation_wraps_and_ignores_pause() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.pause();

        assert_eq!(controller.previous(), Some(2));
        assert_eq!(controller.next(), Some(0));
        assert_eq!(controller.next(), Some(1));
    }

    #[test]
    fn test_remap_follows_item_across_reorder() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.select(1).unwrap(); // pointing at "b"

        // "c" moves to the front: [c, a, b]
        controller.on_order_changed(&ids(&["a", "b", "c"]), &ids(&["c", "a", "b"]));
        assert_eq!(controller.current_index(), Some(2));
    }

    #[test]
    fn test_remap_keeps_item_when_earlier_item_removed() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.select(1).unwrap(); // pointing at "b"

        // Removing "a" must not shift the pointer onto a different item.
        controller.on_order_changed(&ids(&["a", "b", "c"]), &ids(&["b", "c"]));
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn test_remap_advances_when_current_item_removed() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.select(1).unwrap(); // pointing at "b"

        // "b" removed: pointer stays at old position 1, now occupied by "c".
        controller.on_order_changed(&ids(&["a", "b", "c"]), &ids(&["a", "c"]));
        assert_eq!(controller.current_index(), Some(1));
    }

    #[test]
    fn test_remap_clamps_when_last_item_removed() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.select(2).unwrap(); // pointing at "c"

        controller.on_order_changed(&ids(&["a", "b", "c"]), &ids(&["a", "b"]));
        assert_eq!(controller.current_index(), Some(1));
    }

    #[test]
    fn test_remap_to_empty_clears_pointer() {
        let mut controller = controller_with(&["a"]);

        controller.on_order_changed(&ids(&["a"]), &[]);
        assert_eq!(controller.current_index(), None);
        assert!(controller.is_empty());

        // Growing from empty starts over at index 0.
        controller.on_order_changed(&[], &ids(&["b"]));
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn test_shrink_to_one_disables_ticks_without_pausing() {
        let mut controller = controller_with(&["a", "b"]);
        assert!(controller.wants_ticks());

        controller.on_order_changed(&ids(&["a", "b"]), &ids(&["a"]));
        assert!(!controller.wants_ticks());
        assert!(controller.is_playing());
    }
}
