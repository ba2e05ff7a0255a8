//! Playlist screen state: cursor over the curated catalog plus the
//! in-memory favorite set. Dropped wholesale when the user navigates away.

use std::collections::HashSet;

pub struct PlaylistState {
    pub selected: usize,
    favorites: HashSet<u32>,
}

impl PlaylistState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            favorites: HashSet::new(),
        }
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Flip favorite membership for a track id. No size bound, no errors.
    pub fn toggle_favorite(&mut self, id: u32) {
        if !self.favorites.insert(id) {
            self.favorites.remove(&id);
        }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut s = PlaylistState::new();
        assert!(!s.is_favorite(2));

        s.toggle_favorite(2);
        assert!(s.is_favorite(2));
        assert_eq!(s.favorite_count(), 1);

        s.toggle_favorite(2);
        assert!(!s.is_favorite(2));
        assert_eq!(s.favorite_count(), 0);
    }

    #[test]
    fn selection_wraps_and_survives_empty_lists() {
        let mut s = PlaylistState::new();
        s.next(3);
        s.next(3);
        s.next(3);
        assert_eq!(s.selected, 0);
        s.prev(3);
        assert_eq!(s.selected, 2);

        let mut empty = PlaylistState::new();
        empty.next(0);
        empty.prev(0);
        assert_eq!(empty.selected, 0);
    }
}
