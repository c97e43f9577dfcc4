use vidshelf_model::MediaItemId;

/// What [`Playlist::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistChange {
    Added,
    Removed,
}

/// Locally saved items, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<MediaItemId>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it otherwise.
    pub fn toggle(&mut self, id: MediaItemId) -> PlaylistChange {
        match self.items.iter().position(|saved| saved == &id) {
            Some(position) => {
                self.items.remove(position);
                PlaylistChange::Removed
            }
            None => {
                self.items.push(id);
                PlaylistChange::Added
            }
        }
    }

    pub fn contains(&self, id: &MediaItemId) -> bool {
        self.items.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItemId> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> MediaItemId {
        MediaItemId::new(raw).expect("valid id")
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut playlist = Playlist::new();

        assert_eq!(playlist.toggle(id("a")), PlaylistChange::Added);
        assert_eq!(playlist.toggle(id("b")), PlaylistChange::Added);
        assert!(playlist.contains(&id("a")));

        assert_eq!(playlist.toggle(id("a")), PlaylistChange::Removed);
        assert!(!playlist.contains(&id("a")));
        assert_eq!(playlist.iter().collect::<Vec<_>>(), vec![&id("b")]);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut playlist = Playlist::new();
        for raw in ["c", "a", "b"] {
            playlist.toggle(id(raw));
        }
        let order: Vec<&str> = playlist.iter().map(MediaItemId::as_str).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
