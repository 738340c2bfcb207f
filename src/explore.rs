// File: src/explore.rs
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedBook {
    pub title: &'static str,
    pub author: &'static str,
    pub blurb: &'static str,
}

impl FeaturedBook {
    /// Catalog query used when the user jumps from the explore tab to search.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.author)
    }
}

pub const FEATURED: &[FeaturedBook] = &[
    FeaturedBook {
        title: "Harry Potter",
        author: "J.K. Rowling",
        blurb: "The Harry Potter series follows the journey of a young wizard, Harry, and his friends Hermione and Ron, as they battle the dark wizard Lord Voldemort.",
    },
    FeaturedBook {
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        blurb: "A fantasy novel that tells the story of Bilbo Baggins, a hobbit who embarks on a thrilling quest to recover a treasure guarded by the dragon Smaug.",
    },
    FeaturedBook {
        title: "Pride and Prejudice",
        author: "Jane Austen",
        blurb: "Jane Austen's classic novel explores themes of love, class, and family through the story of Elizabeth Bennet and Mr. Darcy.",
    },
    FeaturedBook {
        title: "1984",
        author: "George Orwell",
        blurb: "George Orwell's dystopian novel delves into themes of surveillance, totalitarianism, and the loss of individuality in a grim future society.",
    },
];

/// Which featured entries currently show their blurb.
#[derive(Debug, Clone, Default)]
pub struct ExploreState {
    expanded: HashSet<usize>,
}

impl ExploreState {
    pub fn toggle(&mut self, index: usize) {
        if index >= FEATURED.len() {
            return;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_start_collapsed_and_toggle() {
        let mut state = ExploreState::default();
        assert!((0..FEATURED.len()).all(|i| !state.is_expanded(i)));

        state.toggle(1);
        state.toggle(3);
        assert!(state.is_expanded(1));
        assert!(state.is_expanded(3));

        state.toggle(1);
        assert!(!state.is_expanded(1));

        state.collapse_all();
        assert!(!state.is_expanded(3));
    }

    #[test]
    fn test_out_of_range_toggle_is_ignored() {
        let mut state = ExploreState::default();
        state.toggle(FEATURED.len());
        assert!(!state.is_expanded(FEATURED.len()));
    }

    #[test]
    fn test_search_query_includes_author() {
        assert_eq!(FEATURED[1].search_query(), "The Hobbit J.R.R. Tolkien");
    }
}
