//! Exclusive (radio-style) selection over a fixed set of options.

/// A group of options where exactly one is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup<T> {
    options: Vec<T>,
    selected: usize,
}

impl<T: Copy + PartialEq> ExclusiveGroup<T> {
    /// Create a group selecting its first option. Returns `None` when `options` is empty.
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = T>) -> Option<Self> {
        let options: Vec<T> = options.into_iter().collect();
        if options.is_empty() {
            return None;
        }
        Some(Self {
            options,
            selected: 0,
        })
    }

    /// Select `option`. Returns `false` (and changes nothing) when it is not in the group.
    pub fn select(&mut self, option: T) -> bool {
        match self.options.iter().position(|o| *o == option) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// The selected option.
    #[must_use]
    pub fn selected(&self) -> T {
        self.options[self.selected]
    }

    /// Position of the selected option.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Whether `option` is the selected one.
    #[must_use]
    pub fn is_selected(&self, option: T) -> bool {
        self.selected() == option
    }

    /// All options paired with their selection flag, in order.
    pub fn marks(&self) -> impl Iterator<Item = (T, bool)> + '_ {
        self.options
            .iter()
            .enumerate()
            .map(move |(i, o)| (*o, i == self.selected))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`: a group cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tool;

    #[test]
    fn empty_group_is_rejected() {
        assert!(ExclusiveGroup::<Tool>::new([]).is_none());
    }

    #[test]
    fn exactly_one_marked_after_each_select() {
        let mut group = ExclusiveGroup::new(Tool::ALL).expect("non-empty");
        for tool in Tool::ALL {
            assert!(group.select(tool));
            let marked: Vec<Tool> = group
                .marks()
                .filter_map(|(t, on)| on.then_some(t))
                .collect();
            assert_eq!(marked, vec![tool]);
        }
    }

    #[test]
    fn unknown_option_leaves_selection() {
        let mut group = ExclusiveGroup::new([1, 2, 3]).expect("non-empty");
        assert!(group.select(3));
        assert!(!group.select(9));
        assert_eq!(group.selected(), 3);
        assert_eq!(group.selected_index(), 2);
    }
}
