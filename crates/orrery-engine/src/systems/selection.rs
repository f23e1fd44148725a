/// Which primary body, if any, is highlighted and labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    selected: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `index` if it names one of `primary_count` bodies.
    /// Out-of-range requests leave the selection as it was. Returns whether it applied.
    pub fn select(&mut self, index: usize, primary_count: usize) -> bool {
        if index < primary_count {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }
}
