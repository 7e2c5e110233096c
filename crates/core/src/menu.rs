use crate::error::Result;

/// An ordered list of choices shown on a gesture.  Built fresh for every
/// dispatch and dropped right after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<String>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, label: impl Into<String>) -> &mut Self {
        self.items.push(label.into());
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of showing a [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Selected(usize),
    Cancelled,
}

/// Presents a [`Menu`] to the user and blocks until a choice is made.
///
/// `anchor` names the widget the menu belongs to, so presenters can title or
/// position the popup.
pub trait ActionMenu: Send + Sync + std::fmt::Debug {
    fn show(&self, menu: &Menu, anchor: &str) -> Result<MenuSelection>;
}
