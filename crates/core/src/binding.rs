use crate::gesture::Gesture;
use std::collections::HashMap;

/// Gesture → action lookup owned by a module.
///
/// `A` is the module's closed action enum.  Built once at construction;
/// binding a gesture twice keeps the last action.
#[derive(Debug, Clone)]
pub struct InputBindingTable<A> {
    bindings: HashMap<Gesture, A>,
}

impl<A: Copy> InputBindingTable<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Bind `gesture` to `action`, replacing any previous binding.
    pub fn bind(&mut self, gesture: Gesture, action: A) -> &mut Self {
        self.bindings.insert(gesture, action);
        self
    }

    /// The action bound to `gesture`, if any.
    pub fn lookup(&self, gesture: Gesture) -> Option<A> {
        self.bindings.get(&gesture).copied()
    }
}

impl<A: Copy> Default for InputBindingTable<A> {
    fn default() -> Self {
        Self::new()
    }
}
