use std::collections::HashSet;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target<E> {
    Window,
    Element(E),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Scroll,
    Click,
}

/// Event bindings made by parallax setup, events without binding are not handled.
#[derive(Debug)]
pub struct Listeners<E> {
    bindings: HashSet<(Target<E>, EventKind)>,
}

impl<E: Copy + Eq + Hash> Listeners<E> {
    pub fn new() -> Self {
        Self {
            bindings: HashSet::new(),
        }
    }

    pub fn bind(&mut self, target: Target<E>, kind: EventKind) {
        self.bindings.insert((target, kind));
    }

    pub fn is_bound(&self, target: Target<E>, kind: EventKind) -> bool {
        self.bindings.contains(&(target, kind))
    }

    pub fn unbind_all(&mut self) -> usize {
        let count = self.bindings.len();
        self.bindings.clear();
        count
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
