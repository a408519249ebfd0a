/// Events delivered by the host page into [`crate::Parallax::update`] in the order they happened.
pub struct Input<E> {
    pub(crate) events: Vec<Event<E>>,
}

impl<E> Input<E> {
    pub fn new() -> Input<E> {
        Input { events: vec![] }
    }

    pub fn events(mut self, events: Vec<Event<E>>) -> Self {
        self.events = events;
        self
    }

    pub fn event(mut self, event: Event<E>) -> Self {
        self.events.push(event);
        self
    }
}

impl<E> Default for Input<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<E> {
    /// The window was resized to the new viewport size.
    Resize([f32; 2]),
    /// The element scroll offset changed.
    Scroll(E),
    Click(E),
}
