//! Cyclic keyboard focus traversal inside a container.
//!
//! The focusable set is recomputed from the container on every keypress, so
//! elements appearing, disappearing or being disabled between presses never
//! leave a stale index behind.

use crate::actions::{Key, KeyCombo, KeydownResult, Modifiers};

/// A container whose interactive elements can be traversed.
pub trait FocusScope {
    type Element: Clone + PartialEq;

    /// Interactive elements inside the container, in document order.
    fn candidates(&self) -> Vec<Self::Element>;

    fn is_visible(&self, element: &Self::Element) -> bool;

    fn is_disabled(&self, element: &Self::Element) -> bool;

    /// The currently focused element, wherever it is.
    fn focused(&self) -> Option<Self::Element>;

    fn focus(&self, element: &Self::Element);
}

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Chords that move focus, per direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationBindings {
    pub forward: Vec<KeyCombo>,
    pub backward: Vec<KeyCombo>,
}

impl Default for NavigationBindings {
    /// ArrowDown / Ctrl+N forward, ArrowUp / Ctrl+P backward.
    fn default() -> Self {
        Self {
            forward: vec![
                KeyCombo::new(Key::ArrowDown),
                KeyCombo::ctrl(Key::character("n")),
            ],
            backward: vec![
                KeyCombo::new(Key::ArrowUp),
                KeyCombo::ctrl(Key::character("p")),
            ],
        }
    }
}

impl NavigationBindings {
    pub fn direction(&self, combo: &KeyCombo) -> Option<Direction> {
        if self.forward.contains(combo) {
            Some(Direction::Forward)
        } else if self.backward.contains(combo) {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// Tab / Shift+Tab, for containers that trap tabbing.
    pub fn tab() -> Self {
        Self {
            forward: vec![KeyCombo::new(Key::Tab)],
            backward: vec![KeyCombo::with_modifiers(Key::Tab, Modifiers::SHIFT)],
        }
    }
}

/// Moves focus among a container's focusable elements, wrapping at both ends.
pub struct FocusCycleNavigator<S: FocusScope> {
    scope: S,
    bindings: NavigationBindings,
}

impl<S: FocusScope> FocusCycleNavigator<S> {
    pub fn new(scope: S) -> Self {
        Self::with_bindings(scope, NavigationBindings::default())
    }

    pub fn with_bindings(scope: S, bindings: NavigationBindings) -> Self {
        Self { scope, bindings }
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn bindings(&self) -> &NavigationBindings {
        &self.bindings
    }

    /// Live focusable set: visible, enabled candidates in document order.
    pub fn focusable(&self) -> Vec<S::Element> {
        self.scope
            .candidates()
            .into_iter()
            .filter(|el| self.scope.is_visible(el) && !self.scope.is_disabled(el))
            .collect()
    }

    /// Handle a keydown in the container. `Handled` only when focus moved.
    pub fn handle_key(&self, combo: &KeyCombo) -> KeydownResult {
        match self.bindings.direction(combo) {
            Some(direction) if self.move_focus(direction) => KeydownResult::Handled,
            _ => KeydownResult::NotHandled,
        }
    }

    /// Move focus one step. Returns whether focus changed.
    pub fn move_focus(&self, direction: Direction) -> bool {
        let items = self.focusable();
        let focused = self.scope.focused();
        let current = focused
            .as_ref()
            .and_then(|f| items.iter().position(|el| el == f));

        let Some(next) = next_index(items.len(), current, direction) else {
            return false;
        };
        if current == Some(next) {
            return false;
        }
        self.scope.focus(&items[next]);
        true
    }
}

/// Index reached from `current` moving one step in `direction` over `len`
/// items, wrapping at both ends. With no current position, forward lands on
/// the first item and backward on the last.
pub fn next_index(len: usize, current: Option<usize>, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let start = match (current, direction) {
        (Some(i), _) => i as isize,
        (None, Direction::Forward) => -1,
        (None, Direction::Backward) => len,
    };
    Some((start + direction.step() + len).rem_euclid(len) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakeScope};

    fn abcd() -> FakeScope {
        FakeScope::new(vec![
            FakeElement::visible("A"),
            FakeElement::hidden("B"),
            FakeElement::disabled("C"),
            FakeElement::visible("D"),
        ])
    }

    #[test]
    fn skips_hidden_and_disabled_and_wraps() {
        let nav = FocusCycleNavigator::new(abcd());
        nav.scope().focus_on("A");

        assert!(nav.move_focus(Direction::Forward));
        assert_eq!(nav.scope().focused.get(), Some("D"));

        assert!(nav.move_focus(Direction::Forward));
        assert_eq!(nav.scope().focused.get(), Some("A"));
    }

    #[test]
    fn backward_wraps_to_last() {
        let nav = FocusCycleNavigator::new(abcd());
        nav.scope().focus_on("A");
        assert!(nav.move_focus(Direction::Backward));
        assert_eq!(nav.scope().focused.get(), Some("D"));
    }

    #[test]
    fn outside_focus_lands_on_edges() {
        let nav = FocusCycleNavigator::new(abcd());
        nav.scope().focus_on("search-input");
        assert!(nav.move_focus(Direction::Forward));
        assert_eq!(nav.scope().focused.get(), Some("A"));

        nav.scope().focused.set(None);
        assert!(nav.move_focus(Direction::Backward));
        assert_eq!(nav.scope().focused.get(), Some("D"));
    }

    #[test]
    fn empty_container_does_nothing() {
        let nav = FocusCycleNavigator::new(FakeScope::new(vec![
            FakeElement::hidden("x"),
            FakeElement::disabled("y"),
        ]));
        assert_eq!(
            nav.handle_key(&KeyCombo::new(Key::ArrowDown)),
            KeydownResult::NotHandled
        );
        assert_eq!(nav.scope().focus_calls.get(), 0);
        assert_eq!(nav.scope().focused.get(), None);
    }

    #[test]
    fn set_is_recomputed_each_press() {
        let nav = FocusCycleNavigator::new(abcd());
        nav.scope().focus_on("A");
        nav.scope().elements.borrow_mut()[1].visible = true;
        assert!(nav.move_focus(Direction::Forward));
        assert_eq!(nav.scope().focused.get(), Some("B"));

        // Focused element disappears: treated as outside the set.
        nav.scope().elements.borrow_mut()[1].visible = false;
        assert!(nav.move_focus(Direction::Forward));
        assert_eq!(nav.scope().focused.get(), Some("A"));
    }

    #[test]
    fn only_bound_chords_are_handled() {
        let nav = FocusCycleNavigator::new(abcd());
        nav.scope().focus_on("A");
        assert_eq!(
            nav.handle_key(&KeyCombo::new(Key::ArrowLeft)),
            KeydownResult::NotHandled
        );
        assert_eq!(
            nav.handle_key(&KeyCombo::ctrl(Key::character("n"))),
            KeydownResult::Handled
        );
        assert_eq!(nav.scope().focused.get(), Some("D"));
        assert_eq!(
            nav.handle_key(&KeyCombo::new(Key::ArrowUp)),
            KeydownResult::Handled
        );
        assert_eq!(nav.scope().focused.get(), Some("A"));
    }

    #[test]
    fn single_focused_element_is_not_a_move() {
        let nav = FocusCycleNavigator::new(FakeScope::new(vec![FakeElement::visible("only")]));
        nav.scope().focus_on("only");
        assert_eq!(
            nav.handle_key(&KeyCombo::new(Key::ArrowDown)),
            KeydownResult::NotHandled
        );
        nav.scope().focused.set(None);
        assert!(nav.move_focus(Direction::Forward));
        assert_eq!(nav.scope().focused.get(), Some("only"));
    }

    #[test]
    fn next_index_wraps_both_ways() {
        assert_eq!(next_index(0, None, Direction::Forward), None);
        assert_eq!(next_index(3, None, Direction::Forward), Some(0));
        assert_eq!(next_index(3, None, Direction::Backward), Some(2));
        assert_eq!(next_index(3, Some(2), Direction::Forward), Some(0));
        assert_eq!(next_index(3, Some(0), Direction::Backward), Some(2));
        assert_eq!(next_index(3, Some(1), Direction::Forward), Some(2));
    }

    #[test]
    fn tab_bindings() {
        let bindings = NavigationBindings::tab();
        assert_eq!(
            bindings.direction(&KeyCombo::shift(Key::Tab)),
            Some(Direction::Backward)
        );
        assert_eq!(
            bindings.direction(&KeyCombo::new(Key::Tab)),
            Some(Direction::Forward)
        );
    }
}
