//! Search keyboard shortcuts.
//!
//! A global chord focuses the search input, and chords inside the results
//! container clear the query prefix or walk the results with a
//! [`FocusCycleNavigator`].

use crate::actions::{Key, KeyCombo, KeydownResult};
use crate::focus::{Direction, FocusCycleNavigator, FocusScope, NavigationBindings};

/// What a search chord asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCommand {
    /// Focus the search input and select its text.
    FocusSearch,
    /// Drop the leading filter prefix of an already-empty query.
    ClearPrefix,
    /// Move focus through the results.
    Navigate(Direction),
}

/// Chord table for search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeymap {
    is_mac: bool,
    navigation: NavigationBindings,
}

impl SearchKeymap {
    pub fn new(is_mac: bool) -> Self {
        Self {
            is_mac,
            navigation: NavigationBindings::default(),
        }
    }

    pub fn navigation(&self) -> &NavigationBindings {
        &self.navigation
    }

    /// Command for a keydown seen at window level.
    ///
    /// Events another handler already claimed are ignored.
    pub fn global_command(&self, combo: &KeyCombo, default_prevented: bool) -> Option<SearchCommand> {
        if default_prevented {
            return None;
        }
        combo
            .is_primary(&Key::character("k"), self.is_mac)
            .then_some(SearchCommand::FocusSearch)
    }

    /// Command for a keydown inside the search container.
    pub fn container_command(&self, combo: &KeyCombo, input_empty: bool) -> Option<SearchCommand> {
        if combo.key == Key::Backspace && !combo.modifiers.any_command() {
            return input_empty.then_some(SearchCommand::ClearPrefix);
        }
        self.navigation.direction(combo).map(SearchCommand::Navigate)
    }
}

/// The page-side search affordances.
pub trait SearchSurface {
    /// Focus the search input and select its text. Returns false when the
    /// input is not in the page.
    fn focus_input(&self) -> bool;

    /// Click the control that opens search.
    fn click_trigger(&self);

    /// Ask the server to clear the query prefix.
    fn clear_prefix(&self);
}

/// Dispatches search chords to a surface and a result navigator.
pub struct SearchController<S: SearchSurface, F: FocusScope> {
    keymap: SearchKeymap,
    surface: S,
    navigator: FocusCycleNavigator<F>,
}

impl<S: SearchSurface, F: FocusScope> SearchController<S, F> {
    pub fn new(keymap: SearchKeymap, surface: S, results: F) -> Self {
        let navigator =
            FocusCycleNavigator::with_bindings(results, keymap.navigation().clone());
        Self {
            keymap,
            surface,
            navigator,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn navigator(&self) -> &FocusCycleNavigator<F> {
        &self.navigator
    }

    pub fn handle_global(&self, combo: &KeyCombo, default_prevented: bool) -> KeydownResult {
        match self.keymap.global_command(combo, default_prevented) {
            Some(command) => self.run(command),
            None => KeydownResult::NotHandled,
        }
    }

    pub fn handle_container(&self, combo: &KeyCombo, input_empty: bool) -> KeydownResult {
        match self.keymap.container_command(combo, input_empty) {
            Some(command) => self.run(command),
            None => KeydownResult::NotHandled,
        }
    }

    fn run(&self, command: SearchCommand) -> KeydownResult {
        match command {
            SearchCommand::FocusSearch => {
                if !self.surface.focus_input() {
                    tracing::debug!("search input absent, clicking trigger");
                    self.surface.click_trigger();
                }
                KeydownResult::Handled
            }
            SearchCommand::ClearPrefix => {
                self.surface.clear_prefix();
                KeydownResult::Handled
            }
            SearchCommand::Navigate(direction) => {
                if self.navigator.move_focus(direction) {
                    KeydownResult::Handled
                } else {
                    KeydownResult::NotHandled
                }
            }
        }
    }
}
