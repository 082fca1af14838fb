//! Pattern: Memento
//! Example: an originator whose snapshots are kept by a caretaker in insertion
//! order, and a text editor with an undo stack
//!
//! A memento's state is readable only inside this module.

use crate::error::{CatalogError, Result};

// ============================================
// 1. Originator + caretaker
// ============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memento {
    state: String,
}

#[derive(Debug, Default)]
pub struct Originator {
    state: String,
}

impl Originator {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
    }

    pub fn create_memento(&self) -> Memento {
        Memento {
            state: self.state.clone(),
        }
    }

    pub fn restore(&mut self, memento: &Memento) {
        self.state.clone_from(&memento.state);
    }
}

/// Stores snapshots without looking inside them.
#[derive(Debug, Default)]
pub struct Caretaker {
    mementos: Vec<Memento>,
}

impl Caretaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, memento: Memento) {
        self.mementos.push(memento);
    }

    pub fn get(&self, index: usize) -> Result<&Memento> {
        self.mementos.get(index).ok_or(CatalogError::SnapshotOutOfRange {
            index,
            len: self.mementos.len(),
        })
    }

    /// Restores `originator` from snapshot `index`; the history itself is unchanged.
    pub fn restore_into(&self, originator: &mut Originator, index: usize) -> Result<()> {
        let memento = self.get(index)?;
        originator.restore(memento);
        tracing::debug!(index, state = %originator.state(), "restored snapshot");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }
}

// ============================================
// 2. Text editor with undo
// ============================================

#[derive(Debug, Default)]
pub struct TextEditor {
    text: String,
    undo_stack: Vec<Memento>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn save(&mut self) {
        self.undo_stack.push(Memento {
            state: self.text.clone(),
        });
    }

    /// Pops the latest snapshot back into the editor.
    pub fn undo(&mut self) -> Result<&str> {
        let memento = self.undo_stack.pop().ok_or(CatalogError::NothingToUndo)?;
        self.text = memento.state;
        Ok(&self.text)
    }

    pub fn saved(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_restore_by_index() {
        let mut caretaker = Caretaker::new();
        let mut originator = Originator::new("A");

        caretaker.add(originator.create_memento());
        originator.set_state("B");
        caretaker.add(originator.create_memento());
        originator.set_state("C");
        caretaker.add(originator.create_memento());

        caretaker.restore_into(&mut originator, 1).unwrap();
        assert_eq!(originator.state(), "B");
        caretaker.restore_into(&mut originator, 0).unwrap();
        assert_eq!(originator.state(), "A");
        assert_eq!(caretaker.len(), 3);
    }

    #[test]
    fn test_out_of_range_leaves_state() {
        let caretaker = Caretaker::new();
        let mut originator = Originator::new("keep");
        assert_eq!(
            caretaker.restore_into(&mut originator, 0),
            Err(CatalogError::SnapshotOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(originator.state(), "keep");
    }

    #[test]
    fn test_editor_undo() {
        let mut editor = TextEditor::new();
        editor.set_text("Hello");
        editor.save();
        editor.append(", World!");
        assert_eq!(editor.text(), "Hello, World!");

        assert_eq!(editor.undo().unwrap(), "Hello");
        assert_eq!(editor.saved(), 0);
        assert_eq!(editor.undo(), Err(CatalogError::NothingToUndo));
        assert_eq!(editor.text(), "Hello");
    }

    proptest! {
        #[test]
        fn prop_any_index_restores_that_snapshot(states in prop::collection::vec("[a-z]{0,8}", 1..12), pick in any::<prop::sample::Index>()) {
            let mut caretaker = Caretaker::new();
            let mut originator = Originator::default();
            for state in &states {
                originator.set_state(state.clone());
                caretaker.add(originator.create_memento());
            }

            let index = pick.index(states.len());
            caretaker.restore_into(&mut originator, index).unwrap();
            prop_assert_eq!(originator.state(), states[index].as_str());
            prop_assert_eq!(caretaker.len(), states.len());
        }
    }
}
