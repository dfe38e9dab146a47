use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use scribe_mini::traits::StateStore;

/// A store whose contents survive the shell that owns a clone of it, so a
/// test can "reload in a fresh session" against the same data.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value directly, bypassing the adapter.
    pub fn seed(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl StateStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }
}

/// A store that is present but refuses every write (quota exceeded).
#[derive(Debug, Clone, Default)]
pub struct RejectingStore {
    values: HashMap<String, String>,
}

impl RejectingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for RejectingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, _key: &str, _value: &str) -> bool {
        false
    }
}

/// A store that is entirely unavailable: reads are `None`, writes fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl StateStore for UnavailableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> bool {
        false
    }
}
