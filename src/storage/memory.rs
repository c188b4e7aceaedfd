/// In-memory key-value backend
///
/// Used in tests in place of a real database. Reads and writes can be made
/// to fail on demand to exercise the store's degrade-to-empty behavior.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::storage::{KeyValueBackend, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Fault {
    #[default]
    None,
    Once,
    Always,
}

impl Fault {
    /// Whether this operation should fail, consuming a one-shot fault
    fn trip(cell: &Cell<Fault>) -> bool {
        match cell.get() {
            Fault::None => false,
            Fault::Once => {
                cell.set(Fault::None);
                true
            }
            Fault::Always => true,
        }
    }
}

/// Key-value slots held in a HashMap
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RefCell<HashMap<String, String>>,
    read_fault: Cell<Fault>,
    write_fault: Cell<Fault>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text in a slot, bypassing any serialization
    pub fn seed(&self, key: &str, raw: &str) {
        self.slots.borrow_mut().insert(key.to_string(), raw.to_string());
    }

    /// Raw text currently in a slot
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Make the next read fail
    pub fn fail_next_read(&self) {
        self.read_fault.set(Fault::Once);
    }

    /// Make the next write fail
    pub fn fail_next_write(&self) {
        self.write_fault.set(Fault::Once);
    }

    /// Make every write fail until cleared, like a full quota
    pub fn fail_writes(&self, enabled: bool) {
        self.write_fault
            .set(if enabled { Fault::Always } else { Fault::None });
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if Fault::trip(&self.read_fault) {
            return Err(StorageError::Unavailable("simulated read failure".to_string()));
        }
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if Fault::trip(&self.write_fault) {
            return Err(StorageError::Unavailable("simulated quota exceeded".to_string()));
        }
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_faults() {
        let backend = MemoryBackend::new();
        backend.seed("k", "v");

        backend.fail_next_read();
        assert!(backend.get("k").is_err());
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));

        backend.fail_next_write();
        assert!(backend.set("k", "w").is_err());
        assert!(backend.set("k", "w").is_ok());
        assert_eq!(backend.raw("k").as_deref(), Some("w"));
    }

    #[test]
    fn test_persistent_write_fault() {
        let backend = MemoryBackend::new();
        backend.fail_writes(true);
        assert!(backend.set("k", "a").is_err());
        assert!(backend.set("k", "b").is_err());

        backend.fail_writes(false);
        assert!(backend.set("k", "c").is_ok());
    }
}
