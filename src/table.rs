//! Open-addressed hash table with linear probing and tombstone deletion,
//! used for both string interning and the globals table.

use std::rc::Rc;

use crate::object::Object;
use crate::value::Value;

const INITIAL_CAPACITY: usize = 8;
const MAX_LOAD: f64 = 0.75;

struct Entry {
    key: Option<Rc<Object>>,
    value: Value,
}

impl Entry {
    fn empty() -> Self {
        Entry {
            key: None,
            value: Value::Null,
        }
    }

    fn is_tombstone(&self) -> bool {
        self.key.is_none() && matches!(self.value, Value::Bool(true))
    }

    fn is_empty(&self) -> bool {
        self.key.is_none() && !self.is_tombstone()
    }
}

/// Keyed only by interned string handles. `count` includes tombstones;
/// tombstones are dropped only when the table is resized.
pub struct Table {
    entries: Vec<Entry>,
    count: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Table {
            entries: Vec::new(),
            count: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Linear-probes `entries` for `key`'s bucket, returning the first
    /// tombstone seen (if any) in case the key is absent, so inserts reuse
    /// tombstone slots instead of appending past them.
    fn find_entry(entries: &[Entry], key: &Rc<Object>) -> usize {
        let cap = entries.len();
        let hash = match key.as_ref() {
            Object::Str { hash, .. } => *hash,
            _ => unreachable!("table keys are always interned strings"),
        };
        let mut idx = (hash as usize) % cap;
        let mut tombstone: Option<usize> = None;

        loop {
            let entry = &entries[idx];
            match &entry.key {
                None => {
                    if entry.is_tombstone() {
                        if tombstone.is_none() {
                            tombstone = Some(idx);
                        }
                    } else {
                        return tombstone.unwrap_or(idx);
                    }
                }
                Some(k) if Rc::ptr_eq(k, key) => return idx,
                Some(_) => {}
            }
            idx = (idx + 1) % cap;
        }
    }

    fn grow(&mut self, new_capacity: usize) {
        let mut new_entries: Vec<Entry> = (0..new_capacity).map(|_| Entry::empty()).collect();
        let mut new_count = 0;

        for entry in self.entries.drain(..) {
            let Some(key) = entry.key else { continue };
            let dst = Self::find_entry(&new_entries, &key);
            new_entries[dst] = Entry {
                key: Some(key),
                value: entry.value,
            };
            new_count += 1;
        }

        self.entries = new_entries;
        self.count = new_count;
    }

    fn ensure_capacity(&mut self) {
        if self.entries.is_empty() {
            self.grow(INITIAL_CAPACITY);
        } else if (self.count + 1) as f64 > self.capacity() as f64 * MAX_LOAD {
            self.grow(self.capacity() * 2);
        }
    }

    /// Inserts or overwrites `key`. Returns `true` iff `key` was not already
    /// present (a fresh insertion into a never-used slot, not a tombstone).
    pub fn set(&mut self, key: Rc<Object>, value: Value) -> bool {
        self.ensure_capacity();
        let idx = Self::find_entry(&self.entries, &key);
        let is_new_key = self.entries[idx].key.is_none();
        if is_new_key && !self.entries[idx].is_tombstone() {
            self.count += 1;
        }
        self.entries[idx] = Entry {
            key: Some(key),
            value,
        };
        is_new_key
    }

    pub fn get(&self, key: &Rc<Object>) -> Option<&Value> {
        if self.count == 0 {
            return None;
        }
        let idx = Self::find_entry(&self.entries, key);
        self.entries[idx].key.as_ref()?;
        Some(&self.entries[idx].value)
    }

    /// Removes `key`, leaving a tombstone so later probes through this slot
    /// still find entries that collided with it. Returns whether a matching
    /// entry existed.
    pub fn delete(&mut self, key: &Rc<Object>) -> bool {
        if self.count == 0 {
            return false;
        }
        let idx = Self::find_entry(&self.entries, key);
        if self.entries[idx].key.is_none() {
            return false;
        }
        self.entries[idx] = Entry {
            key: None,
            value: Value::Bool(true),
        };
        true
    }

    /// Content-addressed lookup used by string interning: compares length,
    /// hash, and bytes rather than handle identity, since at this point no
    /// handle for `bytes` may exist yet.
    pub fn find_string(&self, bytes: &str, hash: u32) -> Option<Rc<Object>> {
        if self.count == 0 {
            return None;
        }
        let cap = self.capacity();
        let mut idx = (hash as usize) % cap;
        loop {
            let entry = &self.entries[idx];
            match &entry.key {
                None => {
                    if !entry.is_tombstone() {
                        return None;
                    }
                }
                Some(key) => {
                    if let Object::Str {
                        bytes: existing,
                        hash: existing_hash,
                    } = key.as_ref()
                    {
                        if *existing_hash == hash && existing == bytes {
                            return Some(key.clone());
                        }
                    }
                }
            }
            idx = (idx + 1) % cap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(bytes: &str) -> Rc<Object> {
        Rc::new(Object::new_string(bytes.to_string()))
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut table = Table::new();
        let key = string("greeting");
        assert!(table.set(key.clone(), Value::Number(1.0)));
        assert!(matches!(table.get(&key), Some(Value::Number(n)) if *n == 1.0));
    }

    #[test]
    fn set_returns_false_on_overwrite() {
        let mut table = Table::new();
        let key = string("x");
        assert!(table.set(key.clone(), Value::Number(1.0)));
        assert!(!table.set(key.clone(), Value::Number(2.0)));
        assert!(matches!(table.get(&key), Some(Value::Number(n)) if *n == 2.0));
    }

    #[test]
    fn delete_then_get_is_absent_but_probe_continues() {
        let mut table = Table::new();
        let a = string("a");
        let b = string("b");
        table.set(a.clone(), Value::Number(1.0));
        table.set(b.clone(), Value::Number(2.0));
        assert!(table.delete(&a));
        assert!(table.get(&a).is_none());
        assert!(table.get(&b).is_some());
    }

    #[test]
    fn grows_past_load_factor() {
        let mut table = Table::new();
        for i in 0..32 {
            table.set(string(&format!("k{i}")), Value::Number(i as f64));
        }
        for i in 0..32 {
            let key = string(&format!("k{i}"));
            assert!(matches!(table.get(&key), Some(Value::Number(n)) if *n == i as f64));
        }
    }

    #[test]
    fn find_string_matches_by_content() {
        let mut table = Table::new();
        let bytes = "hello";
        let hash = crate::object::fnv1a(bytes.as_bytes());
        let key = Rc::new(Object::new_string(bytes.to_string()));
        table.set(key.clone(), Value::Null);
        let found = table.find_string(bytes, hash).expect("should find");
        assert!(Rc::ptr_eq(&found, &key));
    }
}
