//! The `Environment` owns every piece of mutable state a compile-then-run
//! cycle touches: the bytecode stream, the eval stack, the two hash tables,
//! and the object list. `Compiler` borrows it mutably while emitting;
//! `Vm` borrows it mutably while executing; the two never run concurrently.

use std::rc::Rc;

use crate::chunk::Chunk;
use crate::object::{fnv1a, Object};
use crate::table::Table;
use crate::value::Value;

pub struct Environment {
    pub chunk: Chunk,
    pub eval_stack: Vec<Value>,
    pub strings: Table,
    pub globals: Table,
    /// Every object ever allocated, holding one strong reference each so
    /// none are freed before the environment itself is dropped.
    objects: Vec<Rc<Object>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            chunk: Chunk::new(),
            eval_stack: Vec::new(),
            strings: Table::new(),
            globals: Table::new(),
            objects: Vec::new(),
        }
    }

    fn track(&mut self, object: Object) -> Rc<Object> {
        let handle = Rc::new(object);
        self.objects.push(handle.clone());
        handle
    }

    /// Interns `bytes`: if an equal-content string already exists, its
    /// handle is returned and `bytes` is dropped; otherwise a new object is
    /// allocated and registered so future lookups find it.
    pub fn intern_string(&mut self, bytes: String) -> Rc<Object> {
        let hash = fnv1a(bytes.as_bytes());
        if let Some(existing) = self.strings.find_string(&bytes, hash) {
            return existing;
        }
        let handle = self.track(Object::new_string(bytes));
        self.strings.set(handle.clone(), Value::Null);
        handle
    }

    pub fn alloc_list(&mut self, values: Vec<Value>) -> Rc<Object> {
        self.track(Object::new_list(values))
    }

    pub fn push(&mut self, value: Value) {
        self.eval_stack.push(value);
    }

    pub fn pop(&mut self) -> Value {
        self.eval_stack
            .pop()
            .expect("eval stack underflow: compiler emitted unbalanced bytecode")
    }

    pub fn peek(&self, distance_from_top: usize) -> &Value {
        let idx = self.eval_stack.len() - 1 - distance_from_top;
        &self.eval_stack[idx]
    }

    pub fn reset_stack(&mut self) {
        self.eval_stack.clear();
    }
}
