//! Linear decode-and-dispatch interpreter over the byte stream. Reads and
//! mutates the environment's eval stack, globals table, and object list;
//! never runs concurrently with the compiler that produced the chunk it
//! executes.

use crate::chunk::OpCode;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::object::Object;
use crate::value::Value;

pub struct Vm<'a> {
    env: &'a mut Environment,
    ip: usize,
}

impl<'a> Vm<'a> {
    pub fn new(env: &'a mut Environment) -> Self {
        Vm { env, ip: 0 }
    }

    /// Runs until `Return`, or a runtime error aborts the program. On
    /// error the eval stack is cleared (fail-fast at statement
    /// granularity); the caller is responsible for reporting the error.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        loop {
            let Some(op) = self.read_op() else {
                return Ok(());
            };
            if let Err(err) = self.dispatch(op) {
                self.env.reset_stack();
                return Err(err);
            }
            if matches!(op, OpCode::Return) {
                return Ok(());
            }
        }
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.env.chunk.code[self.ip];
        self.ip += 1;
        byte
    }

    fn read_op(&mut self) -> Option<OpCode> {
        if self.ip >= self.env.chunk.code.len() {
            return None;
        }
        let byte = self.read_byte();
        OpCode::from_byte(byte)
    }

    fn read_u16(&mut self) -> u16 {
        let value = self.env.chunk.read_u16(self.ip);
        self.ip += 2;
        value
    }

    fn read_constant(&mut self) -> Value {
        let idx = self.read_byte();
        self.env.chunk.constants[idx as usize].clone()
    }

    fn dispatch(&mut self, op: OpCode) -> Result<(), RuntimeError> {
        log::trace!("dispatch {op:?} (ip={})", self.ip);
        match op {
            OpCode::PushConstant => {
                let value = self.read_constant();
                self.env.push(value);
            }
            OpCode::Add => self.add()?,
            OpCode::Sub => self.numeric_binary(|a, b| a - b)?,
            OpCode::Mul => self.numeric_binary(|a, b| a * b)?,
            OpCode::Div => self.numeric_binary(|a, b| a / b)?,
            OpCode::Neg => {
                let x = self
                    .env
                    .peek(0)
                    .as_number()
                    .ok_or(RuntimeError::OperandMustBeNumber)?;
                self.env.pop();
                self.env.push(Value::Number(-x));
            }
            OpCode::Not => {
                let falsey = self.env.pop().is_falsey();
                self.env.push(Value::Bool(falsey));
            }
            OpCode::True => self.env.push(Value::Bool(true)),
            OpCode::False => self.env.push(Value::Bool(false)),
            OpCode::Null => self.env.push(Value::Null),
            OpCode::Less => self.comparison(|a, b| a < b)?,
            OpCode::Greater => self.comparison(|a, b| a > b)?,
            OpCode::Equal => {
                let b = self.env.pop();
                let a = self.env.pop();
                self.env.push(Value::Bool(a.values_equal(&b)));
            }
            OpCode::Return => {}
            OpCode::Print => {
                let value = self.env.pop();
                println!("{value}");
            }
            OpCode::Pop => {
                self.env.pop();
            }
            OpCode::DefineGlobal => {
                let name = self.read_constant();
                let handle = name.as_object().expect("global name is always a string").clone();
                let value = self.env.pop();
                self.env.globals.set(handle, value);
            }
            OpCode::GetGlobal => {
                let name = self.read_constant();
                let handle = name.as_object().expect("global name is always a string");
                match self.env.globals.get(handle) {
                    Some(value) => {
                        let value = value.clone();
                        self.env.push(value);
                    }
                    None => {
                        return Err(RuntimeError::UndefinedVariable(undefined_name(handle)));
                    }
                }
            }
            OpCode::SetGlobal => {
                let name = self.read_constant();
                let handle = name.as_object().expect("global name is always a string").clone();
                let value = self.env.peek(0).clone();
                // `set` reports whether this inserted a brand new key; for
                // `Set_Global` that means the name was never defined, so the
                // just-inserted stub is rolled back before erroring.
                if self.env.globals.set(handle.clone(), value) {
                    self.env.globals.delete(&handle);
                    return Err(RuntimeError::UndefinedVariable(undefined_name(&handle)));
                }
            }
            OpCode::GetLocal => {
                let slot = self.read_byte() as usize;
                self.env.push(self.env.eval_stack[slot].clone());
            }
            OpCode::SetLocal => {
                let slot = self.read_byte() as usize;
                self.env.eval_stack[slot] = self.env.peek(0).clone();
            }
            OpCode::JumpIfFalse => {
                let offset = self.read_u16();
                if self.env.peek(0).is_falsey() {
                    self.ip += offset as usize;
                }
            }
            OpCode::Jump => {
                let offset = self.read_u16();
                self.ip += offset as usize;
            }
            OpCode::Loop => {
                let offset = self.read_u16();
                self.ip -= offset as usize;
            }
            OpCode::BuildList => {
                let count = self.read_u16() as usize;
                let len = self.env.eval_stack.len();
                let values = self.env.eval_stack.split_off(len - count);
                let handle = self.env.alloc_list(values);
                self.env.push(Value::Object(handle));
            }
            OpCode::ListSubscript => {
                let index = self.env.pop();
                let list = self.env.pop();
                let index = index.as_number().ok_or(RuntimeError::SubscriptNotNumber)?;
                let handle = list.as_object().ok_or(RuntimeError::NotAList)?;
                let Object::List { values } = handle.as_ref() else {
                    return Err(RuntimeError::NotAList);
                };
                let values = values.borrow();
                let idx = index as usize;
                let value = values.get(idx).ok_or(RuntimeError::IndexOutOfBounds)?;
                let value = value.clone();
                drop(values);
                self.env.push(value);
            }
        }
        Ok(())
    }

    fn add(&mut self) -> Result<(), RuntimeError> {
        let either_string = self.env.peek(0).is_string() || self.env.peek(1).is_string();
        if either_string {
            // The original casts both operands to `Object_String` whenever
            // either looks like one, which is undefined behaviour the
            // moment the other operand isn't actually a string object.
            // Stringifying both sides through `Display` gets the same
            // "either side a string means concatenate" contract without
            // transmuting a number as if it were a string.
            let b = self.env.pop();
            let a = self.env.pop();
            let concatenated = format!("{a}{b}");
            let handle = self.env.intern_string(concatenated);
            self.env.push(Value::Object(handle));
            return Ok(());
        }

        let both_numbers = self.env.peek(0).is_number() && self.env.peek(1).is_number();
        if both_numbers {
            let b = self.env.pop().as_number().unwrap();
            let a = self.env.pop().as_number().unwrap();
            self.env.push(Value::Number(a + b));
            return Ok(());
        }

        Err(RuntimeError::OperandsMustBeNumbers)
    }

    fn numeric_binary(&mut self, f: impl Fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
        let b = self.env.peek(0).as_number().ok_or(RuntimeError::OperandsMustBeNumbers)?;
        let a = self.env.peek(1).as_number().ok_or(RuntimeError::OperandsMustBeNumbers)?;
        self.env.pop();
        self.env.pop();
        self.env.push(Value::Number(f(a, b)));
        Ok(())
    }

    fn comparison(&mut self, f: impl Fn(f64, f64) -> bool) -> Result<(), RuntimeError> {
        let b = self.env.peek(0).as_number().ok_or(RuntimeError::OperandsMustBeNumbers)?;
        let a = self.env.peek(1).as_number().ok_or(RuntimeError::OperandsMustBeNumbers)?;
        self.env.pop();
        self.env.pop();
        self.env.push(Value::Bool(f(a, b)));
        Ok(())
    }
}

fn undefined_name(handle: &std::rc::Rc<Object>) -> String {
    handle.as_str().unwrap_or("?").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;

    fn run_source(source: &str) -> Result<(), RuntimeError> {
        let mut env = Environment::new();
        compile(source, &mut env).expect("compile should succeed");
        Vm::new(&mut env).run()
    }

    #[test]
    fn stack_balance_after_return_is_empty() {
        let mut env = Environment::new();
        compile("let a = 1; a += 1;", &mut env).unwrap();
        Vm::new(&mut env).run().unwrap();
        assert_eq!(env.eval_stack.len(), 0);
    }

    #[test]
    fn undefined_global_read_is_a_runtime_error() {
        let err = run_source("print a;").unwrap_err();
        assert_eq!(err, RuntimeError::UndefinedVariable("a".to_string()));
    }

    #[test]
    fn set_on_never_defined_global_is_a_runtime_error() {
        let err = run_source("a = 1;").unwrap_err();
        assert_eq!(err, RuntimeError::UndefinedVariable("a".to_string()));
    }

    #[test]
    fn falsey_law_covers_null_and_false_only() {
        assert!(run_source("if (null) { print 1; } else { print 0; }").is_ok());
    }

    #[test]
    fn division_by_zero_follows_ieee_and_does_not_error() {
        assert!(run_source("print 1 / 0;").is_ok());
    }

    #[test]
    fn string_plus_number_concatenates_without_casting_the_number_as_a_string() {
        assert!(run_source(r#"print "x" + 1;"#).is_ok());
    }

    #[test]
    fn list_subscript_out_of_bounds_is_a_runtime_error() {
        let err = run_source("let xs = [1, 2]; print xs[5];").unwrap_err();
        assert_eq!(err, RuntimeError::IndexOutOfBounds);
    }
}
