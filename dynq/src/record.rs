use std::collections::BTreeMap;

use crate::value::Value;
use crate::DynqResult;

/// A row whose fields can be read and written by name.
///
/// Field names are the same paths predicates refer to, so a joined
/// attribute is usually exposed under a dotted name like `team.name`.
/// Implement it by hand or with `#[derive(Record)]`.
pub trait Record {
    /// Read a field. Unknown fields read as [Value::Null].
    fn get(&self, field: &str) -> Value;

    fn set(&mut self, field: &str, value: Value) -> DynqResult<()>;
}

impl Record for BTreeMap<String, Value> {
    fn get(&self, field: &str) -> Value {
        BTreeMap::get(self, field).cloned().unwrap_or(Value::Null)
    }

    fn set(&mut self, field: &str, value: Value) -> DynqResult<()> {
        self.insert(field.to_string(), value);
        Ok(())
    }
}
