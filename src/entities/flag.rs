//! Wire booleans
//!
//! The venue encodes booleans as `0`/`1`; object-form callers sometimes send
//! JSON `true`/`false`. Both read as a [`WireFlag`], which always writes back
//! as `0`/`1`.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::model::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireFlag(pub bool);

impl WireFlag {
    pub fn is_set(self) -> bool {
        self.0
    }
}

impl From<bool> for WireFlag {
    fn from(value: bool) -> Self {
        WireFlag(value)
    }
}

impl FieldValue for WireFlag {
    const TYPE_NAME: &'static str = "0, 1 or bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(WireFlag(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(WireFlag(false)),
                Some(1) => Some(WireFlag(true)),
                _ => None,
            },
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::from(u8::from(self.0))
    }
}

impl Serialize for WireFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_ints_and_bools() {
        assert_eq!(WireFlag::from_value(&json!(1)), Some(WireFlag(true)));
        assert_eq!(WireFlag::from_value(&json!(0)), Some(WireFlag(false)));
        assert_eq!(WireFlag::from_value(&json!(true)), Some(WireFlag(true)));
        assert_eq!(WireFlag::from_value(&json!(2)), None);
        assert_eq!(WireFlag::from_value(&json!("1")), None);
    }

    #[test]
    fn test_writes_ints() {
        assert_eq!(WireFlag(true).into_value(), json!(1));
        assert_eq!(serde_json::to_value(WireFlag(false)).unwrap(), json!(0));
    }
}
