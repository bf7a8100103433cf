use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field-keyed validation messages from a rejected write, decoded from a
/// body shaped like `{field: string | [string, ...]}`. Bodies that are not
/// a JSON object fail to decode and are handled as unstructured failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub serde_json::Map<String, Value>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message of the first field, in the order the server reported
    /// the fields. A bare string value is used directly; a list contributes
    /// its first string entry.
    pub fn first_message(&self) -> Option<&str> {
        let (_, value) = self.0.iter().next()?;
        match value {
            Value::String(message) => Some(message),
            Value::Array(messages) => messages.first().and_then(Value::as_str),
            _ => None,
        }
    }
}
