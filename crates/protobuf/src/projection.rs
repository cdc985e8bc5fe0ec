//! JSON views of a decoded message.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::field::{bytes_summary, Field, FieldValue, Message};

impl Message {
    /// Projects the message into a JSON object keyed by field number.
    ///
    /// Repeated field numbers collapse: the last occurrence wins. Iterate
    /// [`Message::fields`] or use [`Message::to_json_repeated`] to keep every
    /// value.
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let message = devbox_protobuf::decode(&[0x08, 0x01, 0x08, 0x02, 0x12, 0x01, 0x41]).unwrap();
    /// assert_eq!(message.to_json(), json!({"1": 2, "2": "A"}));
    /// ```
    pub fn to_json(&self) -> Value {
        fields_to_json(&self.fields, false)
    }

    /// Like [`Message::to_json`], but a field number seen more than once maps
    /// to an array of all its values in document order.
    pub fn to_json_repeated(&self) -> Value {
        fields_to_json(&self.fields, true)
    }
}

fn fields_to_json(fields: &[Field], repeated: bool) -> Value {
    let counts = if repeated {
        occurrence_counts(fields)
    } else {
        HashMap::new()
    };
    let mut map: Map<String, Value> = Map::new();
    for field in fields {
        let key = field.field_number.to_string();
        let value = value_to_json(&field.value, repeated);
        if counts.get(&field.field_number).copied().unwrap_or(0) > 1 {
            if let Value::Array(items) = map.entry(key).or_insert_with(|| Value::Array(Vec::new()))
            {
                items.push(value);
            }
        } else {
            map.insert(key, value);
        }
    }
    Value::Object(map)
}

fn occurrence_counts(fields: &[Field]) -> HashMap<u32, usize> {
    let mut counts = HashMap::new();
    for field in fields {
        *counts.entry(field.field_number).or_insert(0) += 1;
    }
    counts
}

fn value_to_json(value: &FieldValue, repeated: bool) -> Value {
    match value {
        FieldValue::Varint(v) => Value::from(*v),
        FieldValue::Double(v) => float_to_json(*v),
        FieldValue::Float(v) => float_to_json(f64::from(*v)),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Bytes(bytes) => Value::String(bytes_summary(bytes)),
        FieldValue::Message(fields) => fields_to_json(fields, repeated),
    }
}

fn float_to_json(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
