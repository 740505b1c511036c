/*!
 * Recursive traversal of JSON documents.
 *
 * The walker rebuilds a value of the same shape, handing every non-empty
 * string leaf (and optionally every object key) to a caller-supplied action.
 * Numbers, booleans and null are copied as they are.
 */

use serde_json::{Map, Value};

/// Walk `value`, replacing each non-empty string leaf with the result of `action`
///
/// When `translate_keys` is set, non-empty object keys go through `action` too.
/// If two keys map to the same output key the later entry wins. Arrays keep
/// their order and objects keep insertion order.
pub fn walk<F, E>(value: &Value, action: &mut F, translate_keys: bool) -> Result<Value, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    match value {
        Value::Null => Ok(Value::Null),
        Value::Bool(flag) => Ok(Value::Bool(*flag)),
        Value::Number(number) => Ok(Value::Number(number.clone())),
        Value::String(text) => Ok(Value::String(visit_text(text, action)?)),
        Value::Array(items) => {
            let walked = items
                .iter()
                .map(|item| walk(item, action, translate_keys))
                .collect::<Result<Vec<_>, E>>()?;
            Ok(Value::Array(walked))
        }
        Value::Object(map) => {
            let mut walked = Map::with_capacity(map.len());
            for (key, item) in map {
                let key = if translate_keys {
                    visit_text(key, action)?
                } else {
                    key.clone()
                };
                let item = walk(item, action, translate_keys)?;
                walked.insert(key, item);
            }
            Ok(Value::Object(walked))
        }
    }
}

/// Apply the action to one string, skipping empty ones
fn visit_text<F, E>(text: &str, action: &mut F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    if text.is_empty() {
        Ok(String::new())
    } else {
        action(text)
    }
}
