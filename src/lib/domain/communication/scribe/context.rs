//! Template context

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// The key/value mapping templates are rendered against.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext(BTreeMap<String, Value>);

impl TemplateContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_context_serializes_as_a_map() -> TestResult {
        let context: TemplateContext = [("name", "Jane"), ("city", "Oslo")].into_iter().collect();

        assert_eq!(
            serde_json::to_value(&context)?,
            json!({ "name": "Jane", "city": "Oslo" })
        );

        Ok(())
    }

    #[test]
    fn test_insert_replaces() {
        let mut context = TemplateContext::new();
        assert!(context.insert("count", 1).is_none());
        assert_eq!(context.insert("count", 2), Some(Value::from(1)));
        assert_eq!(context.len(), 1);
        assert_eq!(context.get("count"), Some(&Value::from(2)));
    }
}
