//! Template environment value object
//!
//! The flat variable mapping handed to the template renderer. Assembled as
//! `{"computer": <record>}` with auxiliary keys merged on top.

use serde::Serialize;
use serde_json::{Map, Value};

/// Variables available to templates
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateEnvironment(Map<String, Value>);

impl TemplateEnvironment {
    /// Key under which the target computer's inventory record is exposed
    pub const COMPUTER_KEY: &'static str = "computer";

    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Environment containing only the computer record
    pub fn for_computer(record: Value) -> Self {
        let mut vars = Map::new();
        vars.insert(Self::COMPUTER_KEY.to_string(), record);
        Self(vars)
    }

    /// Merge auxiliary variables; auxiliary values win on key collision.
    pub fn merged<I>(mut self, aux: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.0.extend(aux);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for TemplateEnvironment {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
