use crate::protocol::Category;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Recorder configuration. Immutable once constructed.
///
/// Built leniently: every recognized key is type-checked on its own and falls
/// back to its default on mismatch, so construction never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractorConfig {
    pub interactions: bool,
    pub interaction_element: String,
    pub interaction_events: Vec<String>,
    pub conversions: bool,
    pub conversion_element: String,
    pub conversion_events: Vec<String>,
    pub endpoint: String,
    pub debug: bool,
    pub storage: bool,
}

impl Default for InteractorConfig {
    fn default() -> Self {
        Self {
            interactions: true,
            interaction_element: default_interaction_element(),
            interaction_events: default_events(),
            conversions: true,
            conversion_element: default_conversion_element(),
            conversion_events: default_events(),
            endpoint: default_endpoint(),
            debug: true,
            storage: true,
        }
    }
}

fn default_interaction_element() -> String {
    "interaction".to_string()
}

fn default_conversion_element() -> String {
    "conversion".to_string()
}

fn default_events() -> Vec<String> {
    vec!["mouseup".to_string(), "touchend".to_string()]
}

fn default_endpoint() -> String {
    "/interactions".to_string()
}

fn bool_or(value: &Value, key: &str, default: bool) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn string_or(value: &Value, key: &str, default: fn() -> String) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(default)
}

fn string_list_or(value: &Value, key: &str, default: fn() -> Vec<String>) -> Vec<String> {
    let Some(items) = value.get(key).and_then(Value::as_array) else {
        return default();
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_else(default)
}

impl InteractorConfig {
    /// Build a config from an arbitrary JSON value.
    ///
    /// Anything that is not an object yields the default configuration.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        if !value.is_object() {
            return defaults;
        }

        Self {
            interactions: bool_or(value, "interactions", defaults.interactions),
            interaction_element: string_or(
                value,
                "interactionElement",
                default_interaction_element,
            ),
            interaction_events: string_list_or(value, "interactionEvents", default_events),
            conversions: bool_or(value, "conversions", defaults.conversions),
            conversion_element: string_or(value, "conversionElement", default_conversion_element),
            conversion_events: string_list_or(value, "conversionEvents", default_events),
            endpoint: string_or(value, "endpoint", default_endpoint),
            debug: bool_or(value, "debug", defaults.debug),
            storage: bool_or(value, "storage", defaults.storage),
        }
    }

    /// Build a config from JSON text. Unparseable text yields the defaults.
    pub fn from_json_str(json: &str) -> Self {
        serde_json::from_str::<Value>(json)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// Enabled capture rules, interaction first.
    pub fn capture_rules(&self) -> Vec<CaptureRule<'_>> {
        let mut rules = Vec::with_capacity(2);
        if self.interactions {
            rules.push(CaptureRule {
                category: Category::Interaction,
                marker_class: &self.interaction_element,
                events: &self.interaction_events,
            });
        }
        if self.conversions {
            rules.push(CaptureRule {
                category: Category::Conversion,
                marker_class: &self.conversion_element,
                events: &self.conversion_events,
            });
        }
        rules
    }
}

impl<'de> Deserialize<'de> for InteractorConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Which marker class and event names capture a given category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRule<'a> {
    pub category: Category,
    pub marker_class: &'a str,
    pub events: &'a [String],
}
