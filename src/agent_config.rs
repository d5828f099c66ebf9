use serde_json::Value;

pub const PROMPT_FIELD_PATH: [&str; 4] = ["conversation_config", "agent", "prompt", "prompt"];

#[derive(Debug, Clone, PartialEq)]
pub enum PathUpdate {
    Replaced(Value),
    Inserted,
    Missing,
}

pub fn lookup_path<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(document, |node, key| node.as_object()?.get(*key))
}

/// Sets `value` at `path` when every parent along the path is an object.
/// The document is left untouched otherwise.
pub fn set_at_path(document: &mut Value, path: &[&str], value: Value) -> PathUpdate {
    let Some((leaf, parents)) = path.split_last() else {
        return PathUpdate::Missing;
    };
    let mut node = document;
    for key in parents {
        match node.as_object_mut().and_then(|object| object.get_mut(*key)) {
            Some(child) => node = child,
            None => return PathUpdate::Missing,
        }
    }
    let Some(object) = node.as_object_mut() else {
        return PathUpdate::Missing;
    };
    match object.insert((*leaf).to_string(), value) {
        Some(previous) => PathUpdate::Replaced(previous),
        None => PathUpdate::Inserted,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    document: Value,
}

impl AgentConfig {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        Ok(Self {
            document: serde_json::from_str(text)?,
        })
    }

    pub fn prompt(&self) -> Option<&str> {
        lookup_path(&self.document, &PROMPT_FIELD_PATH).and_then(Value::as_str)
    }

    /// Returns the previous prompt rendered as text, or `None` when the
    /// document lacks the `conversation_config.agent.prompt` object chain.
    pub fn replace_prompt(&mut self, text: &str) -> Option<String> {
        match set_at_path(
            &mut self.document,
            &PROMPT_FIELD_PATH,
            Value::String(text.to_string()),
        ) {
            PathUpdate::Replaced(Value::String(previous)) => Some(previous),
            PathUpdate::Replaced(Value::Null) | PathUpdate::Inserted => Some(String::new()),
            PathUpdate::Replaced(other) => Some(other.to_string()),
            PathUpdate::Missing => None,
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}

#[cfg(test)]
#[path = "../tests/unit/agent_config_tests.rs"]
mod tests;
