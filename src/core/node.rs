//! Purpose: Explicit input tree for tagged attribute documents.
//! Exports: `Node`, `NodeMap`.
//! Role: Replaces runtime type assertions on decoded JSON with a matchable sum type.
//! Invariants: Map entries iterate in ascending key order.
//! Invariants: Non-text scalars survive conversion only as `Node::Scalar` so coercers can reject them.
//! Invariants: Bounded conversion never recurses past its limit; deeper subtrees become `Node::Truncated`.
use std::collections::BTreeMap;

use serde_json::Value;

pub type NodeMap = BTreeMap<String, Node>;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(String),
    Map(NodeMap),
    List(Vec<Node>),
    /// A number, boolean or null produced by the JSON decoder.
    Scalar(Value),
    /// A subtree below the conversion depth limit, left unconverted.
    Truncated,
}

impl Node {
    /// Converts `value`, keeping nodes at most `max_depth` levels below it.
    pub fn from_value_bounded(value: &Value, max_depth: usize) -> Node {
        Node::bounded(value, 0, max_depth)
    }

    pub(crate) fn bounded(value: &Value, depth: usize, max_depth: usize) -> Node {
        if depth > max_depth {
            return Node::Truncated;
        }
        match value {
            Value::String(text) => Node::Text(text.clone()),
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Node::bounded(value, depth + 1, max_depth)))
                    .collect(),
            ),
            Value::Array(items) => Node::List(
                items
                    .iter()
                    .map(|item| Node::bounded(item, depth + 1, max_depth))
                    .collect(),
            ),
            other => Node::Scalar(other.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Text(_) => "string",
            Node::Map(_) => "object",
            Node::List(_) => "array",
            Node::Scalar(Value::Null) => "null",
            Node::Scalar(Value::Bool(_)) => "boolean",
            Node::Scalar(_) => "number",
            Node::Truncated => "truncated",
        }
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => Node::Text(text.clone()),
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Node::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Node::List(items.iter().map(Node::from).collect()),
            other => Node::Scalar(other.clone()),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Node::Text(text),
            Value::Object(map) => Node::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            other => Node::Scalar(other),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}
