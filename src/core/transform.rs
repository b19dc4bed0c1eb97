//! Purpose: Recursive tag dispatcher plus list and attribute-set handlers.
//! Exports: `Tag`, `Typed`, `Transformer`.
//! Role: Turns a tagged attribute tree into plain JSON; the only stateful piece is `TransformOptions`.
//! Invariants: Invalid entries inside an aggregate are dropped, never propagated.
//! Invariants: An aggregate with no surviving entries fails with `EmptyData`.
//! Invariants: Output objects are emitted in ascending key order.
//! Invariants: Recursion depth is capped by `TransformOptions::max_depth`.
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::coerce;
use crate::core::error::{Error, ErrorKind};
use crate::core::node::{Node, NodeMap};
use crate::core::options::{TagSelection, TransformOptions};

const ROOT_PATH: &str = "$";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    S,
    N,
    Bool,
    Null,
    L,
    M,
}

impl Tag {
    pub const ALL: [Tag; 6] = [Tag::S, Tag::N, Tag::Bool, Tag::Null, Tag::L, Tag::M];

    /// Matches a tag key after trimming surrounding whitespace.
    pub fn from_key(key: &str) -> Option<Tag> {
        let key = key.trim();
        Tag::ALL.into_iter().find(|tag| tag.as_str() == key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::S => "S",
            Tag::N => "N",
            Tag::Bool => "BOOL",
            Tag::Null => "NULL",
            Tag::L => "L",
            Tag::M => "M",
        }
    }

    /// Lists hold scalars only: null, nested lists and nested maps are dropped.
    pub fn allowed_in_list(self) -> bool {
        !matches!(self, Tag::Null | Tag::L | Tag::M)
    }
}

/// A successfully coerced tagged value.
#[derive(Clone, Debug, PartialEq)]
pub struct Typed {
    pub tag: Tag,
    pub value: Value,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TransformOptions {
        self.options
    }

    /// Entry point for a generic decoded document; it must be an object.
    pub fn parse_input(&self, input: &Value) -> Result<Value, Error> {
        self.parse_node(&Node::from_value_bounded(input, self.node_depth_limit()))
    }

    /// Entry point for an attribute set whose object shape is already known.
    pub fn parse_attributes(&self, attributes: &Map<String, Value>) -> Result<Value, Error> {
        let limit = self.node_depth_limit();
        let map: NodeMap = attributes
            .iter()
            .map(|(key, value)| (key.clone(), Node::bounded(value, 1, limit)))
            .collect();
        self.to_map(&map)
    }

    /// Deepest JSON level the handlers can reach before `check_depth` fails.
    ///
    /// Aggregate depth `d` sits at JSON depth `2 * d` (tagged value, then payload),
    /// and leaf payloads of the deepest allowed aggregate sit two levels below it.
    fn node_depth_limit(&self) -> usize {
        self.options.max_depth.saturating_add(1).saturating_mul(2)
    }

    pub fn parse_node(&self, node: &Node) -> Result<Value, Error> {
        let map = node.as_map().ok_or_else(|| {
            Error::new(ErrorKind::InvalidData)
                .with_message(format!("input must be an object, found {}", node.kind_name()))
                .with_path(ROOT_PATH)
        })?;
        self.to_map(map)
    }

    /// Resolves and coerces one tagged value.
    pub fn to_type(&self, tagged: &NodeMap) -> Result<Typed, Error> {
        self.dispatch(tagged, ROOT_PATH, 0)
    }

    pub fn to_list(&self, node: &Node) -> Result<Value, Error> {
        self.list_at(node, ROOT_PATH, 0)
    }

    pub fn to_map(&self, map: &NodeMap) -> Result<Value, Error> {
        self.map_at(map, ROOT_PATH, 0)
    }

    fn select<'a>(&self, tagged: &'a NodeMap) -> Result<(Tag, &'a Node), Error> {
        if tagged.is_empty() {
            return Err(Error::new(ErrorKind::InvalidData).with_message("tagged value has no keys"));
        }
        if self.options.tag_selection == TagSelection::Strict && tagged.len() > 1 {
            return Err(Error::new(ErrorKind::InvalidData).with_message(format!(
                "tagged value must have exactly one key, found {}",
                tagged.len()
            )));
        }
        let chosen = tagged
            .iter()
            .filter_map(|(key, payload)| Tag::from_key(key).map(|tag| (tag, payload)))
            .min_by_key(|(tag, _)| tag.as_str());
        if let Some(found) = chosen {
            return Ok(found);
        }
        let key = tagged
            .keys()
            .map(|key| key.trim())
            .min()
            .unwrap_or_default();
        Err(Error::new(ErrorKind::InvalidType)
            .with_message(format!("unrecognized tag {key:?}"))
            .with_tag(key))
    }

    fn dispatch(&self, tagged: &NodeMap, path: &str, depth: usize) -> Result<Typed, Error> {
        let (tag, payload) = self.select(tagged).map_err(|err| err.with_path(path))?;
        self.dispatch_selected(tag, payload, path, depth)
    }

    fn dispatch_selected(
        &self,
        tag: Tag,
        payload: &Node,
        path: &str,
        depth: usize,
    ) -> Result<Typed, Error> {
        let value = self
            .coerce(tag, payload, path, depth)
            .map_err(|err| err.with_tag(tag.as_str()).with_path(path))?;
        Ok(Typed { tag, value })
    }

    fn coerce(&self, tag: Tag, payload: &Node, path: &str, depth: usize) -> Result<Value, Error> {
        match tag {
            Tag::S => coerce::to_string(payload),
            Tag::N => coerce::to_number(payload),
            Tag::Bool => coerce::to_boolean(payload).map(Value::Bool),
            Tag::Null => coerce::to_null(payload),
            Tag::L => self.list_at(payload, path, depth + 1),
            Tag::M => {
                let map = payload.as_map().ok_or_else(|| {
                    Error::new(ErrorKind::InvalidData).with_message(format!(
                        "map payload must be an object, found {}",
                        payload.kind_name()
                    ))
                })?;
                self.map_at(map, path, depth + 1)
            }
        }
    }

    fn check_depth(&self, path: &str, depth: usize) -> Result<(), Error> {
        if depth > self.options.max_depth {
            return Err(Error::new(ErrorKind::DepthLimit)
                .with_message(format!(
                    "nesting exceeds max depth {}",
                    self.options.max_depth
                ))
                .with_path(path));
        }
        Ok(())
    }

    fn list_at(&self, node: &Node, path: &str, depth: usize) -> Result<Value, Error> {
        self.check_depth(path, depth)?;
        let items = node.as_list().ok_or_else(|| {
            Error::new(ErrorKind::InvalidData).with_message(format!(
                "list payload must be an array, found {}",
                node.kind_name()
            ))
        })?;

        let values: Vec<Value> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let item_path = format!("{path}[{index}]");
                let Some(tagged) = item.as_map() else {
                    debug!(path = %item_path, found = item.kind_name(), "dropping untagged list element");
                    return None;
                };
                self.list_element(tagged, &item_path, depth)
            })
            .collect();

        if values.is_empty() {
            debug!(path, "list has no surviving elements");
            return Err(Error::new(ErrorKind::EmptyData)
                .with_message("list has no valid elements")
                .with_path(path));
        }
        Ok(Value::Array(values))
    }

    fn list_element(&self, tagged: &NodeMap, path: &str, depth: usize) -> Option<Value> {
        let (tag, payload) = match self.select(tagged) {
            Ok(selected) => selected,
            Err(err) => {
                debug!(path, kind = err.kind().as_str(), error = %err, "dropping list element");
                return None;
            }
        };
        // Disallowed tags are dropped before recursing so nested aggregates are never walked.
        if !tag.allowed_in_list() {
            debug!(path, tag = tag.as_str(), "dropping list element with non-scalar tag");
            return None;
        }
        match self.dispatch_selected(tag, payload, path, depth) {
            Ok(typed) => Some(typed.value),
            Err(err) => {
                debug!(path, kind = err.kind().as_str(), error = %err, "dropping list element");
                None
            }
        }
    }

    fn map_at(&self, map: &NodeMap, path: &str, depth: usize) -> Result<Value, Error> {
        self.check_depth(path, depth)?;

        // NodeMap iterates in key order, so the collected object is already sorted.
        let entries: Map<String, Value> = map
            .iter()
            .filter_map(|(key, value)| {
                if key.is_empty() {
                    debug!(path, "dropping attribute with empty name");
                    return None;
                }
                let entry_path = format!("{path}.{key}");
                let Some(tagged) = value.as_map() else {
                    debug!(path = %entry_path, found = value.kind_name(), "dropping untagged attribute");
                    return None;
                };
                match self.dispatch(tagged, &entry_path, depth) {
                    Ok(typed) => Some((key.clone(), typed.value)),
                    Err(err) => {
                        debug!(
                            path = %entry_path,
                            kind = err.kind().as_str(),
                            error = %err,
                            "dropping attribute"
                        );
                        None
                    }
                }
            })
            .collect();

        if entries.is_empty() {
            debug!(path, "attribute set has no surviving entries");
            return Err(Error::new(ErrorKind::EmptyData)
                .with_message("attribute set has no valid entries")
                .with_path(path));
        }
        Ok(Value::Object(entries))
    }
}
