//! Node type ids and grammar-declared nodes.
//!
//! The first few type indices are reserved and carry positional meaning for
//! the host tree builder. Grammar-declared node types start at [`NodeId::Safe`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dense node type index. Stable for the lifetime of a grammar instance.
pub type NodeTypeId = u16;

/// Opaque host metadata attached to a node (display name, fold hints, ...).
pub type Props = IndexMap<String, PropValue>;

/// Reserved node type indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeId {
    /// Empty/absent node. Tokens of this type carry positions only.
    None = 0,
    /// Document root.
    Top = 1,
    /// Emitted when no rule matched and one character was skipped.
    Unrecognized = 2,
    /// Emitted when an open scope was never closed.
    Incomplete = 3,
    /// First index available to grammar-declared nodes.
    Safe = 4,
}

impl NodeId {
    /// Builtins that are real nodes (everything below `Safe`).
    pub const BUILTINS: [NodeId; 4] = [
        NodeId::None,
        NodeId::Top,
        NodeId::Unrecognized,
        NodeId::Incomplete,
    ];

    #[inline]
    pub const fn id(self) -> NodeTypeId {
        self as NodeTypeId
    }

    /// Map a raw id back to a reserved slot. Grammar ids map to `None`.
    pub fn from_id(id: NodeTypeId) -> Option<Self> {
        match id {
            0 => Some(Self::None),
            1 => Some(Self::Top),
            2 => Some(Self::Unrecognized),
            3 => Some(Self::Incomplete),
            _ => None,
        }
    }

    #[inline]
    pub fn is_builtin(id: NodeTypeId) -> bool {
        id < Self::Safe.id()
    }
}

/// Metadata value preserved for the host. The core does not interpret it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Any other JSON value, kept as its serialized text.
    Json(String),
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            other => Self::Json(other.to_string()),
        }
    }
}

/// One node type declared by a grammar (or one of the builtins).
#[derive(Clone, Debug, PartialEq)]
pub struct GrammarNode {
    pub id: NodeTypeId,
    pub name: String,
    pub props: Props,
}

impl GrammarNode {
    pub fn new(id: NodeTypeId, name: impl Into<String>, props: Props) -> Self {
        Self {
            id,
            name: name.into(),
            props,
        }
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// Error nodes: the two error builtins, or any node declaring `"error": true`.
    pub fn is_error(&self) -> bool {
        matches!(
            NodeId::from_id(self.id),
            Some(NodeId::Unrecognized | NodeId::Incomplete)
        ) || matches!(self.prop("error"), Some(PropValue::Bool(true)))
    }
}
