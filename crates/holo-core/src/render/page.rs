//! In-memory page: a set of output nodes addressed by id.

use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

/// Node the character name is written to.
pub const CHARACTER_NODE: &str = "character";
/// Node the film titles are written to.
pub const CHARACTER_DETAILS_NODE: &str = "character-details";

/// What a node currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum NodeContent {
    Text(String),
    List(Vec<String>),
}

/// One output node. `content` is None until something writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: String,
    content: Option<NodeContent>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> Option<&NodeContent> {
        self.content.as_ref()
    }

    /// Text shown by the node, if it holds text.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(NodeContent::Text(t)) => Some(t),
            _ => None,
        }
    }

    /// Items shown by the node, if it holds a list.
    pub fn items(&self) -> Option<&[String]> {
        match &self.content {
            Some(NodeContent::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.content = Some(NodeContent::Text(text.to_string()));
    }

    /// Replaces whatever the node held with an empty list.
    pub fn clear(&mut self) {
        self.content = Some(NodeContent::List(Vec::new()));
    }

    pub fn append_item(&mut self, item: &str) {
        match &mut self.content {
            Some(NodeContent::List(items)) => items.push(item.to_string()),
            _ => self.content = Some(NodeContent::List(vec![item.to_string()])),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no node with id #{0} on the page")]
    MissingNode(String),
}

/// Ordered collection of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    nodes: Vec<Node>,
}

impl Default for Page {
    /// The two nodes the character view renders into, both unwritten.
    fn default() -> Self {
        Self::with_nodes(&[CHARACTER_NODE, CHARACTER_DETAILS_NODE])
    }
}

impl Page {
    pub fn with_nodes(ids: &[&str]) -> Self {
        Self {
            nodes: ids.iter().map(|id| Node::new(*id)).collect(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, PageError> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| PageError::MissingNode(id.to_string()))
    }

    /// The `#character` and `#character-details` nodes, for one render.
    pub fn character_nodes_mut(&mut self) -> Result<(&mut Node, &mut Node), PageError> {
        let name = self.position(CHARACTER_NODE)?;
        let details = self.position(CHARACTER_DETAILS_NODE)?;
        // Distinct ids, so distinct positions.
        if name < details {
            let (head, tail) = self.nodes.split_at_mut(details);
            Ok((&mut head[name], &mut tail[0]))
        } else {
            let (head, tail) = self.nodes.split_at_mut(name);
            Ok((&mut tail[0], &mut head[details]))
        }
    }

    /// Plain-text rendering, one `#id:` line per node and one `  - item` line per list item.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for node in &self.nodes {
            match &node.content {
                None => writeln!(out, "#{}:", node.id)?,
                Some(NodeContent::Text(t)) => writeln!(out, "#{}: {}", node.id, t)?,
                Some(NodeContent::List(items)) => {
                    writeln!(out, "#{}:", node.id)?;
                    for item in items {
                        writeln!(out, "  - {}", item)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
