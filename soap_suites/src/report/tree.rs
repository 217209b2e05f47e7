//! Read-side helpers over `xot` trees.

use xot::{NameId, Node, Xot};

use crate::error::{SuitesError, SuitesResult};

/// A parsed document and the root element.
pub(super) struct Document {
    pub(super) xot: Xot,
    pub(super) root: Node,
}

impl Document {
    /// Parses `text`, naming `source_name` in any error.
    pub(super) fn parse(text: &str, source_name: &str) -> SuitesResult<Self> {
        let mut xot = Xot::new();
        let document = xot
            .parse(text)
            .map_err(|err| SuitesError::xml(source_name, err.to_string()))?;
        let root = xot
            .children(document)
            .find(|&node| xot.is_element(node))
            .ok_or_else(|| SuitesError::xml(source_name, "document has no root element"))?;
        Ok(Self { xot, root })
    }

    /// Interns `name` so it can be compared against element and attribute
    /// names.
    pub(super) fn name(&mut self, name: &str) -> NameId {
        self.xot.add_name(name)
    }

    pub(super) fn is(&self, node: Node, name: NameId) -> bool {
        self.xot
            .element(node)
            .is_some_and(|element| element.name() == name)
    }

    /// Child elements of `node` called `name`, in document order.
    pub(super) fn children_named(&self, node: Node, name: NameId) -> impl Iterator<Item = Node> + '_ {
        self.xot
            .children(node)
            .filter(move |&child| self.is(child, name))
    }

    pub(super) fn first_child_named(&self, node: Node, name: NameId) -> Option<Node> {
        self.children_named(node, name).next()
    }

    pub(super) fn attribute(&self, node: Node, name: NameId) -> Option<&str> {
        self.xot.get_attribute(node, name)
    }

    /// Concatenated text of the direct text children of `node`, trimmed.
    /// Returns `None` when there is no non-blank text.
    pub(super) fn text(&self, node: Node) -> Option<String> {
        let text: String = self
            .xot
            .children(node)
            .filter_map(|child| self.xot.text_str(child))
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}
