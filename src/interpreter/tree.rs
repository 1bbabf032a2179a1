use tracing::debug;

use crate::{
    error::InterpretError,
    interpreter::normalizer::{NormalizedItem, handle::HandleTable},
};

/// One node of an [`ExpressionTree`], linked to its children by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Index of the left child, if any.
    pub left:  Option<usize>,
    /// The normalized item stored at this node.
    pub data:  NormalizedItem,
    /// Index of the right child, if any.
    pub right: Option<usize>,
}

/// A chain of operators stored as a flat, index-linked arena.
///
/// Node `i` holds item `i` of the normalized line. Every operator takes the
/// item before it as its left child and the next operator (or, for the last
/// operator, the item after it) as its right child. The tree groups nothing:
/// an in-order walk from the first operator gives back the line in its
/// original order.
///
/// ```text
///   a + b * c        +
///                   / \
///                  a   *
///                     / \
///                    b   c
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionTree {
    nodes:     Vec<TreeNode>,
    operators: Vec<usize>,
}

impl ExpressionTree {
    /// Builds the arena for a normalized line.
    ///
    /// An operator's left child is the previous item unless that item is
    /// itself an operator. Its right child is the next operator if there is
    /// one, otherwise the following item if there is one.
    #[must_use]
    pub fn build(items: Vec<NormalizedItem>) -> Self {
        let operators: Vec<usize> = items.iter()
                                         .enumerate()
                                         .filter(|(_, item)| item.is_operator())
                                         .map(|(i, _)| i)
                                         .collect();
        let is_operator: Vec<bool> = items.iter().map(NormalizedItem::is_operator).collect();
        let len = items.len();
        let mut occurrence = 0;

        let nodes = items.into_iter()
                         .enumerate()
                         .map(|(i, data)| {
                             if !data.is_operator() {
                                 return TreeNode { left: None,
                                                   data,
                                                   right: None };
                             }

                             let left = i.checked_sub(1).filter(|&prev| !is_operator[prev]);
                             let right = operators.get(occurrence + 1)
                                                  .copied()
                                                  .or_else(|| Some(i + 1).filter(|&next| next < len));
                             occurrence += 1;

                             TreeNode { left, data, right }
                         })
                         .collect();

        Self { nodes, operators }
    }

    /// The nodes in item order.
    #[must_use]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Indices of the operator nodes, in order.
    #[must_use]
    pub fn operators(&self) -> &[usize] {
        &self.operators
    }

    /// The node a traversal starts from: the first operator, or the first
    /// item of a line without operators.
    #[must_use]
    pub fn root(&self) -> Option<usize> {
        self.operators
            .first()
            .copied()
            .or_else(|| (!self.nodes.is_empty()).then_some(0))
    }

    /// Walks the tree in order from [`ExpressionTree::root`] and returns the
    /// visited node indices.
    #[must_use]
    pub fn traverse(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root();

        while current.is_some() || !stack.is_empty() {
            while let Some(index) = current {
                stack.push(index);
                current = self.nodes[index].left;
            }
            if let Some(index) = stack.pop() {
                order.push(index);
                current = self.nodes[index].right;
            }
        }

        order
    }

    /// Walks the tree, replaces every handle with its recorded text, and
    /// joins the result with single spaces.
    ///
    /// # Errors
    /// - [`InterpretError::DetachedItem`] if the walk misses an item.
    /// - [`InterpretError::UnresolvedHandle`] if a handle is not in
    ///   `handles`.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::{
    ///     lexer::Token,
    ///     normalizer::normalize,
    ///     tree::ExpressionTree,
    /// };
    ///
    /// let tokens = [Token::new("DIGIT", "3"), Token::new("OPERATOR", "*"), Token::new("DIGIT", "4")];
    /// let normalized = normalize(&tokens).unwrap();
    /// let tree = ExpressionTree::build(normalized.items);
    ///
    /// assert_eq!(tree.resolve(&normalized.handles).unwrap(), "3 * 4");
    /// ```
    pub fn resolve(&self, handles: &HandleTable) -> Result<String, InterpretError> {
        let order = self.traverse();

        if order.len() != self.nodes.len() {
            let mut visited = vec![false; self.nodes.len()];
            for &index in &order {
                visited[index] = true;
            }
            let index = visited.iter().position(|seen| !seen).unwrap_or_default();
            return Err(InterpretError::DetachedItem { index });
        }

        let parts = order.into_iter()
                         .map(|index| match &self.nodes[index].data {
                             NormalizedItem::Operator(text) | NormalizedItem::Identifier(text) => {
                                 Ok(text.clone())
                             },
                             NormalizedItem::ValueHandle(handle) => {
                                 handles.resolve(*handle).map(str::to_string)
                             },
                             NormalizedItem::Call(call) => call.source(handles),
                         })
                         .collect::<Result<Vec<_>, _>>()?;

        let expression = parts.join(" ");
        debug!(%expression, "assembled expression");
        Ok(expression)
    }
}
