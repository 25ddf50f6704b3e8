use std::collections::HashMap;

use super::{CommentGroup, SpanNode};
use crate::syntax::NodeId;

/// Lookup of the comment groups attached to a node.
pub trait CommentIndex {
    /// Groups associated with `id`, in source order; empty when none.
    fn comments_for(&self, id: NodeId) -> &[CommentGroup];
}

/// Comment groups keyed by the node they were associated with.
#[derive(Debug, Clone, Default)]
pub struct CommentMap {
    groups: HashMap<NodeId, Vec<CommentGroup>>,
}

impl CommentMap {
    /// Attach every group to one node of `nodes` (preorder, source order).
    ///
    /// Walking nodes in order, each group that starts before the next node
    /// `q` goes to the grouping node that most recently ended if the group
    /// starts on that node's last line (or the line after, with a blank
    /// line before `q`); failing that, to the previous node `p` under the
    /// same rule or when there is no `q`; otherwise to `q`.
    #[must_use]
    pub fn associate(nodes: &[SpanNode], groups: Vec<CommentGroup>) -> Self {
        let mut map = Self::default();
        let mut pending = groups.into_iter().peekable();
        let mut stack: Vec<&SpanNode> = Vec::new();
        let mut last_closed: Option<&SpanNode> = None;
        let mut previous: Option<&SpanNode> = None;

        for next in nodes.iter().map(Some).chain(std::iter::once(None)) {
            let next_start = next.map_or(usize::MAX, SpanNode::start);
            let next_line = next.map_or(u32::MAX, |n| n.start_line);

            let mut closed = None;
            while stack.last().is_some_and(|top| top.end() <= next_start) {
                closed = stack.pop();
            }
            if closed.is_some() {
                last_closed = closed;
            }

            while let Some(group) = pending.next_if(|g| g.start < next_start) {
                let sticks_to = |node: &SpanNode| {
                    node.end_line == group.start_line
                        || (node.end_line + 1 == group.start_line
                            && group.end_line.saturating_add(1) < next_line)
                };
                let target = match (last_closed, previous, next) {
                    (Some(pg), _, _) if sticks_to(pg) => pg.id,
                    (_, Some(p), q) if sticks_to(p) || q.is_none() => p.id,
                    (_, _, Some(q)) => q.id,
                    _ => continue,
                };
                map.groups.entry(target).or_default().push(group);
            }

            if let Some(node) = next {
                previous = Some(node);
                if node.important {
                    stack.push(node);
                }
            }
        }
        map
    }

    /// Keep only groups attached to a node inside one of `spans`.
    #[must_use]
    pub fn retain_within(mut self, spans: &[NodeId]) -> Self {
        self.groups
            .retain(|id, _| spans.iter().any(|span| span.contains(id)));
        self
    }

    /// Fold another file's map into this one.
    pub fn extend(&mut self, other: Self) {
        for (id, groups) in other.groups {
            self.groups.entry(id).or_default().extend(groups);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl CommentIndex for CommentMap {
    fn comments_for(&self, id: NodeId) -> &[CommentGroup] {
        self.groups.get(&id).map(Vec::as_slice).unwrap_or_default()
    }
}
