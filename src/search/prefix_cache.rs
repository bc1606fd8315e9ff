use std::collections::HashMap;
use roaring::RoaringBitmap;
use crate::analysis::token::MoveToken;

pub type NodeId = usize;

/// Root stands for "every record" and never stores a set
pub const ROOT: NodeId = 0;

#[derive(Debug)]
struct CacheNode {
    depth: usize,
    games: RoaringBitmap,
    children: HashMap<String, NodeId>,
}

/// Lazily grown prefix tree over move tokens. Node `n` at depth `d`
/// holds the records whose first `d` moves equal the path leading to `n`.
/// Nodes are kept in an arena and never removed or recomputed.
#[derive(Debug)]
pub struct PrefixCache {
    nodes: Vec<CacheNode>,
    max_depth: usize,
}

impl PrefixCache {
    pub fn new(max_depth: usize) -> Self {
        PrefixCache {
            nodes: vec![CacheNode {
                depth: 0,
                games: RoaringBitmap::new(),
                children: HashMap::new(),
            }],
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Follow `query` from the root through existing nodes. Returns the
    /// deepest node reached and its depth (`(ROOT, 0)` when nothing matched).
    pub fn walk(&self, query: &[MoveToken]) -> (NodeId, usize) {
        let mut node = ROOT;
        let mut depth = 0;

        while depth < query.len() && depth < self.max_depth {
            match self.nodes[node].children.get(query[depth].key()) {
                Some(&child) => {
                    node = child;
                    depth += 1;
                }
                None => break,
            }
        }

        (node, depth)
    }

    /// Stored set of a node; `None` for the root
    pub fn games(&self, node: NodeId) -> Option<&RoaringBitmap> {
        if node == ROOT {
            return None;
        }
        self.nodes.get(node).map(|n| &n.games)
    }

    pub fn depth(&self, node: NodeId) -> usize {
        self.nodes[node].depth
    }

    /// Store `games` as the child of `parent` reached by `token`.
    ///
    /// An existing child is returned untouched. Returns `None` when the
    /// parent already sits at the depth limit or the token is empty.
    pub fn insert(&mut self, parent: NodeId, token: &MoveToken, games: RoaringBitmap) -> Option<NodeId> {
        let depth = self.nodes[parent].depth;
        if depth >= self.max_depth || token.key().is_empty() {
            return None;
        }

        if let Some(&child) = self.nodes[parent].children.get(token.key()) {
            return Some(child);
        }

        let child = self.nodes.len();
        self.nodes.push(CacheNode {
            depth: depth + 1,
            games,
            children: HashMap::new(),
        });
        self.nodes[parent].children.insert(token.key().to_string(), child);
        Some(child)
    }

    /// Materialized nodes, root excluded
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Total record ids held across all nodes
    pub fn stored_ids(&self) -> u64 {
        self.nodes.iter().map(|n| n.games.len()).sum()
    }
}
