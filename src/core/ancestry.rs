//! # Ancestor Chain Index
//!
//! Per-route ancestor chains, root-first, each ending with the route itself.
//! Computed once when the tree is built; the tree never changes afterwards.

use crate::core::route::RouteId;

#[derive(Debug, Default, Clone)]
pub struct AncestorIndex {
    chains: Vec<Vec<RouteId>>,
}

impl AncestorIndex {
    /// Build from the parent link of every route, in id order.
    ///
    /// Parents always carry a smaller id than their children (depth-first
    /// allocation), so each chain extends an already computed one.
    pub fn build(parents: impl IntoIterator<Item = Option<RouteId>>) -> Self {
        let mut chains: Vec<Vec<RouteId>> = Vec::new();
        for (index, parent) in parents.into_iter().enumerate() {
            let mut chain = match parent {
                Some(parent) => chains[parent.index()].clone(),
                None => Vec::new(),
            };
            chain.push(RouteId(index));
            chains.push(chain);
        }
        Self { chains }
    }

    pub fn chain(&self, id: RouteId) -> Option<&[RouteId]> {
        self.chains.get(id.index()).map(Vec::as_slice)
    }

    pub fn depth(&self, id: RouteId) -> Option<usize> {
        self.chain(id).map(<[RouteId]>::len)
    }
}
