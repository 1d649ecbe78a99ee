//! Read-only relationship index over a [`MoleculeModel`].
//!
//! Atoms are graph nodes and bonds are undirected edges. The index is
//! rebuilt from scratch whenever the model changes and is never edited.

use crate::id::{AtomId, BondId, ItemId};
use crate::model::{BondMultiplicity, MoleculeModel};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondEdge {
    pub id: BondId,
    pub multiplicity: BondMultiplicity,
}

#[derive(Debug, Clone, Default)]
pub struct MoleculeGraph {
    graph: StableUnGraph<AtomId, BondEdge>,
    atom_index: HashMap<AtomId, NodeIndex>,
    bond_index: HashMap<BondId, EdgeIndex>,
}

/// Build the index for `model` in O(atoms + bonds).
pub fn build_graph(model: &MoleculeModel) -> MoleculeGraph {
    MoleculeGraph::build(model)
}

impl MoleculeGraph {
    pub fn build(model: &MoleculeModel) -> Self {
        let mut graph =
            StableUnGraph::with_capacity(model.atoms.len(), model.bonds.len());
        let mut atom_index = HashMap::with_capacity(model.atoms.len());
        let mut bond_index = HashMap::with_capacity(model.bonds.len());

        for id in model.atoms.keys() {
            atom_index.insert(*id, graph.add_node(*id));
        }
        for bond in model.bonds.values() {
            let (Some(&left), Some(&right)) =
                (atom_index.get(&bond.left), atom_index.get(&bond.right))
            else {
                log::warn!("graph: bond {} references a missing atom", bond.id);
                continue;
            };
            let edge = graph.add_edge(
                left,
                right,
                BondEdge {
                    id: bond.id,
                    multiplicity: bond.multiplicity,
                },
            );
            bond_index.insert(bond.id, edge);
        }

        log::trace!(
            "graph: rebuilt with {} atoms, {} bonds",
            atom_index.len(),
            bond_index.len()
        );
        Self {
            graph,
            atom_index,
            bond_index,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atom_index.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bond_index.len()
    }

    pub fn contains_atom(&self, atom: AtomId) -> bool {
        self.atom_index.contains_key(&atom)
    }

    pub fn incident_bonds(&self, atom: AtomId) -> SmallVec<[BondId; 4]> {
        self.neighbors(atom).into_iter().map(|(bond, _)| bond).collect()
    }

    /// Each bond touching `atom` together with the atom across it.
    pub fn neighbors(&self, atom: AtomId) -> SmallVec<[(BondId, AtomId); 4]> {
        let Some(&node) = self.atom_index.get(&atom) else {
            return SmallVec::new();
        };
        self.graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node { edge.target() } else { edge.source() };
                (edge.weight().id, self.graph[other])
            })
            .collect()
    }

    pub fn endpoints(&self, bond: BondId) -> Option<(AtomId, AtomId)> {
        let edge = *self.bond_index.get(&bond)?;
        let (a, b) = self.graph.edge_endpoints(edge)?;
        Some((self.graph[a], self.graph[b]))
    }

    /// Sum of multiplicities of the bonds touching `atom`.
    pub fn bonded_electrons(&self, atom: AtomId) -> u8 {
        let Some(&node) = self.atom_index.get(&atom) else {
            return 0;
        };
        self.graph
            .edges(node)
            .map(|edge| edge.weight().multiplicity.count())
            .fold(0u8, u8::saturating_add)
    }

    /// Every atom and bond reachable from `pivot`, each listed once and
    /// the pivot first. A bond pivot or an unknown id yields nothing.
    pub fn find_connected_group(&self, pivot: ItemId) -> Vec<ItemId> {
        let Some(&start) = self.atom_index.get(&AtomId::from_item(pivot)) else {
            return Vec::new();
        };

        let mut group = vec![self.graph[start].item()];
        let mut seen_atoms = HashSet::from([start]);
        let mut seen_bonds = HashSet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for edge in self.graph.edges(node) {
                if seen_bonds.insert(edge.id()) {
                    group.push(edge.weight().id.item());
                }
                let other = if edge.source() == node { edge.target() } else { edge.source() };
                if seen_atoms.insert(other) {
                    group.push(self.graph[other].item());
                    queue.push_back(other);
                }
            }
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementNumber;
    use crate::geometry::Vector2;

    fn ring() -> MoleculeModel {
        let ids: Vec<_> = (0..4).map(|i| AtomId::intern(&format!("g_ring{i}"))).collect();
        let mut model = MoleculeModel::new();
        for (i, id) in ids.iter().enumerate() {
            model = model.add_atom(*id, ElementNumber::CARBON, Vector2::new(i as f64, 0.0));
        }
        for i in 0..4 {
            model = model.add_bond(
                BondId::intern(&format!("g_ringb{i}")),
                ids[i],
                ids[(i + 1) % 4],
                BondMultiplicity::Single,
            );
        }
        model
    }

    #[test]
    fn cycles_terminate_and_list_each_item_once() {
        let graph = build_graph(&ring());
        let group = graph.find_connected_group(AtomId::intern("g_ring2").item());
        assert_eq!(group.len(), 8);
        let unique: HashSet<_> = group.iter().collect();
        assert_eq!(unique.len(), 8);
        assert_eq!(group[0], AtomId::intern("g_ring2").item());
    }

    #[test]
    fn bond_pivot_yields_nothing() {
        let graph = build_graph(&ring());
        assert!(graph.find_connected_group(BondId::intern("g_ringb0").item()).is_empty());
        assert!(graph.find_connected_group(ItemId::intern("g_unknown")).is_empty());
    }

    #[test]
    fn incidence_and_endpoints() {
        let graph = build_graph(&ring());
        let a0 = AtomId::intern("g_ring0");
        let mut incident = graph.incident_bonds(a0).into_vec();
        incident.sort();
        assert_eq!(
            incident,
            vec![BondId::intern("g_ringb0"), BondId::intern("g_ringb3")]
        );
        assert_eq!(graph.bonded_electrons(a0), 2);
        assert_eq!(
            graph.endpoints(BondId::intern("g_ringb0")),
            Some((a0, AtomId::intern("g_ring1")))
        );
        assert_eq!(graph.atom_count(), 4);
        assert_eq!(graph.bond_count(), 4);
    }
}
