//! Immutable molecule model.
//!
//! Every transition borrows the current model and returns a new one; the
//! argument is never touched. References to missing items are logged and
//! turn the transition into a no-op.

use crate::element::ElementNumber;
use crate::geometry::Vector2;
use crate::id::{AtomId, BondId, ItemId, ItemKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const ATOM_MIN_ELECTRONS: u8 = 0;
/// Octet limit shared by bonding and non-bonding electrons.
pub const ATOM_MAX_ELECTRONS: u8 = 8;

// ─── Bond multiplicity ───────────────────────────────────────────────────

/// Bond order. Serialized as the plain number `1`, `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BondMultiplicity {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl BondMultiplicity {
    pub const ALL: [BondMultiplicity; 3] = [Self::Single, Self::Double, Self::Triple];

    pub fn count(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("bond multiplicity must be 1, 2 or 3, got {0}")]
pub struct InvalidMultiplicity(pub u8);

impl TryFrom<u8> for BondMultiplicity {
    type Error = InvalidMultiplicity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            3 => Ok(Self::Triple),
            other => Err(InvalidMultiplicity(other)),
        }
    }
}

impl From<BondMultiplicity> for u8 {
    fn from(m: BondMultiplicity) -> u8 {
        m.count()
    }
}

impl fmt::Display for BondMultiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

// ─── Records ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Atom")]
pub struct AtomRecord {
    #[serde(rename = "itemId")]
    pub id: AtomId,
    pub element: ElementNumber,
    pub position: Vector2,
    /// Non-bonding outer electrons drawn around the symbol.
    #[serde(rename = "electrons")]
    pub electron_count: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Bond")]
pub struct BondRecord {
    #[serde(rename = "itemId")]
    pub id: BondId,
    #[serde(rename = "leftAtomId")]
    pub left: AtomId,
    #[serde(rename = "rightAtomId")]
    pub right: AtomId,
    pub multiplicity: BondMultiplicity,
}

impl BondRecord {
    pub fn touches(&self, atom: AtomId) -> bool {
        self.left == atom || self.right == atom
    }

    /// Whether this bond joins `a` and `b`, in either order.
    pub fn joins(&self, a: AtomId, b: AtomId) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }

    /// The endpoint across from `atom`, if `atom` is an endpoint at all.
    pub fn other_end(&self, atom: AtomId) -> Option<AtomId> {
        if self.left == atom {
            Some(self.right)
        } else if self.right == atom {
            Some(self.left)
        } else {
            None
        }
    }
}

// ─── Model ───────────────────────────────────────────────────────────────

/// The persisted molecule: atoms and bonds keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoleculeModel {
    #[serde(default)]
    pub atoms: BTreeMap<AtomId, AtomRecord>,
    #[serde(default)]
    pub bonds: BTreeMap<BondId, BondRecord>,
}

impl MoleculeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    pub fn atom(&self, id: AtomId) -> Option<&AtomRecord> {
        self.atoms.get(&id)
    }

    pub fn bond(&self, id: BondId) -> Option<&BondRecord> {
        self.bonds.get(&id)
    }

    /// Which kind of persisted item `item` names, if any.
    pub fn kind_of(&self, item: ItemId) -> Option<ItemKind> {
        if self.atoms.contains_key(&AtomId::from_item(item)) {
            Some(ItemKind::Atom)
        } else if self.bonds.contains_key(&BondId::from_item(item)) {
            Some(ItemKind::Bond)
        } else {
            None
        }
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.kind_of(item).is_some()
    }

    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<&BondRecord> {
        self.bonds.values().find(|bond| bond.joins(a, b))
    }

    pub fn bonds_of(&self, atom: AtomId) -> impl Iterator<Item = &BondRecord> + '_ {
        self.bonds.values().filter(move |bond| bond.touches(atom))
    }

    /// Electrons already committed to bonds touching `atom`.
    pub fn bonded_electrons(&self, atom: AtomId) -> u8 {
        self.bonds_of(atom)
            .map(|bond| bond.multiplicity.count())
            .fold(0u8, u8::saturating_add)
    }

    /// Upper bound for the atom's non-bonding electron count.
    pub fn max_free_electrons(&self, atom: AtomId) -> u8 {
        ATOM_MAX_ELECTRONS.saturating_sub(self.bonded_electrons(atom))
    }

    fn clamp_electrons(&self, atom: AtomId, count: i32) -> u8 {
        let max = i32::from(self.max_free_electrons(atom));
        // max >= 0, so the clamp range is never inverted
        count.clamp(i32::from(ATOM_MIN_ELECTRONS), max) as u8
    }

    fn reclamp(&mut self, atom: AtomId) {
        let Some(current) = self.atoms.get(&atom).map(|a| a.electron_count) else {
            return;
        };
        let clamped = self.clamp_electrons(atom, i32::from(current));
        if let Some(record) = self.atoms.get_mut(&atom) {
            record.electron_count = clamped;
        }
    }

    // ─── Transitions ─────────────────────────────────────────────────────

    /// Insert a new atom with no free electrons. An id that is already in
    /// use is rejected.
    pub fn add_atom(&self, id: AtomId, element: ElementNumber, position: Vector2) -> Self {
        if self.atoms.contains_key(&id) || self.bonds.contains_key(&BondId::from_item(id.item())) {
            log::warn!("add_atom: id {id} already in use, ignoring");
            return self.clone();
        }
        let mut next = self.clone();
        next.atoms.insert(
            id,
            AtomRecord {
                id,
                element,
                position,
                electron_count: 0,
            },
        );
        next
    }

    pub fn move_atom(&self, id: AtomId, position: Vector2) -> Self {
        let mut next = self.clone();
        match next.atoms.get_mut(&id) {
            Some(atom) => atom.position = position,
            None => log::debug!("move_atom: unknown atom {id}"),
        }
        next
    }

    /// Bond `left` and `right`, replacing any bond already joining them,
    /// then re-clamp both endpoints.
    pub fn add_bond(
        &self,
        id: BondId,
        left: AtomId,
        right: AtomId,
        multiplicity: BondMultiplicity,
    ) -> Self {
        if left == right {
            log::warn!("add_bond: refusing to bond {left} to itself");
            return self.clone();
        }
        if !self.atoms.contains_key(&left) || !self.atoms.contains_key(&right) {
            log::debug!("add_bond: missing endpoint {left} or {right}");
            return self.clone();
        }
        if self.atoms.contains_key(&AtomId::from_item(id.item())) {
            log::warn!("add_bond: id {id} names an atom, ignoring");
            return self.clone();
        }

        let mut next = self.clone();
        next.bonds.retain(|_, bond| !bond.joins(left, right));
        next.bonds.insert(
            id,
            BondRecord {
                id,
                left,
                right,
                multiplicity,
            },
        );
        next.reclamp(left);
        next.reclamp(right);
        next
    }

    pub fn set_bond_multiplicity(&self, id: BondId, multiplicity: BondMultiplicity) -> Self {
        let mut next = self.clone();
        let Some(bond) = next.bonds.get_mut(&id) else {
            log::debug!("set_bond_multiplicity: unknown bond {id}");
            return next;
        };
        bond.multiplicity = multiplicity;
        let (left, right) = (bond.left, bond.right);
        next.reclamp(left);
        next.reclamp(right);
        next
    }

    pub fn change_atom_electrons(&self, id: AtomId, delta: i32) -> Self {
        let Some(atom) = self.atoms.get(&id) else {
            log::debug!("change_atom_electrons: unknown atom {id}");
            return self.clone();
        };
        self.set_atom_electrons(id, i32::from(atom.electron_count).saturating_add(delta))
    }

    pub fn set_atom_electrons(&self, id: AtomId, count: i32) -> Self {
        let clamped = self.clamp_electrons(id, count);
        let mut next = self.clone();
        match next.atoms.get_mut(&id) {
            Some(atom) => atom.electron_count = clamped,
            None => log::debug!("set_atom_electrons: unknown atom {id}"),
        }
        next
    }

    /// Remove an atom together with every bond touching it, or a single
    /// bond. Unknown ids are ignored.
    pub fn delete_item(&self, item: ItemId) -> Self {
        let mut next = self.clone();
        match self.kind_of(item) {
            Some(ItemKind::Atom) => {
                let atom = AtomId::from_item(item);
                next.atoms.remove(&atom);
                next.bonds.retain(|_, bond| !bond.touches(atom));
            }
            Some(ItemKind::Bond) => {
                next.bonds.remove(&BondId::from_item(item));
            }
            None => log::debug!("delete_item: unknown item {item}"),
        }
        next
    }

    /// Translate every atom named in `items` by `delta`. Bond ids in
    /// `items` are skipped; bonds follow their endpoints.
    pub fn move_group(&self, delta: Vector2, items: &[ItemId]) -> Self {
        let mut next = self.clone();
        for item in items {
            if let Some(atom) = next.atoms.get_mut(&AtomId::from_item(*item)) {
                atom.position += delta;
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(name: &str) -> AtomId {
        AtomId::intern(name)
    }

    fn bond(name: &str) -> BondId {
        BondId::intern(name)
    }

    fn two_atoms() -> MoleculeModel {
        MoleculeModel::new()
            .add_atom(atom("m_a1"), ElementNumber::CARBON, Vector2::new(0.0, 0.0))
            .add_atom(atom("m_a2"), ElementNumber::OXYGEN, Vector2::new(10.0, 0.0))
    }

    #[test]
    fn add_atom_starts_without_electrons() {
        let model = two_atoms();
        let a1 = model.atom(atom("m_a1")).unwrap();
        assert_eq!(a1.electron_count, 0);
        assert_eq!(a1.element, ElementNumber::CARBON);
    }

    #[test]
    fn add_atom_rejects_colliding_id() {
        let model = two_atoms();
        let again = model.add_atom(atom("m_a1"), ElementNumber::HYDROGEN, Vector2::new(5.0, 5.0));
        assert_eq!(again, model);
    }

    #[test]
    fn transitions_leave_input_untouched() {
        let model = two_atoms();
        let snapshot = model.clone();
        let _ = model.move_atom(atom("m_a1"), Vector2::new(3.0, 3.0));
        let _ = model.set_atom_electrons(atom("m_a1"), 4);
        let _ = model.delete_item(atom("m_a2").item());
        assert_eq!(model, snapshot);
    }

    #[test]
    fn double_bond_clamps_both_ends() {
        let model = two_atoms()
            .set_atom_electrons(atom("m_a1"), 8)
            .set_atom_electrons(atom("m_a2"), 8)
            .add_bond(bond("m_b1"), atom("m_a1"), atom("m_a2"), BondMultiplicity::Double);
        assert_eq!(model.bonds.len(), 1);
        assert_eq!(model.atom(atom("m_a1")).unwrap().electron_count, 6);
        assert_eq!(model.atom(atom("m_a2")).unwrap().electron_count, 6);
    }

    #[test]
    fn newest_bond_between_a_pair_wins() {
        let model = two_atoms()
            .add_bond(bond("m_b1"), atom("m_a1"), atom("m_a2"), BondMultiplicity::Single)
            .add_bond(bond("m_b2"), atom("m_a2"), atom("m_a1"), BondMultiplicity::Triple);
        assert_eq!(model.bonds.len(), 1);
        let only = model.bonds.values().next().unwrap();
        assert_eq!(only.id, bond("m_b2"));
        assert_eq!(only.multiplicity, BondMultiplicity::Triple);
    }

    #[test]
    fn add_bond_ignores_self_loops_and_missing_atoms() {
        let model = two_atoms();
        let looped = model.add_bond(
            bond("m_b1"),
            atom("m_a1"),
            atom("m_a1"),
            BondMultiplicity::Single,
        );
        assert_eq!(looped, model);
        let dangling = model.add_bond(
            bond("m_b1"),
            atom("m_a1"),
            atom("m_nope"),
            BondMultiplicity::Single,
        );
        assert_eq!(dangling, model);
    }

    #[test]
    fn multiplicity_change_reclamps() {
        let model = two_atoms()
            .add_bond(bond("m_b1"), atom("m_a1"), atom("m_a2"), BondMultiplicity::Single)
            .set_atom_electrons(atom("m_a1"), 7);
        assert_eq!(model.atom(atom("m_a1")).unwrap().electron_count, 7);
        let model = model.set_bond_multiplicity(bond("m_b1"), BondMultiplicity::Triple);
        assert_eq!(model.atom(atom("m_a1")).unwrap().electron_count, 5);
    }

    #[test]
    fn electron_changes_clamp_at_both_ends() {
        let model = two_atoms().change_atom_electrons(atom("m_a1"), -3);
        assert_eq!(model.atom(atom("m_a1")).unwrap().electron_count, 0);
        let model = model.change_atom_electrons(atom("m_a1"), 20);
        assert_eq!(model.atom(atom("m_a1")).unwrap().electron_count, 8);
        let missing = model.change_atom_electrons(atom("m_ghost"), 1);
        assert_eq!(missing, model);
    }

    #[test]
    fn deleting_atom_cascades_to_its_bonds() {
        let model = two_atoms()
            .add_atom(atom("m_a3"), ElementNumber::HYDROGEN, Vector2::new(0.0, 10.0))
            .add_bond(bond("m_b1"), atom("m_a1"), atom("m_a2"), BondMultiplicity::Single)
            .add_bond(bond("m_b2"), atom("m_a1"), atom("m_a3"), BondMultiplicity::Single)
            .add_bond(bond("m_b3"), atom("m_a2"), atom("m_a3"), BondMultiplicity::Single);
        let model = model.delete_item(atom("m_a1").item());
        assert_eq!(model.atoms.len(), 2);
        let remaining: Vec<_> = model.bonds.keys().copied().collect();
        assert_eq!(remaining, vec![bond("m_b3")]);
    }

    #[test]
    fn deleting_bond_keeps_atoms() {
        let model = two_atoms()
            .add_bond(bond("m_b1"), atom("m_a1"), atom("m_a2"), BondMultiplicity::Single)
            .delete_item(bond("m_b1").item());
        assert!(model.bonds.is_empty());
        assert_eq!(model.atoms.len(), 2);
    }

    #[test]
    fn move_group_by_zero_is_identity() {
        let model = two_atoms();
        let ids = [atom("m_a1").item(), atom("m_a2").item()];
        assert_eq!(model.move_group(Vector2::ZERO, &ids), model);
        let moved = model.move_group(Vector2::new(1.0, 2.0), &ids[..1]);
        assert_eq!(moved.atom(atom("m_a1")).unwrap().position, Vector2::new(1.0, 2.0));
        assert_eq!(moved.atom(atom("m_a2")).unwrap().position, Vector2::new(10.0, 0.0));
    }

    #[test]
    fn multiplicity_wire_values() {
        assert_eq!(BondMultiplicity::try_from(2u8), Ok(BondMultiplicity::Double));
        assert_eq!(BondMultiplicity::try_from(4u8), Err(InvalidMultiplicity(4)));
        let parsed: Result<BondMultiplicity, _> = serde_json::from_str("0");
        assert!(parsed.is_err());
    }
}
