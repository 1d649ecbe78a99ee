use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Process-wide interner shared by every atom and bond id.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Prefix shared by every view-only preview identifier.
pub const TEMPORARY_PREFIX: &str = "tmp:";

/// A lightweight, interned identifier for atoms and bonds.
/// Backed by a 4-byte `Spur`, so copies and comparisons are O(1).
///
/// Ordering compares the resolved strings so that maps keyed by ids
/// iterate the same way on every target.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Spur);

impl ItemId {
    /// Intern a new string as an ItemId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        ItemId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique ID with a kind prefix (e.g. `atom_1`, `bond_2`).
    pub fn with_prefix(prefix: &str) -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Whether this id names a view-only preview item.
    pub fn is_temporary(&self) -> bool {
        self.as_str().starts_with(TEMPORARY_PREFIX)
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ItemId::intern(&s))
    }
}

// ─── Typed ids ───────────────────────────────────────────────────────────

/// The two kinds of persisted items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Atom,
    Bond,
}

/// Identifier of an atom.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomId(ItemId);

/// Identifier of a bond.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BondId(ItemId);

impl AtomId {
    pub fn intern(s: &str) -> Self {
        AtomId(ItemId::intern(s))
    }

    /// Reinterpret an untyped id as an atom id. Lookups with an id that
    /// names a bond simply miss.
    pub fn from_item(item: ItemId) -> Self {
        AtomId(item)
    }

    /// A new, never-before-issued atom id.
    pub fn fresh() -> Self {
        AtomId(ItemId::with_prefix("atom"))
    }

    /// Preview atom shown while placing a new atom.
    pub fn add_preview() -> Self {
        Self::intern("tmp:addAtom")
    }

    /// Preview atom shown at the drop target of a single-atom move.
    pub fn move_preview() -> Self {
        Self::intern("tmp:moveAtom")
    }

    /// Preview of one member of a group being moved.
    pub fn group_preview(of: AtomId) -> Self {
        Self::intern(&format!("tmp:moveGroup/{}", of.as_str()))
    }

    pub fn item(self) -> ItemId {
        self.0
    }

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }
}

impl BondId {
    pub fn intern(s: &str) -> Self {
        BondId(ItemId::intern(s))
    }

    pub fn from_item(item: ItemId) -> Self {
        BondId(item)
    }

    /// A new, never-before-issued bond id.
    pub fn fresh() -> Self {
        BondId(ItemId::with_prefix("bond"))
    }

    /// Preview bond drawn from the anchor atom to the pointer.
    pub fn add_preview() -> Self {
        Self::intern("tmp:addBond")
    }

    pub fn item(self) -> ItemId {
        self.0
    }

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }
}

impl From<AtomId> for ItemId {
    fn from(id: AtomId) -> Self {
        id.0
    }
}

impl From<BondId> for ItemId {
    fn from(id: BondId) -> Self {
        id.0
    }
}

impl fmt::Debug for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom@{}", self.as_str())
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for BondId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bond@{}", self.as_str())
    }
}

impl fmt::Display for BondId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ItemId::intern("atom_carbon");
        let b = ItemId::intern("atom_carbon");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "atom_carbon");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = AtomId::fresh();
        let b = AtomId::fresh();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("atom_"));
        assert!(BondId::fresh().as_str().starts_with("bond_"));
    }

    #[test]
    fn preview_ids_are_temporary() {
        assert!(AtomId::add_preview().item().is_temporary());
        assert!(AtomId::move_preview().item().is_temporary());
        assert!(BondId::add_preview().item().is_temporary());
        let member = AtomId::intern("atom_7");
        assert!(AtomId::group_preview(member).item().is_temporary());
        assert!(!member.item().is_temporary());
    }

    #[test]
    fn ordering_follows_strings() {
        // Intern in reverse order so the spur order disagrees with the string order
        let z = ItemId::intern("zz_order_probe");
        let a = ItemId::intern("aa_order_probe");
        assert!(a < z);
    }

    #[test]
    fn typed_ids_serialize_as_plain_strings() {
        let id = AtomId::intern("atom_json");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"atom_json\"");
        let back: AtomId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
