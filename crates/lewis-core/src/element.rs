//! Periodic table catalog.
//!
//! A read-only lookup from atomic number to symbol, localized names and
//! table position. Lookups by number never fail; unknown numbers resolve
//! to [`UNKNOWN_ELEMENT`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic number, `1..=118` for known elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementNumber(pub u8);

impl ElementNumber {
    pub const HYDROGEN: ElementNumber = ElementNumber(1);
    pub const CARBON: ElementNumber = ElementNumber(6);
    pub const NITROGEN: ElementNumber = ElementNumber(7);
    pub const OXYGEN: ElementNumber = ElementNumber(8);

    pub fn element(self) -> &'static Element {
        lookup_element(self)
    }

    pub fn symbol(self) -> &'static str {
        self.element().symbol
    }
}

impl fmt::Display for ElementNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Orbital block of the periodic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    S,
    P,
    D,
    F,
}

/// Display language for element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    De,
}

impl Locale {
    /// Parse a language tag such as `de`, `en` or `en-US`.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("de") {
            Some(Locale::De)
        } else if primary.eq_ignore_ascii_case("en") {
            Some(Locale::En)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub number: ElementNumber,
    pub symbol: &'static str,
    pub name_en: &'static str,
    pub name_de: &'static str,
    pub period: u8,
    /// IUPAC group `1..=18`; `0` for the lanthanide and actinide series.
    pub group: u8,
    pub block: Block,
}

impl Element {
    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name_en,
            Locale::De => self.name_de,
        }
    }

    /// Outer-shell electron count for main-group elements.
    pub fn valence_electrons(&self) -> Option<u8> {
        match (self.number.0, self.group) {
            (2, _) => Some(2),
            (_, g @ (1 | 2)) => Some(g),
            (_, g @ 13..=18) => Some(g - 10),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.number.0 != 0
    }
}

/// Returned for any number outside the table.
pub static UNKNOWN_ELEMENT: Element = el(0, "??", "Unknown", "Unbekannt", 0, 0, Block::S);

/// Elements offered without opening the full periodic table.
pub const QUICK_PICK: [ElementNumber; 10] = [
    ElementNumber(1),
    ElementNumber(6),
    ElementNumber(7),
    ElementNumber(8),
    ElementNumber(15),
    ElementNumber(16),
    ElementNumber(9),
    ElementNumber(17),
    ElementNumber(35),
    ElementNumber(53),
];

pub fn lookup_element(number: ElementNumber) -> &'static Element {
    match number.0 {
        n @ 1..=118 => &ELEMENTS[usize::from(n) - 1],
        _ => &UNKNOWN_ELEMENT,
    }
}

/// Case-sensitive symbol lookup (`Cl`, not `CL`).
pub fn find_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

pub fn all_elements() -> &'static [Element] {
    &ELEMENTS
}

const fn el(
    number: u8,
    symbol: &'static str,
    name_en: &'static str,
    name_de: &'static str,
    period: u8,
    group: u8,
    block: Block,
) -> Element {
    Element {
        number: ElementNumber(number),
        symbol,
        name_en,
        name_de,
        period,
        group,
        block,
    }
}

// ─── Table ───────────────────────────────────────────────────────────────

static ELEMENTS: [Element; 118] = [
    el(1, "H", "Hydrogen", "Wasserstoff", 1, 1, Block::S),
    el(2, "He", "Helium", "Helium", 1, 18, Block::S),
    el(3, "Li", "Lithium", "Lithium", 2, 1, Block::S),
    el(4, "Be", "Beryllium", "Beryllium", 2, 2, Block::S),
    el(5, "B", "Boron", "Bor", 2, 13, Block::P),
    el(6, "C", "Carbon", "Kohlenstoff", 2, 14, Block::P),
    el(7, "N", "Nitrogen", "Stickstoff", 2, 15, Block::P),
    el(8, "O", "Oxygen", "Sauerstoff", 2, 16, Block::P),
    el(9, "F", "Fluorine", "Fluor", 2, 17, Block::P),
    el(10, "Ne", "Neon", "Neon", 2, 18, Block::P),
    el(11, "Na", "Sodium", "Natrium", 3, 1, Block::S),
    el(12, "Mg", "Magnesium", "Magnesium", 3, 2, Block::S),
    el(13, "Al", "Aluminium", "Aluminium", 3, 13, Block::P),
    el(14, "Si", "Silicon", "Silicium", 3, 14, Block::P),
    el(15, "P", "Phosphorus", "Phosphor", 3, 15, Block::P),
    el(16, "S", "Sulfur", "Schwefel", 3, 16, Block::P),
    el(17, "Cl", "Chlorine", "Chlor", 3, 17, Block::P),
    el(18, "Ar", "Argon", "Argon", 3, 18, Block::P),
    el(19, "K", "Potassium", "Kalium", 4, 1, Block::S),
    el(20, "Ca", "Calcium", "Calcium", 4, 2, Block::S),
    el(21, "Sc", "Scandium", "Scandium", 4, 3, Block::D),
    el(22, "Ti", "Titanium", "Titan", 4, 4, Block::D),
    el(23, "V", "Vanadium", "Vanadium", 4, 5, Block::D),
    el(24, "Cr", "Chromium", "Chrom", 4, 6, Block::D),
    el(25, "Mn", "Manganese", "Mangan", 4, 7, Block::D),
    el(26, "Fe", "Iron", "Eisen", 4, 8, Block::D),
    el(27, "Co", "Cobalt", "Cobalt", 4, 9, Block::D),
    el(28, "Ni", "Nickel", "Nickel", 4, 10, Block::D),
    el(29, "Cu", "Copper", "Kupfer", 4, 11, Block::D),
    el(30, "Zn", "Zinc", "Zink", 4, 12, Block::D),
    el(31, "Ga", "Gallium", "Gallium", 4, 13, Block::P),
    el(32, "Ge", "Germanium", "Germanium", 4, 14, Block::P),
    el(33, "As", "Arsenic", "Arsen", 4, 15, Block::P),
    el(34, "Se", "Selenium", "Selen", 4, 16, Block::P),
    el(35, "Br", "Bromine", "Brom", 4, 17, Block::P),
    el(36, "Kr", "Krypton", "Krypton", 4, 18, Block::P),
    el(37, "Rb", "Rubidium", "Rubidium", 5, 1, Block::S),
    el(38, "Sr", "Strontium", "Strontium", 5, 2, Block::S),
    el(39, "Y", "Yttrium", "Yttrium", 5, 3, Block::D),
    el(40, "Zr", "Zirconium", "Zirconium", 5, 4, Block::D),
    el(41, "Nb", "Niobium", "Niob", 5, 5, Block::D),
    el(42, "Mo", "Molybdenum", "Molybdän", 5, 6, Block::D),
    el(43, "Tc", "Technetium", "Technetium", 5, 7, Block::D),
    el(44, "Ru", "Ruthenium", "Ruthenium", 5, 8, Block::D),
    el(45, "Rh", "Rhodium", "Rhodium", 5, 9, Block::D),
    el(46, "Pd", "Palladium", "Palladium", 5, 10, Block::D),
    el(47, "Ag", "Silver", "Silber", 5, 11, Block::D),
    el(48, "Cd", "Cadmium", "Cadmium", 5, 12, Block::D),
    el(49, "In", "Indium", "Indium", 5, 13, Block::P),
    el(50, "Sn", "Tin", "Zinn", 5, 14, Block::P),
    el(51, "Sb", "Antimony", "Antimon", 5, 15, Block::P),
    el(52, "Te", "Tellurium", "Tellur", 5, 16, Block::P),
    el(53, "I", "Iodine", "Iod", 5, 17, Block::P),
    el(54, "Xe", "Xenon", "Xenon", 5, 18, Block::P),
    el(55, "Cs", "Caesium", "Caesium", 6, 1, Block::S),
    el(56, "Ba", "Barium", "Barium", 6, 2, Block::S),
    el(57, "La", "Lanthanum", "Lanthan", 6, 3, Block::D),
    el(58, "Ce", "Cerium", "Cer", 6, 0, Block::F),
    el(59, "Pr", "Praseodymium", "Praseodym", 6, 0, Block::F),
    el(60, "Nd", "Neodymium", "Neodym", 6, 0, Block::F),
    el(61, "Pm", "Promethium", "Promethium", 6, 0, Block::F),
    el(62, "Sm", "Samarium", "Samarium", 6, 0, Block::F),
    el(63, "Eu", "Europium", "Europium", 6, 0, Block::F),
    el(64, "Gd", "Gadolinium", "Gadolinium", 6, 0, Block::F),
    el(65, "Tb", "Terbium", "Terbium", 6, 0, Block::F),
    el(66, "Dy", "Dysprosium", "Dysprosium", 6, 0, Block::F),
    el(67, "Ho", "Holmium", "Holmium", 6, 0, Block::F),
    el(68, "Er", "Erbium", "Erbium", 6, 0, Block::F),
    el(69, "Tm", "Thulium", "Thulium", 6, 0, Block::F),
    el(70, "Yb", "Ytterbium", "Ytterbium", 6, 0, Block::F),
    el(71, "Lu", "Lutetium", "Lutetium", 6, 0, Block::F),
    el(72, "Hf", "Hafnium", "Hafnium", 6, 4, Block::D),
    el(73, "Ta", "Tantalum", "Tantal", 6, 5, Block::D),
    el(74, "W", "Tungsten", "Wolfram", 6, 6, Block::D),
    el(75, "Re", "Rhenium", "Rhenium", 6, 7, Block::D),
    el(76, "Os", "Osmium", "Osmium", 6, 8, Block::D),
    el(77, "Ir", "Iridium", "Iridium", 6, 9, Block::D),
    el(78, "Pt", "Platinum", "Platin", 6, 10, Block::D),
    el(79, "Au", "Gold", "Gold", 6, 11, Block::D),
    el(80, "Hg", "Mercury", "Quecksilber", 6, 12, Block::D),
    el(81, "Tl", "Thallium", "Thallium", 6, 13, Block::P),
    el(82, "Pb", "Lead", "Blei", 6, 14, Block::P),
    el(83, "Bi", "Bismuth", "Bismut", 6, 15, Block::P),
    el(84, "Po", "Polonium", "Polonium", 6, 16, Block::P),
    el(85, "At", "Astatine", "Astat", 6, 17, Block::P),
    el(86, "Rn", "Radon", "Radon", 6, 18, Block::P),
    el(87, "Fr", "Francium", "Francium", 7, 1, Block::S),
    el(88, "Ra", "Radium", "Radium", 7, 2, Block::S),
    el(89, "Ac", "Actinium", "Actinium", 7, 3, Block::D),
    el(90, "Th", "Thorium", "Thorium", 7, 0, Block::F),
    el(91, "Pa", "Protactinium", "Protactinium", 7, 0, Block::F),
    el(92, "U", "Uranium", "Uran", 7, 0, Block::F),
    el(93, "Np", "Neptunium", "Neptunium", 7, 0, Block::F),
    el(94, "Pu", "Plutonium", "Plutonium", 7, 0, Block::F),
    el(95, "Am", "Americium", "Americium", 7, 0, Block::F),
    el(96, "Cm", "Curium", "Curium", 7, 0, Block::F),
    el(97, "Bk", "Berkelium", "Berkelium", 7, 0, Block::F),
    el(98, "Cf", "Californium", "Californium", 7, 0, Block::F),
    el(99, "Es", "Einsteinium", "Einsteinium", 7, 0, Block::F),
    el(100, "Fm", "Fermium", "Fermium", 7, 0, Block::F),
    el(101, "Md", "Mendelevium", "Mendelevium", 7, 0, Block::F),
    el(102, "No", "Nobelium", "Nobelium", 7, 0, Block::F),
    el(103, "Lr", "Lawrencium", "Lawrencium", 7, 0, Block::F),
    el(104, "Rf", "Rutherfordium", "Rutherfordium", 7, 4, Block::D),
    el(105, "Db", "Dubnium", "Dubnium", 7, 5, Block::D),
    el(106, "Sg", "Seaborgium", "Seaborgium", 7, 6, Block::D),
    el(107, "Bh", "Bohrium", "Bohrium", 7, 7, Block::D),
    el(108, "Hs", "Hassium", "Hassium", 7, 8, Block::D),
    el(109, "Mt", "Meitnerium", "Meitnerium", 7, 9, Block::D),
    el(110, "Ds", "Darmstadtium", "Darmstadtium", 7, 10, Block::D),
    el(111, "Rg", "Roentgenium", "Roentgenium", 7, 11, Block::D),
    el(112, "Cn", "Copernicium", "Copernicium", 7, 12, Block::D),
    el(113, "Nh", "Nihonium", "Nihonium", 7, 13, Block::P),
    el(114, "Fl", "Flerovium", "Flerovium", 7, 14, Block::P),
    el(115, "Mc", "Moscovium", "Moscovium", 7, 15, Block::P),
    el(116, "Lv", "Livermorium", "Livermorium", 7, 16, Block::P),
    el(117, "Ts", "Tennessine", "Tenness", 7, 17, Block::P),
    el(118, "Og", "Oganesson", "Oganesson", 7, 18, Block::P),
];
