//! Pattern: Abstract Factory
//! Example: furniture families and faction armouries

use crate::error::Result;
use crate::scaffold::Registry;

// ============================================
// 1. Furniture
// ============================================

pub trait Chair {
    fn style(&self) -> &'static str;
    fn legs(&self) -> u8;
    fn sit_on(&self) -> String {
        format!("Sitting on a {} chair with {} legs", self.style(), self.legs())
    }
}

pub trait Sofa {
    fn style(&self) -> &'static str;
    fn seats(&self) -> u8;
}

pub trait CoffeeTable {
    fn style(&self) -> &'static str;
    fn shape(&self) -> &'static str;
}

pub trait FurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair>;
    fn create_sofa(&self) -> Box<dyn Sofa>;
    fn create_coffee_table(&self) -> Box<dyn CoffeeTable>;
}

struct ModernChair;
struct ModernSofa;
struct ModernCoffeeTable;
struct VictorianChair;
struct VictorianSofa;
struct VictorianCoffeeTable;

impl Chair for ModernChair {
    fn style(&self) -> &'static str {
        "modern"
    }
    fn legs(&self) -> u8 {
        3
    }
}

impl Sofa for ModernSofa {
    fn style(&self) -> &'static str {
        "modern"
    }
    fn seats(&self) -> u8 {
        2
    }
}

impl CoffeeTable for ModernCoffeeTable {
    fn style(&self) -> &'static str {
        "modern"
    }
    fn shape(&self) -> &'static str {
        "round"
    }
}

impl Chair for VictorianChair {
    fn style(&self) -> &'static str {
        "victorian"
    }
    fn legs(&self) -> u8 {
        4
    }
}

impl Sofa for VictorianSofa {
    fn style(&self) -> &'static str {
        "victorian"
    }
    fn seats(&self) -> u8 {
        3
    }
}

impl CoffeeTable for VictorianCoffeeTable {
    fn style(&self) -> &'static str {
        "victorian"
    }
    fn shape(&self) -> &'static str {
        "oval"
    }
}

pub struct ModernFurnitureFactory;
pub struct VictorianFurnitureFactory;

impl FurnitureFactory for ModernFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(ModernChair)
    }
    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(ModernSofa)
    }
    fn create_coffee_table(&self) -> Box<dyn CoffeeTable> {
        Box::new(ModernCoffeeTable)
    }
}

impl FurnitureFactory for VictorianFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(VictorianChair)
    }
    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(VictorianSofa)
    }
    fn create_coffee_table(&self) -> Box<dyn CoffeeTable> {
        Box::new(VictorianCoffeeTable)
    }
}

pub fn furniture_factory(family: &str) -> Result<Box<dyn FurnitureFactory>> {
    Registry::new("furniture family")
        .register("modern", || Box::new(ModernFurnitureFactory) as Box<dyn FurnitureFactory>)
        .register("victorian", || {
            Box::new(VictorianFurnitureFactory) as Box<dyn FurnitureFactory>
        })
        .create(family)
}

// ============================================
// 2. Weapons per faction
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Bow,
    Sword,
    Axe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    pub faction: &'static str,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn attack(&self) -> String {
        let kind = match self.kind {
            WeaponKind::Bow => "bow",
            WeaponKind::Sword => "sword",
            WeaponKind::Axe => "axe",
        };
        format!("Attacking with {} {}", self.faction, kind)
    }
}

pub trait Armoury {
    fn faction(&self) -> &'static str;

    fn create_bow(&self) -> Weapon {
        Weapon {
            faction: self.faction(),
            kind: WeaponKind::Bow,
        }
    }

    fn create_sword(&self) -> Weapon {
        Weapon {
            faction: self.faction(),
            kind: WeaponKind::Sword,
        }
    }

    fn create_axe(&self) -> Weapon {
        Weapon {
            faction: self.faction(),
            kind: WeaponKind::Axe,
        }
    }
}

pub struct ElfArmoury;
pub struct OrcArmoury;

impl Armoury for ElfArmoury {
    fn faction(&self) -> &'static str {
        "Elf"
    }
}

impl Armoury for OrcArmoury {
    fn faction(&self) -> &'static str {
        "Orc"
    }
}

/// Returns an error for an unknown faction instead of aborting.
pub fn armoury(faction: &str) -> Result<Box<dyn Armoury>> {
    Registry::new("faction")
        .register("elf", || Box::new(ElfArmoury) as Box<dyn Armoury>)
        .register("orc", || Box::new(OrcArmoury) as Box<dyn Armoury>)
        .create(faction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_is_consistent() {
        for family in ["modern", "victorian"] {
            let factory = furniture_factory(family).unwrap();
            assert_eq!(factory.create_chair().style(), family);
            assert_eq!(factory.create_sofa().style(), family);
            assert_eq!(factory.create_coffee_table().style(), family);
        }
    }

    #[test]
    fn test_victorian_chair() {
        let chair = furniture_factory("Victorian").unwrap().create_chair();
        assert_eq!(chair.sit_on(), "Sitting on a victorian chair with 4 legs");
    }

    #[test]
    fn test_faction_weapons() {
        let elf = armoury("Elf").unwrap();
        assert_eq!(elf.create_bow().attack(), "Attacking with Elf bow");
        assert_eq!(elf.create_axe().kind, WeaponKind::Axe);

        let orc = armoury("orc").unwrap();
        assert_eq!(orc.create_sword().attack(), "Attacking with Orc sword");
    }

    #[test]
    fn test_unknown_faction_is_error() {
        assert!(armoury("Dwarf").err().unwrap().is_unknown_variant());
        assert!(furniture_factory("baroque").is_err());
    }
}
