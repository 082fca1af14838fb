//! Index of every pattern in the crate: id, category and one-line summary.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Creational, Category::Structural, Category::Behavioral];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Creational => "creational",
            Category::Structural => "structural",
            Category::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| CatalogError::unknown("category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternId {
    Singleton,
    FactoryMethod,
    AbstractFactory,
    Builder,
    Prototype,
    Adapter,
    Bridge,
    Composite,
    Decorator,
    Facade,
    Flyweight,
    Proxy,
    Chain,
    Command,
    Iterator,
    Mediator,
    Memento,
    Observer,
    State,
    Strategy,
    TemplateMethod,
    Visitor,
}

impl PatternId {
    pub const ALL: [PatternId; 22] = [
        PatternId::Singleton,
        PatternId::FactoryMethod,
        PatternId::AbstractFactory,
        PatternId::Builder,
        PatternId::Prototype,
        PatternId::Adapter,
        PatternId::Bridge,
        PatternId::Composite,
        PatternId::Decorator,
        PatternId::Facade,
        PatternId::Flyweight,
        PatternId::Proxy,
        PatternId::Chain,
        PatternId::Command,
        PatternId::Iterator,
        PatternId::Mediator,
        PatternId::Memento,
        PatternId::Observer,
        PatternId::State,
        PatternId::Strategy,
        PatternId::TemplateMethod,
        PatternId::Visitor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternId::Singleton => "singleton",
            PatternId::FactoryMethod => "factory-method",
            PatternId::AbstractFactory => "abstract-factory",
            PatternId::Builder => "builder",
            PatternId::Prototype => "prototype",
            PatternId::Adapter => "adapter",
            PatternId::Bridge => "bridge",
            PatternId::Composite => "composite",
            PatternId::Decorator => "decorator",
            PatternId::Facade => "facade",
            PatternId::Flyweight => "flyweight",
            PatternId::Proxy => "proxy",
            PatternId::Chain => "chain",
            PatternId::Command => "command",
            PatternId::Iterator => "iterator",
            PatternId::Mediator => "mediator",
            PatternId::Memento => "memento",
            PatternId::Observer => "observer",
            PatternId::State => "state",
            PatternId::Strategy => "strategy",
            PatternId::TemplateMethod => "template-method",
            PatternId::Visitor => "visitor",
        }
    }

    pub fn category(&self) -> Category {
        use PatternId::*;
        match self {
            Singleton | FactoryMethod | AbstractFactory | Builder | Prototype => Category::Creational,
            Adapter | Bridge | Composite | Decorator | Facade | Flyweight | Proxy => {
                Category::Structural
            }
            Chain | Command | Iterator | Mediator | Memento | Observer | State | Strategy
            | TemplateMethod | Visitor => Category::Behavioral,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            PatternId::Singleton => "exactly one instance under racing initializers",
            PatternId::FactoryMethod => "notification channels and buttons chosen by name",
            PatternId::AbstractFactory => "matching furniture and weapon families",
            PatternId::Builder => "car director and a validating computer builder",
            PatternId::Prototype => "cloning shapes and vehicles from registered originals",
            PatternId::Adapter => "legacy rectangle and MP3 player behind new interfaces",
            PatternId::Bridge => "shapes drawn by interchangeable renderers",
            PatternId::Composite => "file-system tree of files and folders",
            PatternId::Decorator => "timed operations and pizza toppings",
            PatternId::Facade => "one order call over inventory, discount and payment",
            PatternId::Flyweight => "shared game object types and team dresses",
            PatternId::Proxy => "lazy image loading and a rate-limiting web proxy",
            PatternId::Chain => "support agents by severity and hospital departments",
            PatternId::Command => "remote control with undoable device commands",
            PatternId::Iterator => "explicit cursors over a book collection",
            PatternId::Mediator => "control tower for aircraft and a shared train platform",
            PatternId::Memento => "indexed snapshots and an editor undo stack",
            PatternId::Observer => "typed event subscriptions and back-in-stock alerts",
            PatternId::State => "vending machine and media player states",
            PatternId::Strategy => "cache eviction policies and payment methods",
            PatternId::TemplateMethod => "beverage recipes and OTP delivery",
            PatternId::Visitor => "area, perimeter and middle point over shapes",
        }
    }

    pub fn in_category(category: Category) -> impl Iterator<Item = PatternId> {
        PatternId::ALL
            .into_iter()
            .filter(move |p| p.category() == category)
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts kebab, snake or spaced spellings, any case.
impl FromStr for PatternId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let wanted = match wanted.as_str() {
            "chain-of-responsibility" => "chain",
            other => other,
        };
        PatternId::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| CatalogError::unknown("pattern", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for pattern in PatternId::ALL {
            assert_eq!(pattern.name().parse::<PatternId>().unwrap(), pattern);
        }
    }

    #[test]
    fn test_alternate_spellings() {
        assert_eq!("Template_Method".parse::<PatternId>().unwrap(), PatternId::TemplateMethod);
        assert_eq!("chain of responsibility".parse::<PatternId>().unwrap(), PatternId::Chain);
        assert!("monad".parse::<PatternId>().unwrap_err().is_unknown_variant());
    }

    #[test]
    fn test_category_counts() {
        assert_eq!(PatternId::in_category(Category::Creational).count(), 5);
        assert_eq!(PatternId::in_category(Category::Structural).count(), 7);
        assert_eq!(PatternId::in_category(Category::Behavioral).count(), 10);
        assert!("Behavioral".parse::<Category>().is_ok());
        assert!("functional".parse::<Category>().is_err());
    }
}
