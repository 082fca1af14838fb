//! Pattern: Flyweight
//! Example: game objects sharing their intrinsic type data, and player dresses
//! shared by every player on a team
//!
//! Both factories are safe to share across threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{CatalogError, Result};

// ============================================
// 1. Game objects
// ============================================

/// Intrinsic state: identical for every object of the same kind.
#[derive(Debug, PartialEq, Eq)]
pub struct GameObjectType {
    pub name: String,
    pub color: String,
    pub species: String,
}

/// Name, species and color, compared field by field.
type TypeKey = (String, String, String);

#[derive(Debug, Default)]
pub struct GameObjectFactory {
    types: DashMap<TypeKey, Arc<GameObjectType>>,
}

impl GameObjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_type(&self, name: &str, color: &str, species: &str) -> Arc<GameObjectType> {
        let key = (name.to_string(), species.to_string(), color.to_string());
        let entry = self.types.entry(key).or_insert_with(|| {
            tracing::debug!(name, species, color, "new flyweight type");
            Arc::new(GameObjectType {
                name: name.to_string(),
                color: color.to_string(),
                species: species.to_string(),
            })
        });
        Arc::clone(entry.value())
    }

    pub fn distinct_types(&self) -> usize {
        self.types.len()
    }
}

/// Extrinsic state lives on the object; the shared type is only referenced.
#[derive(Debug, Clone)]
pub enum GameObject {
    Tree {
        x: i32,
        y: i32,
        kind: Arc<GameObjectType>,
    },
    Animal {
        x: i32,
        y: i32,
        age: u32,
        kind: Arc<GameObjectType>,
    },
}

impl GameObject {
    pub fn render(&self) -> String {
        match self {
            GameObject::Tree { x, y, kind } => format!(
                "Tree of species {} at position ({x}, {y}) with color {}",
                kind.species, kind.color
            ),
            GameObject::Animal { x, y, age, kind } => format!(
                "Animal of type {} at position ({x}, {y}), age: {age}",
                kind.species
            ),
        }
    }

    pub fn kind(&self) -> &Arc<GameObjectType> {
        match self {
            GameObject::Tree { kind, .. } | GameObject::Animal { kind, .. } => kind,
        }
    }
}

// ============================================
// 2. Dresses
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Terrorist,
    CounterTerrorist,
}

impl std::str::FromStr for Team {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terrorist" | "t" => Ok(Team::Terrorist),
            "counter-terrorist" | "counterterrorist" | "ct" => Ok(Team::CounterTerrorist),
            _ => Err(CatalogError::unknown("dress type", s)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Dress {
    pub color: &'static str,
}

#[derive(Debug, Default)]
pub struct DressFactory {
    dresses: DashMap<Team, Arc<Dress>>,
    created: AtomicUsize,
}

impl DressFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dress(&self, team: Team) -> Arc<Dress> {
        let entry = self.dresses.entry(team).or_insert_with(|| {
            self.created.fetch_add(1, Ordering::SeqCst);
            let color = match team {
                Team::Terrorist => "red",
                Team::CounterTerrorist => "green",
            };
            Arc::new(Dress { color })
        });
        Arc::clone(entry.value())
    }

    pub fn dress_named(&self, name: &str) -> Result<Arc<Dress>> {
        Ok(self.dress(name.parse()?))
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub team: Team,
    pub dress: Arc<Dress>,
    pub location: (i32, i32),
}

impl Player {
    pub fn new(factory: &DressFactory, team: Team) -> Self {
        Self {
            team,
            dress: factory.dress(team),
            location: (0, 0),
        }
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.location = (x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_same_key_shares_one_type() {
        let factory = GameObjectFactory::new();
        let objects = vec![
            GameObject::Tree { x: 5, y: 10, kind: factory.object_type("Tree", "Green", "Oak") },
            GameObject::Tree { x: 10, y: 15, kind: factory.object_type("Tree", "Green", "Oak") },
            GameObject::Tree { x: 20, y: 25, kind: factory.object_type("Tree", "Brown", "Pine") },
            GameObject::Animal { x: 50, y: 50, age: 3, kind: factory.object_type("Animal", "Gray", "Wolf") },
        ];

        assert_eq!(factory.distinct_types(), 3);
        assert!(Arc::ptr_eq(objects[0].kind(), objects[1].kind()));
        assert!(!Arc::ptr_eq(objects[0].kind(), objects[2].kind()));
        assert_eq!(
            objects[0].render(),
            "Tree of species Oak at position (5, 10) with color Green"
        );
        assert_eq!(objects[3].render(), "Animal of type Wolf at position (50, 50), age: 3");
    }

    #[test]
    fn test_separator_in_names_does_not_alias_types() {
        let factory = GameObjectFactory::new();
        let first = factory.object_type("a-b", "red", "c");
        let second = factory.object_type("a", "red", "b-c");

        assert_eq!(factory.distinct_types(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!((second.name.as_str(), second.species.as_str()), ("a", "b-c"));
    }

    #[test]
    fn test_concurrent_lookups_share() {
        let factory = GameObjectFactory::new();
        let handles: Vec<_> = thread::scope(|s| {
            (0..8)
                .map(|_| s.spawn(|| factory.object_type("Tree", "Green", "Oak")))
                .collect::<Vec<_>>()
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });
        assert_eq!(factory.distinct_types(), 1);
        assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_players_share_team_dress() {
        let factory = DressFactory::new();
        let mut players: Vec<Player> = (0..6)
            .map(|i| Player::new(&factory, if i % 2 == 0 { Team::Terrorist } else { Team::CounterTerrorist }))
            .collect();
        players[0].move_to(3, 4);

        assert_eq!(factory.created(), 2);
        assert!(Arc::ptr_eq(&players[0].dress, &players[2].dress));
        assert_eq!(players[1].dress.color, "green");
        assert_eq!(players[0].location, (3, 4));
    }

    #[test]
    fn test_unknown_dress_type() {
        let factory = DressFactory::new();
        assert_eq!(factory.dress_named("ct").unwrap().color, "green");
        assert!(factory.dress_named("spectator").err().unwrap().is_unknown_variant());
    }
}
