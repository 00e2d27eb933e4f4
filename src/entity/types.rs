use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Person,
    Organization,
    Location,
    Event,
    Date,
    Other,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Person => write!(f, "PERSON"),
            EntityType::Organization => write!(f, "ORGANIZATION"),
            EntityType::Location => write!(f, "LOCATION"),
            EntityType::Event => write!(f, "EVENT"),
            EntityType::Date => write!(f, "DATE"),
            EntityType::Other => write!(f, "OTHER"),
        }
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PERSON" => EntityType::Person,
            "ORGANIZATION" | "ORG" => EntityType::Organization,
            "LOCATION" | "GPE" | "LOC" => EntityType::Location,
            "EVENT" => EntityType::Event,
            "DATE" => EntityType::Date,
            _ => EntityType::Other,
        }
    }
}

/// A named entity extracted from an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Original entity name as extracted from text
    pub name: String,

    /// Standardized, lowercase name for matching
    pub normalized_name: String,

    pub entity_type: EntityType,
}

impl Entity {
    pub fn new(name: &str, entity_type: EntityType) -> Self {
        Entity {
            name: name.trim().to_string(),
            normalized_name: normalize_name(name),
            entity_type,
        }
    }
}

/// Standardize an entity name for matching: lowercase, collapsed whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Collection of entities extracted from a single article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub entities: Vec<Entity>,
}

impl ExtractedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, ignoring duplicates of the same normalized name and type.
    pub fn add_entity(&mut self, entity: Entity) {
        if entity.normalized_name.is_empty() {
            return;
        }
        let duplicate = self.entities.iter().any(|existing| {
            existing.normalized_name == entity.normalized_name
                && existing.entity_type == entity.entity_type
        });
        if !duplicate {
            self.entities.push(entity);
        }
    }

    pub fn of_type(&self, entity_type: EntityType) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.entity_type == entity_type)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}
