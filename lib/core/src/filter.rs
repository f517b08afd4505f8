// Simple attribute filter implementation
use crate::accessor::numeric;
use crate::Entity;

pub trait Filter {
    fn matches(&self, entity: &Entity) -> bool;
}

pub struct EntityFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    AtLeast { field: String, value: f64 },
    AtMost { field: String, value: f64 },
    HasType(String),
    /// Passes when `field` has no positive numeric value, else defers to `condition`
    WhenKnown { field: String, condition: Box<FilterCondition> },
    And(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl FilterCondition {
    pub fn at_least(field: impl Into<String>, value: f64) -> Self {
        FilterCondition::AtLeast { field: field.into(), value }
    }

    pub fn at_most(field: impl Into<String>, value: f64) -> Self {
        FilterCondition::AtMost { field: field.into(), value }
    }

    pub fn when_known(field: impl Into<String>, condition: FilterCondition) -> Self {
        FilterCondition::WhenKnown {
            field: field.into(),
            condition: Box::new(condition),
        }
    }
}

impl EntityFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    fn matches_condition(condition: &FilterCondition, entity: &Entity) -> bool {
        match condition {
            FilterCondition::AtLeast { field, value } => numeric(entity, field) >= *value,
            FilterCondition::AtMost { field, value } => numeric(entity, field) <= *value,
            FilterCondition::HasType(label) => entity.has_type(label),
            FilterCondition::WhenKnown { field, condition } => {
                numeric(entity, field) <= 0.0 || Self::matches_condition(condition, entity)
            }
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, entity))
            }
            FilterCondition::Not(condition) => !Self::matches_condition(condition, entity),
        }
    }
}

impl Filter for EntityFilter {
    fn matches(&self, entity: &Entity) -> bool {
        Self::matches_condition(&self.condition, entity)
    }
}
