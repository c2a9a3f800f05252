//! Entity records and the creation-ordered store that owns them.

use nature_lovers_core::{CellCoord, EntityId, EntityKind, INITIAL_VITALITY};

/// Counters carried by the agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AgentState {
    pub(crate) vitality: i32,
    pub(crate) consumed: u32,
    pub(crate) companions: Vec<EntityId>,
}

impl AgentState {
    pub(crate) fn new(vitality: i32, consumed: u32) -> Self {
        Self {
            vitality,
            consumed,
            companions: Vec::new(),
        }
    }
}

impl Default for AgentState {
    fn default() -> Self {
        Self::new(INITIAL_VITALITY, 0)
    }
}

/// Species-specific payload of an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Body {
    Agent(AgentState),
    Hazard,
    Forager,
    Resource,
    Companion { owner: EntityId },
}

impl Body {
    pub(crate) fn kind(&self) -> EntityKind {
        match self {
            Self::Agent(_) => EntityKind::Agent,
            Self::Hazard => EntityKind::Hazard,
            Self::Forager => EntityKind::Forager,
            Self::Resource => EntityKind::Resource,
            Self::Companion { .. } => EntityKind::Companion,
        }
    }

    pub(crate) fn for_kind(kind: EntityKind, owner: EntityId) -> Self {
        match kind {
            EntityKind::Agent => Self::Agent(AgentState::default()),
            EntityKind::Hazard => Self::Hazard,
            EntityKind::Forager => Self::Forager,
            EntityKind::Resource => Self::Resource,
            EntityKind::Companion => Self::Companion { owner },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) cell: CellCoord,
    pub(crate) body: Body,
}

impl Entity {
    pub(crate) fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    pub(crate) fn owner(&self) -> Option<EntityId> {
        match self.body {
            Body::Companion { owner } => Some(owner),
            _ => None,
        }
    }
}

/// Entities kept sorted by identifier, which is also creation order.
#[derive(Clone, Debug, Default)]
pub(crate) struct EntityStore {
    next_id: u32,
    entities: Vec<Entity>,
}

impl EntityStore {
    pub(crate) fn insert(&mut self, body: Body, cell: CellCoord) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entities.push(Entity { id, cell, body });
        id
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        self.position(id).map(|index| &self.entities[index])
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.position(id).map(|index| &mut self.entities[index])
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.position(id).map(|index| self.entities.remove(index))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Identifiers of every entity of `kind`, in creation order.
    pub(crate) fn ids_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.kind() == kind)
            .map(|entity| entity.id)
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entities.len()
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.entities
            .binary_search_by_key(&id, |entity| entity.id)
            .ok()
    }
}
