//! Validation and execution of single entity moves.

use nature_lovers_core::{CellCoord, Delta, EntityId, Event, Paint};
use nature_lovers_system_spawning::Placement;
use tracing::{debug, trace};

use crate::{
    entity::{Body, Entity},
    field::DirtyCells,
    interaction::{
        interaction, is_mobile, pollutes_origin, scrubs_destination, Interaction,
        COMPANIONS_PER_MILESTONE, COMPANION_MILESTONE, RESOURCE_VITALITY,
    },
    World,
};

impl World {
    /// Attempts to displace `entity` by `delta`, returning whether it moved.
    pub(crate) fn attempt_move(
        &mut self,
        entity: EntityId,
        delta: Delta,
        dirty: &mut DirtyCells,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some((kind, from, owner)) = self
            .entities
            .get(entity)
            .map(|mover| (mover.kind(), mover.cell, mover.owner()))
        else {
            return false;
        };

        if !is_mobile(kind) {
            trace!(entity = entity.get(), ?kind, "immobile entity cannot move");
            return false;
        }

        let Some(to) = from.translate(delta).filter(|cell| self.field.contains(*cell)) else {
            trace!(entity = entity.get(), ?kind, %from, "destination lies off the grid");
            return false;
        };

        if dirty.contains(to) {
            trace!(entity = entity.get(), ?kind, %to, "cell vacated this tick awaits commit");
            return false;
        }

        if let Some(owner) = owner {
            let Some(anchor) = self.entities.get(owner).map(|owner| owner.cell) else {
                return false;
            };
            if anchor.manhattan_distance(to) > self.config.leash_radius {
                trace!(entity = entity.get(), %to, %anchor, "destination exceeds the leash");
                return false;
            }
        }

        if let Some(occupant) = self.field.occupant(to) {
            let Some(occupant_kind) = self.entities.get(occupant).map(Entity::kind) else {
                return false;
            };
            match interaction(kind, occupant_kind) {
                Interaction::Block => {
                    trace!(entity = entity.get(), ?kind, ?occupant_kind, %to, "move blocked");
                    return false;
                }
                Interaction::Strike { damage } => {
                    self.strike(entity, occupant, damage, out_events);
                    return false;
                }
                Interaction::Consume => self.consume(entity, occupant, to, dirty, out_events),
            }
        }

        if pollutes_origin(kind) {
            self.field.pollute(from);
        }
        dirty.mark(from);
        self.field.vacate(from);
        self.field.place(entity, to, Paint::Tag(kind));
        if scrubs_destination(kind) {
            self.field.scrub(to);
        }
        if let Some(mover) = self.entities.get_mut(entity) {
            mover.cell = to;
        }

        out_events.push(Event::EntityMoved {
            entity,
            kind,
            from,
            to,
        });
        true
    }

    fn strike(
        &mut self,
        agent: EntityId,
        hazard: EntityId,
        damage: i32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(state) = self.agent_state_mut(agent) else {
            return;
        };

        let remaining = state.vitality.saturating_sub(damage);
        if remaining <= 0 {
            trace!(vitality = state.vitality, "strike would exhaust the agent; ignored");
            return;
        }
        state.vitality = remaining;

        debug!(hazard = hazard.get(), vitality = remaining, "agent struck by hazard");
        out_events.push(Event::AgentStruck {
            hazard,
            vitality: remaining,
        });
    }

    /// Destroys `resource` standing on `cell` and credits `agent` with it.
    ///
    /// The replacement and any milestone companions are spawned while the
    /// resource and the agent still occupy their cells, so neither cell can be
    /// chosen for them. Cells awaiting commit are skipped as well.
    fn consume(
        &mut self,
        agent: EntityId,
        resource: EntityId,
        cell: CellCoord,
        dirty: &DirtyCells,
        out_events: &mut Vec<Event>,
    ) {
        let Some(state) = self.agent_state_mut(agent) else {
            return;
        };
        state.vitality = state.vitality.saturating_add(RESOURCE_VITALITY);
        state.consumed = state.consumed.saturating_add(1);
        let (vitality, consumed) = (state.vitality, state.consumed);

        let replacement = self.spawn(Body::Resource, Placement::Vacant, dirty.cells());
        debug!(
            resource = resource.get(),
            replacement = replacement.get(),
            consumed,
            vitality,
            "resource consumed"
        );
        out_events.push(Event::ResourceConsumed {
            resource,
            replacement,
            consumed,
            vitality,
        });

        if consumed % COMPANION_MILESTONE == 0 {
            let companions = self.spawn_unique(
                Body::Companion { owner: agent },
                Placement::Pristine,
                COMPANIONS_PER_MILESTONE,
                dirty.cells(),
            );
            if let Some(state) = self.agent_state_mut(agent) {
                state.companions.extend(companions.iter().copied());
            }
            debug!(consumed, count = companions.len(), "companions joined the agent");
            out_events.push(Event::CompanionsSpawned { companions });
        }

        let _ = self.entities.remove(resource);
        self.field.vacate(cell);
    }
}
