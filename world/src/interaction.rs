//! Mover/occupant interaction rules.

use nature_lovers_core::EntityKind;

/// Vitality lost by the agent when it walks into a hazard.
pub const HAZARD_DAMAGE: i32 = 10;
/// Vitality gained by the agent per consumed resource.
pub const RESOURCE_VITALITY: i32 = 10;
/// Consumption count interval at which companions are spawned.
pub const COMPANION_MILESTONE: u32 = 5;
/// Companions spawned at each milestone.
pub const COMPANIONS_PER_MILESTONE: usize = 2;

/// Outcome of a mover attempting to enter an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Interaction {
    /// The move is rejected without side effects.
    Block,
    /// The move is rejected and the mover loses vitality.
    Strike { damage: i32 },
    /// The occupant is destroyed and the move proceeds.
    Consume,
}

const BLOCK: Interaction = Interaction::Block;
const STRIKE: Interaction = Interaction::Strike {
    damage: HAZARD_DAMAGE,
};
const CONSUME: Interaction = Interaction::Consume;

// Rows are movers, columns are occupants, both in `EntityKind::ALL` order.
const INTERACTIONS: [[Interaction; 5]; 5] = [
    [BLOCK, STRIKE, BLOCK, CONSUME, BLOCK],
    [BLOCK; 5],
    [BLOCK; 5],
    [BLOCK; 5],
    [BLOCK; 5],
];

pub(crate) const fn interaction(mover: EntityKind, occupant: EntityKind) -> Interaction {
    INTERACTIONS[mover.index()][occupant.index()]
}

pub(crate) const fn is_mobile(kind: EntityKind) -> bool {
    !matches!(kind, EntityKind::Resource)
}

/// Hazards leave one unit of pollution on the cell they depart.
pub(crate) const fn pollutes_origin(kind: EntityKind) -> bool {
    matches!(kind, EntityKind::Hazard)
}

/// The agent and its companions clear the pollution of the cell they enter.
pub(crate) const fn scrubs_destination(kind: EntityKind) -> bool {
    matches!(kind, EntityKind::Agent | EntityKind::Companion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_agent_interacts_with_occupants() {
        for mover in EntityKind::ALL {
            for occupant in EntityKind::ALL {
                let expected = match (mover, occupant) {
                    (EntityKind::Agent, EntityKind::Hazard) => Interaction::Strike { damage: 10 },
                    (EntityKind::Agent, EntityKind::Resource) => Interaction::Consume,
                    _ => Interaction::Block,
                };
                assert_eq!(interaction(mover, occupant), expected, "{mover:?} -> {occupant:?}");
            }
        }
    }

    #[test]
    fn movement_side_effects_follow_species() {
        assert!(pollutes_origin(EntityKind::Hazard));
        assert!(!pollutes_origin(EntityKind::Forager));
        assert!(scrubs_destination(EntityKind::Agent));
        assert!(scrubs_destination(EntityKind::Companion));
        assert!(!scrubs_destination(EntityKind::Hazard));
        assert!(!is_mobile(EntityKind::Resource));
    }
}
