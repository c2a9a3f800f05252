#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Nature Lovers simulation.
//!
//! The world owns the field, every entity and the seeded random stream.
//! Adapters drive it exclusively through [`apply`] and observe it through the
//! [`query`] module.

mod entity;
mod field;
mod interaction;
mod movement;

use nature_lovers_core::{
    CellCoord, Command, Config, ConfigError, Delta, Direction, EntityId, EntityKind, Event,
    Layout, Paint,
};
use nature_lovers_system_foraging::Foraging;
use nature_lovers_system_roaming::{leash_step, wander, Leash};
use nature_lovers_system_spawning::{Placement, Spawning};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use entity::{AgentState, Body, EntityStore};
use field::Field;

pub use field::DirtyCells;
pub use interaction::{
    COMPANIONS_PER_MILESTONE, COMPANION_MILESTONE, HAZARD_DAMAGE, RESOURCE_VITALITY,
};

/// Represents the authoritative simulation state.
#[derive(Debug)]
pub struct World {
    config: Config,
    field: Field,
    entities: EntityStore,
    agent: EntityId,
    pending_intent: Option<Direction>,
    spawning: Spawning,
    foraging: Foraging,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a world populated at random from the configured counts.
    ///
    /// The agent, hazards and foragers are placed on pristine cells; resources
    /// only need a vacant one. Entities are created in that species order.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = Self::empty(config);
        world.agent = world.spawn(Body::Agent(AgentState::default()), Placement::Pristine, &[]);
        let (hazards, resources, foragers) = (
            world.config.hazard_count,
            world.config.resource_count,
            world.config.forager_count,
        );
        let _ = world.spawn_unique(Body::Hazard, Placement::Pristine, hazards, &[]);
        let _ = world.spawn_unique(Body::Resource, Placement::Vacant, resources, &[]);
        let _ = world.spawn_unique(Body::Forager, Placement::Pristine, foragers, &[]);

        world.log_initialized();
        Ok(world)
    }

    /// Creates a world whose population is placed exactly as `layout` lists it.
    ///
    /// The population counts in `config` are ignored.
    pub fn from_layout(config: Config, layout: &Layout) -> Result<Self, ConfigError> {
        config.validate_grid()?;
        layout.validate(config.columns(), config.rows())?;

        let mut world = Self::empty(config);
        let agent = AgentState::new(layout.agent.vitality, layout.agent.consumed);
        world.agent = world.insert(Body::Agent(agent), layout.agent.cell);
        for (kind, cell) in layout.placements().skip(1) {
            let id = world.insert(Body::for_kind(kind, world.agent), cell);
            if kind == EntityKind::Companion {
                if let Some(state) = world.agent_state_mut(world.agent) {
                    state.companions.push(id);
                }
            }
        }

        world.log_initialized();
        Ok(world)
    }

    fn empty(config: Config) -> Self {
        Self {
            field: Field::new(config.columns(), config.rows()),
            entities: EntityStore::default(),
            agent: EntityId::new(0),
            pending_intent: None,
            spawning: Spawning::default(),
            foraging: Foraging::new(config.vision_range),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tick_index: 0,
            config,
        }
    }

    fn log_initialized(&self) {
        let (columns, rows) = self.field.dimensions();
        info!(
            columns,
            rows,
            population = self.entities.len(),
            seed = self.config.seed,
            "world initialized"
        );
    }

    /// Spawns on a cell admitted by `placement`, skipping the `reserved` cells.
    fn spawn(&mut self, body: Body, placement: Placement, reserved: &[CellCoord]) -> EntityId {
        let cell = self.spawning.sample_cell_excluding(
            &self.field.view(),
            placement,
            reserved,
            &mut self.rng,
        );
        self.insert(body, cell)
    }

    /// Spawns `count` entities, each on its own cell admitted by `placement`.
    fn spawn_unique(
        &mut self,
        body: Body,
        placement: Placement,
        count: usize,
        reserved: &[CellCoord],
    ) -> Vec<EntityId> {
        (0..count)
            .map(|_| self.spawn(body.clone(), placement, reserved))
            .collect()
    }

    fn insert(&mut self, body: Body, cell: CellCoord) -> EntityId {
        let kind = body.kind();
        let id = self.entities.insert(body, cell);
        self.field.place(id, cell, Paint::Tag(kind));
        id
    }

    fn agent_state(&self) -> Option<&AgentState> {
        match self.entities.get(self.agent).map(|entity| &entity.body) {
            Some(Body::Agent(state)) => Some(state),
            _ => None,
        }
    }

    fn agent_state_mut(&mut self, agent: EntityId) -> Option<&mut AgentState> {
        match self.entities.get_mut(agent).map(|entity| &mut entity.body) {
            Some(Body::Agent(state)) => Some(state),
            _ => None,
        }
    }

    fn run_tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        let mut dirty = DirtyCells::new();

        if let Some(direction) = self.pending_intent.take() {
            let _ = self.attempt_move(self.agent, direction.delta(), &mut dirty, out_events);
        }
        self.step_companions(&mut dirty, out_events);
        self.step_hazards(&mut dirty, out_events);
        self.step_foragers(&mut dirty, out_events);
        self.commit(&mut dirty, out_events);

        debug!(tick = self.tick_index, "tick completed");
        out_events.push(Event::TickCompleted {
            tick: self.tick_index,
        });
    }

    fn step_companions(&mut self, dirty: &mut DirtyCells, out_events: &mut Vec<Event>) {
        for companion in self.entities.ids_of(EntityKind::Companion) {
            let Some((origin, owner)) = self
                .entities
                .get(companion)
                .and_then(|entity| Some((entity.cell, entity.owner()?)))
            else {
                continue;
            };
            let Some(anchor) = self.entities.get(owner).map(|owner| owner.cell) else {
                continue;
            };

            let leash = Leash::new(anchor, self.config.leash_radius);
            let Some(direction) = leash_step(&mut self.rng, &self.field.view(), origin, leash)
            else {
                continue;
            };
            let _ = self.attempt_move(companion, direction.delta(), dirty, out_events);
        }
    }

    fn step_hazards(&mut self, dirty: &mut DirtyCells, out_events: &mut Vec<Event>) {
        for hazard in self.entities.ids_of(EntityKind::Hazard) {
            let delta = wander(&mut self.rng);
            let _ = self.attempt_move(hazard, delta, dirty, out_events);
        }
    }

    fn step_foragers(&mut self, dirty: &mut DirtyCells, out_events: &mut Vec<Event>) {
        for forager in self.entities.ids_of(EntityKind::Forager) {
            let Some(origin) = self.entities.get(forager).map(|entity| entity.cell) else {
                continue;
            };
            let direction = self.foraging.steer(&self.field.view(), origin);
            let _ = self.attempt_move(forager, direction.delta(), dirty, out_events);
        }
    }

    fn commit(&mut self, dirty: &mut DirtyCells, out_events: &mut Vec<Event>) {
        let repainted: Vec<CellCoord> = dirty.drain().collect();
        for cell in &repainted {
            self.field.repaint(*cell);
        }
        if !repainted.is_empty() {
            out_events.push(Event::CellsRepainted { cells: repainted });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SubmitAgentIntent { direction } => {
            world.pending_intent = Some(direction);
        }
        Command::Tick => world.run_tick(out_events),
    }
}

/// Attempts a single move outside the tick loop, returning whether it succeeded.
///
/// Vacated cells are recorded in `dirty`; they keep their tag and refuse
/// entry until [`commit`] repaints them.
pub fn attempt_move(
    world: &mut World,
    entity: EntityId,
    delta: Delta,
    dirty: &mut DirtyCells,
    out_events: &mut Vec<Event>,
) -> bool {
    world.attempt_move(entity, delta, dirty, out_events)
}

/// Repaints every cell recorded in `dirty` and releases it for entry.
pub fn commit(world: &mut World, dirty: &mut DirtyCells, out_events: &mut Vec<Event>) {
    world.commit(dirty, out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use nature_lovers_core::{
        CellCoord, Config, Direction, EntityId, EntityKind, FieldView, Paint, Rgb,
    };
    use serde::Serialize;

    use super::{entity::Entity, World};

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &Config {
        &world.config
    }

    /// Number of ticks completed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Intent queued for the next tick, if any.
    #[must_use]
    pub fn pending_intent(world: &World) -> Option<Direction> {
        world.pending_intent
    }

    /// Exposes a read-only view of the dense cell arrays.
    #[must_use]
    pub fn field_view(world: &World) -> FieldView<'_> {
        world.field.view()
    }

    /// Pollution stored on `cell`, or `None` when it lies off the grid.
    #[must_use]
    pub fn pollution_at(world: &World, cell: CellCoord) -> Option<u32> {
        world.field.pollution(cell)
    }

    /// Entity occupying `cell`, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<EntitySnapshot> {
        world
            .field
            .occupant(cell)
            .and_then(|id| world.entities.get(id))
            .map(EntitySnapshot::from_entity)
    }

    /// Snapshot of a single entity.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<EntitySnapshot> {
        world.entities.get(id).map(EntitySnapshot::from_entity)
    }

    /// Snapshots of every live entity in creation order.
    #[must_use]
    pub fn entities(world: &World) -> Vec<EntitySnapshot> {
        world
            .entities
            .iter()
            .map(EntitySnapshot::from_entity)
            .collect()
    }

    /// Number of live entities of `kind`.
    #[must_use]
    pub fn population(world: &World, kind: EntityKind) -> usize {
        world
            .entities
            .iter()
            .filter(|entity| entity.kind() == kind)
            .count()
    }

    /// Position and counters of the agent.
    #[must_use]
    pub fn agent(world: &World) -> AgentSnapshot {
        let cell = world
            .entities
            .get(world.agent)
            .map(|entity| entity.cell)
            .expect("agent exists");
        let state = world
            .agent_state()
            .expect("agent carries agent state");
        AgentSnapshot {
            id: world.agent,
            cell,
            vitality: state.vitality,
            consumed: state.consumed,
            companions: state.companions.clone(),
        }
    }

    /// Paint of every cell in row-major order, together with the agent's vitality.
    #[must_use]
    pub fn snapshot(world: &World) -> FieldSnapshot {
        let (columns, rows) = world.field.dimensions();
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .filter_map(|cell| {
                world.field.paint(cell).map(|paint| CellSnapshot {
                    cell,
                    paint,
                    color: paint.rgb(),
                })
            })
            .collect();
        FieldSnapshot {
            columns,
            rows,
            cell_size: world.config.cell_size,
            cells,
            vitality: agent(world).vitality,
        }
    }

    /// Read-only description of a single entity.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
    pub struct EntitySnapshot {
        /// Unique identifier assigned to the entity.
        pub id: EntityId,
        /// Species of the entity.
        pub kind: EntityKind,
        /// Cell currently occupied by the entity.
        pub cell: CellCoord,
        /// Owner of a companion; `None` for every other species.
        pub owner: Option<EntityId>,
    }

    impl EntitySnapshot {
        fn from_entity(entity: &Entity) -> Self {
            Self {
                id: entity.id,
                kind: entity.kind(),
                cell: entity.cell,
                owner: entity.owner(),
            }
        }
    }

    /// Read-only description of the agent.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
    pub struct AgentSnapshot {
        /// Identifier of the agent.
        pub id: EntityId,
        /// Cell currently occupied by the agent.
        pub cell: CellCoord,
        /// Current vitality.
        pub vitality: i32,
        /// Resources consumed so far.
        pub consumed: u32,
        /// Companions owned by the agent, in creation order.
        pub companions: Vec<EntityId>,
    }

    /// Paint of a single cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
    pub struct CellSnapshot {
        /// Location of the cell.
        pub cell: CellCoord,
        /// Paint stored on the cell.
        pub paint: Paint,
        /// Displayable color derived from the paint.
        pub color: Rgb,
    }

    /// Everything the display collaborator needs to draw a frame.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
    pub struct FieldSnapshot {
        /// Number of cell columns.
        pub columns: u32,
        /// Number of cell rows.
        pub rows: u32,
        /// Side length of a cell in display units.
        pub cell_size: u32,
        /// Every cell in row-major order.
        pub cells: Vec<CellSnapshot>,
        /// Current vitality of the agent.
        pub vitality: i32,
    }
}
