//! Neighborhood queries for separation steering.
//!
//! Agents are bucketed into a uniform grid once per physics step; queries
//! visit only the cells overlapping the search disk.

use std::collections::HashMap;

use glam::Vec2;
use hecs::Entity;

use onslaught_core::enums::Faction;

/// One indexed agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedAgent {
    pub entity: Entity,
    pub faction: Faction,
    pub position: Vec2,
}

/// Common behaviour exposed by neighborhood indices.
pub trait NeighborhoodIndex {
    /// Rebuild internal structures from this step's agents.
    fn rebuild(&mut self, agents: &[IndexedAgent]);

    /// Visit every agent of `faction` within `radius` of `center`.
    fn neighbors_within(
        &self,
        center: Vec2,
        radius: f32,
        faction: Faction,
        visitor: &mut dyn FnMut(&IndexedAgent),
    );

    /// Positions of same-faction neighbors around `center`, excluding `exclude`.
    fn neighbor_positions(
        &self,
        center: Vec2,
        radius: f32,
        faction: Faction,
        exclude: Option<Entity>,
        out: &mut Vec<Vec2>,
    ) {
        out.clear();
        self.neighbors_within(center, radius, faction, &mut |agent| {
            if Some(agent.entity) != exclude {
                out.push(agent.position);
            }
        });
    }
}

/// Uniform grid keyed by integer cell coordinates.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    inv_cell_size: f32,
    agents: Vec<IndexedAgent>,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl UniformGrid {
    /// Non-positive or non-finite cell sizes fall back to 1.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            inv_cell_size: 1.0 / cell_size,
            agents: Vec::new(),
            cells: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Cells holding at least one agent after the last rebuild.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x * self.inv_cell_size).floor() as i32,
            (p.y * self.inv_cell_size).floor() as i32,
        )
    }
}

impl NeighborhoodIndex for UniformGrid {
    fn rebuild(&mut self, agents: &[IndexedAgent]) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.agents.clear();
        self.agents.extend_from_slice(agents);
        for (idx, agent) in agents.iter().enumerate() {
            let cell = self.cell_of(agent.position);
            self.cells.entry(cell).or_default().push(idx);
        }
        // Cells left behind by moving agents are dropped.
        self.cells.retain(|_, bucket| !bucket.is_empty());
    }

    fn neighbors_within(
        &self,
        center: Vec2,
        radius: f32,
        faction: Faction,
        visitor: &mut dyn FnMut(&IndexedAgent),
    ) {
        if radius <= 0.0 || self.agents.is_empty() {
            return;
        }
        let radius_sq = radius * radius;
        let (min_x, min_y) = self.cell_of(center - Vec2::splat(radius));
        let (max_x, max_y) = self.cell_of(center + Vec2::splat(radius));
        for cy in min_y..=max_y {
            for cx in min_x..=max_x {
                let Some(bucket) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &idx in bucket {
                    let agent = &self.agents[idx];
                    if agent.faction == faction && agent.position.distance_squared(center) <= radius_sq {
                        visitor(agent);
                    }
                }
            }
        }
    }
}
