//! Obstacle generator and the live obstacle field

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::sphere_box_intersects;
use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use crate::consts::CONSUMED_Y;
use crate::lane_to_x;
use crate::tuning::{FieldTuning, SpawnTuning};

/// A non-pickup obstacle the player ran into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into `ObstacleField::obstacles` at the time of the scan
    pub index: usize,
    pub kind: ObstacleKind,
}

/// Result of one collision scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Pickups consumed by this scan, in field order
    pub pickups: Vec<ObstacleKind>,
    /// First non-pickup obstacle intersecting the player; the scan stops there
    pub hit: Option<Hit>,
}

impl CollisionReport {
    /// True when a non-pickup obstacle was hit
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    /// Kind to report: the terminal hit, else the last pickup consumed
    pub fn kind(&self) -> Option<ObstacleKind> {
        self.hit
            .map(|h| h.kind)
            .or_else(|| self.pickups.last().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty() && self.hit.is_none()
    }
}

/// Live obstacles plus the spawner that feeds them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Spawn order
    obstacles: Vec<Obstacle>,
    /// Seconds (scaled by game speed) until the next spawn
    spawn_timer: f32,
    lane_count: u32,
    hard_difficulty: bool,
    field: FieldTuning,
    spawn: SpawnTuning,
}

impl ObstacleField {
    pub fn new(
        lane_count: u32,
        hard_difficulty: bool,
        field: FieldTuning,
        spawn: SpawnTuning,
    ) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: spawn.initial_delay,
            lane_count: lane_count.max(1),
            hard_difficulty,
            field,
            spawn,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    pub fn is_hard(&self) -> bool {
        self.hard_difficulty
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Place an obstacle directly (scripted scenarios and tests)
    pub fn insert(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Advance obstacles, retire the ones behind the player, maybe spawn.
    /// Returns how many obstacles were retired.
    pub fn update<R: Rng>(&mut self, dt: f32, game_speed: f32, rng: &mut R) -> usize {
        let advance = dt * self.field.base_unit_speed * game_speed;
        for obstacle in &mut self.obstacles {
            obstacle.position.z += advance;
        }

        let before = self.obstacles.len();
        let table = &self.field.obstacles;
        self.obstacles.retain(|o| !o.is_retired(table));
        let retired = before - self.obstacles.len();

        self.spawn_timer -= dt * game_speed;
        if self.spawn_timer <= 0.0 {
            self.spawn_obstacle(rng);
            let jitter = if self.spawn.jitter > 0.0 {
                rng.random_range(0.0..self.spawn.jitter)
            } else {
                0.0
            };
            self.spawn_timer = self.spawn.base_interval / game_speed.max(f32::EPSILON) + jitter;
        }

        retired
    }

    /// Spawn one obstacle in a random lane, far ahead
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) -> &Obstacle {
        let lane = rng.random_range(0..self.lane_count);
        let kind = self.choose_kind(rng);
        let info = *self.field.obstacles.get(kind);
        let position = Vec3::new(
            lane_to_x(lane, self.lane_count),
            info.spawn_height(rng),
            -self.field.spawn_distance,
        );
        log::debug!("Spawned {} in lane {} at z={}", kind, lane, position.z);
        self.obstacles
            .push(Obstacle::with_info(kind, &info, position, lane));
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Weighted pick: barriers / holes / pickups, then within the class
    fn choose_kind<R: Rng>(&self, rng: &mut R) -> ObstacleKind {
        let s = &self.spawn;
        let total = s.barrier_weight + s.hole_weight + s.pickup_weight;
        let roll = rng.random::<f32>() * total;

        if roll < s.barrier_weight {
            let pick = ((roll / s.barrier_weight) * 3.0) as usize;
            return ObstacleKind::BARRIERS[pick.min(2)];
        }
        if roll < s.barrier_weight + s.hole_weight {
            return ObstacleKind::Hole;
        }

        let pickup_total = s.gold_coin_weight + s.red_coin_weight + s.life_weight;
        let roll = rng.random::<f32>() * pickup_total;
        if roll < s.gold_coin_weight {
            ObstacleKind::GoldCoin
        } else if roll < s.gold_coin_weight + s.red_coin_weight {
            ObstacleKind::RedCoin
        } else {
            ObstacleKind::Life
        }
    }

    /// Test the player against every live obstacle.
    ///
    /// Pickups that touch the player are parked below the field and the scan
    /// goes on; the first other obstacle touched ends the scan. Not idempotent
    /// for pickups: a second call will not see them again.
    pub fn check_collision(&mut self, player: &Player) -> CollisionReport {
        let mut report = CollisionReport::default();

        let table = &self.field.obstacles;
        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            let radius = player.size * table.get(obstacle.kind).collision_radius_factor;
            if !sphere_box_intersects(player.position, radius, obstacle.position, obstacle.size) {
                continue;
            }

            if obstacle.kind.is_pickup() {
                obstacle.position.y = CONSUMED_Y;
                report.pickups.push(obstacle.kind);
            } else {
                report.hit = Some(Hit {
                    index,
                    kind: obstacle.kind,
                });
                break;
            }
        }

        report
    }

    /// Take a hit obstacle out of play after it cost the player a life
    pub fn break_obstacle(&mut self, index: usize) {
        if let Some(obstacle) = self.obstacles.get_mut(index) {
            obstacle.position.y = CONSUMED_Y;
        }
    }
}
