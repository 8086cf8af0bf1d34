//! Turns simulation state into an ordered list of draw calls
//!
//! Pure and GPU-free. Draw order is fixed: backdrop, ground, lane markers,
//! obstacles, player.

use glam::{Mat4, Vec3};
use std::f32::consts::PI;

use super::matrix::{Transform, model_view, normal_matrix};
use super::vertex::colors;
use crate::assets::{MeshKind, TextureKey};
use crate::consts::{CONSUMED_Y, LANE_SPACING};
use crate::sim::{Obstacle, Player};

pub const SKY_POSITION: Vec3 = Vec3::new(0.0, 0.0, -180.0);
pub const SKY_SCALE: Vec3 = Vec3::new(180.0, 50.0, 1.0);
pub const GROUND_POSITION: Vec3 = Vec3::new(0.0, -1.4, 0.0);
pub const GROUND_SCALE: Vec3 = Vec3::new(150.0, 0.4, 180.0);
pub const GROUND_TEX_OFFSET_U: f32 = 0.22;
pub const LANE_MARKER_Y: f32 = -0.9;
pub const LANE_MARKER_SCALE: Vec3 = Vec3::new(0.05, 0.05, 180.0);

/// Texture v offset gained per unit of distance travelled
pub const GROUND_SCROLL_FACTOR: f32 = 0.05 / 1.8;
const GROUND_SCROLL_WRAP: f32 = 100.0;

/// One object to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshKind,
    /// `None` draws flat colour
    pub texture: Option<TextureKey>,
    pub color: [f32; 3],
    pub transform: Transform,
    pub tex_offset: [f32; 2],
}

impl DrawCall {
    fn new(
        mesh: MeshKind,
        texture: Option<TextureKey>,
        color: [f32; 3],
        transform: Transform,
    ) -> Self {
        Self {
            mesh,
            texture,
            color,
            transform,
            tex_offset: [0.0, 0.0],
        }
    }

    /// Model-view and normal matrices for this draw under `view`
    pub fn matrices(&self, view: &Mat4) -> (Mat4, Mat4) {
        let mv = model_view(view, &self.transform);
        (mv, normal_matrix(&mv))
    }
}

/// Ground texture scroll that fakes forward motion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundScroll {
    offset: f32,
}

impl GroundScroll {
    pub fn advance(&mut self, dt: f32, game_speed: f32) {
        self.offset += dt * game_speed * GROUND_SCROLL_FACTOR;
        if self.offset > GROUND_SCROLL_WRAP {
            self.offset = 0.0;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

/// x positions of the lane dividers, outermost included
pub fn lane_marker_xs(lane_count: u32) -> Vec<f32> {
    let half = lane_count / 2;
    let mut xs = Vec::with_capacity(2 * (half as usize + 1));
    for i in 0..=half {
        let x = (i as f32 + 0.5) * LANE_SPACING;
        xs.push(-x);
        xs.push(x);
    }
    xs
}

pub fn build_draw_list(
    player: &Player,
    obstacles: &[Obstacle],
    ground_offset: f32,
) -> Vec<DrawCall> {
    let markers = lane_marker_xs(player.lane_count);
    let mut calls = Vec::with_capacity(3 + markers.len() + obstacles.len());

    calls.push(DrawCall::new(
        MeshKind::Cube,
        Some(TextureKey::Sky),
        colors::SKY,
        Transform::at(SKY_POSITION).with_scale(SKY_SCALE).with_rotation(PI),
    ));

    let mut ground = DrawCall::new(
        MeshKind::Cube,
        Some(TextureKey::Ground),
        colors::GROUND,
        Transform::at(GROUND_POSITION).with_scale(GROUND_SCALE),
    );
    ground.tex_offset = [GROUND_TEX_OFFSET_U, ground_offset];
    calls.push(ground);

    for x in markers {
        calls.push(DrawCall::new(
            MeshKind::Cube,
            Some(TextureKey::LaneBorder),
            colors::LANE_MARKER,
            Transform::at(Vec3::new(x, LANE_MARKER_Y, 0.0)).with_scale(LANE_MARKER_SCALE),
        ));
    }

    // Consumed pickups stay in the list until retired but are out of play
    for obstacle in obstacles.iter().filter(|o| o.position.y > CONSUMED_Y) {
        let info = obstacle.kind.info();
        calls.push(DrawCall::new(
            info.mesh,
            info.texture,
            info.color,
            Transform::at(obstacle.position).with_scale(obstacle.size),
        ));
    }

    calls.push(DrawCall::new(
        MeshKind::Sphere,
        Some(TextureKey::Player),
        colors::PLAYER,
        Transform::at(player.position)
            .with_scale(Vec3::splat(player.size))
            .with_rotation(player.rotation),
    ));

    calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;
    use crate::tuning::PlayerTuning;

    #[test]
    fn test_lane_markers_bracket_every_lane() {
        assert_eq!(lane_marker_xs(3), vec![-1.5, 1.5, -4.5, 4.5]);
        let xs = lane_marker_xs(5);
        assert_eq!(xs.len(), 6);
        assert!(xs.contains(&-7.5) && xs.contains(&7.5));
    }

    #[test]
    fn test_draw_order_and_styles() {
        let player = Player::new(3, PlayerTuning::default());
        let obstacles = vec![
            Obstacle::new(ObstacleKind::LargeBarrier, Vec3::new(3.0, 1.5, -20.0), 2),
            Obstacle::new(ObstacleKind::GoldCoin, Vec3::new(-3.0, 1.0, -30.0), 0),
        ];
        let calls = build_draw_list(&player, &obstacles, 0.5);

        // sky + ground + 4 markers + 2 obstacles + player
        assert_eq!(calls.len(), 9);
        assert_eq!(calls[0].texture, Some(TextureKey::Sky));
        assert_eq!(calls[1].texture, Some(TextureKey::Ground));
        assert_eq!(calls[1].tex_offset, [GROUND_TEX_OFFSET_U, 0.5]);
        assert!(calls[2..6].iter().all(|c| c.texture == Some(TextureKey::LaneBorder)));

        assert_eq!(calls[6].texture, Some(TextureKey::LargeBarrier));
        assert_eq!(calls[6].transform.scale, ObstacleKind::LargeBarrier.info().size);
        assert_eq!(calls[7].mesh, MeshKind::Sphere);
        assert_eq!(calls[7].texture, None);

        let last = calls.last().unwrap();
        assert_eq!(last.mesh, MeshKind::Sphere);
        assert_eq!(last.texture, Some(TextureKey::Player));
    }

    #[test]
    fn test_consumed_pickups_are_not_drawn() {
        let player = Player::new(5, PlayerTuning::default());
        let mut coin = Obstacle::new(ObstacleKind::RedCoin, Vec3::ZERO, 2);
        coin.position.y = CONSUMED_Y;
        let calls = build_draw_list(&player, &[coin], 0.0);
        // sky + ground + 6 markers + player
        assert_eq!(calls.len(), 9);
    }

    #[test]
    fn test_player_rotation_is_applied() {
        let mut player = Player::new(3, PlayerTuning::default());
        player.rotation = 1.25;
        let calls = build_draw_list(&player, &[], 0.0);
        assert_eq!(calls.last().map(|c| c.transform.rotation), Some(1.25));
    }

    #[test]
    fn test_ground_scroll_wraps() {
        let mut scroll = GroundScroll::default();
        scroll.advance(1.0, 1.8);
        assert!((scroll.offset() - 0.05).abs() < 1e-6);
        scroll.advance(10_000.0, 1.0);
        assert_eq!(scroll.offset(), 0.0);
    }
}
