//! Rendering module
//!
//! `scene` turns simulation state into draw calls without touching the GPU;
//! `pipeline` submits them through wgpu. The orchestrator only sees the
//! `SceneRenderer` trait, so it runs the same against a headless stand-in.

pub mod camera;
pub mod geometry;
pub mod matrix;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod textures;
pub mod vertex;

use std::collections::VecDeque;

use glam::Vec3;

pub use camera::Camera;
pub use pipeline::Renderer;
pub use scene::{DrawCall, GroundScroll, build_draw_list};
pub use textures::{TextureImage, TextureRegistry, procedural_image};

use crate::sim::{Obstacle, Player};

/// What the orchestrator needs from a renderer
pub trait SceneRenderer {
    /// Draw one frame: backdrop, ground, lane markers, obstacles, player
    fn render(&mut self, player: &Player, obstacles: &[Obstacle]);
    /// Scroll the ground texture by the distance travelled this step
    fn advance_ground(&mut self, dt: f32, game_speed: f32);
    fn reset_ground(&mut self);
    /// Recompute the projection; callable without rendering
    fn update_projection(&mut self, aspect: f32);
    /// New viewport size in pixels
    fn resize(&mut self, width: u32, height: u32);
}

/// Rendered player positions kept by the headless renderer
pub const PLAYER_TRAIL_LEN: usize = 1024;

/// GPU-free renderer that builds the draw list and remembers what it drew
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub camera: Camera,
    pub ground: GroundScroll,
    pub frames: u32,
    pub last_draw_count: usize,
    /// Player position at the last `PLAYER_TRAIL_LEN` rendered frames, oldest first
    pub player_trail: VecDeque<Vec3>,
    pub size: (u32, u32),
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn render(&mut self, player: &Player, obstacles: &[Obstacle]) {
        let calls = build_draw_list(player, obstacles, self.ground.offset());
        self.frames += 1;
        self.last_draw_count = calls.len();
        if self.player_trail.len() == PLAYER_TRAIL_LEN {
            self.player_trail.pop_front();
        }
        self.player_trail.push_back(player.position);
    }

    fn advance_ground(&mut self, dt: f32, game_speed: f32) {
        self.ground.advance(dt, game_speed);
    }

    fn reset_ground(&mut self) {
        self.ground.reset();
    }

    fn update_projection(&mut self, aspect: f32) {
        self.camera.update_projection(aspect);
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.update_projection(width as f32 / height as f32);
    }
}
