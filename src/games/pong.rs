//! Neon Pong
//!
//! Player paddle at the bottom, AI paddle at the top. Getting the ball past
//! the AI scores a point; letting it past the player ends the run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Steering, seeded_rng};
use crate::audio::SoundEffect;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::{Color, Frame, palette};
use crate::sim::collision::bounce_side_walls;
use crate::sim::{Game, Ramp, Rect, RunStatus, Viewport};

pub const BALL_RADIUS: f32 = 6.0;
pub const PADDLE_H: f32 = 12.0;
pub const PADDLE_W_NARROW: f32 = 80.0;
pub const PADDLE_W_WIDE: f32 = 120.0;
pub const PLAYER_SPEED: f32 = 9.0;
pub const SERVE_VY: f32 = 7.0;
/// Horizontal reach beyond the paddle ends that still counts as a hit
pub const HIT_TOLERANCE: f32 = 10.0;
pub const SPEEDUP: f32 = 1.05;
pub const MAX_VY: f32 = 18.0;
pub const MAX_VX: f32 = 15.0;
/// Spin added at the paddle edge
pub const SPIN: f32 = 5.0;
/// AI paddle speed per tick
pub const AI_SPEED: Ramp = Ramp::rising(5.5, 0.2, 12.0);

const AI_Y: f32 = 30.0;

pub struct PongGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    steering: Steering,
    pub paddle_w: f32,
    pub player_x: f32,
    pub ai_x: f32,
    pub ball: Vec2,
    pub velocity: Vec2,
}

impl PongGame {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut game = Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            steering: Steering::default(),
            paddle_w: PADDLE_W_WIDE,
            player_x: 0.0,
            ai_x: 0.0,
            ball: Vec2::ZERO,
            velocity: Vec2::ZERO,
        };
        game.layout();
        game
    }

    pub fn player_y(&self) -> f32 {
        self.viewport.height - 30.0
    }

    fn layout(&mut self) {
        self.paddle_w = if self.viewport.is_narrow() { PADDLE_W_NARROW } else { PADDLE_W_WIDE };
        self.player_x = (self.viewport.width - self.paddle_w) / 2.0;
        self.ai_x = self.player_x;
        self.ball = Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
    }

    fn serve(&mut self) {
        self.ball = Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        self.velocity = Vec2::new(self.rng.random_range(-4.0..4.0), SERVE_VY);
    }

    fn max_paddle_x(&self) -> f32 {
        (self.viewport.width - self.paddle_w).max(0.0)
    }

    fn move_player(&mut self) {
        let axis = self.steering.axis();
        if let Some(px) = self.steering.take_pointer() {
            self.player_x = px - self.paddle_w / 2.0;
        } else {
            self.player_x += axis * PLAYER_SPEED;
        }
        self.player_x = self.player_x.clamp(0.0, self.max_paddle_x());
    }

    fn move_ai(&mut self) {
        let max_speed = AI_SPEED.at(self.score);
        let delta = self.ball.x - (self.ai_x + self.paddle_w / 2.0);
        self.ai_x += delta.clamp(-max_speed, max_speed);
        self.ai_x = self.ai_x.clamp(0.0, self.max_paddle_x());
    }

    fn in_reach(&self, paddle_x: f32) -> bool {
        self.ball.x >= paddle_x - HIT_TOLERANCE && self.ball.x <= paddle_x + self.paddle_w + HIT_TOLERANCE
    }
}

impl Game for PongGame {
    fn key(&self) -> GameKey {
        GameKey::Pong
    }

    fn start(&mut self) {
        self.layout();
        self.serve();
        self.score = 0;
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, _cues: &mut Vec<SoundEffect>) {
        self.steering.apply(event);
    }

    fn tick(&mut self, _dt: f32, cues: &mut Vec<SoundEffect>) {
        self.move_player();

        self.ball += self.velocity;
        bounce_side_walls(&mut self.ball, &mut self.velocity, BALL_RADIUS, self.viewport.width);

        self.move_ai();

        let r = BALL_RADIUS;
        let player_y = self.player_y();
        if self.velocity.y > 0.0
            && self.ball.y + r >= player_y
            && self.ball.y - r < player_y + PADDLE_H
            && self.in_reach(self.player_x)
        {
            self.velocity.y = (-self.velocity.y.abs() * SPEEDUP).max(-MAX_VY);
            let half = self.paddle_w / 2.0;
            let offset = (self.ball.x - (self.player_x + half)) / half;
            self.velocity.x = (self.velocity.x + offset * SPIN).clamp(-MAX_VX, MAX_VX);
            cues.push(SoundEffect::PongHit);
        }

        if self.velocity.y < 0.0
            && self.ball.y - r <= AI_Y + PADDLE_H
            && self.ball.y + r > AI_Y
            && self.in_reach(self.ai_x)
        {
            self.velocity.y = self.velocity.y.abs();
            cues.push(SoundEffect::PongHit);
        }

        // Losing is checked before the AI miss
        if self.ball.y - r > self.viewport.height {
            cues.push(SoundEffect::PongOver);
            self.status = RunStatus::GameOver;
            return;
        }

        if self.ball.y + r < 0.0 {
            cues.push(SoundEffect::PongScore);
            self.score += 1;
            self.serve();
        }
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn status(&self) -> RunStatus {
        self.status
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.paddle_w = if viewport.is_narrow() { PADDLE_W_NARROW } else { PADDLE_W_WIDE };
        self.player_x = self.player_x.clamp(0.0, self.max_paddle_x());
        self.ai_x = self.ai_x.clamp(0.0, self.max_paddle_x());
        self.ball.x = self.ball.x.clamp(BALL_RADIUS, (viewport.width - BALL_RADIUS).max(BALL_RADIUS));
    }

    fn draw(&self, frame: &mut Frame) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        frame.background = Color::hex(0x050508);

        // Dashed centre line
        let mut x = 0.0;
        while x < w {
            frame.line(
                Vec2::new(x, h / 2.0),
                Vec2::new((x + 10.0).min(w), h / 2.0),
                Color::hex(0x334155),
                2.0,
            );
            x += 25.0;
        }

        frame.glow_rect(
            Rect::new(self.player_x, self.player_y(), self.paddle_w, PADDLE_H),
            palette::CYAN,
            15.0,
        );
        frame.glow_rect(
            Rect::new(self.ai_x, AI_Y, self.paddle_w, PADDLE_H),
            palette::PINK,
            15.0,
        );
        frame.circle(self.ball, BALL_RADIUS, palette::WHITE, 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, PointerKind};

    const DT: f32 = 1.0 / 60.0;

    fn running() -> PongGame {
        let mut game = PongGame::new(11, Viewport::new(800.0, 600.0));
        game.start();
        game
    }

    #[test]
    fn test_serve() {
        let game = running();
        assert_eq!(game.ball, Vec2::new(400.0, 300.0));
        assert_eq!(game.velocity.y, SERVE_VY);
        assert!(game.velocity.x >= -4.0 && game.velocity.x < 4.0);
        assert_eq!(game.paddle_w, PADDLE_W_WIDE);
    }

    #[test]
    fn test_narrow_viewport_small_paddle() {
        let game = PongGame::new(1, Viewport::new(400.0, 700.0));
        assert_eq!(game.paddle_w, PADDLE_W_NARROW);
    }

    #[test]
    fn test_player_hit_bounces_and_speeds_up() {
        let mut game = running();
        game.player_x = 340.0;
        game.ball = Vec2::new(400.0, game.player_y() - 8.0);
        game.velocity = Vec2::new(0.0, 7.0);
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert!(game.velocity.y < 0.0);
        assert!((game.velocity.y + 7.0 * SPEEDUP).abs() < 1e-4);
        assert!(cues.contains(&SoundEffect::PongHit));
    }

    #[test]
    fn test_ball_past_player_ends_run() {
        let mut game = running();
        game.player_x = 0.0;
        game.ball = Vec2::new(700.0, 600.0);
        game.velocity = Vec2::new(0.0, 7.0);
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(cues, vec![SoundEffect::PongOver]);
    }

    #[test]
    fn test_ball_past_ai_scores_and_reserves() {
        let mut game = running();
        game.ai_x = 0.0;
        game.ball = Vec2::new(700.0, -3.0);
        game.velocity = Vec2::new(0.0, -7.0);
        // AI moves at most 5.5 per tick so it cannot reach
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.score(), 1);
        assert_eq!(game.ball, Vec2::new(400.0, 300.0));
        assert_eq!(game.velocity.y, SERVE_VY);
    }

    #[test]
    fn test_vertical_speed_is_capped() {
        let mut game = running();
        game.player_x = 340.0;
        game.ball = Vec2::new(400.0, game.player_y() - 20.0);
        game.velocity = Vec2::new(0.0, 17.9);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.velocity.y, -MAX_VY);
    }

    #[test]
    fn test_pointer_centres_paddle() {
        let mut game = running();
        game.handle_input(
            &InputEvent::PointerMove {
                x: 200.0,
                y: 0.0,
                kind: PointerKind::Touch,
            },
            &mut Vec::new(),
        );
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.player_x, 200.0 - PADDLE_W_WIDE / 2.0);

        game.handle_input(&InputEvent::KeyDown(Key::Right), &mut Vec::new());
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.player_x, 140.0 + PLAYER_SPEED);
    }

    #[test]
    fn test_ai_speed_ramp() {
        assert_eq!(AI_SPEED.at(0), 5.5);
        assert_eq!(AI_SPEED.at(100), 12.0);
    }
}
