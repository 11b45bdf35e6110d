//! Neon Breaker
//!
//! Brick wall at the top, paddle at the bottom. Bricks score 10 each and a
//! cleared wall is rebuilt for a 50 point bonus. The ball dropping below the
//! screen ends the run, and that check comes before any scoring in the tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Steering, seeded_rng};
use crate::audio::SoundEffect;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::{Color, Frame, palette};
use crate::sim::collision::bounce_side_walls;
use crate::sim::{Game, Rect, RunStatus, Viewport};

pub const PADDLE_W_NARROW: f32 = 80.0;
pub const PADDLE_W_WIDE: f32 = 120.0;
pub const PADDLE_H: f32 = 10.0;
pub const PADDLE_SPEED: f32 = 7.0;
pub const BALL_RADIUS: f32 = 5.0;
pub const SERVE_SPEED: f32 = 4.0;
pub const BRICK_ROWS: usize = 5;
pub const BRICK_H: f32 = 20.0;
pub const BRICK_PADDING: f32 = 10.0;
pub const BRICK_TOP: f32 = 40.0;
pub const BRICK_POINTS: u64 = 10;
pub const CLEAR_BONUS: u64 = 50;
pub const SPEEDUP: f32 = 1.05;
pub const MAX_VY: f32 = 12.0;
/// Horizontal speed per pixel of offset from the paddle centre
pub const ENGLISH: f32 = 0.15;

const MAX_PARTICLES: usize = 50;

const ROW_COLORS: [Color; 5] = [
    Color::hex(0xef4444),
    Color::hex(0xf97316),
    Color::hex(0xfacc15),
    Color::hex(0x22c55e),
    Color::hex(0x22d3ee),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone)]
struct Spark {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    color: Color,
}

pub struct BreakerGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    steering: Steering,
    pub paddle: Rect,
    pub ball: Vec2,
    pub velocity: Vec2,
    pub bricks: Vec<Brick>,
    sparks: Vec<Spark>,
}

impl BreakerGame {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut game = Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            steering: Steering::default(),
            paddle: Rect::default(),
            ball: Vec2::ZERO,
            velocity: Vec2::ZERO,
            bricks: Vec::new(),
            sparks: Vec::new(),
        };
        game.layout();
        game
    }

    fn paddle_width(&self) -> f32 {
        if self.viewport.is_narrow() { PADDLE_W_NARROW } else { PADDLE_W_WIDE }
    }

    /// Centre the paddle, build the wall and serve
    fn layout(&mut self) {
        let w = self.paddle_width();
        self.paddle = Rect::new(
            (self.viewport.width - w) / 2.0,
            self.viewport.height - 30.0,
            w,
            PADDLE_H,
        );
        self.build_wall();
        self.serve();
    }

    fn serve(&mut self) {
        self.ball = Vec2::new(self.viewport.width / 2.0, self.paddle.pos.y - 20.0);
        let side = if self.rng.random::<bool>() { 1.0 } else { -1.0 };
        self.velocity = Vec2::new(SERVE_SPEED * side, -SERVE_SPEED);
    }

    fn build_wall(&mut self) {
        let cols = if self.viewport.is_narrow() { 6 } else { 8 };
        let brick_w = ((self.viewport.width - (cols as f32 + 1.0) * BRICK_PADDING) / cols as f32).max(1.0);
        self.bricks = (0..BRICK_ROWS)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| Brick {
                rect: Rect::new(
                    BRICK_PADDING + col as f32 * (brick_w + BRICK_PADDING),
                    BRICK_PADDING + row as f32 * (BRICK_H + BRICK_PADDING) + BRICK_TOP,
                    brick_w,
                    BRICK_H,
                ),
                color: ROW_COLORS[row % ROW_COLORS.len()],
            })
            .collect();
    }

    fn move_paddle(&mut self) {
        let axis = self.steering.axis();
        if let Some(px) = self.steering.take_pointer() {
            self.paddle.pos.x = px - self.paddle.size.x / 2.0;
        } else {
            self.paddle.pos.x += axis * PADDLE_SPEED;
        }
        let max_x = (self.viewport.width - self.paddle.size.x).max(0.0);
        self.paddle.pos.x = self.paddle.pos.x.clamp(0.0, max_x);
    }

    /// Bounce off the paddle when falling onto it
    fn paddle_contact(&mut self) -> bool {
        let r = BALL_RADIUS;
        let p = self.paddle;
        let touching = self.ball.y + r >= p.pos.y
            && self.ball.y - r <= p.pos.y + p.size.y
            && self.ball.x >= p.pos.x
            && self.ball.x <= p.pos.x + p.size.x;
        if !touching || self.velocity.y <= 0.0 {
            return false;
        }
        self.velocity.y = (-self.velocity.y * SPEEDUP).max(-MAX_VY);
        self.velocity.x = (self.ball.x - p.center().x) * ENGLISH;
        true
    }

    /// Index of the first brick strictly containing the ball centre
    fn brick_at_ball(&self) -> Option<usize> {
        self.bricks.iter().position(|brick| {
            let (min, max) = (brick.rect.min(), brick.rect.max());
            self.ball.x > min.x && self.ball.x < max.x && self.ball.y > min.y && self.ball.y < max.y
        })
    }

    fn burst(&mut self, at: Vec2, color: Color) {
        if self.sparks.len() > MAX_PARTICLES {
            return;
        }
        for _ in 0..4 {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 4.0,
                (self.rng.random::<f32>() - 0.5) * 4.0,
            );
            self.sparks.push(Spark {
                pos: at,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    fn update_sparks(&mut self) {
        for spark in &mut self.sparks {
            spark.pos += spark.vel;
            spark.life -= 0.05;
        }
        self.sparks.retain(|s| s.life > 0.0);
    }
}

impl Game for BreakerGame {
    fn key(&self) -> GameKey {
        GameKey::Breaker
    }

    fn start(&mut self) {
        self.layout();
        self.sparks.clear();
        self.score = 0;
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, _cues: &mut Vec<SoundEffect>) {
        self.steering.apply(event);
    }

    fn tick(&mut self, _dt: f32, cues: &mut Vec<SoundEffect>) {
        self.update_sparks();
        self.move_paddle();

        self.ball += self.velocity;
        bounce_side_walls(&mut self.ball, &mut self.velocity, BALL_RADIUS, self.viewport.width);
        if self.ball.y < BALL_RADIUS && self.velocity.y < 0.0 {
            self.velocity.y = -self.velocity.y;
        }

        if self.ball.y > self.viewport.height {
            cues.push(SoundEffect::BallLost);
            self.status = RunStatus::GameOver;
            return;
        }

        if self.paddle_contact() {
            cues.push(SoundEffect::PaddleHit);
        }

        if let Some(index) = self.brick_at_ball() {
            let brick = self.bricks.remove(index);
            self.velocity.y = -self.velocity.y;
            self.score += BRICK_POINTS;
            cues.push(SoundEffect::BrickHit);
            self.burst(self.ball, brick.color);
        }

        if self.bricks.is_empty() {
            log::debug!("Breaker wall cleared at score {}", self.score);
            self.score += CLEAR_BONUS;
            self.build_wall();
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
        self.paddle.size.x = self.paddle_width();
        self.paddle.pos.y = viewport.height - 30.0;
        let max_x = (viewport.width - self.paddle.size.x).max(0.0);
        self.paddle.pos.x = self.paddle.pos.x.clamp(0.0, max_x);
        self.ball.x = self.ball.x.clamp(BALL_RADIUS, (viewport.width - BALL_RADIUS).max(BALL_RADIUS));
    }

    fn draw(&self, frame: &mut Frame) {
        frame.background = Color::hex(0x050508);
        frame.glow_rect(self.paddle, Color::hex(0x22d3ee), 15.0);
        frame.circle(self.ball, BALL_RADIUS, palette::WHITE, 15.0);
        for brick in &self.bricks {
            frame.glow_rect(brick.rect, brick.color, 10.0);
        }
        for spark in &self.sparks {
            frame.circle(spark.pos, 2.0, spark.color.with_alpha(spark.life), 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn running(width: f32, height: f32) -> BreakerGame {
        let mut game = BreakerGame::new(5, Viewport::new(width, height));
        game.start();
        game
    }

    #[test]
    fn test_start_layout() {
        let game = running(800.0, 600.0);
        assert_eq!(game.paddle.size.x, PADDLE_W_WIDE);
        assert_eq!(game.paddle.pos.y, 570.0);
        assert_eq!(game.bricks.len(), 5 * 8);
        assert_eq!(game.ball, Vec2::new(400.0, 550.0));
        assert_eq!(game.velocity.x.abs(), SERVE_SPEED);
        assert_eq!(game.velocity.y, -SERVE_SPEED);

        let narrow = running(400.0, 600.0);
        assert_eq!(narrow.bricks.len(), 5 * 6);
        assert_eq!(narrow.paddle.size.x, PADDLE_W_NARROW);
        assert_eq!(narrow.bricks[0].rect.pos, Vec2::new(10.0, 50.0));
    }

    #[test]
    fn test_paddle_bounce_scales_with_offset() {
        let mut game = running(400.0, 600.0);
        game.paddle.pos.x = 100.0;
        assert_eq!(game.paddle.size.x, 80.0);

        // Ball arriving at x = 140, the paddle centre
        game.ball = Vec2::new(140.0, 565.0);
        game.velocity = Vec2::new(0.0, 4.0);
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert!(game.velocity.y < 0.0);
        assert!((game.velocity.y + 4.0 * SPEEDUP).abs() < 1e-4);
        assert_eq!(game.velocity.x, 0.0);
        assert!(cues.contains(&SoundEffect::PaddleHit));

        let mut near = running(400.0, 600.0);
        near.paddle.pos.x = 100.0;
        near.ball = Vec2::new(150.0, 565.0);
        near.velocity = Vec2::new(0.0, 4.0);
        near.tick(DT, &mut Vec::new());

        let mut far = running(400.0, 600.0);
        far.paddle.pos.x = 100.0;
        far.ball = Vec2::new(170.0, 565.0);
        far.velocity = Vec2::new(0.0, 4.0);
        far.tick(DT, &mut Vec::new());

        assert!((near.velocity.x - 1.5).abs() < 1e-4);
        assert!((far.velocity.x - 4.5).abs() < 1e-4);
        assert!(far.velocity.x > near.velocity.x);
        assert!(near.velocity.y < 0.0 && far.velocity.y < 0.0);
    }

    #[test]
    fn test_rising_ball_ignores_paddle() {
        let mut game = running(400.0, 600.0);
        game.paddle.pos.x = 100.0;
        game.ball = Vec2::new(140.0, 575.0);
        game.velocity = Vec2::new(0.0, -4.0);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.velocity.y, -4.0);
    }

    #[test]
    fn test_vertical_speed_capped() {
        let mut game = running(400.0, 600.0);
        game.paddle.pos.x = 100.0;
        game.ball = Vec2::new(140.0, 560.0);
        game.velocity = Vec2::new(0.0, 11.9);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.velocity.y, -MAX_VY);
    }

    #[test]
    fn test_brick_hit_scores_and_flips() {
        let mut game = running(800.0, 600.0);
        let target = game.bricks[0].rect.center();
        game.ball = target - Vec2::new(0.0, -3.0);
        game.velocity = Vec2::new(0.0, -3.0);
        let before = game.bricks.len();
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert_eq!(game.bricks.len(), before - 1);
        assert_eq!(game.score(), BRICK_POINTS);
        assert_eq!(game.velocity.y, 3.0);
        assert_eq!(cues, vec![SoundEffect::BrickHit]);
    }

    #[test]
    fn test_cleared_wall_rebuilds_and_keeps_score() {
        let mut game = running(800.0, 600.0);
        let last = game.bricks[0].clone();
        game.bricks = vec![last.clone()];
        game.score = 90;
        game.ball = last.rect.center() + Vec2::new(0.0, 3.0);
        game.velocity = Vec2::new(0.0, -3.0);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.score(), 90 + BRICK_POINTS + CLEAR_BONUS);
        assert_eq!(game.bricks.len(), 40);
        assert_eq!(game.ball, Vec2::new(400.0, 550.0));
        assert_eq!(game.status(), RunStatus::Running);
    }

    #[test]
    fn test_ball_below_screen_ends_run_before_scoring() {
        let mut game = running(800.0, 600.0);
        game.paddle.pos.x = 0.0;
        game.ball = Vec2::new(700.0, 598.0);
        game.velocity = Vec2::new(0.0, 4.0);
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(game.score(), 0);
        assert_eq!(cues, vec![SoundEffect::BallLost]);
    }

    #[test]
    fn test_ceiling_reflects() {
        let mut game = running(800.0, 600.0);
        game.bricks.clear();
        game.bricks.push(Brick {
            rect: Rect::new(0.0, 300.0, 10.0, 10.0),
            color: palette::WHITE,
        });
        game.ball = Vec2::new(400.0, 6.0);
        game.velocity = Vec2::new(0.0, -4.0);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.velocity.y, 4.0);
    }
}
