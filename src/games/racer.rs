//! Neon Racer
//!
//! Three-lane road scrolling toward the player. Distance travelled scores
//! continuously, each car left behind adds a bonus, and touching a car ends
//! the run. Holding turbo raises the cruising speed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::seeded_rng;
use crate::audio::SoundEffect;
use crate::input::{InputEvent, Key, PointerKind};
use crate::menu::GameKey;
use crate::renderer::{Color, Frame};
use crate::sim::{Game, Ramp, Rect, RunStatus, Viewport};
use crate::sanitize_score;

pub const LANES: usize = 3;
pub const MAX_ROAD_W: f32 = 480.0;
pub const CAR_W: f32 = 50.0;
pub const CAR_H: f32 = 85.0;
pub const CRUISE_SPEED: f32 = 10.0;
pub const TURBO_SPEED: f32 = 22.0;
/// Fraction of the speed gap closed per tick
pub const SPEED_EASE: f32 = 0.08;
/// Fraction of the lane gap closed per tick
pub const STEER_EASE: f32 = 0.18;
/// Distance units per scoring step
pub const SCORE_DISTANCE: f32 = 80.0;
pub const PASS_BONUS: u64 = 75;
/// Hitbox shrink on each side of both cars
pub const CRASH_INSET: f32 = 10.0;
/// Enemies move at this fraction of the player speed
pub const TRAFFIC_FACTOR: f32 = 0.75;
pub const SPAWN_Y: f32 = -200.0;
/// A lane stays blocked while its newest car is above this line
pub const LANE_CLEAR_Y: f32 = -100.0;
/// Ticks between spawn attempts
pub const SPAWN_INTERVAL: Ramp = Ramp::falling(85.0, 1.0 / 150.0, 25.0);

const TRAFFIC_COLORS: [Color; 4] = [
    Color::hex(0xef4444),
    Color::hex(0xf59e0b),
    Color::hex(0xa855f7),
    Color::hex(0x10b981),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub rect: Rect,
    pub lane: usize,
    pub color: Color,
}

#[derive(Debug, Clone)]
struct Exhaust {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    size: f32,
    color: Color,
}

pub struct RacerGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    road_x: f32,
    road_w: f32,
    pub lane: usize,
    pub player: Rect,
    pub enemies: Vec<Car>,
    pub speed: f32,
    pub turbo: bool,
    distance: f32,
    spawn_timer: f32,
    scroll: f32,
    exhaust: Vec<Exhaust>,
}

impl RacerGame {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut game = Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            road_x: 0.0,
            road_w: 0.0,
            lane: 1,
            player: Rect::default(),
            enemies: Vec::new(),
            speed: 0.0,
            turbo: false,
            distance: 0.0,
            spawn_timer: 0.0,
            scroll: 0.0,
            exhaust: Vec::new(),
        };
        game.fit_road();
        game.player = Rect::new(game.lane_x(1), viewport.height - 180.0, CAR_W, CAR_H);
        game
    }

    fn fit_road(&mut self) {
        self.road_w = (self.viewport.width * 0.88).min(MAX_ROAD_W);
        self.road_x = (self.viewport.width - self.road_w) / 2.0;
    }

    pub fn lane_width(&self) -> f32 {
        self.road_w / LANES as f32
    }

    /// Left edge of a car centred in `lane`
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.road_x + lane as f32 * self.lane_width() + (self.lane_width() - CAR_W) / 2.0
    }

    /// Lane under a screen x, clamped to the road
    pub fn lane_at(&self, x: f32) -> usize {
        let lane = ((x - self.road_x) / self.lane_width()).floor();
        if lane.is_finite() {
            lane.clamp(0.0, (LANES - 1) as f32) as usize
        } else {
            1
        }
    }

    fn change_lane(&mut self, lane: usize, cues: &mut Vec<SoundEffect>) {
        if lane < LANES && lane != self.lane {
            self.lane = lane;
            if !self.turbo {
                cues.push(SoundEffect::Turbo);
            }
        }
    }

    fn set_turbo(&mut self, on: bool, cues: &mut Vec<SoundEffect>) {
        if on && !self.turbo {
            cues.push(SoundEffect::Turbo);
        }
        self.turbo = on;
    }

    /// Add a car in a random lane unless that lane is still blocked
    pub fn spawn_enemy(&mut self) -> bool {
        let lane = self.rng.random_range(0..LANES);
        if self.enemies.iter().any(|e| e.lane == lane && e.rect.pos.y < LANE_CLEAR_Y) {
            return false;
        }
        let color = TRAFFIC_COLORS[self.rng.random_range(0..TRAFFIC_COLORS.len())];
        self.enemies.push(Car {
            rect: Rect::new(self.lane_x(lane), SPAWN_Y, CAR_W, CAR_H),
            lane,
            color,
        });
        true
    }

    fn puff(&mut self) {
        let (count, color) = if self.turbo { (3, Color::hex(0x0ea5e9)) } else { (1, Color::hex(0xf59e0b)) };
        let origin = Vec2::new(self.player.center().x, self.player.max().y);
        let spread = self.speed * 0.4;
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * spread,
                (self.rng.random::<f32>() - 0.5) * spread + spread * 0.4,
            );
            let size = self.rng.random::<f32>() * 4.0 + 1.0;
            self.exhaust.push(Exhaust {
                pos: origin,
                vel,
                life: 1.0,
                size,
                color,
            });
        }
    }

    fn update_exhaust(&mut self) {
        let drift = self.speed * 0.3;
        for p in &mut self.exhaust {
            p.pos += p.vel + Vec2::new(0.0, drift);
            p.life -= 0.04;
        }
        self.exhaust.retain(|p| p.life > 0.0);
    }
}

impl Game for RacerGame {
    fn key(&self) -> GameKey {
        GameKey::Racing
    }

    fn start(&mut self) {
        self.fit_road();
        self.score = 0;
        self.speed = 0.0;
        self.distance = 0.0;
        self.spawn_timer = 0.0;
        self.scroll = 0.0;
        self.turbo = false;
        self.enemies.clear();
        self.exhaust.clear();
        self.lane = 1;
        self.player = Rect::new(self.lane_x(1), self.viewport.height - 180.0, CAR_W, CAR_H);
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, cues: &mut Vec<SoundEffect>) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.change_lane(self.lane.saturating_sub(1), cues),
            InputEvent::KeyDown(Key::Right) => self.change_lane(self.lane + 1, cues),
            InputEvent::KeyDown(Key::Up) => self.set_turbo(true, cues),
            InputEvent::KeyUp(Key::Up) => self.set_turbo(false, cues),
            InputEvent::PointerDown { x, kind, .. } => {
                if *kind == PointerKind::Touch {
                    let lane = self.lane_at(*x);
                    self.change_lane(lane, cues);
                }
                self.set_turbo(true, cues);
            }
            InputEvent::PointerUp { .. } => self.set_turbo(false, cues),
            _ => {}
        }
    }

    fn tick(&mut self, _dt: f32, cues: &mut Vec<SoundEffect>) {
        let target = if self.turbo { TURBO_SPEED } else { CRUISE_SPEED };
        self.speed += (target - self.speed) * SPEED_EASE;
        self.distance += self.speed;
        if self.distance > SCORE_DISTANCE {
            self.score += sanitize_score((self.speed / 4.0).floor() as f64);
            self.distance = 0.0;
        }
        self.scroll += self.speed;

        let dx = self.lane_x(self.lane) - self.player.pos.x;
        self.player.pos.x += dx * STEER_EASE;

        self.spawn_timer += 1.0;
        if self.spawn_timer > SPAWN_INTERVAL.at(self.score) {
            self.spawn_enemy();
            self.spawn_timer = 0.0;
        }

        self.update_exhaust();
        self.puff();

        let step = self.speed * TRAFFIC_FACTOR;
        for car in &mut self.enemies {
            car.rect.pos.y += step;
        }

        // Crashes are checked before any pass bonus
        let hitbox = self.player.inset(CRASH_INSET);
        if self.enemies.iter().any(|car| car.rect.inset(CRASH_INSET).overlaps(&hitbox)) {
            log::debug!("Racer crash at score {}", self.score);
            cues.push(SoundEffect::Crash);
            self.status = RunStatus::GameOver;
            return;
        }

        let height = self.viewport.height;
        let before = self.enemies.len();
        self.enemies.retain(|car| car.rect.pos.y <= height);
        for _ in self.enemies.len()..before {
            self.score += PASS_BONUS;
            cues.push(SoundEffect::Pass);
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
        self.fit_road();
        self.player.pos.y = viewport.height - 180.0;
        self.player.pos.x = self.lane_x(self.lane);
        for i in 0..self.enemies.len() {
            let x = self.lane_x(self.enemies[i].lane);
            self.enemies[i].rect.pos.x = x;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        frame.background = Color::hex(0x020617);

        // Scrolling backdrop grid
        let grid = Color::hex(0x0ea5e9).with_alpha(0.15);
        let mut x = 0.0;
        while x <= w {
            frame.line(Vec2::new(x, 0.0), Vec2::new(x, h), grid, 1.0);
            x += 70.0;
        }
        let mut y = self.scroll % 70.0 - 70.0;
        while y < h {
            frame.line(Vec2::new(0.0, y), Vec2::new(w, y), grid, 1.0);
            y += 70.0;
        }

        frame.rect(Rect::new(self.road_x, 0.0, self.road_w, h), Color::hex(0x0f172a));
        let edge = if self.turbo { Color::hex(0x38bdf8) } else { Color::hex(0xf59e0b) };
        for x in [self.road_x, self.road_x + self.road_w] {
            frame.line(Vec2::new(x, 0.0), Vec2::new(x, h), edge, 6.0);
        }

        // Dashed lane dividers
        let dash = Color::hex(0xffffff).with_alpha(0.4);
        for lane in 1..LANES {
            let x = self.road_x + lane as f32 * self.lane_width();
            let mut y = self.scroll % 100.0 - 100.0;
            while y < h {
                frame.line(Vec2::new(x, y), Vec2::new(x, y + 40.0), dash, 4.0);
                y += 100.0;
            }
        }

        for p in &self.exhaust {
            frame.circle(p.pos, p.size, p.color.with_alpha(p.life), 0.0);
        }
        for car in &self.enemies {
            draw_car(frame, car.rect, car.color, 10.0);
        }
        let glow = if self.turbo { 35.0 } else { 20.0 };
        draw_car(frame, self.player, Color::hex(0x0ea5e9), glow);

        let hint = if self.turbo { "TURBO ON" } else { "HOLD UP" };
        frame.label(Vec2::new(w / 2.0, 24.0), hint, 10.0, Color::hex(0x94a3b8));
    }
}

fn draw_car(frame: &mut Frame, body: Rect, accent: Color, glow: f32) {
    frame.glow_rect(body, Color::hex(0x111111), glow);
    let (x, y, w, h) = (body.pos.x, body.pos.y, body.size.x, body.size.y);
    frame.rect(Rect::new(x + w / 2.0 - 3.0, y, 6.0, h), accent);
    frame.rect(Rect::new(x + 2.0, y + 15.0, 2.0, h - 30.0), accent);
    frame.rect(Rect::new(x + w - 4.0, y + 15.0, 2.0, h - 30.0), accent);
    frame.rect(Rect::new(x + 8.0, y + h * 0.25, w - 16.0, h * 0.35), Color::hex(0x000000));
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn running() -> RacerGame {
        let mut game = RacerGame::new(3, Viewport::new(800.0, 600.0));
        game.start();
        game
    }

    fn car_in_lane(game: &RacerGame, lane: usize, y: f32) -> Car {
        Car {
            rect: Rect::new(game.lane_x(lane), y, CAR_W, CAR_H),
            lane,
            color: TRAFFIC_COLORS[0],
        }
    }

    #[test]
    fn test_start_layout() {
        let game = running();
        assert_eq!(game.road_w, 480.0);
        assert_eq!(game.road_x, 160.0);
        assert_eq!(game.lane, 1);
        assert_eq!(game.player.pos, Vec2::new(375.0, 420.0));
        assert_eq!(game.speed, 0.0);
    }

    #[test]
    fn test_speed_eases_toward_target() {
        let mut game = running();
        game.tick(DT, &mut Vec::new());
        assert!((game.speed - 0.8).abs() < 1e-5);

        game.handle_input(&InputEvent::KeyDown(Key::Up), &mut Vec::new());
        for _ in 0..200 {
            game.tick(DT, &mut Vec::new());
            game.enemies.clear();
        }
        assert!((game.speed - TURBO_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_distance_scores_quarter_speed() {
        let mut game = running();
        game.speed = 20.0;
        game.distance = 79.0;
        game.tick(DT, &mut Vec::new());
        // 20 eases to 19.2, floor(19.2 / 4) = 4
        assert_eq!(game.score(), 4);
        assert_eq!(game.distance, 0.0);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut game = running();
        for _ in 0..85 {
            game.tick(DT, &mut Vec::new());
        }
        assert!(game.enemies.is_empty());
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.enemies.len(), 1);
    }

    #[test]
    fn test_blocked_lanes_skip_spawn() {
        let mut game = running();
        game.enemies = (0..LANES).map(|lane| car_in_lane(&game, lane, -150.0)).collect();
        assert!(!game.spawn_enemy());
        assert_eq!(game.enemies.len(), 3);
    }

    #[test]
    fn test_crash_ends_run() {
        let mut game = running();
        let car = car_in_lane(&game, 1, game.player.pos.y);
        game.enemies.push(car);
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(cues, vec![SoundEffect::Crash]);
    }

    #[test]
    fn test_inset_forgives_grazes() {
        let mut game = running();
        // Bumper overlap of 15px, inside the 2 * 10px forgiveness
        let car = car_in_lane(&game, 1, game.player.pos.y - CAR_H + 15.0);
        game.enemies.push(car);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.status(), RunStatus::Running);
    }

    #[test]
    fn test_passing_car_scores_bonus() {
        let mut game = running();
        let car = car_in_lane(&game, 0, 600.0);
        game.enemies.push(car);
        let mut cues = Vec::new();
        game.tick(DT, &mut cues);
        assert!(game.enemies.is_empty());
        assert_eq!(game.score(), PASS_BONUS);
        assert_eq!(cues, vec![SoundEffect::Pass]);
    }

    #[test]
    fn test_crash_beats_pass_in_same_tick() {
        let mut game = running();
        let passing = car_in_lane(&game, 0, 600.0);
        let crash = car_in_lane(&game, 1, game.player.pos.y);
        game.enemies.push(passing);
        game.enemies.push(crash);
        game.tick(DT, &mut Vec::new());
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_lane_changes_and_touch() {
        let mut game = running();
        let mut cues = Vec::new();
        game.handle_input(&InputEvent::KeyDown(Key::Left), &mut cues);
        assert_eq!(game.lane, 0);
        game.handle_input(&InputEvent::KeyDown(Key::Left), &mut cues);
        assert_eq!(game.lane, 0);
        assert_eq!(cues, vec![SoundEffect::Turbo]);

        game.handle_input(
            &InputEvent::PointerDown {
                x: 600.0,
                y: 300.0,
                kind: PointerKind::Touch,
            },
            &mut cues,
        );
        assert_eq!(game.lane, 2);
        assert!(game.turbo);
        game.handle_input(&InputEvent::PointerUp { kind: PointerKind::Touch }, &mut cues);
        assert!(!game.turbo);

        // Mouse presses only engage turbo
        game.handle_input(
            &InputEvent::PointerDown {
                x: 100.0,
                y: 300.0,
                kind: PointerKind::Mouse,
            },
            &mut cues,
        );
        assert_eq!(game.lane, 2);
        assert!(game.turbo);
    }

    #[test]
    fn test_lane_at_clamps_off_road() {
        let game = running();
        assert_eq!(game.lane_at(0.0), 0);
        assert_eq!(game.lane_at(400.0), 1);
        assert_eq!(game.lane_at(10_000.0), 2);
    }

    #[test]
    fn test_spawn_interval_floor() {
        assert_eq!(SPAWN_INTERVAL.at(0), 85.0);
        assert!((SPAWN_INTERVAL.at(1500) - 75.0).abs() < 1e-3);
        assert_eq!(SPAWN_INTERVAL.at(100_000), 25.0);
    }
}
