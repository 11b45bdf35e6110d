//! Galaxy Raid
//!
//! The ship auto-fires twin bullets while enemies drop from the top. Any enemy
//! touching the ship ends the run; that check runs before bullets score, so a
//! tick that both kills and scores ends without the points.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Steering, seeded_rng};
use crate::audio::SoundEffect;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::{Color, Frame};
use crate::sim::{Game, Ramp, Rect, RunStatus, Viewport};

pub const SHIP_W: f32 = 48.0;
pub const SHIP_H: f32 = 54.0;
pub const SHIP_MARGIN: f32 = 20.0;
pub const SHIP_SPEED: f32 = 5.0;
/// Ship hitbox shrink on each side
pub const SHIP_INSET: f32 = 5.0;
pub const FIRE_INTERVAL_MS: f32 = 250.0;
pub const BULLET_W: f32 = 4.0;
pub const BULLET_H: f32 = 15.0;
pub const BULLET_SPEED: f32 = 12.0;
pub const ENEMY_SIZE: f32 = 40.0;
const STAR_COUNT: usize = 60;

/// Ticks between spawns
pub const SPAWN_INTERVAL: Ramp = Ramp::falling(50.0, 0.5, 25.0);
/// Extra fall speed on top of the 3-5 base
pub const ENEMY_BONUS: Ramp = Ramp::rising(0.0, 0.05, 3.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    pub kind: u8,
}

#[derive(Debug, Clone)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    color: Color,
}

#[derive(Debug, Clone)]
struct Star {
    pos: Vec2,
    speed: f32,
    size: f32,
}

pub struct ShooterGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    steering: Steering,
    pub ship: Rect,
    pub bullets: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    particles: Vec<Particle>,
    stars: Vec<Star>,
    fire_timer_ms: f32,
    spawn_timer: f32,
    /// Frozen starfield and no explosion bursts
    reduced_motion: bool,
}

impl ShooterGame {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            steering: Steering::default(),
            ship: Self::ship_home(viewport),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            fire_timer_ms: FIRE_INTERVAL_MS,
            spawn_timer: 0.0,
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    fn ship_home(viewport: Viewport) -> Rect {
        Rect::new(
            viewport.width / 2.0 - SHIP_W / 2.0,
            viewport.height - SHIP_H - SHIP_MARGIN,
            SHIP_W,
            SHIP_H,
        )
    }

    fn max_ship_x(&self) -> f32 {
        (self.viewport.width - SHIP_W).max(0.0)
    }

    fn explode(&mut self, at: Vec2, color: Color) {
        if self.reduced_motion {
            return;
        }
        for _ in 0..8 {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 6.0,
                (self.rng.random::<f32>() - 0.5) * 6.0,
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    fn spawn_enemy(&mut self) {
        let x = self.rng.random::<f32>() * (self.viewport.width - ENEMY_SIZE).max(0.0);
        let speed = 3.0 + self.rng.random::<f32>() * 2.0 + ENEMY_BONUS.at(self.score);
        let kind = self.rng.random_range(0..2);
        self.enemies.push(Enemy {
            rect: Rect::new(x, -ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE),
            speed,
            kind,
        });
    }

    fn move_ship(&mut self) {
        let axis = self.steering.axis();
        if let Some(px) = self.steering.take_pointer() {
            self.ship.pos.x = px - SHIP_W / 2.0;
        } else {
            self.ship.pos.x += axis * SHIP_SPEED;
        }
        self.ship.pos.x = self.ship.pos.x.clamp(0.0, self.max_ship_x());
    }

    fn update_cosmetics(&mut self) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let scroll = if self.reduced_motion { 0.0 } else { 1.0 };
        for star in &mut self.stars {
            star.pos.y += star.speed * scroll;
            if star.pos.y > h {
                star.pos = Vec2::new(self.rng.random::<f32>() * w, 0.0);
            }
        }
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= 0.05;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

impl Game for ShooterGame {
    fn key(&self) -> GameKey {
        GameKey::Galaxy
    }

    fn start(&mut self) {
        self.ship = Self::ship_home(self.viewport);
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    self.rng.random::<f32>() * self.viewport.width,
                    self.rng.random::<f32>() * self.viewport.height,
                ),
                speed: 0.5 + self.rng.random::<f32>() * 2.5,
                size: 0.5 + self.rng.random::<f32>() * 1.5,
            })
            .collect();
        self.fire_timer_ms = FIRE_INTERVAL_MS;
        self.spawn_timer = 0.0;
        self.score = 0;
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, _cues: &mut Vec<SoundEffect>) {
        self.steering.apply(event);
    }

    fn tick(&mut self, dt: f32, cues: &mut Vec<SoundEffect>) {
        self.update_cosmetics();
        self.move_ship();

        // Auto fire from both wings
        self.fire_timer_ms += dt * 1000.0;
        if self.fire_timer_ms >= FIRE_INTERVAL_MS {
            self.fire_timer_ms = 0.0;
            let y = self.ship.pos.y + 10.0;
            self.bullets.push(Rect::new(self.ship.pos.x + 4.0, y, BULLET_W, BULLET_H));
            self.bullets.push(Rect::new(
                self.ship.max().x - 8.0,
                y,
                BULLET_W,
                BULLET_H,
            ));
        }

        for bullet in &mut self.bullets {
            bullet.pos.y -= BULLET_SPEED;
        }
        self.bullets.retain(|b| b.pos.y >= -20.0);

        self.spawn_timer += 1.0;
        if self.spawn_timer > SPAWN_INTERVAL.at(self.score) {
            self.spawn_timer = 0.0;
            self.spawn_enemy();
        }

        for enemy in &mut self.enemies {
            enemy.rect.pos.y += enemy.speed;
        }

        // Ship collisions first
        let hitbox = self.ship.inset(SHIP_INSET);
        if self.enemies.iter().any(|e| e.rect.overlaps(&hitbox)) {
            cues.push(SoundEffect::ShipLost);
            self.explode(self.ship.center(), Color::hex(0x22d3ee));
            self.status = RunStatus::GameOver;
            return;
        }

        // Each enemy takes at most one bullet
        let mut destroyed = Vec::new();
        for (i, enemy) in self.enemies.iter().enumerate() {
            if let Some(j) = self.bullets.iter().position(|b| b.overlaps(&enemy.rect)) {
                self.bullets.remove(j);
                destroyed.push(i);
            }
        }
        for i in destroyed.into_iter().rev() {
            let enemy = self.enemies.remove(i);
            self.score += 1;
            cues.push(SoundEffect::Explode);
            self.explode(enemy.rect.center(), Color::hex(0xef4444));
        }

        let bottom = self.viewport.height;
        self.enemies.retain(|e| e.rect.pos.y <= bottom);
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn status(&self) -> RunStatus {
        self.status
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.ship.pos.y = viewport.height - SHIP_H - SHIP_MARGIN;
        self.ship.pos.x = self.ship.pos.x.clamp(0.0, self.max_ship_x());
    }

    fn draw(&self, frame: &mut Frame) {
        frame.background = Color::hex(0x020205);
        for star in &self.stars {
            frame.circle(star.pos, star.size, Color::hex(0xffffff).with_alpha(0.6), 0.0);
        }

        for bullet in &self.bullets {
            frame.glow_rect(*bullet, Color::hex(0xfacc15), 8.0);
        }

        for enemy in &self.enemies {
            let r = enemy.rect;
            let color = if enemy.kind == 0 { Color::hex(0xef4444) } else { Color::hex(0xa855f7) };
            frame.poly(
                vec![
                    r.pos,
                    Vec2::new(r.max().x, r.pos.y),
                    Vec2::new(r.center().x, r.max().y),
                ],
                color,
                12.0,
            );
        }

        if self.status != RunStatus::GameOver {
            let s = self.ship;
            frame.poly(
                vec![
                    Vec2::new(s.center().x, s.pos.y),
                    Vec2::new(s.max().x, s.max().y),
                    Vec2::new(s.center().x, s.max().y - 12.0),
                    Vec2::new(s.pos.x, s.max().y),
                ],
                Color::hex(0x22d3ee),
                15.0,
            );
        }

        for p in &self.particles {
            frame.circle(p.pos, 2.0, p.color.with_alpha(p.life), 0.0);
        }
    }
}
