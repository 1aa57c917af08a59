//! Headless driver for the arena director.
//!
//! Feeds the engine a fixed view, a target orbiting the view center and an
//! optional scripted gunner that chips at the nearest agent, then reports
//! what happened.

use glam::Vec2;
use tracing::{debug, info};

use onslaught_core::commands::SessionCommand;
use onslaught_core::components::AgentId;
use onslaught_core::config::DirectorConfig;
use onslaught_core::events::DirectorEvent;
use onslaught_core::state::ArenaSnapshot;
use onslaught_core::types::{Position, Velocity, ViewRect};
use onslaught_sim::{ArenaEngine, SimConfig};

/// Parameters for one headless session.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub seed: u64,
    pub seconds: f64,
    pub fps: u32,
    pub director: DirectorConfig,
    pub view: ViewRect,
    pub orbit: Orbit,
    /// Seconds between gunner shots; `None` disables the gunner.
    pub fire_interval_secs: Option<f64>,
    pub shot_damage: i32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            seconds: 60.0,
            fps: 60,
            director: DirectorConfig::default(),
            view: ViewRect::new(Position::new(0.0, 0.0), 9.0, 5.0),
            orbit: Orbit::default(),
            fire_interval_secs: Some(0.5),
            shot_damage: 1,
        }
    }
}

/// Circular path the scripted target follows.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            radius: 2.5,
            angular_speed: 0.6,
        }
    }
}

impl Orbit {
    /// Target position and velocity at `t` seconds around `center`.
    pub fn sample(&self, center: Vec2, t: f32) -> (Vec2, Vec2) {
        let angle = self.angular_speed * t;
        let offset = Vec2::from_angle(angle) * self.radius;
        let velocity = Vec2::new(-offset.y, offset.x) * self.angular_speed;
        (center + offset, velocity)
    }
}

/// Tallies of one headless session.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub highest_wave: u32,
    pub agents_spawned: u32,
    pub bosses_spawned: u32,
    pub bosses_defeated: u32,
    pub kills: u32,
    pub contacts: u32,
    pub peak_alive: usize,
    pub final_snapshot: ArenaSnapshot,
}

impl RunSummary {
    fn record(&mut self, snapshot: &ArenaSnapshot) {
        self.frames += 1;
        self.highest_wave = self.highest_wave.max(snapshot.wave);
        self.peak_alive = self.peak_alive.max(snapshot.agents.len());
        for event in &snapshot.events {
            match event {
                DirectorEvent::AgentSpawned { .. } => self.agents_spawned += 1,
                DirectorEvent::BossSpawned { .. } => self.bosses_spawned += 1,
                DirectorEvent::BossDefeated { .. } => self.bosses_defeated += 1,
                DirectorEvent::AgentKilled { .. } => self.kills += 1,
                DirectorEvent::PlayerContact { .. } => self.contacts += 1,
                DirectorEvent::WaveChanged { .. } | DirectorEvent::DeathEffect { .. } => {}
            }
        }
    }
}

/// Run a full session, handing every emitted event to `on_event`.
pub fn run_headless(options: &RunOptions, mut on_event: impl FnMut(&DirectorEvent)) -> RunSummary {
    let fps = options.fps.max(1);
    let frame_dt = 1.0 / fps as f64;
    let frames = (options.seconds.max(0.0) * fps as f64).round() as u64;
    let center = options.view.center.as_vec2();

    let mut engine = ArenaEngine::new(SimConfig {
        seed: options.seed,
        director: options.director.clone(),
        ..Default::default()
    });
    engine.queue_commands([
        SessionCommand::SetView { view: options.view },
        SessionCommand::StartGame,
    ]);

    let mut summary = RunSummary::default();
    let mut next_shot = options.fire_interval_secs;
    let mut last = ArenaSnapshot::default();

    for _ in 0..frames {
        let t = engine.time().elapsed_secs;
        let (position, velocity) = options.orbit.sample(center, t as f32);
        engine.queue_command(SessionCommand::SetTarget {
            position: Position::from(position),
            velocity: Some(Velocity::from(velocity)),
        });

        if let (Some(interval), Some(due)) = (options.fire_interval_secs, next_shot) {
            if t >= due {
                if let Some(agent) = nearest_agent(&last, position) {
                    debug!(agent = agent.0, "gunner fires");
                    engine.queue_command(SessionCommand::DamageAgent {
                        agent,
                        amount: options.shot_damage,
                    });
                }
                next_shot = Some(due + interval.max(frame_dt));
            }
        }

        last = engine.advance(frame_dt);
        for event in &last.events {
            on_event(event);
        }
        summary.record(&last);
    }

    info!(
        frames = summary.frames,
        wave = summary.highest_wave,
        spawned = summary.agents_spawned,
        kills = summary.kills,
        bosses = summary.bosses_spawned,
        "headless run finished"
    );
    summary.final_snapshot = last;
    summary
}

/// Log lifecycle events the way a shell would announce them.
pub fn log_event(event: &DirectorEvent) {
    match event {
        DirectorEvent::WaveChanged { wave } => info!(wave, "wave started"),
        DirectorEvent::BossSpawned { label, variant, .. } => {
            info!(label = %label, variant = %variant, "boss incoming")
        }
        DirectorEvent::BossDefeated { ordinal, .. } => info!(ordinal, "boss down"),
        DirectorEvent::PlayerContact { agent, damage } => {
            debug!(agent = agent.0, damage, "target touched")
        }
        _ => {}
    }
}

fn nearest_agent(snapshot: &ArenaSnapshot, from: Vec2) -> Option<AgentId> {
    snapshot
        .agents
        .iter()
        .min_by(|a, b| {
            let da = a.position.as_vec2().distance_squared(from);
            let db = b.position.as_vec2().distance_squared(from);
            da.total_cmp(&db)
        })
        .map(|a| a.id)
}
