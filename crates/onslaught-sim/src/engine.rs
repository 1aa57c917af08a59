//! Arena engine: the core of the director.
//!
//! `ArenaEngine` owns the hecs ECS world, processes session commands, runs the
//! frame and physics clocks, and produces `ArenaSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use onslaught_core::commands::SessionCommand;
use onslaught_core::config::DirectorConfig;
use onslaught_core::constants::{MAX_FRAME_DT, MAX_TIME_SCALE, PHYSICS_DT};
use onslaught_core::components::Dead;
use onslaught_core::enums::{Faction, GamePhase};
use onslaught_core::events::DirectorEvent;
use onslaught_core::state::ArenaSnapshot;
use onslaught_core::types::{Position, SimTime, ViewRect};
use onslaught_director::{BossCadence, BossSpawnContext, SpawnContext, SpawnRequest, SpawnScheduler, WaveClock};
use onslaught_steering::{SteeringProfile, TargetInfo};

use crate::score::ScoreState;
use crate::spatial::{IndexedAgent, NeighborhoodIndex, UniformGrid};
use crate::systems;
use crate::systems::cleanup::ScoreRules;
use crate::systems::snapshot::SessionView;
use crate::systems::spawning::SpawnEnv;

/// Configuration for starting a new arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same session.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Director tuning. Sanitized on construction.
    pub director: DirectorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            director: DirectorConfig::default(),
        }
    }
}

/// The arena engine. Owns the ECS world and all session state.
pub struct ArenaEngine {
    world: World,
    config: DirectorConfig,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<Entity>,
    kill_buffer: Vec<Entity>,
    events: Vec<DirectorEvent>,

    // --- Director ---
    clock: WaveClock,
    scheduler: SpawnScheduler,
    bosses: BossCadence<Entity>,
    spawn_requests: Vec<SpawnRequest>,
    announced_wave: Option<u32>,
    next_agent_id: u32,
    score: ScoreState,

    // --- Steering ---
    steering: SteeringProfile,
    neighbors: UniformGrid,
    index_scratch: Vec<IndexedAgent>,
    /// Unconsumed scaled time on the physics clock.
    accumulator: f64,

    // --- Collaborators ---
    view: Option<ViewRect>,
    target: Option<TargetInfo>,
}

impl ArenaEngine {
    /// Create a new arena engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let director = config.director.sanitized();
        let steering = SteeringProfile::from_config(&director.steering);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: initial_phase(&director),
            time_scale: clamp_time_scale(config.time_scale).unwrap_or(1.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            kill_buffer: Vec::new(),
            events: Vec::new(),
            clock: WaveClock::new(director.waves.duration_secs),
            scheduler: SpawnScheduler::new(&director),
            bosses: BossCadence::new(director.boss.clone(), director.boss_variants.len()),
            spawn_requests: Vec::new(),
            announced_wave: None,
            next_agent_id: 0,
            score: ScoreState::default(),
            neighbors: UniformGrid::new(steering.separation_radius),
            steering,
            index_scratch: Vec::new(),
            accumulator: 0.0,
            view: None,
            target: None,
            config: director,
        }
    }

    /// Queue a command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one rendered frame of `frame_dt` real seconds and return the
    /// resulting snapshot.
    ///
    /// The frame clock advances by the scaled frame time; the physics clock
    /// consumes the same scaled time in fixed steps. Nothing advances unless
    /// the session is active with a non-zero time scale.
    pub fn advance(&mut self, frame_dt: f64) -> ArenaSnapshot {
        self.process_commands();
        // Kills requested by commands resolve even while frozen.
        self.run_cleanup();

        if self.is_running() {
            let scaled = sanitize_frame_dt(frame_dt) * self.time_scale;
            self.time.advance_frame(scaled);
            self.run_frame();

            self.accumulator += scaled;
            while self.accumulator >= PHYSICS_DT {
                self.accumulator -= PHYSICS_DT;
                self.run_physics_step();
            }
        }

        self.snapshot()
    }

    /// Whether both clocks are currently advancing.
    pub fn is_running(&self) -> bool {
        self.phase.is_running() && self.time_scale > 0.0
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current session time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Wave in progress on the frame clock.
    pub fn wave(&self) -> u32 {
        self.clock.wave_at(self.time.elapsed_secs)
    }

    /// Get the sanitized configuration the engine runs on.
    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the running score.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// The tracked boss entity, if one has been spawned and not yet cleaned up.
    pub fn active_boss(&self) -> Option<Entity> {
        self.bosses.active_boss()
    }

    /// Read-only access to the separation neighbor index.
    pub fn neighbors(&self) -> &UniformGrid {
        &self.neighbors
    }

    /// Absolute physics-clock time of the spawn loop's next wake.
    pub fn next_spawn_wake(&self) -> Option<f64> {
        self.scheduler.next_wake()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartGame => {
                if self.phase == GamePhase::StartScreen {
                    self.phase = GamePhase::Active;
                    info!("session started");
                }
            }
            SessionCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    debug!("session paused");
                }
            }
            SessionCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    debug!("session resumed");
                }
            }
            SessionCommand::GameOver => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                    self.phase = GamePhase::GameOver;
                    info!(
                        wave = self.wave(),
                        score = self.score.score,
                        kills = self.score.kills,
                        "game over"
                    );
                }
            }
            SessionCommand::Restart => self.restart(),
            SessionCommand::SetTimeScale { scale } => {
                if let Some(scale) = clamp_time_scale(scale) {
                    self.time_scale = scale;
                }
            }
            SessionCommand::SetView { view } => {
                self.view = Some(ViewRect::new(view.center, view.half_width, view.half_height));
            }
            SessionCommand::ClearView => self.view = None,
            SessionCommand::SetTarget { position, velocity } => {
                self.target = Some(TargetInfo {
                    position: position.as_vec2(),
                    velocity: velocity.map(|v| v.as_vec2()),
                });
            }
            SessionCommand::ClearTarget => self.target = None,
            SessionCommand::DamageAgent { agent, amount } => {
                if let Some(entity) = systems::health::find_agent(&self.world, agent) {
                    systems::health::apply_damage(&mut self.world, entity, amount);
                }
            }
            SessionCommand::KillAgent { agent, award_score } => {
                if let Some(entity) = systems::health::find_agent(&self.world, agent) {
                    systems::health::kill(&mut self.world, entity, award_score);
                }
            }
        }
    }

    /// Tear down every agent and all director state.
    fn restart(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = initial_phase(&self.config);
        self.accumulator = 0.0;
        self.scheduler.reset();
        self.index_scratch.clear();
        self.neighbors.rebuild(&[]);
        self.bosses = BossCadence::new(self.config.boss.clone(), self.config.boss_variants.len());
        self.announced_wave = None;
        self.next_agent_id = 0;
        self.score = ScoreState::default();
        self.events.clear();
        info!(phase = ?self.phase, "session restarted");
    }

    /// Per-frame work: wave notifications and boss cadence.
    fn run_frame(&mut self) {
        let wave = self.wave();
        if self.announced_wave != Some(wave) {
            self.announced_wave = Some(wave);
            info!(wave, elapsed = self.time.elapsed_secs, "wave changed");
            self.events.push(DirectorEvent::WaveChanged { wave });
        }

        let ctx = BossSpawnContext {
            curve: self.scheduler.curve(),
            placement: self.scheduler.placement(),
            view: self.view.as_ref(),
            target: self.target.map(|t| t.position),
        };
        let env = SpawnEnv {
            profile: &self.steering,
            target: self.target.as_ref(),
            grid: &self.neighbors,
        };
        systems::boss::run(
            &mut self.world,
            &mut self.bosses,
            wave,
            &ctx,
            &self.config.boss_variants,
            &env,
            &mut self.next_agent_id,
            &mut self.score,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// One fixed physics step, in order.
    fn run_physics_step(&mut self) {
        self.time.advance_physics(PHYSICS_DT);
        let dt = PHYSICS_DT as f32;

        // 1. Neighbor index
        self.rebuild_index();

        // 2. Regular spawn loop
        let ctx = SpawnContext {
            now: self.time.physics_secs,
            wave: self.wave(),
            alive: systems::spawning::count_hostiles(&self.world),
            // Steps only run while Active; a frozen clock is the idle state.
            halted: false,
            view: self.view.as_ref(),
            target: self.target.map(|t| t.position),
            variant_count: self.config.enemy_variants.len(),
        };
        let env = SpawnEnv {
            profile: &self.steering,
            target: self.target.as_ref(),
            grid: &self.neighbors,
        };
        let status = systems::spawning::run(
            &mut self.world,
            &mut self.scheduler,
            &ctx,
            &self.config.enemy_variants,
            &env,
            &mut self.next_agent_id,
            &mut self.spawn_requests,
            &mut self.rng,
            &mut self.events,
        );
        trace!(step = self.time.physics_step, ?status, "spawn loop polled");

        // 3. Steering
        systems::steering::run(
            &mut self.world,
            &self.steering,
            self.target.as_ref(),
            &self.neighbors,
            dt,
            &mut self.rng,
        );
        // 4. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 5. View-edge bounce
        systems::bounds::run(&mut self.world, self.view.as_ref(), self.steering.padding);
        // 6. Touch contact
        systems::contact::run(
            &mut self.world,
            self.target.map(|t| t.position),
            self.config.contact.radius,
            &mut self.events,
            &mut self.kill_buffer,
        );
        // 7. Cleanup (deaths, boss release, despawn)
        self.run_cleanup();
    }

    fn rebuild_index(&mut self) {
        self.index_scratch.clear();
        self.index_scratch.extend(
            self.world
                .query::<(&Faction, &Position, Option<&Dead>)>()
                .iter()
                .filter(|(_, (.., dead))| dead.is_none())
                .map(|(entity, (faction, pos, _))| IndexedAgent {
                    entity,
                    faction: *faction,
                    position: pos.as_vec2(),
                }),
        );
        self.neighbors.rebuild(&self.index_scratch);
        trace!(
            agents = self.neighbors.len(),
            cells = self.neighbors.occupied_cells(),
            "neighbor index rebuilt"
        );
    }

    fn run_cleanup(&mut self) {
        let rules = ScoreRules {
            awarding: self.phase == GamePhase::Active,
            score_per_kill: self.config.session.score_per_kill,
        };
        systems::cleanup::run(
            &mut self.world,
            &mut self.bosses,
            &mut self.score,
            rules,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }

    fn snapshot(&mut self) -> ArenaSnapshot {
        let events = std::mem::take(&mut self.events);
        let session = SessionView {
            time: self.time,
            phase: self.phase,
            wave: self.wave(),
            time_scale: self.time_scale,
            score: &self.score,
            active_boss: self.bosses.active_boss(),
        };
        systems::snapshot::build_snapshot(&self.world, &session, events)
    }
}

fn initial_phase(config: &DirectorConfig) -> GamePhase {
    if config.session.pause_until_start {
        GamePhase::StartScreen
    } else {
        GamePhase::Active
    }
}

/// Clamp to `[0, MAX_TIME_SCALE]`; non-finite scales are rejected.
fn clamp_time_scale(scale: f64) -> Option<f64> {
    scale.is_finite().then(|| scale.clamp(0.0, MAX_TIME_SCALE))
}

/// Negative or non-finite frame times count as zero; long hitches are capped.
fn sanitize_frame_dt(frame_dt: f64) -> f64 {
    if frame_dt.is_finite() {
        frame_dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
