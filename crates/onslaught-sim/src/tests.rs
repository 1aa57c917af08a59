//! Tests for the arena engine, spawn pipeline, steering systems and neighbor index.

use std::collections::HashMap;

use glam::Vec2;
use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use onslaught_core::commands::SessionCommand;
use onslaught_core::components::{AgentId, MoveSpeed};
use onslaught_core::config::{DirectorConfig, VariantSpec};
use onslaught_core::constants::*;
use onslaught_core::enums::*;
use onslaught_core::events::DirectorEvent;
use onslaught_core::state::ArenaSnapshot;
use onslaught_core::types::{Position, Velocity, ViewRect};
use onslaught_director::{BossSpawnPlan, DifficultyCurve};

use crate::engine::{ArenaEngine, SimConfig};
use crate::spatial::{IndexedAgent, NeighborhoodIndex, UniformGrid};
use crate::world_setup::AgentTemplate;

const FRAME: f64 = 1.0 / 60.0;

fn arena_view() -> ViewRect {
    ViewRect::new(Position::new(0.0, 0.0), 9.0, 5.0)
}

fn engine_with(seed: u64, director: DirectorConfig) -> ArenaEngine {
    let mut engine = ArenaEngine::new(SimConfig {
        seed,
        director,
        ..Default::default()
    });
    engine.queue_commands([
        SessionCommand::SetView { view: arena_view() },
        SessionCommand::SetTarget {
            position: Position::new(0.0, 0.0),
            velocity: Some(Velocity::new(0.0, 0.0)),
        },
        SessionCommand::StartGame,
    ]);
    engine
}

fn started_engine(seed: u64) -> ArenaEngine {
    engine_with(seed, DirectorConfig::default())
}

/// Config with short waves so bosses arrive quickly.
fn fast_waves() -> DirectorConfig {
    let mut config = DirectorConfig::default();
    config.waves.duration_secs = 2.0;
    config
}

fn run_frames(engine: &mut ArenaEngine, frames: usize) -> Vec<ArenaSnapshot> {
    (0..frames).map(|_| engine.advance(FRAME)).collect()
}

fn all_events(snaps: &[ArenaSnapshot]) -> Vec<DirectorEvent> {
    snaps.iter().flat_map(|s| s.events.iter().cloned()).collect()
}

fn boss_spawns(events: &[DirectorEvent]) -> Vec<(u32, i32, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            DirectorEvent::BossSpawned {
                ordinal, hp, label, ..
            } => Some((*ordinal, *hp, label.clone())),
            _ => None,
        })
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with(12345, fast_waves());
    let mut engine_b = engine_with(12345, fast_waves());

    for _ in 0..900 {
        let json_a = serde_json::to_string(&engine_a.advance(FRAME)).unwrap();
        let json_b = serde_json::to_string(&engine_b.advance(FRAME)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = started_engine(111);
    let mut engine_b = started_engine(222);

    let mut diverged = false;
    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.advance(FRAME)).unwrap();
        let json_b = serde_json::to_string(&engine_b.advance(FRAME)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Session lifecycle ----

#[test]
fn test_start_screen_is_frozen() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.queue_command(SessionCommand::SetView { view: arena_view() });
    let snaps = run_frames(&mut engine, 300);
    let last = snaps.last().unwrap();
    assert_eq!(last.phase, GamePhase::StartScreen);
    assert_eq!(last.time.elapsed_secs, 0.0);
    assert!(last.agents.is_empty());
    assert!(all_events(&snaps).is_empty(), "nothing happens before start");
}

#[test]
fn test_no_pause_until_start_runs_immediately() {
    let mut config = DirectorConfig::default();
    config.session.pause_until_start = false;
    let mut engine = ArenaEngine::new(SimConfig {
        director: config,
        ..Default::default()
    });
    let snap = engine.advance(FRAME);
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.time.elapsed_secs > 0.0);
}

#[test]
fn test_wave_changed_events_in_order() {
    let mut config = DirectorConfig::default();
    config.waves.duration_secs = 1.0;
    let mut engine = engine_with(1, config);

    let snaps = run_frames(&mut engine, 150);
    assert!(
        snaps[0].events.contains(&DirectorEvent::WaveChanged { wave: 1 }),
        "wave 1 announced on the first frame"
    );
    let waves: Vec<u32> = all_events(&snaps)
        .iter()
        .filter_map(|e| match e {
            DirectorEvent::WaveChanged { wave } => Some(*wave),
            _ => None,
        })
        .collect();
    assert_eq!(waves, vec![1, 2, 3]);
    assert_eq!(snaps.last().unwrap().wave, 3);
}

#[test]
fn test_pause_preserves_timers() {
    let mut engine = started_engine(7);
    run_frames(&mut engine, 200);
    let before = engine.advance(FRAME);
    let wake = engine.next_spawn_wake();
    assert!(wake.is_some(), "spawn loop should be sleeping");

    engine.queue_command(SessionCommand::Pause);
    let snaps = run_frames(&mut engine, 300);
    let paused = snaps.last().unwrap();
    assert_eq!(paused.phase, GamePhase::Paused);
    assert_eq!(paused.time, before.time, "no time passes while paused");
    assert_eq!(engine.next_spawn_wake(), wake, "pending wait untouched");
    assert_eq!(
        serde_json::to_string(&paused.agents).unwrap(),
        serde_json::to_string(&before.agents).unwrap(),
        "agents frozen in place"
    );

    engine.queue_command(SessionCommand::Resume);
    let resumed = engine.advance(FRAME);
    assert_eq!(resumed.phase, GamePhase::Active);
    assert!(resumed.time.elapsed_secs > before.time.elapsed_secs);
}

#[test]
fn test_time_scale_zero_freezes_and_clamps() {
    let mut engine = started_engine(8);
    run_frames(&mut engine, 30);

    engine.queue_command(SessionCommand::SetTimeScale { scale: 0.0 });
    let frozen_at = engine.advance(FRAME).time;
    let later = run_frames(&mut engine, 60);
    assert_eq!(later.last().unwrap().time, frozen_at);

    engine.queue_command(SessionCommand::SetTimeScale { scale: 100.0 });
    let snap = engine.advance(FRAME);
    assert_eq!(snap.time_scale, MAX_TIME_SCALE);

    engine.queue_command(SessionCommand::SetTimeScale { scale: -3.0 });
    assert_eq!(engine.advance(FRAME).time_scale, 0.0);

    engine.queue_command(SessionCommand::SetTimeScale { scale: f64::NAN });
    assert_eq!(engine.advance(FRAME).time_scale, 0.0, "NaN ignored");
}

#[test]
fn test_long_frames_are_capped() {
    let mut engine = started_engine(9);
    let snap = engine.advance(10.0);
    assert!((snap.time.elapsed_secs - MAX_FRAME_DT).abs() < 1e-9);
    let steps = (MAX_FRAME_DT / PHYSICS_DT).floor() as u64;
    assert!(snap.time.physics_step == steps || snap.time.physics_step == steps + 1);
}

#[test]
fn test_game_over_stops_everything() {
    let mut engine = started_engine(10);
    run_frames(&mut engine, 300);
    engine.queue_command(SessionCommand::GameOver);
    let over = engine.advance(FRAME);
    assert_eq!(over.phase, GamePhase::GameOver);

    let snaps = run_frames(&mut engine, 300);
    assert_eq!(snaps.last().unwrap().time, over.time);
    assert!(all_events(&snaps).is_empty());

    // StartGame does not leave game over; only a restart does.
    engine.queue_command(SessionCommand::StartGame);
    assert_eq!(engine.advance(FRAME).phase, GamePhase::GameOver);
}

#[test]
fn test_restart_tears_down_session() {
    let mut engine = engine_with(11, fast_waves());
    run_frames(&mut engine, 60 * 5);
    assert!(!engine.advance(FRAME).agents.is_empty());

    engine.queue_command(SessionCommand::Restart);
    let snap = engine.advance(FRAME);
    assert_eq!(snap.phase, GamePhase::StartScreen);
    assert!(snap.agents.is_empty());
    assert!(snap.boss.is_none());
    assert_eq!(snap.time.elapsed_secs, 0.0);
    assert_eq!(snap.score.score, 0);
    assert_eq!(snap.score.bosses_spawned, 0);
    assert!(engine.active_boss().is_none());
    assert_eq!(engine.next_spawn_wake(), None);

    engine.queue_command(SessionCommand::StartGame);
    let first = engine.advance(FRAME);
    assert!(first.events.contains(&DirectorEvent::WaveChanged { wave: 1 }));
}

// ---- Spawning ----

#[test]
fn test_regular_spawns_arrive_and_stay_safe() {
    let mut engine = started_engine(12);
    let snaps = run_frames(&mut engine, 60 * 4);
    let spawned: Vec<_> = all_events(&snaps)
        .into_iter()
        .filter_map(|e| match e {
            DirectorEvent::AgentSpawned { position, variant, .. } => Some((position, variant)),
            _ => None,
        })
        .collect();
    assert!(!spawned.is_empty(), "agents spawn within the first seconds");
    let safe = NO_SPAWN_RADIUS + EXTRA_SAFE_DISTANCE;
    for (position, variant) in &spawned {
        assert!(position.as_vec2().length() >= safe, "spawned at {position:?}");
        assert_eq!(variant, "enemy_01", "wave 1 uses the first skin");
    }
}

#[test]
fn test_alive_cap_respected() {
    let config = fast_waves();
    let curve = DifficultyCurve::from_config(&config);
    let mut engine = engine_with(13, config);
    for snap in run_frames(&mut engine, 60 * 12) {
        let cap = curve.max_alive(snap.wave) as usize;
        // The boss spawns on its own cadence and may be the one over the cap.
        assert!(
            snap.agents.len() <= cap + 1,
            "{} agents over cap {cap} on wave {}",
            snap.agents.len(),
            snap.wave
        );
    }
}

#[test]
fn test_no_view_stalls_spawning() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.queue_command(SessionCommand::StartGame);
    let snaps = run_frames(&mut engine, 60 * 5);
    assert!(snaps.last().unwrap().agents.is_empty(), "no view, no spawns");
    assert!(engine.next_spawn_wake().is_none());

    engine.queue_command(SessionCommand::SetView { view: arena_view() });
    let snaps = run_frames(&mut engine, 60 * 4);
    assert!(!snaps.last().unwrap().agents.is_empty(), "spawning resumes");
}

#[test]
fn test_no_variants_never_spawns() {
    let mut config = DirectorConfig::default();
    config.enemy_variants.clear();
    config.boss_variants.clear();
    config.waves.duration_secs = 1.0;
    let mut engine = engine_with(14, config);
    let snaps = run_frames(&mut engine, 60 * 8);
    assert!(snaps.iter().all(|s| s.agents.is_empty()));
}

// ---- Bosses ----

#[test]
fn test_no_boss_before_wave_three_and_only_one() {
    let mut engine = engine_with(15, fast_waves());
    let wave_three_start = 2.0 * 2.0;

    let mut boss_events = 0;
    for snap in run_frames(&mut engine, 60 * 6) {
        let spawned = boss_spawns(&snap.events);
        if !spawned.is_empty() {
            assert!(
                snap.time.elapsed_secs >= wave_three_start,
                "boss spawned at {} before wave 3",
                snap.time.elapsed_secs
            );
            assert_eq!(snap.wave, 3);
        }
        boss_events += spawned.len();
        let bosses = snap.agents.iter().filter(|a| a.kind == AgentKind::Boss).count();
        assert!(bosses <= 1, "{bosses} bosses alive at once");
    }
    assert_eq!(boss_events, 1, "exactly one boss during wave 3");

    let snap = engine.advance(FRAME);
    let boss = snap.boss.expect("boss view present");
    assert_eq!(boss.ordinal, 1);
    assert_eq!(boss.hp, BOSS_BASE_HP);
    assert_eq!(boss.max_hp, BOSS_BASE_HP);
    assert_eq!(boss.label, "BOSS_1_HP_30");
}

#[test]
fn test_boss_kill_scores_and_next_boss_is_stronger() {
    let mut engine = engine_with(16, fast_waves());
    run_frames(&mut engine, 60 * 5);
    let boss = engine.advance(FRAME).boss.expect("boss alive in wave 3");

    engine.queue_command(SessionCommand::KillAgent {
        agent: boss.id,
        award_score: true,
    });
    let snap = engine.advance(FRAME);
    assert!(snap.boss.is_none());
    assert!(snap.events.contains(&DirectorEvent::BossDefeated {
        agent: boss.id,
        ordinal: 1
    }));
    assert!(snap.events.contains(&DirectorEvent::AgentKilled {
        agent: boss.id,
        kind: AgentKind::Boss,
        score_awarded: BOSS_SCORE_VALUE,
    }));
    assert!(snap.events.iter().any(|e| matches!(
        e,
        DirectorEvent::DeathEffect { effect, scale, .. }
            if effect == "fx_boss_death" && (*scale - BOSS_DEATH_FX_SCALE).abs() < 1e-6
    )));
    assert_eq!(snap.score.score, BOSS_SCORE_VALUE);
    assert_eq!(snap.score.bosses_defeated, 1);

    // Waves 4 and 5 have no boss; wave 6 brings the second one.
    let snaps = run_frames(&mut engine, 60 * 7);
    let spawned = boss_spawns(&all_events(&snaps));
    assert_eq!(spawned, vec![(2, 40, "BOSS_2_HP_40".to_string())]);
}

#[test]
fn test_living_boss_blocks_next_boss_wave() {
    let mut engine = engine_with(17, fast_waves());
    let snaps = run_frames(&mut engine, 60 * 13);
    let spawned = boss_spawns(&all_events(&snaps));
    assert_eq!(spawned.len(), 1, "wave 6 skipped while boss 1 lives");
    assert!(snaps.last().unwrap().wave >= 6);
}

// ---- Health & contact ----

#[test]
fn test_damage_floor_kills_one_hp_agent() {
    let mut engine = started_engine(18);
    run_frames(&mut engine, 60 * 3);
    let agent = engine.advance(FRAME).agents[0].id;

    engine.queue_command(SessionCommand::DamageAgent { agent, amount: 0 });
    let snap = engine.advance(FRAME);
    assert!(snap.events.contains(&DirectorEvent::AgentKilled {
        agent,
        kind: AgentKind::Regular,
        score_awarded: AGENT_SCORE_VALUE * SCORE_PER_KILL,
    }));
    assert!(snap.events.iter().any(|e| matches!(
        e,
        DirectorEvent::DeathEffect { effect, .. } if effect == "fx_enemy_death"
    )));
    assert!(snap.agents.iter().all(|a| a.id != agent));
    assert_eq!(snap.score.kills, 1);

    // Unknown or already-dead ids are ignored.
    engine.queue_command(SessionCommand::KillAgent {
        agent,
        award_score: true,
    });
    engine.queue_command(SessionCommand::DamageAgent {
        agent: AgentId(9999),
        amount: 5,
    });
    let snap = engine.advance(FRAME);
    assert_eq!(snap.score.kills, 1);
}

#[test]
fn test_kill_while_paused_awards_nothing() {
    let mut engine = started_engine(19);
    run_frames(&mut engine, 60 * 3);
    let agent = engine.advance(FRAME).agents[0].id;

    engine.queue_commands([
        SessionCommand::Pause,
        SessionCommand::KillAgent {
            agent,
            award_score: true,
        },
    ]);
    let snap = engine.advance(FRAME);
    assert!(snap.events.contains(&DirectorEvent::AgentKilled {
        agent,
        kind: AgentKind::Regular,
        score_awarded: 0,
    }));
    assert_eq!(snap.score.score, 0);
}

#[test]
fn test_contact_fires_once_per_entry() {
    let mut config = DirectorConfig::default();
    config.contact.radius = 100.0;
    let mut engine = engine_with(20, config);
    let events = all_events(&run_frames(&mut engine, 60 * 6));

    let spawned: Vec<AgentId> = events
        .iter()
        .filter_map(|e| match e {
            DirectorEvent::AgentSpawned { agent, .. } => Some(*agent),
            _ => None,
        })
        .collect();
    assert!(!spawned.is_empty());
    for id in spawned {
        let contacts = events
            .iter()
            .filter(|e| matches!(e, DirectorEvent::PlayerContact { agent, .. } if *agent == id))
            .count();
        assert_eq!(contacts, 1, "agent {id:?} contacted {contacts} times");
    }
}

#[test]
fn test_destroy_on_touch_awards_no_score() {
    let mut config = DirectorConfig::default();
    config.contact.radius = 100.0;
    for variant in &mut config.enemy_variants {
        variant.destroy_on_touch = true;
    }
    let mut engine = engine_with(21, config);
    let snaps = run_frames(&mut engine, 60 * 4);
    let events = all_events(&snaps);

    let contacts = events
        .iter()
        .filter(|e| matches!(e, DirectorEvent::PlayerContact { damage, .. } if *damage == AGENT_TOUCH_DAMAGE))
        .count();
    let self_destructs = events
        .iter()
        .filter(|e| matches!(e, DirectorEvent::AgentKilled { score_awarded: 0, .. }))
        .count();
    assert!(contacts > 0);
    assert_eq!(contacts, self_destructs);
    assert_eq!(snaps.last().unwrap().score.score, 0);
    assert_eq!(snaps.last().unwrap().score.kills, 0);
}

// ---- Steering in the world ----

#[test]
fn test_agents_stay_inside_padded_view() {
    let mut engine = engine_with(22, fast_waves());
    let bounds = arena_view().bounds(SCREEN_PADDING);
    for snap in run_frames(&mut engine, 60 * 8) {
        for agent in &snap.agents {
            let p = agent.position;
            assert!(
                p.x >= bounds.left - 1e-4
                    && p.x <= bounds.right + 1e-4
                    && p.y >= bounds.bottom - 1e-4
                    && p.y <= bounds.top + 1e-4,
                "agent {:?} escaped to {p:?}",
                agent.id
            );
        }
    }
}

#[test]
fn test_headings_never_collapse() {
    let mut config = fast_waves();
    config.steering.chase_strength = 0.0;
    config.steering.wander_strength = 0.0;
    config.steering.separation_strength = 0.0;
    let mut engine = engine_with(23, config);
    let mut seen = 0;
    for snap in run_frames(&mut engine, 60 * 6) {
        for agent in &snap.agents {
            seen += 1;
            assert!((agent.current_heading.length() - 1.0).abs() < 1e-3);
            assert!((agent.desired_heading.length() - 1.0).abs() < 1e-3);
        }
    }
    assert!(seen > 0);
}

#[test]
fn test_agents_close_in_on_target() {
    let mut config = DirectorConfig::default();
    config.steering.wander_strength = 0.0;
    config.steering.separation_strength = 0.0;
    let mut engine = engine_with(24, config);

    run_frames(&mut engine, 60 * 3);
    let snap = engine.advance(FRAME);
    let agent = snap.agents[0].clone();
    let start = agent.position.as_vec2().length();

    let later = run_frames(&mut engine, 30);
    let now = later
        .last()
        .unwrap()
        .agents
        .iter()
        .find(|a| a.id == agent.id)
        .map(|a| a.position.as_vec2().length())
        .unwrap();
    assert!(now < start, "agent should approach the target: {start} -> {now}");
}

#[test]
fn test_speed_multiplier_fixed_at_spawn() {
    let mut config = fast_waves();
    config.boss.every_n_waves = 0;
    let curve = DifficultyCurve::from_config(&config);
    let mut engine = engine_with(25, config);

    let mut spawn_wave: HashMap<AgentId, u32> = HashMap::new();
    let mut grown = 0;
    for snap in run_frames(&mut engine, 60 * 12) {
        for event in &snap.events {
            if let DirectorEvent::AgentSpawned { agent, .. } = event {
                spawn_wave.insert(*agent, snap.wave);
            }
        }
        for (_, (id, speed, vel)) in engine
            .world()
            .query::<(&AgentId, &MoveSpeed, &Velocity)>()
            .iter()
        {
            let wave = spawn_wave[id];
            assert_eq!(
                speed.multiplier,
                curve.speed_multiplier(wave),
                "agent {id:?} from wave {wave} changed speed on wave {}",
                snap.wave
            );
            let expected = speed.base * speed.multiplier;
            assert!(
                (vel.as_vec2().length() - expected).abs() < 1e-3 * expected.max(1.0),
                "agent {id:?} moves at {} instead of {expected}",
                vel.as_vec2().length()
            );
            if speed.multiplier > 1.0 && snap.wave > wave {
                grown += 1;
            }
        }
    }
    assert!(
        grown > 0,
        "some later-wave agent should be checked after a further wave began"
    );
}

#[test]
fn test_restart_clears_neighbor_index() {
    let mut config = fast_waves();
    config.boss.every_n_waves = 1;
    let mut engine = engine_with(26, config);
    run_frames(&mut engine, 60 * 3);
    assert!(!engine.neighbors().is_empty());

    engine.queue_command(SessionCommand::Restart);
    engine.advance(FRAME);
    assert!(engine.neighbors().is_empty());
    assert_eq!(engine.neighbors().occupied_cells(), 0);

    // The first boss after restart spawns on the frame clock, before any physics step.
    engine.queue_command(SessionCommand::StartGame);
    let snap = engine.advance(FRAME);
    assert_eq!(boss_spawns(&snap.events).len(), 1);
}

// ---- Factories ----

#[test]
fn test_boss_template_uses_override_with_floor() {
    let plan = BossSpawnPlan {
        wave: 3,
        ordinal: 2,
        variant: 1,
        position: Vec2::new(4.0, 0.0),
        hp: 40,
        score_value: 25,
        speed_multiplier: 1.2,
        label: "BOSS_2_HP_40".into(),
        death_effect: Some(onslaught_core::config::DeathEffectOverride {
            effect: "fx_big".into(),
            offset: Vec2::new(0.0, 0.5),
            scale: -2.0,
        }),
    };
    let spec = VariantSpec::named("boss_b");
    let template = AgentTemplate::boss(AgentId(5), &plan, &spec);
    assert_eq!(template.kind, AgentKind::Boss);
    assert_eq!(template.hp, 40);
    assert_eq!(template.death.effect.as_deref(), Some("fx_big"));
    assert_eq!(template.death.scale, MIN_DEATH_FX_SCALE);
    assert_eq!(template.boss.as_ref().map(|b| b.ordinal), Some(2));

    let plain = BossSpawnPlan {
        death_effect: None,
        ..plan
    };
    let template = AgentTemplate::boss(AgentId(6), &plain, &spec);
    assert_eq!(template.death.effect, spec.death_effect);
    assert_eq!(template.death.scale, 1.0);
}

#[test]
fn test_regular_template_floors_hp() {
    let spec = VariantSpec {
        hp: 0,
        ..VariantSpec::named("glass")
    };
    let template = AgentTemplate::regular(AgentId(1), 0, &spec, 1.0);
    assert_eq!(template.hp, 1);
    assert_eq!(template.kind, AgentKind::Regular);
    assert!(template.boss.is_none());
}

// ---- Neighbor index ----

#[test]
fn test_grid_matches_brute_force() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let agents: Vec<IndexedAgent> = (0..200)
        .map(|i| IndexedAgent {
            entity: world.spawn((i,)),
            faction: Faction::Hostile,
            position: Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-6.0..6.0)),
        })
        .collect();

    let mut grid = UniformGrid::new(SEPARATION_RADIUS);
    grid.rebuild(&agents);
    assert_eq!(grid.len(), agents.len());

    for probe in agents.iter().step_by(7) {
        let mut found = Vec::new();
        grid.neighbors_within(probe.position, 1.3, Faction::Hostile, &mut |a: &IndexedAgent| {
            found.push(a.entity)
        });
        let mut expected: Vec<_> = agents
            .iter()
            .filter(|a| a.position.distance(probe.position) <= 1.3)
            .map(|a| a.entity)
            .collect();
        found.sort();
        expected.sort();
        assert_eq!(found, expected);
    }
}

#[test]
fn test_grid_excludes_self_and_handles_degenerate_cells() {
    let mut world = World::new();
    let me = world.spawn((0,));
    let other = world.spawn((1,));
    let agents = [
        IndexedAgent {
            entity: me,
            faction: Faction::Hostile,
            position: Vec2::ZERO,
        },
        IndexedAgent {
            entity: other,
            faction: Faction::Hostile,
            position: Vec2::new(0.3, 0.0),
        },
    ];
    // Zero cell size falls back to unit cells: both agents share one.
    let mut grid = UniformGrid::new(0.0);
    grid.rebuild(&agents);
    assert_eq!(grid.occupied_cells(), 1);

    let mut out = Vec::new();
    grid.neighbor_positions(Vec2::ZERO, 0.55, Faction::Hostile, Some(me), &mut out);
    assert_eq!(out, vec![Vec2::new(0.3, 0.0)]);

    grid.rebuild(&[]);
    assert!(grid.is_empty());
    assert_eq!(grid.occupied_cells(), 0);
    grid.neighbor_positions(Vec2::ZERO, 0.55, Faction::Hostile, None, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_grid_drops_cells_left_behind() {
    let mut world = World::new();
    let runner = world.spawn((0,));
    let mut grid = UniformGrid::new(SEPARATION_RADIUS);

    for step in 0..10_000 {
        let agent = IndexedAgent {
            entity: runner,
            faction: Faction::Hostile,
            position: Vec2::new(step as f32 * 0.6, 0.0),
        };
        grid.rebuild(&[agent]);
        assert_eq!(grid.occupied_cells(), 1, "stale cells kept at step {step}");
    }

    let mut found = Vec::new();
    grid.neighbor_positions(Vec2::new(9_999.0 * 0.6, 0.0), 0.1, Faction::Hostile, None, &mut found);
    assert_eq!(found.len(), 1, "the moving agent is still found where it is now");
}
