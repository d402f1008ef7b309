//! Per-frame simulation step
//!
//! Order matters and is part of the game's behaviour:
//! corridor, player, hazards, pickups, pickup collection, wall check,
//! hazard damage, defeat check, countdown. A terminal condition ends the tick
//! immediately.

use super::collision::{collect_pickup, hazard_contact};
use super::input::InputSampler;
use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// Advance the run by `dt` seconds.
///
/// Returns the remaining time when the countdown step was reached, `None` if
/// the run is already over or ended before the countdown this tick.
pub fn tick(state: &mut GameState, input: &mut InputSampler, dt: f32) -> Option<f32> {
    if state.is_over() {
        return None;
    }
    let dt = dt.max(0.0);
    state.time_elapsed += dt;

    state.corridor.advance(dt);
    state.player.update(dt, input, Some(&state.corridor));

    if let Some(hazard) = state.hazards.update(dt, Some(&state.corridor), &mut state.rng) {
        log::info!("First encounter: {}", hazard.kind.as_str());
        state.push_event(GameEvent::FirstEncounter(hazard));
    }
    state.pickups.update(dt, Some(&state.corridor), &mut state.rng);

    if let Some(item) = collect_pickup(&state.player, state.pickups.entities_mut()) {
        state.player.heal(item.heal);
        log::debug!("Collected {:?}, health {:.1}", item.kind, state.player.health);
        state.push_event(GameEvent::ItemCollected(item));
    }

    if state.player.check_wall_collision(Some(&state.corridor)) {
        end_run(state, Outcome::WallExit);
        return None;
    }

    if hazard_contact(&state.player, state.hazards.entities())
        && state.player.take_damage(state.tuning.hazard_damage)
    {
        state.hits_taken += 1;
        let health = state.player.health;
        log::debug!("Hit! health {:.1}", health);
        state.push_event(GameEvent::DamageTaken {
            health,
            first: state.hits_taken == 1,
        });
    }

    if state.player.health <= 0.0 {
        end_run(state, Outcome::Defeated);
        return None;
    }

    state.time_remaining = (state.time_remaining - dt).max(0.0);
    if state.time_remaining <= 0.0 {
        end_run(state, Outcome::Victory);
    }
    Some(state.time_remaining)
}

fn end_run(state: &mut GameState, outcome: Outcome) {
    state.phase = GamePhase::Over(outcome);
    log::info!(
        "Run over: {:?} after {:.2}s ({} hits)",
        outcome,
        state.time_elapsed,
        state.hits_taken
    );
    state.push_event(match outcome {
        Outcome::WallExit => GameEvent::WallExit,
        Outcome::Defeated => GameEvent::Defeated,
        Outcome::Victory => GameEvent::TimeExpired,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{HAZARD_CATALOG, PICKUP_CATALOG};
    use crate::sim::input::PointerTarget;
    use crate::sim::spawner::Entity;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state() -> (GameState, InputSampler) {
        (GameState::new(Tuning::default(), 12345), InputSampler::new())
    }

    fn hazard_on_player(state: &mut GameState) {
        let pos = state.player.pos;
        state.hazards.entities_mut().push(Entity {
            id: 999,
            pos,
            def: HAZARD_CATALOG[1],
        });
    }

    #[test]
    fn test_survive_full_run_is_victory() {
        let (mut state, mut input) = new_state();
        let mut reported = Vec::new();
        for _ in 0..80 {
            // Keep hazards away so only the clock matters
            state.hazards.entities_mut().clear();
            if let Some(t) = tick(&mut state, &mut input, 0.5) {
                reported.push(t);
            }
        }
        assert_eq!(state.outcome(), Some(Outcome::Victory));
        assert_eq!(reported.len(), 80);
        assert_eq!(*reported.last().unwrap(), 0.0);
        assert!(reported.iter().all(|t| *t >= 0.0));
        assert!(state.events().contains(&GameEvent::TimeExpired));

        // Further ticks are ignored
        assert_eq!(tick(&mut state, &mut input, 1.0), None);
        assert_eq!(state.time_remaining(), 0.0);
    }

    #[test]
    fn test_victory_at_sixty_hz() {
        let (mut state, mut input) = new_state();
        let dt = 1.0 / 60.0;
        let mut ticks = 0;
        let mut last = None;
        while !state.is_over() && ticks < 3000 {
            state.hazards.entities_mut().clear();
            last = tick(&mut state, &mut input, dt);
            ticks += 1;
        }
        // f32 rounding leaves a sliver of time after 2400 steps
        assert_eq!(ticks, 2401);
        assert_eq!(state.outcome(), Some(Outcome::Victory));
        assert_eq!(last, Some(0.0));
        assert!((state.time_elapsed() - 40.0).abs() < 0.05);
    }

    #[test]
    fn test_first_tick_reports_first_encounter() {
        let (mut state, mut input) = new_state();
        tick(&mut state, &mut input, 0.0);
        let events = state.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::FirstEncounter(_)]));
        assert_eq!(state.hazards.entities().len(), 1);
        assert_eq!(state.pickups.entities().len(), 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_each_hazard_kind_announced_once() {
        let (mut state, mut input) = new_state();
        for _ in 0..600 {
            state.hazards.entities_mut().clear();
            state.player.pos = crate::player_start();
            state.player.pos.x = state.corridor.bounds_at(state.player.pos.y).center;
            tick(&mut state, &mut input, 0.05);
        }
        let mut announced: Vec<_> = state
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::FirstEncounter(h) => Some(h.kind),
                _ => None,
            })
            .collect();
        let total = announced.len();
        announced.sort();
        announced.dedup();
        assert_eq!(announced.len(), total);
        assert_eq!(total, HAZARD_CATALOG.len());
    }

    #[test]
    fn test_hazard_damage_then_invulnerable() {
        let (mut state, mut input) = new_state();
        hazard_on_player(&mut state);
        tick(&mut state, &mut input, 0.016);
        assert_eq!(state.player.health, 2.5);
        assert_eq!(state.player.invulnerable_time, 2.0);
        assert!(state.events().contains(&GameEvent::DamageTaken {
            health: 2.5,
            first: true
        }));

        hazard_on_player(&mut state);
        tick(&mut state, &mut input, 0.1);
        assert_eq!(state.player.health, 2.5);
        assert_eq!(state.hits_taken(), 1);
    }

    #[test]
    fn test_overlapping_hazards_damage_once() {
        let (mut state, mut input) = new_state();
        hazard_on_player(&mut state);
        hazard_on_player(&mut state);
        hazard_on_player(&mut state);
        tick(&mut state, &mut input, 0.016);
        assert_eq!(state.player.health, 2.5);
        // Hazards survive contact
        assert!(state.hazards.entities().iter().filter(|h| h.id == 999).count() == 3);
    }

    #[test]
    fn test_second_hit_is_not_first() {
        let (mut state, mut input) = new_state();
        hazard_on_player(&mut state);
        tick(&mut state, &mut input, 0.016);
        state.player.invulnerable_time = 0.0;
        state.hazards.entities_mut().clear();
        hazard_on_player(&mut state);
        state.drain_events();
        tick(&mut state, &mut input, 0.016);
        assert!(state.events().contains(&GameEvent::DamageTaken {
            health: 2.0,
            first: false
        }));
    }

    #[test]
    fn test_last_hit_is_defeat_without_countdown() {
        let (mut state, mut input) = new_state();
        state.player.health = 0.5;
        hazard_on_player(&mut state);
        let before = state.time_remaining();
        assert_eq!(tick(&mut state, &mut input, 0.016), None);
        assert_eq!(state.outcome(), Some(Outcome::Defeated));
        assert_eq!(state.time_remaining(), before);
        assert_eq!(state.events().last(), Some(&GameEvent::Defeated));
    }

    #[test]
    fn test_pickup_heals_before_damage() {
        let (mut state, mut input) = new_state();
        state.player.health = 0.5;
        // Pickups spawn this tick too; use dt 0 so nothing moves
        let pos = state.player.pos;
        state.pickups.entities_mut().push(Entity {
            id: 500,
            pos,
            def: PICKUP_CATALOG[0],
        });
        hazard_on_player(&mut state);
        tick(&mut state, &mut input, 0.0);
        // Healed to 1.5 first, then hit for 0.5
        assert_eq!(state.player.health, 1.0);
        assert!(!state.is_over());
        assert!(state.events().contains(&GameEvent::ItemCollected(PICKUP_CATALOG[0])));
        assert!(state.pickups.entities().iter().all(|p| p.id != 500));
    }

    #[test]
    fn test_wall_exit_short_circuits() {
        let (mut state, mut input) = new_state();
        hazard_on_player(&mut state);
        input.drag_start(Vec2::ZERO, PointerTarget::Playfield);
        input.drag_move(Vec2::new(-1000.0, 0.0));
        assert_eq!(tick(&mut state, &mut input, 0.016), None);
        assert_eq!(state.outcome(), Some(Outcome::WallExit));
        // Damage step never ran
        assert_eq!(state.player.health, 3.0);
        assert_eq!(state.events().last(), Some(&GameEvent::WallExit));
    }

    #[test]
    fn test_negative_dt_is_treated_as_zero() {
        let (mut state, mut input) = new_state();
        assert_eq!(tick(&mut state, &mut input, -1.0), Some(40.0));
        assert_eq!(state.corridor.world_distance(), 0.0);
    }
}
