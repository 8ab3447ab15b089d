//! Per-tick collision detection
//!
//! Broad phase only: anything whose box overlaps the ball's box is a contact.
//! With one paddle and a few dozen bricks a linear scan is all it takes.

use super::physics::{Contact, resolve_collision};
use super::state::GameState;

/// What a collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Entities the ball overlapped
    pub contacts: usize,
    /// Bricks in the overlap set (each was hit once)
    pub bricks_hit: u32,
    /// Points awarded
    pub points: u32,
}

/// Every live entity overlapping the ball, paddle first then bricks in layout order
pub fn find_contacts(state: &GameState) -> Vec<Contact> {
    let ball = state.ball.bounds();
    let mut contacts = Vec::new();

    let paddle = state.paddle.bounds();
    if paddle.overlaps(&ball) {
        contacts.push(Contact::Paddle { bounds: paddle });
    }

    contacts.extend(
        state
            .bricks
            .iter()
            .filter(|brick| brick.bounds().overlaps(&ball))
            .map(|brick| Contact::Brick {
                id: brick.id,
                bounds: brick.bounds(),
            }),
    );

    contacts
}

/// Find contacts, bounce the ball, hit every overlapped brick once and score it
pub fn check_collisions(state: &mut GameState, points_per_hit: u32) -> CollisionReport {
    let contacts = find_contacts(state);
    if contacts.is_empty() {
        return CollisionReport::default();
    }

    resolve_collision(&mut state.ball, &contacts);

    let mut bricks_hit = 0u32;
    for id in contacts.iter().filter_map(Contact::brick_id) {
        if state.hit_brick(id).is_some() {
            bricks_hit += 1;
        }
    }

    let points = points_per_hit.saturating_mul(bricks_hit);
    state.add_score(points);

    if bricks_hit > 0 {
        log::debug!(
            "Tick {}: {} contacts, {} bricks hit, score {}",
            state.time_ticks,
            contacts.len(),
            bricks_hit,
            state.score
        );
    }

    CollisionReport {
        contacts: contacts.len(),
        bricks_hit,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrickLayout, BrickRow, GameConfig};
    use crate::sim::state::{Direction, GameEvent, Sign};
    use glam::Vec2;

    fn single_row(hits: u8) -> GameConfig {
        GameConfig {
            layout: BrickLayout {
                rows: vec![BrickRow { y: 50.0, hits }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_contacts_in_open_space() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.ball.body.center = Vec2::new(300.0, 200.0);
        assert!(find_contacts(&state).is_empty());
        assert_eq!(check_collisions(&mut state, 10), CollisionReport::default());
    }

    #[test]
    fn test_carried_ball_does_not_touch_paddle() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        assert!(find_contacts(&state).is_empty());
    }

    #[test]
    fn test_paddle_contact() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.ball.body.center = Vec2::new(305.0, 315.0);
        let contacts = find_contacts(&state);
        assert_eq!(contacts.len(), 1);
        assert!(matches!(contacts[0], Contact::Paddle { .. }));
    }

    #[test]
    fn test_two_bricks_score_twenty() {
        let mut state = GameState::new(&single_row(1)).unwrap();
        // Straddle the seam between the first two bricks (x = 80)
        state.ball.body.center = Vec2::new(80.0, 65.0);
        state.ball.direction = Direction::new(Sign::Pos, Sign::Neg);
        let before = state.bricks.len();
        state.drain_events();

        let report = check_collisions(&mut state, 10);
        assert_eq!(report.contacts, 2);
        assert_eq!(report.bricks_hit, 2);
        assert_eq!(state.score, 20);
        assert_eq!(state.bricks.len(), before - 2);
        assert_eq!(state.ball.direction, Direction::new(Sign::Pos, Sign::Pos));
        assert!(state.drain_events().contains(&GameEvent::ScoreChanged { score: 20 }));
    }

    #[test]
    fn test_cracked_brick_stays_live() {
        let mut state = GameState::new(&single_row(2)).unwrap();
        state.ball.body.center = Vec2::new(42.5, 65.0);
        let id = state.bricks[0].id;

        let report = check_collisions(&mut state, 10);
        assert_eq!(report.bricks_hit, 1);
        assert_eq!(state.bricks[0].id, id);
        assert_eq!(state.bricks[0].hits(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_custom_points_per_hit() {
        let mut state = GameState::new(&single_row(3)).unwrap();
        state.ball.body.center = Vec2::new(42.5, 65.0);
        check_collisions(&mut state, 25);
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_huge_points_saturate_instead_of_overflowing() {
        let mut state = GameState::new(&single_row(1)).unwrap();
        state.ball.body.center = Vec2::new(80.0, 65.0);

        let report = check_collisions(&mut state, u32::MAX / 2 + 1);
        assert_eq!(report.bricks_hit, 2);
        assert_eq!(report.points, u32::MAX);
        assert_eq!(state.score, u32::MAX);
    }
}
