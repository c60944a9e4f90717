use super::{EXTRA_FULL_TURNS, FULL_TURN_DEG, MIN_FULL_TURNS, SPIN_DURATION_MS};
use rand::Rng;
use sortition::pool::DrawPool;
use sortition::roster::{Roster, Row};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Phase {
    Idle,
    Spinning,
    Result,
}

/// Identifies one spin, so a reveal scheduled for it can never act on a
/// later spin or on a presenter that moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    pub value: u32,
    pub target_deg: f64,
    pub token: SpinToken,
}

/// The draw state machine. Owns the pool, the rotation accumulator and the
/// current selection; the rendering layer only ever borrows it.
pub struct Presenter {
    pool: DrawPool,
    roster: Option<Roster>,
    phase: Phase,
    rotation_deg: f64,
    pending: Option<u32>,
    selection: Option<u32>,
    spins: u64,
}

impl Presenter {
    pub fn with_pool(pool: DrawPool) -> Self {
        Self {
            pool,
            roster: None,
            phase: Phase::Idle,
            rotation_deg: 0.0,
            pending: None,
            selection: None,
            spins: 0,
        }
    }

    pub fn with_roster(roster: Roster) -> Self {
        let mut presenter = Self::with_pool(DrawPool::new(roster.len() as u32));
        presenter.roster = Some(roster);
        presenter
    }

    /// A presenter waiting for remote data: empty pool, trigger disabled.
    pub fn unloaded() -> Self {
        Self::with_pool(DrawPool::unloaded())
    }

    /// Sizes the pool to a roster that just arrived. The roster comes in
    /// once at startup; anything after that is ignored.
    pub fn attach_roster(&mut self, roster: Roster) {
        if self.pool.capacity() != 0 {
            return;
        }
        self.pool = DrawPool::new(roster.len() as u32);
        self.roster = Some(roster);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn can_spin(&self) -> bool {
        self.phase != Phase::Spinning && !self.pool.is_empty()
    }

    pub fn selection(&self) -> Option<u32> {
        self.selection
    }

    /// The roster row bound to the current selection, if any. A missing row
    /// just means the detail fields are omitted from display.
    pub fn selected_row(&self) -> Option<&Row> {
        self.roster.as_ref()?.row(self.selection?)
    }

    /// Draws immediately, accumulates the rotation target and enters
    /// `Spinning`. Returns `None` without touching anything when a spin is
    /// already in flight or the pool is empty.
    pub fn begin_spin(&mut self, rng: &mut impl Rng) -> Option<SpinTicket> {
        if !self.can_spin() {
            return None;
        }
        let value = self.pool.draw(rng).ok()?;

        self.rotation_deg += spin_amount(value, self.pool.capacity(), rng);
        self.spins += 1;
        self.phase = Phase::Spinning;
        self.pending = Some(value);
        self.selection = None;

        Some(SpinTicket {
            value,
            target_deg: self.rotation_deg,
            token: SpinToken(self.spins),
        })
    }

    /// Promotes the pending draw to the current selection once the delay has
    /// elapsed. Stale tokens are a no-op.
    pub fn reveal(&mut self, token: SpinToken) -> Option<u32> {
        if self.phase != Phase::Spinning || token != SpinToken(self.spins) {
            return None;
        }
        let value = self.pending.take()?;
        self.selection = Some(value);
        self.phase = Phase::Result;
        Some(value)
    }
}

/// Forward rotation added by one spin: a randomized number of full turns
/// plus an offset proportional to the drawn value's share of the pool.
fn spin_amount(value: u32, capacity: u32, rng: &mut impl Rng) -> f64 {
    let turns = MIN_FULL_TURNS + rng.random_range(0.0..EXTRA_FULL_TURNS);
    let offset = f64::from(value) / f64::from(capacity.max(1));
    (turns + offset) * FULL_TURN_DEG
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

/// Eased wheel angle between the previous rotation and the spin target,
/// driven by frame-clock timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    from_deg: f64,
    to_deg: f64,
    started_us: Option<i64>,
    duration_us: i64,
}

impl SpinAnimation {
    pub fn new(from_deg: f64, to_deg: f64) -> Self {
        Self {
            from_deg,
            to_deg,
            started_us: None,
            duration_us: SPIN_DURATION_MS as i64 * 1000,
        }
    }

    /// Advances to the given timestamp and returns the current angle. The
    /// first call pins the start of the animation.
    pub fn advance(&mut self, frame_time_us: i64) -> f64 {
        let started = *self.started_us.get_or_insert(frame_time_us);
        let t = ((frame_time_us - started) as f64 / self.duration_us as f64).clamp(0.0, 1.0);
        self.from_deg + (self.to_deg - self.from_deg) * ease_out_cubic(t)
    }

    pub fn is_done(&self, frame_time_us: i64) -> bool {
        self.started_us
            .is_some_and(|started| frame_time_us - started >= self.duration_us)
    }

    pub fn target_deg(&self) -> f64 {
        self.to_deg
    }
}

/// Everything the draw function needs, shared between the component and the
/// cairo closure.
pub struct WheelState {
    pub presenter: Presenter,
    animation: Option<SpinAnimation>,
    current_deg: f64,
}

impl WheelState {
    pub fn new(presenter: Presenter) -> Self {
        let current_deg = presenter.rotation_deg();
        Self {
            presenter,
            animation: None,
            current_deg,
        }
    }

    /// Starts a spin and the matching animation from the wheel's current
    /// angle.
    pub fn begin_spin(&mut self, rng: &mut impl Rng) -> Option<SpinTicket> {
        let ticket = self.presenter.begin_spin(rng)?;
        self.animation = Some(SpinAnimation::new(self.current_deg, ticket.target_deg));
        Some(ticket)
    }

    /// Called from the frame clock; returns true while the wheel still needs
    /// redraws.
    pub fn tick(&mut self, frame_time_us: i64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        self.current_deg = animation.advance(frame_time_us);
        if animation.is_done(frame_time_us) {
            self.current_deg = animation.target_deg();
            self.animation = None;
            return false;
        }
        true
    }

    pub fn wheel_angle_deg(&self) -> f64 {
        self.current_deg
    }

    pub fn hub_label(&self) -> String {
        match self.presenter.phase() {
            Phase::Spinning => "...".to_string(),
            _ => self
                .presenter
                .selection()
                .map(|value| value.to_string())
                .unwrap_or_else(|| "?".to_string()),
        }
    }

    /// Lines rendered under the wheel once a result is showing. Detail
    /// fields without a backing row are simply left out.
    pub fn result_lines(&self) -> Vec<String> {
        let Some(value) = self.presenter.selection() else {
            return Vec::new();
        };
        let mut lines = vec![format!("Your lucky number: {}", value)];
        if let Some(row) = self.presenter.selected_row() {
            if let Some(prize) = row.prize() {
                lines.push(format!("Prize: {}", prize));
            }
            if let Some(entrant) = row.entrant() {
                lines.push(format!("Entrant: {}", entrant));
            }
        }
        lines
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.presenter.is_exhausted() {
            "All numbers drawn"
        } else {
            "Spin the wheel"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use sortition::roster::Row;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn spin_then_reveal_shows_the_drawn_value() {
        let mut presenter = Presenter::with_pool(DrawPool::new(3));
        let mut rng = rng(11);

        let ticket = presenter.begin_spin(&mut rng).unwrap();
        assert!((1..=3).contains(&ticket.value));
        assert_eq!(presenter.phase(), Phase::Spinning);
        assert_eq!(presenter.remaining(), 2);
        assert_eq!(presenter.selection(), None);

        assert_eq!(presenter.reveal(ticket.token), Some(ticket.value));
        assert_eq!(presenter.phase(), Phase::Result);
        assert_eq!(presenter.selection(), Some(ticket.value));
    }

    #[test]
    fn spinning_blocks_further_spins() {
        let mut presenter = Presenter::with_pool(DrawPool::new(3));
        let mut rng = rng(3);

        let ticket = presenter.begin_spin(&mut rng).unwrap();
        let rotation = presenter.rotation_deg();

        assert!(presenter.begin_spin(&mut rng).is_none());
        assert_eq!(presenter.remaining(), 2);
        assert_eq!(presenter.rotation_deg(), rotation);

        presenter.reveal(ticket.token);
        assert!(presenter.begin_spin(&mut rng).is_some());
    }

    #[test]
    fn stale_reveal_is_ignored() {
        let mut presenter = Presenter::with_pool(DrawPool::new(3));
        let mut rng = rng(5);

        let first = presenter.begin_spin(&mut rng).unwrap();
        presenter.reveal(first.token);

        let second = presenter.begin_spin(&mut rng).unwrap();
        // the first spin's timer firing late must not touch the new spin
        assert_eq!(presenter.reveal(first.token), None);
        assert_eq!(presenter.phase(), Phase::Spinning);
        assert_eq!(presenter.reveal(second.token), Some(second.value));
    }

    #[test]
    fn pool_runs_dry_and_stays_dry() {
        let mut presenter = Presenter::with_pool(DrawPool::new(3));
        let mut rng = rng(9);

        for _ in 0..3 {
            let ticket = presenter.begin_spin(&mut rng).unwrap();
            presenter.reveal(ticket.token);
        }

        assert!(presenter.is_exhausted());
        assert!(!presenter.can_spin());
        assert!(presenter.begin_spin(&mut rng).is_none());
    }

    #[test]
    fn rotation_accumulates_forward() {
        let mut presenter = Presenter::with_pool(DrawPool::new(10));
        let mut rng = rng(2);

        let mut previous = presenter.rotation_deg();
        for _ in 0..10 {
            let ticket = presenter.begin_spin(&mut rng).unwrap();
            let added = ticket.target_deg - previous;
            assert!(added >= MIN_FULL_TURNS * FULL_TURN_DEG);
            assert!(added < (MIN_FULL_TURNS + EXTRA_FULL_TURNS + 1.0) * FULL_TURN_DEG);
            previous = ticket.target_deg;
            presenter.reveal(ticket.token);
        }
    }

    #[test]
    fn roster_binding_follows_the_drawn_number() {
        let roster = Roster::new(vec![
            Row::new(vec!["a".into(), "Alice".into(), "Prize1".into()]),
            Row::new(vec!["b".into(), "Bob".into(), "Prize2".into()]),
        ]);
        let mut presenter = Presenter::with_roster(roster);
        let mut rng = rng(4);

        let ticket = presenter.begin_spin(&mut rng).unwrap();
        presenter.reveal(ticket.token);

        let row = presenter.selected_row().unwrap();
        let expected = match ticket.value {
            1 => ("Alice", "Prize1"),
            2 => ("Bob", "Prize2"),
            other => panic!("drew {} from a two-row roster", other),
        };
        assert_eq!(row.entrant().unwrap().as_str(), expected.0);
        assert_eq!(row.prize().unwrap().as_str(), expected.1);
    }

    #[test]
    fn unloaded_presenter_is_disabled_until_a_roster_arrives() {
        let mut presenter = Presenter::unloaded();
        let mut rng = rng(8);

        assert!(!presenter.can_spin());
        assert!(presenter.begin_spin(&mut rng).is_none());

        presenter.attach_roster(Roster::new(vec![Row::new(vec!["a".into(), "Ana".into()])]));
        assert!(presenter.can_spin());

        // a duplicate roster does not reset the pool
        let ticket = presenter.begin_spin(&mut rng).unwrap();
        presenter.attach_roster(Roster::new(vec![Row::default(); 5]));
        presenter.reveal(ticket.token);
        assert!(presenter.is_exhausted());
    }

    #[test]
    fn ease_out_cubic_hits_its_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn animation_eases_to_the_target_and_clamps() {
        let mut animation = SpinAnimation::new(0.0, 1800.0);
        let duration_us = SPIN_DURATION_MS as i64 * 1000;

        assert_eq!(animation.advance(1_000), 0.0);
        let halfway = animation.advance(1_000 + duration_us / 2);
        assert!(halfway > 900.0 && halfway < 1800.0);
        assert!(!animation.is_done(1_000 + duration_us / 2));

        assert_eq!(animation.advance(1_000 + duration_us * 2), 1800.0);
        assert!(animation.is_done(1_000 + duration_us * 2));
    }

    #[test]
    fn wheel_state_drives_labels_and_angle() {
        let mut state = WheelState::new(Presenter::with_pool(DrawPool::new(1)));
        let mut rng = rng(6);

        assert_eq!(state.hub_label(), "?");
        assert_eq!(state.trigger_label(), "Spin the wheel");
        assert_eq!(state.wheel_angle_deg(), 0.0);

        let ticket = state.begin_spin(&mut rng).unwrap();
        assert_eq!(state.hub_label(), "...");
        assert_eq!(state.trigger_label(), "All numbers drawn");
        assert!(state.result_lines().is_empty());

        assert!(state.tick(0));
        let duration_us = SPIN_DURATION_MS as i64 * 1000;
        assert!(!state.tick(duration_us));
        assert_eq!(state.wheel_angle_deg(), ticket.target_deg);

        state.presenter.reveal(ticket.token);
        assert_eq!(state.hub_label(), "1");
        assert_eq!(state.result_lines(), vec!["Your lucky number: 1"]);
    }
}
