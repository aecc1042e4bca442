use std::time::{Duration, Instant};

use crate::headline::Headline;

/// Scroll ticks replayed at most per frame after a stall.
pub const MAX_CATCH_UP_STEPS: u32 = 10;

/// Scroll ticks owed between `last_tick` and `now`, and the `last_tick` to
/// keep for the next frame. The unfinished part of an interval carries over.
/// A stall longer than `MAX_CATCH_UP_STEPS` ticks is dropped and the clock
/// restarts at `now`.
pub fn ticks_due(last_tick: Instant, now: Instant, interval: Duration) -> (u32, Instant) {
    let elapsed = now.saturating_duration_since(last_tick);
    let due = elapsed.as_nanos() / interval.as_nanos().max(1);
    if due > u128::from(MAX_CATCH_UP_STEPS) {
        return (MAX_CATCH_UP_STEPS, now);
    }
    let due = due as u32;
    (due, last_tick + interval * due)
}

/// Opacity ramp started whenever a new headline enters from the right.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    started: Instant,
    duration: Duration,
}

impl Fade {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    /// Linear 0.0 to 1.0 over the fade duration.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Scroll and rotation state of the ticker strip.
///
/// `headlines` is never empty, so `index` always points at a valid entry.
#[derive(Debug)]
pub struct Ticker {
    headlines: Vec<Headline>,
    index: usize,
    x_pos: f32,
    step: f32,
    fade: Fade,
}

impl Ticker {
    pub fn new(view_width: f32, step: f32, fade_duration: Duration) -> Self {
        Self {
            headlines: vec![Headline::placeholder()],
            index: 0,
            x_pos: view_width,
            step,
            fade: Fade::new(Instant::now(), fade_duration),
        }
    }

    /// Swap in a freshly fetched list and start over from its first headline.
    pub fn set_headlines(&mut self, headlines: Vec<Headline>, view_width: f32) {
        self.headlines = if headlines.is_empty() {
            vec![Headline::placeholder()]
        } else {
            headlines
        };
        self.index = 0;
        self.restart(view_width);
    }

    pub fn current(&self) -> &Headline {
        &self.headlines[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn headline_count(&self) -> usize {
        self.headlines.len()
    }

    pub fn x_pos(&self) -> f32 {
        self.x_pos
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        self.fade.opacity_at(now)
    }

    /// Move one step left. Once the current headline (of rendered width
    /// `text_width`) has left the view entirely, rotate to the next one.
    /// Returns `true` when that rotation happened.
    pub fn step(&mut self, text_width: f32, view_width: f32) -> bool {
        self.x_pos -= self.step;
        if self.x_pos + text_width < 0.0 {
            self.index = (self.index + 1) % self.headlines.len();
            self.restart(view_width);
            return true;
        }
        false
    }

    fn restart(&mut self, view_width: f32) {
        self.x_pos = view_width;
        self.fade = Fade::new(Instant::now(), self.fade.duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: f32 = 800.0;

    fn ticker_with(n: usize) -> Ticker {
        let mut ticker = Ticker::new(VIEW, 2.0, Duration::from_millis(500));
        let headlines = (0..n)
            .map(|i| Headline::new(format!("headline {i}"), format!("https://example.com/{i}")))
            .collect();
        ticker.set_headlines(headlines, VIEW);
        ticker
    }

    /// Step until one rotation happens; returns the number of steps taken.
    fn scroll_off(ticker: &mut Ticker, text_width: f32) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            if ticker.step(text_width, VIEW) {
                return steps;
            }
            assert!(steps < 100_000, "headline never left the view");
        }
    }

    #[test]
    fn test_new_ticker_shows_placeholder() {
        let ticker = Ticker::new(VIEW, 2.0, Duration::from_millis(500));
        assert_eq!(ticker.headline_count(), 1);
        assert_eq!(ticker.current(), &Headline::placeholder());
        assert_eq!(ticker.x_pos(), VIEW);
    }

    #[test]
    fn test_empty_list_becomes_placeholder() {
        let mut ticker = ticker_with(3);
        ticker.set_headlines(Vec::new(), VIEW);
        assert_eq!(ticker.headline_count(), 1);
        assert_eq!(ticker.index(), 0);
        assert!(!ticker.current().has_link());
    }

    #[test]
    fn test_step_moves_left() {
        let mut ticker = ticker_with(2);
        assert!(!ticker.step(100.0, VIEW));
        assert_eq!(ticker.x_pos(), VIEW - 2.0);
    }

    #[test]
    fn test_rotates_once_fully_off_screen() {
        let mut ticker = ticker_with(2);
        // x = 800 - 2n must drop below -100.
        assert_eq!(scroll_off(&mut ticker, 100.0), 451);
        assert_eq!(ticker.index(), 1);
        assert_eq!(ticker.x_pos(), VIEW);
    }

    #[test]
    fn test_index_after_n_completions_wraps() {
        let mut ticker = ticker_with(3);
        for n in 1..=10 {
            scroll_off(&mut ticker, 50.0);
            assert_eq!(ticker.index(), n % 3);
        }
    }

    #[test]
    fn test_single_headline_rotates_to_itself() {
        let mut ticker = ticker_with(1);
        scroll_off(&mut ticker, 10.0);
        assert_eq!(ticker.index(), 0);
        assert_eq!(ticker.x_pos(), VIEW);
    }

    #[test]
    fn test_set_headlines_resets_index_and_position() {
        let mut ticker = ticker_with(4);
        scroll_off(&mut ticker, 10.0);
        scroll_off(&mut ticker, 10.0);
        ticker.step(10.0, VIEW);
        assert_eq!(ticker.index(), 2);

        ticker.set_headlines(vec![Headline::new("fresh", "")], VIEW);
        assert_eq!(ticker.index(), 0);
        assert_eq!(ticker.x_pos(), VIEW);
        assert_eq!(ticker.current().text, "fresh");
    }

    #[test]
    fn test_fade_ramps_linearly() {
        let start = Instant::now();
        let fade = Fade::new(start, Duration::from_millis(500));
        assert_eq!(fade.opacity_at(start), 0.0);
        let half = fade.opacity_at(start + Duration::from_millis(250));
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(fade.opacity_at(start + Duration::from_millis(500)), 1.0);
        assert_eq!(fade.opacity_at(start + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_zero_length_fade_is_opaque() {
        let start = Instant::now();
        assert_eq!(Fade::new(start, Duration::ZERO).opacity_at(start), 1.0);
    }

    #[test]
    fn test_rotation_restarts_fade() {
        let mut ticker = ticker_with(2);
        scroll_off(&mut ticker, 10.0);
        assert!(ticker.opacity(Instant::now()) < 1.0);
    }

    const TICK: Duration = Duration::from_millis(30);

    #[test]
    fn test_no_ticks_before_interval() {
        let last = Instant::now();
        assert_eq!(ticks_due(last, last, TICK), (0, last));
        assert_eq!(ticks_due(last, last + Duration::from_millis(29), TICK), (0, last));
    }

    #[test]
    fn test_ticks_due_keeps_remainder() {
        let last = Instant::now();
        let (steps, next) = ticks_due(last, last + Duration::from_millis(95), TICK);
        assert_eq!(steps, 3);
        assert_eq!(next, last + Duration::from_millis(90));
    }

    #[test]
    fn test_full_catch_up_is_replayed() {
        let last = Instant::now();
        let now = last + TICK * MAX_CATCH_UP_STEPS;
        assert_eq!(ticks_due(last, now, TICK), (MAX_CATCH_UP_STEPS, now));
    }

    #[test]
    fn test_stall_is_bounded_and_resets_clock() {
        let last = Instant::now();
        let now = last + Duration::from_secs(5);
        assert_eq!(ticks_due(last, now, TICK), (MAX_CATCH_UP_STEPS, now));
        // Nothing more is owed right after.
        assert_eq!(ticks_due(now, now + Duration::from_millis(10), TICK).0, 0);
    }

    #[test]
    fn test_clock_going_backwards_owes_nothing() {
        let now = Instant::now();
        let last = now + Duration::from_millis(100);
        assert_eq!(ticks_due(last, now, TICK), (0, last));
    }
}
