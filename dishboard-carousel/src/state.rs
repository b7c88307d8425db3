//! Carousel state machine
//!
//! Pure and synchronous: every input returns the [`Effect`]s the runtime
//! must perform. Timers and image loads report back through
//! [`CarouselState::tick`], [`CarouselState::image_loaded`],
//! [`CarouselState::settled`] and [`CarouselState::badge_expired`], each
//! carrying the ticket or generation it was issued with so late arrivals
//! can be recognized and dropped.
//!
//! ```text
//!            render_slide              image_loaded            settled
//!   Idle ─────────────────▶ Loading ─────────────────▶ Settling ───────▶ Idle
//!     ▲                        │  (image or placeholder)
//!     └── requests while Loading/Settling are dropped, never queued
//! ```

use serde::Serialize;
use shared::{DishRecord, SlideFrame};

use crate::loader::ImageInfo;

/// Transition phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Ready to start a transition
    Idle,
    /// Image for `dish` is being fetched
    Loading {
        ticket: u64,
        index: usize,
        dish: DishRecord,
    },
    /// Slide painted, fade and settle delay running
    Settling { ticket: u64 },
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Loading { .. } => PhaseKind::Loading,
            Phase::Settling { .. } => PhaseKind::Settling,
        }
    }
}

/// Phase without its payload, for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Idle,
    Loading,
    Settling,
}

/// Side effect requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the dish image, then report through `image_loaded(ticket, ..)`
    LoadImage { ticket: u64, dish: DishRecord },
    /// Replace the visible slide (transparent until `FadeIn`)
    Paint(SlideFrame),
    FadeIn,
    /// Report `settled(ticket)` after fade + settle delay
    ScheduleSettle { ticket: u64 },
    /// Remove the visible slide
    Clear,
    /// Replace any running auto-play timer with one reporting `tick(generation)`
    StartAutoplay { generation: u64 },
    StopAutoplay,
    /// Show the "updated" badge, report `badge_expired(generation)` later
    ShowBadge { generation: u64 },
    HideBadge,
}

/// Point-in-time view of the carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub len: usize,
    /// None when the list is empty
    pub current_index: Option<usize>,
    pub displayed: Option<usize>,
    pub phase: PhaseKind,
    pub transitioning: bool,
    pub autoplay_active: bool,
    pub badge_visible: bool,
    /// Name of the dish at `current_index`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_dish: Option<String>,
}

/// Slide-show state owned by one carousel
#[derive(Debug, Clone)]
pub struct CarouselState {
    /// Display order: oldest first
    dishes: Vec<DishRecord>,
    current_index: usize,
    /// Index currently painted
    displayed: Option<usize>,
    phase: Phase,
    /// Generation of the active auto-play timer
    autoplay: Option<u64>,
    /// Generation of the visible badge
    badge: Option<u64>,
    /// List used when the store fails with nothing to show
    fallback: Vec<DishRecord>,
    last_ticket: u64,
    last_generation: u64,
}

impl CarouselState {
    pub fn new(fallback: Vec<DishRecord>) -> Self {
        Self {
            dishes: Vec::new(),
            current_index: 0,
            displayed: None,
            phase: Phase::Idle,
            autoplay: None,
            badge: None,
            fallback,
            last_ticket: 0,
            last_generation: 0,
        }
    }

    pub fn dishes(&self) -> &[DishRecord] {
        &self.dishes
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn displayed(&self) -> Option<usize> {
        self.displayed
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Generation of the active auto-play timer, if any
    pub fn autoplay(&self) -> Option<u64> {
        self.autoplay
    }

    pub fn badge_visible(&self) -> bool {
        self.badge.is_some()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        let current_index = (!self.dishes.is_empty()).then_some(self.current_index);
        CarouselSnapshot {
            len: self.dishes.len(),
            current_index,
            displayed: self.displayed,
            phase: self.phase.kind(),
            transitioning: self.is_transitioning(),
            autoplay_active: self.autoplay.is_some(),
            badge_visible: self.badge_visible(),
            current_dish: current_index
                .and_then(|i| self.dishes.get(i))
                .map(|d| d.display_name().to_string()),
        }
    }

    /// Replace the whole list with a new snapshot
    pub fn replace_list(&mut self, mut dishes: Vec<DishRecord>) -> Vec<Effect> {
        dishes.sort_by_key(|d| d.created_at);
        self.dishes = dishes;

        let mut effects = Vec::new();
        let len = self.dishes.len();

        // A load whose dish left its slot would paint a slide the list no longer has
        let abandoned = match &self.phase {
            Phase::Loading { index, dish, .. } => {
                self.dishes.get(*index).map(|d| d.id.as_str()) != Some(dish.id.as_str())
            }
            _ => false,
        };
        if abandoned {
            tracing::debug!("Loading dish left the list, load abandoned");
            self.phase = Phase::Idle;
        }

        if len == 0 {
            self.current_index = 0;
            if self.displayed.take().is_some() {
                effects.push(Effect::Clear);
            }
            self.reconcile_autoplay(&mut effects);
            return effects;
        }

        if self.displayed.is_none() {
            // First load, or first data after the list was empty
            if self.phase.is_idle() {
                self.current_index = 0;
                effects.extend(self.render_slide(0, true));
            } else {
                // Left to the running transition, see `settled`
                self.current_index %= len;
            }
            self.reconcile_autoplay(&mut effects);
            return effects;
        }

        self.current_index %= len;
        self.displayed = self.displayed.map(|d| d % len);

        let generation = self.next_generation();
        self.badge = Some(generation);
        effects.push(Effect::ShowBadge { generation });

        if abandoned {
            effects.extend(self.render_slide(self.current_index, false));
        }

        self.reconcile_autoplay(&mut effects);
        effects
    }

    /// Start a transition to `target` (taken modulo the list length).
    ///
    /// Dropped while a transition is running; a no-op when `target` is
    /// already displayed unless `force` is set.
    pub fn render_slide(&mut self, target: usize, force: bool) -> Vec<Effect> {
        let len = self.dishes.len();
        if len == 0 {
            return Vec::new();
        }
        if !self.phase.is_idle() {
            tracing::debug!(
                target_index = target,
                phase = ?self.phase.kind(),
                "Transition in progress, render dropped"
            );
            return Vec::new();
        }

        let index = target % len;
        if !force && self.displayed == Some(index) {
            return Vec::new();
        }

        let ticket = self.next_ticket();
        let dish = self.dishes[index].clone();
        self.current_index = index;
        self.phase = Phase::Loading {
            ticket,
            index,
            dish: dish.clone(),
        };
        vec![Effect::LoadImage { ticket, dish }]
    }

    /// Image fetch finished; `None` means it failed
    pub fn image_loaded(&mut self, ticket: u64, info: Option<ImageInfo>) -> Vec<Effect> {
        let dish = match &self.phase {
            Phase::Loading {
                ticket: current,
                dish,
                ..
            } if *current == ticket => dish.clone(),
            _ => return Vec::new(),
        };

        let slide = match info {
            Some(info) => SlideFrame::image(&dish, info.orientation().layout()),
            None => SlideFrame::placeholder(&dish),
        };

        self.phase = Phase::Settling { ticket };
        self.displayed = Some(self.current_index);
        vec![
            Effect::Paint(slide),
            Effect::FadeIn,
            Effect::ScheduleSettle { ticket },
        ]
    }

    /// Fade and settle delay elapsed
    pub fn settled(&mut self, ticket: u64) -> Vec<Effect> {
        match self.phase {
            Phase::Settling { ticket: current } if current == ticket => {
                self.phase = Phase::Idle;
                // Data arrived while the screen was blank and busy
                if self.displayed.is_none() && !self.dishes.is_empty() {
                    return self.render_slide(self.current_index, true);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn next(&mut self) -> Vec<Effect> {
        self.navigate(true)
    }

    pub fn prev(&mut self) -> Vec<Effect> {
        self.navigate(false)
    }

    fn navigate(&mut self, forward: bool) -> Vec<Effect> {
        let len = self.dishes.len();
        if len < 2 {
            return Vec::new();
        }

        let target = if forward {
            (self.current_index + 1) % len
        } else {
            (self.current_index + len - 1) % len
        };

        let mut effects = Vec::new();
        if self.autoplay.take().is_some() {
            effects.push(Effect::StopAutoplay);
        }
        effects.extend(self.render_slide(target, false));

        let generation = self.next_generation();
        self.autoplay = Some(generation);
        effects.push(Effect::StartAutoplay { generation });
        effects
    }

    /// Auto-play timer fired
    pub fn tick(&mut self, generation: u64) -> Vec<Effect> {
        if self.autoplay != Some(generation) || self.dishes.len() <= 1 {
            return Vec::new();
        }
        self.render_slide(self.current_index + 1, false)
    }

    /// Badge timer fired
    pub fn badge_expired(&mut self, generation: u64) -> Vec<Effect> {
        if self.badge == Some(generation) {
            self.badge = None;
            vec![Effect::HideBadge]
        } else {
            Vec::new()
        }
    }

    /// Store reported an error; stale data wins over sample data
    pub fn store_failed(&mut self) -> Vec<Effect> {
        if !self.dishes.is_empty() {
            return Vec::new();
        }
        let fallback = self.fallback.clone();
        self.replace_list(fallback)
    }

    fn reconcile_autoplay(&mut self, effects: &mut Vec<Effect>) {
        let wanted = self.dishes.len() > 1;
        match (wanted, self.autoplay) {
            (true, None) => {
                let generation = self.next_generation();
                self.autoplay = Some(generation);
                effects.push(Effect::StartAutoplay { generation });
            }
            (false, Some(_)) => {
                self.autoplay = None;
                effects.push(Effect::StopAutoplay);
            }
            _ => {}
        }
    }

    fn next_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    fn next_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_dishes;
    use chrono::{TimeZone, Utc};
    use shared::SlideLayout;

    fn dish(id: &str, minute: u32) -> DishRecord {
        DishRecord {
            id: id.to_string(),
            name: format!("Dish {id}"),
            image_url: format!("https://img.example/{id}.jpg"),
            category: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap(),
        }
    }

    fn dishes(n: usize) -> Vec<DishRecord> {
        (0..n).map(|i| dish(&format!("{i}"), i as u32)).collect()
    }

    fn landscape() -> Option<ImageInfo> {
        Some(ImageInfo::new(1600, 900))
    }

    fn load_ticket(effects: &[Effect]) -> Option<u64> {
        effects.iter().find_map(|e| match e {
            Effect::LoadImage { ticket, .. } => Some(*ticket),
            _ => None,
        })
    }

    /// Drive a started transition through load and settle
    fn finish(state: &mut CarouselState, effects: &[Effect]) -> Vec<Effect> {
        let Some(ticket) = load_ticket(effects) else {
            return Vec::new();
        };
        let painted = state.image_loaded(ticket, landscape());
        let mut rest = state.settled(ticket);
        let mut all = painted;
        all.append(&mut rest);
        all
    }

    /// State with `n` dishes, first slide settled
    fn loaded(n: usize) -> CarouselState {
        let mut state = CarouselState::new(sample_dishes());
        let effects = state.replace_list(dishes(n));
        finish(&mut state, &effects);
        state
    }

    fn painted_ids(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Paint(slide) => Some(slide.dish_id.clone()),
                _ => None,
            })
            .collect()
    }

    // ========== list replacement ==========

    #[test]
    fn first_load_renders_slide_zero_and_starts_autoplay() {
        let mut state = CarouselState::new(Vec::new());
        let effects = state.replace_list(dishes(3));

        assert!(matches!(&effects[0], Effect::LoadImage { dish, .. } if dish.id == "0"));
        assert!(matches!(effects[1], Effect::StartAutoplay { .. }));
        assert_eq!(state.phase().kind(), PhaseKind::Loading);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn list_is_shown_oldest_first() {
        let mut state = CarouselState::new(Vec::new());
        // Newest-first, the order the store query returns
        let mut newest_first = dishes(3);
        newest_first.reverse();
        state.replace_list(newest_first);

        let ids: Vec<_> = state.dishes().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2"]);
    }

    #[test]
    fn later_update_clamps_index_and_shows_badge_without_render() {
        let mut state = loaded(5);
        let effects = state.render_slide(4, false);
        finish(&mut state, &effects);
        assert_eq!(state.current_index(), 4);

        let effects = state.replace_list(dishes(3));
        assert_eq!(state.current_index(), 1);
        assert!(matches!(effects[0], Effect::ShowBadge { .. }));
        assert!(load_ticket(&effects).is_none());
        assert!(state.badge_visible());
    }

    #[test]
    fn badge_hides_only_for_latest_generation() {
        let mut state = loaded(3);
        let first = match state.replace_list(dishes(3))[0] {
            Effect::ShowBadge { generation } => generation,
            ref other => panic!("unexpected effect {other:?}"),
        };
        let second = match state.replace_list(dishes(4))[0] {
            Effect::ShowBadge { generation } => generation,
            ref other => panic!("unexpected effect {other:?}"),
        };

        assert!(state.badge_expired(first).is_empty());
        assert!(state.badge_visible());
        assert_eq!(state.badge_expired(second), vec![Effect::HideBadge]);
        assert!(!state.badge_visible());
    }

    #[test]
    fn shrinking_to_one_stops_autoplay() {
        let mut state = loaded(3);
        assert!(state.autoplay().is_some());

        let effects = state.replace_list(dishes(1));
        assert!(effects.contains(&Effect::StopAutoplay));
        assert_eq!(state.autoplay(), None);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn growing_past_one_starts_autoplay() {
        let mut state = loaded(1);
        assert_eq!(state.autoplay(), None);

        let effects = state.replace_list(dishes(2));
        assert!(effects.iter().any(|e| matches!(e, Effect::StartAutoplay { .. })));
        assert!(state.autoplay().is_some());
    }

    #[test]
    fn emptied_list_clears_the_slide() {
        let mut state = loaded(3);
        let effects = state.replace_list(Vec::new());

        assert_eq!(effects, vec![Effect::Clear, Effect::StopAutoplay]);
        assert_eq!(state.displayed(), None);
        assert_eq!(state.snapshot().current_index, None);

        // Next non-empty snapshot renders again from the start
        let effects = state.replace_list(dishes(2));
        assert!(matches!(&effects[0], Effect::LoadImage { dish, .. } if dish.id == "0"));
    }

    #[test]
    fn refill_during_settle_renders_after_settle() {
        let mut state = CarouselState::new(Vec::new());
        let effects = state.replace_list(dishes(1));
        let ticket = load_ticket(&effects).unwrap();
        state.image_loaded(ticket, landscape());

        state.replace_list(Vec::new());
        let effects = state.replace_list(vec![dish("late", 30)]);
        assert_eq!(state.displayed(), None);
        assert!(!effects.iter().any(|e| matches!(e, Effect::ShowBadge { .. })));
        assert!(!state.badge_visible());

        let effects = state.settled(ticket);
        assert!(matches!(&effects[0], Effect::LoadImage { dish, .. } if dish.id == "late"));
    }

    #[test]
    fn load_finishing_after_list_emptied_paints_nothing() {
        let mut state = CarouselState::new(Vec::new());
        let ticket = load_ticket(&state.replace_list(dishes(2))).unwrap();
        state.replace_list(Vec::new());

        assert!(state.image_loaded(ticket, landscape()).is_empty());
        assert!(state.phase().is_idle());
    }

    #[test]
    fn refill_while_loading_removed_dish_renders_new_list() {
        let mut state = CarouselState::new(Vec::new());
        let stale = load_ticket(&state.replace_list(vec![dish("gone", 0)])).unwrap();

        state.replace_list(Vec::new());
        let effects = state.replace_list(vec![dish("fresh", 5)]);
        assert!(matches!(&effects[0], Effect::LoadImage { dish, .. } if dish.id == "fresh"));

        // The old load completes after the list moved on
        assert!(state.image_loaded(stale, landscape()).is_empty());
        assert_eq!(painted_ids(&finish(&mut state, &effects)), ["fresh"]);
        assert_eq!(state.displayed(), Some(0));
        assert!(state.phase().is_idle());
    }

    #[test]
    fn shrink_while_loading_dropped_slot_keeps_list_consistent() {
        let mut state = loaded(3);
        let stale = load_ticket(&state.render_slide(2, false)).unwrap();

        let effects = state.replace_list(dishes(2));
        assert!(matches!(effects[0], Effect::ShowBadge { .. }));
        assert!(state.phase().is_idle());
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.displayed(), Some(0));

        assert!(state.image_loaded(stale, landscape()).is_empty());
        assert!(state.settled(stale).is_empty());
        assert_eq!(state.displayed(), Some(0));
    }

    #[test]
    fn shrink_while_loading_moves_on_to_surviving_slide() {
        let mut state = loaded(5);
        let effects = state.render_slide(3, false);
        finish(&mut state, &effects);
        let stale = load_ticket(&state.render_slide(4, false)).unwrap();

        let effects = state.replace_list(dishes(4));
        assert!(matches!(&effects[1], Effect::LoadImage { dish, .. } if dish.id == "0"));
        assert!(state.image_loaded(stale, landscape()).is_empty());
        assert_eq!(painted_ids(&finish(&mut state, &effects)), ["0"]);
        assert_eq!(state.displayed(), Some(0));
    }

    #[test]
    fn update_keeping_loading_dish_lets_load_finish() {
        let mut state = loaded(3);
        let ticket = load_ticket(&state.render_slide(1, false)).unwrap();

        let mut grown = dishes(3);
        grown.push(dish("new", 50));
        state.replace_list(grown);

        assert_eq!(painted_ids(&state.image_loaded(ticket, landscape())), ["1"]);
        assert_eq!(state.displayed(), Some(1));
    }

    // ========== rendering ==========

    #[test]
    fn render_of_displayed_index_is_noop() {
        let mut state = loaded(3);
        assert!(state.render_slide(0, false).is_empty());
        assert!(state.phase().is_idle());
        assert!(state.autoplay().is_some());
    }

    #[test]
    fn forced_render_of_displayed_index_reloads() {
        let mut state = loaded(3);
        assert!(load_ticket(&state.render_slide(0, true)).is_some());
    }

    #[test]
    fn render_wraps_target() {
        let mut state = loaded(3);
        let effects = state.render_slide(7, false);
        assert!(matches!(&effects[0], Effect::LoadImage { dish, .. } if dish.id == "1"));
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn render_on_empty_list_does_nothing() {
        let mut state = CarouselState::new(Vec::new());
        assert!(state.render_slide(0, true).is_empty());
        assert!(state.next().is_empty());
        assert!(state.prev().is_empty());
        assert!(state.tick(1).is_empty());
    }

    #[test]
    fn render_is_dropped_while_transitioning() {
        let mut state = loaded(3);
        let ticket = load_ticket(&state.render_slide(1, false)).unwrap();

        assert!(state.render_slide(2, false).is_empty());
        assert!(state.render_slide(2, true).is_empty());

        state.image_loaded(ticket, landscape());
        assert!(state.render_slide(2, false).is_empty(), "settling still blocks");

        state.settled(ticket);
        assert!(!state.render_slide(2, false).is_empty());
    }

    #[test]
    fn orientation_picks_layout() {
        let mut state = CarouselState::new(Vec::new());
        let ticket = load_ticket(&state.replace_list(dishes(2))).unwrap();
        let effects = state.image_loaded(ticket, Some(ImageInfo::new(900, 1600)));

        match &effects[0] {
            Effect::Paint(slide) => assert_eq!(slide.layout, SlideLayout::Letterboxed),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(effects[1], Effect::FadeIn);
        assert_eq!(effects[2], Effect::ScheduleSettle { ticket });
    }

    #[test]
    fn failed_image_paints_placeholder_and_returns_to_idle() {
        let mut state = CarouselState::new(Vec::new());
        let ticket = load_ticket(&state.replace_list(dishes(3))).unwrap();
        let generation = state.autoplay();

        let effects = state.image_loaded(ticket, None);
        match &effects[0] {
            Effect::Paint(slide) => {
                assert!(slide.is_placeholder());
                assert!(slide.placeholder.as_deref().unwrap().contains("Dish 0"));
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert!(state.is_transitioning());

        state.settled(ticket);
        assert!(!state.is_transitioning());
        assert_eq!(state.autoplay(), generation, "auto-play untouched");
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut state = CarouselState::new(Vec::new());
        let ticket = load_ticket(&state.replace_list(dishes(2))).unwrap();

        assert!(state.image_loaded(ticket + 1, landscape()).is_empty());
        assert!(state.settled(ticket).is_empty(), "not settling yet");
        state.image_loaded(ticket, landscape());
        assert!(state.image_loaded(ticket, landscape()).is_empty());
        assert!(state.settled(ticket + 1).is_empty());
        assert!(state.is_transitioning());
    }

    // ========== navigation ==========

    #[test]
    fn scenario_three_dishes_wrap_both_ways() {
        let mut state = loaded(3);
        let effects = state.render_slide(2, false);
        finish(&mut state, &effects);
        assert_eq!(state.current_index(), 2);

        let effects = state.next();
        assert_eq!(painted_ids(&finish(&mut state, &effects)), ["0"]);
        assert_eq!(state.current_index(), 0);

        let effects = state.prev();
        assert_eq!(painted_ids(&finish(&mut state, &effects)), ["2"]);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn next_restarts_autoplay_with_new_generation() {
        let mut state = loaded(3);
        let before = state.autoplay().unwrap();

        let effects = state.next();
        assert_eq!(effects[0], Effect::StopAutoplay);
        assert!(matches!(effects[1], Effect::LoadImage { .. }));
        let after = match effects[2] {
            Effect::StartAutoplay { generation } => generation,
            ref other => panic!("unexpected effect {other:?}"),
        };
        assert_ne!(before, after);
        assert_eq!(state.autoplay(), Some(after));
        assert!(state.tick(before).is_empty(), "old timer is dead");
    }

    #[test]
    fn single_dish_navigation_is_noop() {
        let mut state = loaded(1);
        assert!(state.next().is_empty());
        assert!(state.prev().is_empty());
        assert_eq!(state.autoplay(), None);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn wraparound_after_len_nexts() {
        for len in 2..=6 {
            let mut state = loaded(len);
            for _ in 0..len {
                let effects = state.next();
                finish(&mut state, &effects);
            }
            assert_eq!(state.current_index(), 0, "len {len}");
        }
    }

    #[test]
    fn index_stays_in_range_for_any_navigation() {
        for len in 0..=6 {
            let mut state = loaded(len);
            let moves = [true, false, false, true, true, true, false, true];
            for (step, forward) in moves.into_iter().enumerate() {
                let effects = if forward { state.next() } else { state.prev() };
                if len == 0 {
                    assert!(effects.is_empty());
                }
                // Leave every other transition in flight
                if step % 2 == 0 {
                    finish(&mut state, &effects);
                }
                if len > 0 {
                    assert!(state.current_index() < len, "len {len}");
                }
            }
        }
    }

    #[test]
    fn burst_of_next_gives_one_change() {
        let mut state = loaded(4);
        let first = state.next();
        let mut later = Vec::new();
        for _ in 0..9 {
            later.extend(state.next());
        }

        assert!(load_ticket(&later).is_none());
        assert_eq!(state.current_index(), 1);
        assert_eq!(painted_ids(&finish(&mut state, &first)), ["1"]);
    }

    #[test]
    fn tick_advances_like_next() {
        let mut state = loaded(3);
        let generation = state.autoplay().unwrap();

        let effects = state.tick(generation);
        assert_eq!(effects.len(), 1, "tick does not touch the timer");
        assert_eq!(painted_ids(&finish(&mut state, &effects)), ["1"]);
        assert_eq!(state.autoplay(), Some(generation));
    }

    #[test]
    fn tick_during_transition_is_dropped() {
        let mut state = loaded(3);
        let generation = state.autoplay().unwrap();
        state.next();
        let generation_after = state.autoplay().unwrap();
        assert_ne!(generation, generation_after);
        assert!(state.tick(generation_after).is_empty());
    }

    // ========== store failures ==========

    #[test]
    fn store_failure_before_data_falls_back_to_samples() {
        let mut state = CarouselState::new(sample_dishes());
        let effects = state.store_failed();

        assert_eq!(state.dishes().len(), 3);
        assert!(matches!(&effects[0], Effect::LoadImage { dish, .. } if dish.name == "Spicy Paneer Tikka"));
        assert!(state.autoplay().is_some());
    }

    #[test]
    fn store_failure_keeps_stale_data() {
        let mut state = loaded(2);
        assert!(state.store_failed().is_empty());
        assert_eq!(state.dishes()[0].id, "0");
    }

    #[test]
    fn snapshot_reports_state() {
        let mut state = loaded(3);
        state.next();
        let snapshot = state.snapshot();

        assert_eq!(snapshot.len, 3);
        assert_eq!(snapshot.current_index, Some(1));
        assert_eq!(snapshot.displayed, Some(0));
        assert_eq!(snapshot.phase, PhaseKind::Loading);
        assert!(snapshot.transitioning);
        assert!(snapshot.autoplay_active);
        assert_eq!(snapshot.current_dish.as_deref(), Some("Dish 1"));
    }
}
