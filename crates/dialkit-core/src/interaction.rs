//! Knob interaction state machine.
//!
//! Turns pointer, touch, wheel and entry-key events into value edits.
//! Drags float the value and commit on release; leaving or cancelling
//! reverts it. Wheel ticks float the value and commit once scrolling has
//! paused. Two touch-starts inside the double-tap window open the entry
//! overlay.
//!
//! Time is passed in explicitly. Hosts call [`KnobModel::poll_timers`] (or
//! simply deliver the next event) once [`KnobModel::next_deadline`] has
//! passed.

use kurbo::Point;

use crate::entry::EntryChange;
use crate::gesture::DragPhase;
use crate::input::{EntryKey, InputEvent, MouseButton, PointerEvent, TouchEvent, wheel_direction};
use crate::knob::{Effects, KnobModel};
use crate::timer::Instant;

impl KnobModel {
    /// Process one input event at time `now`. Due timers fire first.
    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Effects {
        let mut effects = self.poll_timers(now);
        let event_effects = match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Touch(touch) => self.handle_touch(touch, now),
            InputEvent::Wheel { delta } => self.handle_wheel(wheel_direction(*delta), now),
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Resize => Effects::redraw(),
        };
        effects.merge(event_effects);
        effects
    }

    /// Fire every timer that is due at `now`, earliest deadline first.
    pub fn poll_timers(&mut self, now: Instant) -> Effects {
        let mut effects = Effects::none();
        let wheel_first = match (self.gesture.wheel_commit.deadline(), self.gesture.double_tap.deadline()) {
            (Some(wheel), Some(tap)) => wheel <= tap,
            _ => true,
        };

        if wheel_first {
            effects.merge(self.fire_wheel_commit(now));
            effects.merge(self.fire_double_tap(now));
        } else {
            effects.merge(self.fire_double_tap(now));
            effects.merge(self.fire_wheel_commit(now));
        }
        effects
    }

    /// When the host should next call [`KnobModel::poll_timers`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.gesture.next_deadline()
    }

    /// Current drag phase.
    pub fn drag_phase(&self) -> DragPhase {
        self.gesture.phase()
    }

    fn fire_wheel_commit(&mut self, now: Instant) -> Effects {
        if !self.gesture.wheel_commit.fire(now) {
            return Effects::none();
        }
        log::debug!("Wheel idle, committing");
        self.commit()
    }

    fn fire_double_tap(&mut self, now: Instant) -> Effects {
        if !self.gesture.double_tap.fire(now) {
            return Effects::none();
        }
        let taps = std::mem::take(&mut self.gesture.tap_count);
        log::trace!("Double-tap window closed after {} taps", taps);
        if taps == 2 {
            self.open_entry()
        } else {
            Effects::none()
        }
    }

    fn drag_to(&mut self, position: Point) -> Effects {
        let value = self.value_at(position);
        self.set_value_floating(value)
    }

    fn handle_pointer(&mut self, event: &PointerEvent) -> Effects {
        let readonly = self.properties().readonly;
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                // The flag is tracked even when read-only so up/leave stay balanced.
                self.gesture.button_down = true;
                if readonly {
                    Effects::none()
                } else {
                    self.drag_to(*position)
                }
            }
            PointerEvent::Down {
                button: MouseButton::Middle,
                ..
            }
            | PointerEvent::DoubleClick { .. } => self.open_entry(),
            PointerEvent::Down {
                button: MouseButton::Right,
                ..
            } => Effects::none(),
            PointerEvent::Move { position } => {
                if self.gesture.button_down && !readonly {
                    self.drag_to(*position)
                } else {
                    Effects::none()
                }
            }
            PointerEvent::Up { position, .. } => {
                if !self.gesture.button_down {
                    return Effects::none();
                }
                self.gesture.button_down = false;
                if readonly {
                    Effects::none()
                } else {
                    let value = self.value_at(*position);
                    self.set_value(value)
                }
            }
            PointerEvent::Leave => {
                if !self.gesture.button_down {
                    return Effects::none();
                }
                self.gesture.button_down = false;
                self.revert()
            }
        }
    }

    fn handle_touch(&mut self, event: &TouchEvent, now: Instant) -> Effects {
        let readonly = self.properties().readonly;
        match event {
            TouchEvent::Start { .. } => {
                if readonly {
                    return Effects::none();
                }
                // Multi-finger gestures belong to the host (scroll, pinch).
                let Some(position) = event.single_touch() else {
                    return Effects::none();
                };
                self.gesture.button_down = true;
                if self.gesture.tap_count == 0 {
                    let window = self.properties().timing.double_tap_window();
                    self.gesture.double_tap.start(now, window);
                }
                self.gesture.tap_count += 1;
                self.drag_to(position)
            }
            TouchEvent::Move { .. } => {
                if !self.gesture.button_down || readonly {
                    return Effects::none();
                }
                match event.single_touch() {
                    Some(position) => self.drag_to(position),
                    None => Effects::none(),
                }
            }
            TouchEvent::End { touches } => {
                if !self.gesture.button_down || !touches.is_empty() {
                    return Effects::none();
                }
                self.gesture.button_down = false;
                if readonly {
                    Effects::none()
                } else {
                    self.commit()
                }
            }
            TouchEvent::Cancel => {
                if !self.gesture.button_down {
                    return Effects::none();
                }
                self.gesture.button_down = false;
                self.gesture.tap_count = 0;
                self.gesture.double_tap.cancel();
                self.revert()
            }
        }
    }

    fn handle_wheel(&mut self, direction: f64, now: Instant) -> Effects {
        if self.properties().readonly {
            return Effects::none();
        }
        let effects = self.set_value_floating(self.value() + direction);
        let delay = self.properties().timing.wheel_commit_delay();
        self.gesture.wheel_commit.start(now, delay);
        effects
    }

    fn handle_key(&mut self, key: &EntryKey) -> Effects {
        if !self.entry.is_visible() {
            return Effects::none();
        }
        match key {
            EntryKey::Character(chars) => {
                self.entry.push_str(chars);
                Effects::entry(EntryChange::Edited)
            }
            EntryKey::Backspace => {
                if self.entry.backspace() {
                    Effects::entry(EntryChange::Edited)
                } else {
                    Effects::none()
                }
            }
            EntryKey::Enter => self.submit_entry(),
            EntryKey::Escape => self.cancel_entry(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{center_of, point_at_angle, value_to_angle};
    use crate::properties::{KnobConfig, KnobProperty};
    use crate::timer::Duration;
    use kurbo::{Size, Vec2};

    const SIZE: Size = Size::new(200.0, 200.0);

    fn knob() -> KnobModel {
        KnobModel::new(SIZE)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Point on the knob where `value` sits.
    fn point_for(model: &KnobModel, value: f64) -> Point {
        let angle = value_to_angle(value, model.properties().angles, model.range());
        point_at_angle(center_of(SIZE), 60.0, angle)
    }

    fn down(position: Point) -> InputEvent {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
        }
        .into()
    }

    fn up(position: Point) -> InputEvent {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
        .into()
    }

    fn moved(position: Point) -> InputEvent {
        PointerEvent::Move { position }.into()
    }

    fn touch_start(points: &[Point]) -> InputEvent {
        TouchEvent::Start {
            touches: points.to_vec(),
        }
        .into()
    }

    fn touch_end(points: &[Point]) -> InputEvent {
        TouchEvent::End {
            touches: points.to_vec(),
        }
        .into()
    }

    fn wheel(dy: f64) -> InputEvent {
        InputEvent::Wheel {
            delta: Vec2::new(0.0, dy),
        }
    }

    fn key(k: EntryKey) -> InputEvent {
        InputEvent::Key(k)
    }

    #[test]
    fn test_click_at_fifty_commits_once() {
        let mut model = knob();
        let t0 = Instant::now();
        let at = point_for(&model, 50.0);

        let pressed = model.handle_event(&down(at), t0);
        assert!(pressed.redraw);
        assert!(pressed.commits.is_empty());
        assert_eq!(model.drag_phase(), DragPhase::Dragging);

        let released = model.handle_event(&up(at), t0 + ms(50));
        assert_eq!(released.commits, vec![50.0]);
        assert_eq!(model.drag_phase(), DragPhase::Idle);
    }

    #[test]
    fn test_drag_floats_then_commits_on_release() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.handle_event(&down(point_for(&model, 10.0)), t0);
        for v in [20.0, 30.0, 40.0] {
            let effects = model.handle_event(&moved(point_for(&model, v)), t0);
            assert!(effects.redraw);
            assert!(effects.commits.is_empty());
            assert!((model.value() - v).abs() < f64::EPSILON);
        }
        assert!((model.committed_value() - 0.0).abs() < f64::EPSILON);
        let effects = model.handle_event(&up(point_for(&model, 45.0)), t0);
        assert_eq!(effects.commits, vec![45.0]);
    }

    #[test]
    fn test_move_without_button_is_ignored() {
        let mut model = knob();
        let effects = model.handle_event(&moved(point_for(&model, 70.0)), Instant::now());
        assert!(effects.is_empty());
        assert!((model.value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leave_aborts_drag() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.set_value(25.0);
        let _ = model.handle_event(&down(point_for(&model, 60.0)), t0);
        let _ = model.handle_event(&moved(point_for(&model, 80.0)), t0);

        let effects = model.handle_event(&PointerEvent::Leave.into(), t0);
        assert!(effects.redraw);
        assert!(effects.commits.is_empty());
        assert!((model.value() - 25.0).abs() < f64::EPSILON);
        assert_eq!(model.drag_phase(), DragPhase::Idle);

        // A release after leaving does nothing.
        assert!(model.handle_event(&up(point_for(&model, 90.0)), t0).is_empty());
    }

    #[test]
    fn test_leave_without_drag_is_ignored() {
        let mut model = knob();
        let _ = model.set_value_floating(12.0);
        assert!(model.handle_event(&PointerEvent::Leave.into(), Instant::now()).is_empty());
        assert!((model.value() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_readonly_ignores_drag_but_tracks_button() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.set_property(KnobProperty::Readonly(true));
        assert!(model.handle_event(&down(point_for(&model, 50.0)), t0).is_empty());
        assert_eq!(model.drag_phase(), DragPhase::Dragging);
        assert!(model.handle_event(&moved(point_for(&model, 60.0)), t0).is_empty());
        assert!(model.handle_event(&up(point_for(&model, 60.0)), t0).is_empty());
        assert_eq!(model.drag_phase(), DragPhase::Idle);
        assert!((model.value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_readonly_ignores_wheel_touch_and_entry() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.set_property(KnobProperty::Readonly(true));
        assert!(model.handle_event(&wheel(-1.0), t0).is_empty());
        assert!(model.handle_event(&touch_start(&[Point::new(150.0, 100.0)]), t0).is_empty());
        assert!(
            model
                .handle_event(&PointerEvent::DoubleClick { position: Point::ZERO }.into(), t0)
                .is_empty()
        );
        assert_eq!(model.next_deadline(), None);
    }

    #[test]
    fn test_double_click_and_middle_click_open_entry() {
        let mut model = knob();
        let t0 = Instant::now();
        let effects = model.handle_event(&PointerEvent::DoubleClick { position: Point::ZERO }.into(), t0);
        assert_eq!(effects.entry, Some(EntryChange::Shown));
        let _ = model.handle_event(&key(EntryKey::Escape), t0);

        let middle = PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Middle,
        };
        let effects = model.handle_event(&middle.into(), t0);
        assert_eq!(effects.entry, Some(EntryChange::Shown));
        assert_eq!(model.drag_phase(), DragPhase::Idle);
    }

    #[test]
    fn test_wheel_ticks_debounce_into_one_commit() {
        let mut model = knob();
        let _ = model.set_value(50.0);
        let t0 = Instant::now();

        for i in 0..5 {
            let effects = model.handle_event(&wheel(-1.0), t0 + ms(i * 100));
            assert!(effects.commits.is_empty());
        }
        assert!((model.value() - 45.0).abs() < f64::EPSILON);

        // Last tick was at 400ms; nothing before 650ms.
        assert_eq!(model.next_deadline(), Some(t0 + ms(650)));
        assert!(model.gesture().has_pending_wheel_commit());
        assert!(model.poll_timers(t0 + ms(649)).is_empty());
        let effects = model.poll_timers(t0 + ms(650));
        assert_eq!(effects.commits, vec![45.0]);
        assert!(!model.gesture().has_pending_wheel_commit());
        assert!(model.poll_timers(t0 + ms(2000)).is_empty());
    }

    #[test]
    fn test_wheel_ticks_with_gaps_commit_each() {
        let mut model = knob();
        let t0 = Instant::now();
        let mut commits = Vec::new();
        for i in 0..3 {
            let effects = model.handle_event(&wheel(1.0), t0 + ms(i * 300));
            commits.extend(effects.commits);
        }
        commits.extend(model.poll_timers(t0 + ms(900)).commits);
        assert_eq!(commits, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_wheel_clamps_at_bounds() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.handle_event(&wheel(-1.0), t0);
        assert!((model.value() - 0.0).abs() < f64::EPSILON);
        assert_eq!(model.poll_timers(t0 + ms(250)).commits, vec![0.0]);
    }

    #[test]
    fn test_zero_wheel_delta_restarts_debounce() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.handle_event(&wheel(1.0), t0);
        let effects = model.handle_event(&wheel(0.0), t0 + ms(200));
        assert!(effects.redraw);
        assert!(model.poll_timers(t0 + ms(300)).is_empty());
        assert_eq!(model.poll_timers(t0 + ms(450)).commits, vec![1.0]);
    }

    #[test]
    fn test_configured_wheel_delay() {
        let config = KnobConfig {
            timing: crate::gesture::GestureTiming {
                wheel_commit_delay_ms: 100,
                ..Default::default()
            },
            ..KnobConfig::default()
        };
        let mut model = KnobModel::with_config(SIZE, &config);
        let t0 = Instant::now();
        let _ = model.handle_event(&wheel(1.0), t0);
        assert_eq!(model.poll_timers(t0 + ms(100)).commits, vec![1.0]);
    }

    #[test]
    fn test_double_tap_opens_entry() {
        let mut model = knob();
        let t0 = Instant::now();
        let p = point_for(&model, 30.0);

        let _ = model.handle_event(&touch_start(&[p]), t0);
        let _ = model.handle_event(&touch_end(&[]), t0 + ms(80));
        let _ = model.handle_event(&touch_start(&[p]), t0 + ms(200));
        let _ = model.handle_event(&touch_end(&[]), t0 + ms(280));
        assert_eq!(model.gesture().tap_count(), 2);
        assert!(!model.entry().is_visible());

        let effects = model.poll_timers(t0 + ms(500));
        assert_eq!(effects.entry, Some(EntryChange::Shown));
        assert!(model.entry().is_visible());
        assert_eq!(model.gesture().tap_count(), 0);
    }

    #[test]
    fn test_single_tap_does_not_open_entry() {
        let mut model = knob();
        let t0 = Instant::now();
        let p = point_for(&model, 30.0);
        let _ = model.handle_event(&touch_start(&[p]), t0);
        let effects = model.handle_event(&touch_end(&[]), t0 + ms(50));
        assert_eq!(effects.commits, vec![30.0]);

        assert!(model.poll_timers(t0 + ms(500)).entry.is_none());
        assert!(!model.entry().is_visible());
        assert_eq!(model.gesture().tap_count(), 0);
    }

    #[test]
    fn test_triple_tap_does_not_open_entry() {
        let mut model = knob();
        let t0 = Instant::now();
        let p = point_for(&model, 30.0);
        for i in 0..3 {
            let _ = model.handle_event(&touch_start(&[p]), t0 + ms(i * 100));
            let _ = model.handle_event(&touch_end(&[]), t0 + ms(i * 100 + 40));
        }
        assert!(model.poll_timers(t0 + ms(500)).entry.is_none());
        assert!(!model.entry().is_visible());

        // The count reset, so a fresh pair works again.
        let _ = model.handle_event(&touch_start(&[p]), t0 + ms(600));
        let _ = model.handle_event(&touch_start(&[p]), t0 + ms(700));
        assert_eq!(model.poll_timers(t0 + ms(1100)).entry, Some(EntryChange::Shown));
    }

    #[test]
    fn test_double_tap_window_anchored_at_first_tap() {
        let mut model = knob();
        let t0 = Instant::now();
        let p = point_for(&model, 30.0);
        let _ = model.handle_event(&touch_start(&[p]), t0);
        let _ = model.handle_event(&touch_start(&[p]), t0 + ms(450));
        assert_eq!(model.next_deadline(), Some(t0 + ms(500)));
    }

    #[test]
    fn test_taps_outside_window_do_not_pair() {
        let mut model = knob();
        let t0 = Instant::now();
        let p = point_for(&model, 30.0);
        let _ = model.handle_event(&touch_start(&[p]), t0);
        let _ = model.handle_event(&touch_end(&[]), t0 + ms(50));
        // The second tap arrives after the window; the expiry fires first.
        let effects = model.handle_event(&touch_start(&[p]), t0 + ms(600));
        assert!(effects.entry.is_none());
        assert_eq!(model.gesture().tap_count(), 1);
    }

    #[test]
    fn test_multi_touch_is_ignored() {
        let mut model = knob();
        let t0 = Instant::now();
        let two = [Point::new(150.0, 100.0), Point::new(50.0, 100.0)];
        assert!(model.handle_event(&touch_start(&two), t0).is_empty());
        assert_eq!(model.drag_phase(), DragPhase::Idle);
        assert_eq!(model.gesture().tap_count(), 0);
        assert!(model.handle_event(&TouchEvent::Move { touches: two.to_vec() }.into(), t0).is_empty());
    }

    #[test]
    fn test_touch_drag_commits_when_last_finger_lifts() {
        let mut model = knob();
        let t0 = Instant::now();
        let a = point_for(&model, 20.0);
        let b = point_for(&model, 35.0);
        let _ = model.handle_event(&touch_start(&[a]), t0);
        let effects = model.handle_event(&TouchEvent::Move { touches: vec![b] }.into(), t0);
        assert!(effects.redraw);
        assert!((model.value() - 35.0).abs() < f64::EPSILON);

        // A second finger lands and lifts; the drag continues.
        let _ = model.handle_event(&touch_start(&[b, Point::ZERO]), t0);
        assert!(model.handle_event(&touch_end(&[b]), t0).is_empty());
        assert_eq!(model.drag_phase(), DragPhase::Dragging);

        let effects = model.handle_event(&touch_end(&[]), t0 + ms(100));
        assert_eq!(effects.commits, vec![35.0]);
        assert_eq!(model.drag_phase(), DragPhase::Idle);
    }

    #[test]
    fn test_touch_cancel_aborts_and_clears_taps() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.set_value(10.0);
        let _ = model.handle_event(&touch_start(&[point_for(&model, 70.0)]), t0);
        assert!((model.value() - 70.0).abs() < f64::EPSILON);

        let effects = model.handle_event(&TouchEvent::Cancel.into(), t0 + ms(20));
        assert!(effects.commits.is_empty());
        assert!((model.value() - 10.0).abs() < f64::EPSILON);
        assert_eq!(model.gesture().tap_count(), 0);
        assert!(!model.gesture().has_pending_double_tap());
    }

    #[test]
    fn test_entry_keys() {
        let mut model = knob();
        let t0 = Instant::now();
        // Keys are ignored while the overlay is hidden.
        assert!(model.handle_event(&key(EntryKey::Character("7".into())), t0).is_empty());

        let _ = model.open_entry();
        for c in ["4", "2", "9"] {
            let effects = model.handle_event(&key(EntryKey::Character(c.into())), t0);
            assert_eq!(effects.entry, Some(EntryChange::Edited));
        }
        let _ = model.handle_event(&key(EntryKey::Backspace), t0);
        assert_eq!(model.entry().text(), "42");

        let effects = model.handle_event(&key(EntryKey::Enter), t0);
        assert_eq!(effects.commits, vec![42.0]);
        assert_eq!(effects.entry, Some(EntryChange::Hidden));
    }

    #[test]
    fn test_entry_garbage_and_escape() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.set_value(8.0);

        let _ = model.open_entry();
        let _ = model.handle_event(&key(EntryKey::Character("abc".into())), t0);
        let effects = model.handle_event(&key(EntryKey::Enter), t0);
        assert!(effects.commits.is_empty());
        assert!((model.value() - 8.0).abs() < f64::EPSILON);

        let _ = model.open_entry();
        let _ = model.handle_event(&key(EntryKey::Character("77".into())), t0);
        let effects = model.handle_event(&key(EntryKey::Escape), t0);
        assert!(effects.commits.is_empty());
        assert!(!model.entry().is_visible());
        assert!((model.value() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_abort_cancels_pending_wheel_commit() {
        let mut model = knob();
        let t0 = Instant::now();
        let _ = model.handle_event(&wheel(1.0), t0);
        let _ = model.abort();
        assert_eq!(model.next_deadline(), None);
        assert!(model.poll_timers(t0 + ms(300)).is_empty());
        assert!((model.value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_redraws() {
        let mut model = knob();
        let effects = model.handle_event(&InputEvent::Resize, Instant::now());
        assert!(effects.redraw);
        assert!(effects.commits.is_empty());
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut model = knob();
        let t0 = Instant::now();
        let p = point_for(&model, 5.0);
        // Double-tap window closes at 500ms, wheel commit at 350ms.
        let _ = model.handle_event(&touch_start(&[p]), t0);
        let _ = model.handle_event(&touch_end(&[]), t0 + ms(10));
        let _ = model.handle_event(&touch_start(&[p]), t0 + ms(50));
        let _ = model.handle_event(&touch_end(&[]), t0 + ms(60));
        let _ = model.handle_event(&wheel(1.0), t0 + ms(100));

        let effects = model.poll_timers(t0 + ms(1000));
        assert_eq!(effects.commits, vec![6.0]);
        assert_eq!(effects.entry, Some(EntryChange::Shown));
    }
}
