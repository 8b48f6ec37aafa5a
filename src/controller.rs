//! Shared state between the interrupt sources and the main loop, plus the
//! decisions the loop makes over it. Nothing in here touches hardware, so
//! the whole scheduling contract is testable on the host.

/// Minutes in a week. The scheduled blow off fires on the tick *after* the
/// counter reaches this, i.e. the 10081st.
pub const WEEKLY_THRESHOLD_MINUTES: u16 = 60 * 24 * 7;

pub struct Controller {
    minutes: u16,
    manual: bool,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            minutes: 0,
            manual: false,
        }
    }

    /// One firing of the periodic timer, nominally one elapsed minute.
    pub fn tick(&mut self) {
        self.minutes = self.minutes.saturating_add(1);
    }

    /// The button was pressed. Setting an already-set request is a no-op,
    /// so bounce or a held button can't queue more than one blow off.
    pub fn manual_press(&mut self) {
        self.manual = true;
    }

    /// Minutes since boot or since the last scheduled blow off. The manual
    /// path never resets this; the weekly schedule keeps its own time.
    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    /// True once per threshold crossing. Resets the counter as a side
    /// effect, *before* the caller runs the valve sequence, so a tick that
    /// lands mid-sequence already counts toward the next interval.
    pub fn scheduled_due(&mut self) -> bool {
        if self.minutes > WEEKLY_THRESHOLD_MINUTES {
            self.minutes = 0;
            return true;
        }
        false
    }

    /// True while a manual blow off is pending. Unlike [`scheduled_due`]
    /// this does not clear the request; the caller acknowledges with
    /// [`clear_manual`] only after the sequence has finished, so a press
    /// during the sequence stays queued rather than getting lost.
    ///
    /// [`scheduled_due`]: Controller::scheduled_due
    /// [`clear_manual`]: Controller::clear_manual
    pub fn manual_due(&self) -> bool {
        self.manual
    }

    pub fn clear_manual(&mut self) {
        self.manual = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// One iteration of the prod main loop, with the valve sequence
    /// replaced by a log entry. Scheduled check first, manual second,
    /// matching the binary.
    fn poll_once(c: &mut Controller, ran: &mut Vec<&'static str, 8>) {
        if c.scheduled_due() {
            ran.push("scheduled").unwrap();
        }
        if c.manual_due() {
            ran.push("manual").unwrap();
            c.clear_manual();
        }
    }

    #[test]
    fn ticks_accumulate() {
        let mut c = Controller::new();
        for _ in 0..500 {
            c.tick();
        }
        assert_eq!(c.minutes(), 500);
        assert!(!c.scheduled_due());
        assert_eq!(c.minutes(), 500, "a due check must not disturb the count");
    }

    #[test]
    fn threshold_is_strict() {
        let mut c = Controller::new();
        for _ in 0..WEEKLY_THRESHOLD_MINUTES {
            c.tick();
        }
        assert!(!c.scheduled_due(), "10080 minutes is not yet a week over");
        c.tick();
        assert!(c.scheduled_due());
    }

    #[test]
    fn one_blow_off_per_week_counter_restarts() {
        let mut c = Controller::new();
        let mut ran: Vec<&'static str, 8> = Vec::new();
        for _ in 0..10081 {
            c.tick();
            poll_once(&mut c, &mut ran);
        }
        assert_eq!(ran.as_slice(), ["scheduled"]);
        assert_eq!(c.minutes(), 0);
        // A tick that fired while the valve was open counts toward the
        // next interval.
        c.tick();
        assert_eq!(c.minutes(), 1);
    }

    #[test]
    fn manual_press_leaves_schedule_alone() {
        let mut c = Controller::new();
        let mut ran: Vec<&'static str, 8> = Vec::new();
        for _ in 0..500 {
            c.tick();
        }
        c.manual_press();
        poll_once(&mut c, &mut ran);
        assert_eq!(ran.as_slice(), ["manual"]);
        assert_eq!(c.minutes(), 500);
        assert!(!c.manual_due());
    }

    #[test]
    fn repeated_press_before_service_runs_once() {
        let mut c = Controller::new();
        let mut ran: Vec<&'static str, 8> = Vec::new();
        c.manual_press();
        c.manual_press();
        c.manual_press();
        poll_once(&mut c, &mut ran);
        poll_once(&mut c, &mut ran);
        assert_eq!(ran.as_slice(), ["manual"]);
    }

    #[test]
    fn press_after_clear_fires_again() {
        let mut c = Controller::new();
        let mut ran: Vec<&'static str, 8> = Vec::new();
        c.manual_press();
        poll_once(&mut c, &mut ran);
        c.manual_press();
        poll_once(&mut c, &mut ran);
        assert_eq!(ran.as_slice(), ["manual", "manual"]);
    }

    #[test]
    fn both_due_runs_scheduled_first() {
        let mut c = Controller::new();
        let mut ran: Vec<&'static str, 8> = Vec::new();
        for _ in 0..10081 {
            c.tick();
        }
        c.manual_press();
        poll_once(&mut c, &mut ran);
        assert_eq!(ran.as_slice(), ["scheduled", "manual"]);
    }
}
