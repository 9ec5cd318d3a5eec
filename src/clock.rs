//! Dual-frame clock: absolute time and rate-integrated virtual time.

/// A point in time, absolute or virtual. The unit is up to the caller
/// (seconds, samples, ms) but must stay the same within one [`Clock`].
pub type TimeStamp = f64;

/// A length of time in the same unit as [`TimeStamp`].
pub type TimeInterval = f64;

/// Integration rate mapping absolute time to virtual time.
pub type Rate = f64;

/// The current interval of a timeline, in both time frames.
///
/// `t1..t2` is the absolute interval, `t1r..t2r` the matching virtual
/// interval. Every operation returns a new clock and keeps
/// `t2 == t1 + dt` and `t2r == t1r + rate * dt`.
///
/// # Preconditions
///
/// `rate` must be non-zero for [`rel2abs`](Self::rel2abs) and
/// [`jump_to_rel`](Self::jump_to_rel), and `dt` is expected to be positive.
/// Neither is checked: a zero rate yields non-finite values.
///
/// ```
/// use takt::Clock;
///
/// let c = Clock::new(1.0, 10.0, 0.0).step(1.0);
/// assert_eq!((c.t1, c.t2, c.t1r, c.t2r), (10.0, 20.0, 10.0, 20.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    /// Absolute duration of one interval
    pub dt: TimeInterval,
    /// Absolute interval start
    pub t1: TimeStamp,
    /// Absolute interval end
    pub t2: TimeStamp,
    /// Virtual interval start
    pub t1r: TimeStamp,
    /// Virtual interval end
    pub t2r: TimeStamp,
    /// Rate used to produce the current interval
    pub rate: Rate,
}

impl Clock {
    /// Create a clock whose first interval starts at absolute time `t`
    /// and virtual time 0.
    pub fn new(rate: Rate, dt: TimeInterval, t: TimeStamp) -> Self {
        Self {
            dt,
            t1: t,
            t2: t + dt,
            t1r: 0.0,
            t2r: rate * dt,
            rate,
        }
    }

    /// Advance by one interval, integrating the new interval at `rate`.
    pub fn step(self, rate: Rate) -> Self {
        Self {
            dt: self.dt,
            t1: self.t2,
            t2: self.t2 + self.dt,
            t1r: self.t2r,
            t2r: self.t2r + rate * self.dt,
            rate,
        }
    }

    /// Advance by one interval at the current rate.
    #[inline]
    pub fn tick(self) -> Self {
        self.step(self.rate)
    }

    /// Re-anchor the interval so it starts at absolute time `t`.
    ///
    /// Virtual time moves by the same shift scaled by `rate`.
    pub fn jump_to(self, rate: Rate, t: TimeStamp) -> Self {
        self.shift(rate, t - self.t1)
    }

    /// Re-anchor the interval so it starts at virtual time `tr`.
    ///
    /// `rate` must be non-zero.
    pub fn jump_to_rel(self, rate: Rate, tr: TimeStamp) -> Self {
        self.shift(rate, (tr - self.t1r) / rate)
    }

    fn shift(self, rate: Rate, by: TimeInterval) -> Self {
        let t1 = self.t1 + by;
        let t1r = self.t1r + by * rate;
        Self {
            dt: self.dt,
            t1,
            t2: t1 + self.dt,
            t1r,
            t2r: t1r + rate * self.dt,
            rate,
        }
    }

    /// Align this clock's interval start with `reference` in both frames.
    ///
    /// `dt` and `rate` are kept, so the interval end is recomputed from them.
    pub fn sync(self, reference: &Clock) -> Self {
        Self {
            dt: self.dt,
            t1: reference.t1,
            t2: reference.t1 + self.dt,
            t1r: reference.t1r,
            t2r: reference.t1r + self.rate * self.dt,
            rate: self.rate,
        }
    }

    /// Convert a virtual time into absolute time.
    #[inline]
    pub fn rel2abs(&self, rel: TimeStamp) -> TimeStamp {
        self.t1 + (rel - self.t1r) / self.rate
    }

    /// Convert an absolute time into virtual time.
    #[inline]
    pub fn abs2rel(&self, t: TimeStamp) -> TimeStamp {
        self.t1r + self.rate * (t - self.t1)
    }

    /// Absolute start of the current interval.
    #[inline]
    pub fn now(&self) -> TimeStamp {
        self.t1
    }

    /// Virtual start of the current interval.
    #[inline]
    pub fn now_rel(&self) -> TimeStamp {
        self.t1r
    }

    /// Whether absolute time `t` falls inside `[t1, t2)`.
    #[inline]
    pub fn contains(&self, t: TimeStamp) -> bool {
        self.t1 <= t && t < self.t2
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }
}

/// Shorthand for [`Clock::new`].
#[inline]
pub fn clock(rate: Rate, dt: TimeInterval, t: TimeStamp) -> Clock {
    Clock::new(rate, dt, t)
}
