use serde::{Deserialize, Serialize};

/// Closed x interval (`min..=max`) in data units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct XRange {
    pub min: f64,
    pub max: f64,
}

impl XRange {
    /// Build a range from two bounds in either order.
    ///
    /// Chemical-shift axes are usually drawn reversed, so a selection may
    /// arrive as `(high, low)`.
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Overlap of two ranges, `None` when they do not touch.
    pub fn intersect(&self, other: XRange) -> Option<XRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min <= max {
            Some(XRange { min, max })
        } else {
            None
        }
    }

    pub fn pan_by(&mut self, delta: f64) {
        self.min += delta;
        self.max += delta;
    }

    /// Zoom in/out about a pivot position (domain units).
    ///
    /// `factor > 1` zooms in, `factor < 1` zooms out.
    pub fn zoom_about(&mut self, pivot: f64, factor: f64) {
        let factor = factor.max(1e-9);
        let min = pivot + (self.min - pivot) / factor;
        let max = pivot + (self.max - pivot) / factor;
        self.min = min;
        self.max = max;
    }

    /// Shift the range so it lies inside `domain`, keeping its width when it fits.
    pub fn shift_into(&self, domain: XRange) -> XRange {
        if self.span() >= domain.span() {
            return domain;
        }
        if self.min < domain.min {
            XRange {
                min: domain.min,
                max: domain.min + self.span(),
            }
        } else if self.max > domain.max {
            XRange {
                min: domain.max - self.span(),
                max: domain.max,
            }
        } else {
            *self
        }
    }
}

/// A viewport change coming from the control layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportChangeRequest {
    /// Return to the whole domain (double-click / auto-range).
    FullReset,
    /// Explicit range selection, bounds in either order.
    RangeSelect { min: f64, max: f64 },
    /// Shift the current view by `delta` x units.
    Pan { delta: f64 },
    /// Zoom about `pivot`; `factor > 1` zooms in.
    Zoom { pivot: f64, factor: f64 },
    /// Resize or any other event without a range change.
    NoOp,
}

/// Current viewport of a view.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Full,
    Zoomed(XRange),
}

impl ViewState {
    /// Visible x range given the store domain.
    pub fn range(&self, domain: XRange) -> XRange {
        match self {
            ViewState::Full => domain,
            ViewState::Zoomed(r) => *r,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self, ViewState::Zoomed(_))
    }

    /// Single transition function for viewport requests.
    ///
    /// Requests whose resulting range is empty or non-finite leave the state
    /// unchanged. Only [`ViewportChangeRequest::FullReset`] returns to `Full`.
    pub fn apply(self, request: ViewportChangeRequest, domain: XRange) -> ViewState {
        let next = match request {
            ViewportChangeRequest::NoOp => return self,
            ViewportChangeRequest::FullReset => return ViewState::Full,
            ViewportChangeRequest::RangeSelect { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    None
                } else {
                    XRange::new(min, max).intersect(domain)
                }
            }
            ViewportChangeRequest::Pan { delta } => {
                if !delta.is_finite() || delta == 0.0 {
                    return self;
                }
                let mut r = self.range(domain);
                r.pan_by(delta);
                Some(r.shift_into(domain))
            }
            ViewportChangeRequest::Zoom { pivot, factor } => {
                if !pivot.is_finite() || !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
                    return self;
                }
                let mut r = self.range(domain);
                r.zoom_about(pivot, factor);
                r.intersect(domain)
            }
        };

        match next {
            Some(r) if r.is_valid() => ViewState::Zoomed(r),
            _ => {
                tracing::warn!(?request, "ignoring viewport request with empty range");
                self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> XRange {
        XRange::new(0.0, 999.0)
    }

    #[test]
    fn range_normalizes_reversed_bounds() {
        let r = XRange::new(10.0, -2.0);
        assert_eq!(r, XRange { min: -2.0, max: 10.0 });
        assert!(r.is_valid());
        assert!(!XRange::new(3.0, 3.0).is_valid());
    }

    #[test]
    fn range_select_clamps_to_domain() {
        let s = ViewState::Full.apply(
            ViewportChangeRequest::RangeSelect { min: 900.0, max: 1500.0 },
            domain(),
        );
        assert_eq!(s, ViewState::Zoomed(XRange::new(900.0, 999.0)));
    }

    #[test]
    fn out_of_domain_select_is_ignored() {
        let start = ViewState::Zoomed(XRange::new(10.0, 20.0));
        let s = start.apply(
            ViewportChangeRequest::RangeSelect { min: 2000.0, max: 3000.0 },
            domain(),
        );
        assert_eq!(s, start);
    }

    #[test]
    fn noop_keeps_state_and_reset_goes_full() {
        let start = ViewState::Zoomed(XRange::new(10.0, 20.0));
        assert_eq!(start.apply(ViewportChangeRequest::NoOp, domain()), start);
        assert_eq!(
            start.apply(ViewportChangeRequest::FullReset, domain()),
            ViewState::Full
        );
    }

    #[test]
    fn pan_stays_zoomed_and_inside_domain() {
        let start = ViewState::Zoomed(XRange::new(900.0, 950.0));
        let s = start.apply(ViewportChangeRequest::Pan { delta: 100.0 }, domain());
        assert_eq!(s, ViewState::Zoomed(XRange::new(949.0, 999.0)));
    }

    #[test]
    fn zoom_out_past_domain_stays_zoomed() {
        let start = ViewState::Zoomed(XRange::new(400.0, 600.0));
        let s = start.apply(
            ViewportChangeRequest::Zoom {
                pivot: 500.0,
                factor: 0.01,
            },
            domain(),
        );
        assert_eq!(s, ViewState::Zoomed(domain()));
    }

    #[test]
    fn zoom_in_about_pivot() {
        let s = ViewState::Full.apply(
            ViewportChangeRequest::Zoom {
                pivot: 0.0,
                factor: 2.0,
            },
            XRange::new(0.0, 100.0),
        );
        assert_eq!(s, ViewState::Zoomed(XRange::new(0.0, 50.0)));
    }
}
