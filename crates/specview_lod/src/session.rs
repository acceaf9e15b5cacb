use crate::config::ReducerConfig;
use crate::error::{LodError, Result};
use crate::reducer::ViewportReducer;
use crate::transform::{DisplayTransform, RenderFrame};
use crate::view::{ViewState, ViewportChangeRequest};

/// Per-view interaction state: viewport, display transform and point budget.
///
/// One session per open view. The session never owns the store; it is handed
/// a reducer on each render.
#[derive(Clone, Debug)]
pub struct ViewSession {
    state: ViewState,
    transform: DisplayTransform,
    budget: usize,
    last_good: Option<ViewState>,
}

impl ViewSession {
    pub fn new(config: &ReducerConfig) -> Self {
        Self {
            state: ViewState::Full,
            transform: DisplayTransform::default(),
            budget: config.clamp_budget(config.target_points),
            last_good: None,
        }
    }

    pub fn with_transform(mut self, transform: DisplayTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn transform(&self) -> &DisplayTransform {
        &self.transform
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Apply a viewport request. Returns whether the viewport changed.
    pub fn handle(&mut self, request: ViewportChangeRequest, reducer: &ViewportReducer) -> bool {
        let next = self.state.apply(request, reducer.store().domain());
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn set_transform(&mut self, transform: DisplayTransform) -> Result<()> {
        transform.validate()?;
        self.transform = transform;
        Ok(())
    }

    pub fn toggle_fill(&mut self) {
        self.transform.fill_enabled = !self.transform.fill_enabled;
    }

    /// Set the point budget, clamped to the configured bounds.
    pub fn set_budget(&mut self, requested: usize, config: &ReducerConfig) {
        self.budget = config.clamp_budget(requested);
    }

    /// Render the current viewport.
    ///
    /// If the viewport holds no samples the session falls back to the last
    /// viewport that rendered, then to the full domain.
    pub fn render(&mut self, reducer: &ViewportReducer) -> Result<RenderFrame> {
        let domain = reducer.store().domain();
        match reducer.render(self.state.range(domain), self.budget, &self.transform) {
            Ok(frame) => {
                self.last_good = Some(self.state);
                Ok(frame)
            }
            Err(LodError::EmptyRange { min, max }) => {
                let fallback = match self.last_good {
                    Some(s) if s != self.state => s,
                    _ => ViewState::Full,
                };
                tracing::warn!(min, max, ?fallback, "viewport holds no samples, falling back");
                let frame = reducer.render(fallback.range(domain), self.budget, &self.transform)?;
                self.state = fallback;
                self.last_good = Some(fallback);
                Ok(frame)
            }
            Err(e) => Err(e),
        }
    }
}
