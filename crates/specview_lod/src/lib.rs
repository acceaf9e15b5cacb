//! specview_lod
//!
//! Viewport-driven level-of-detail reduction for large collections of 1-D
//! spectra sharing one x axis.
//!
//! Design goals:
//! - Treat the dataset as immutable and shareable across threads
//! - Keep every request a pure function of (store, viewport, budget, transform)
//! - Preserve peaks and sharp transitions when zoomed in, via curvature scoring

mod error;
mod reducer;
mod session;
mod store;
mod transform;
mod view;

pub mod config;
pub mod curvature;
pub mod lod;

pub use config::{ReducerConfig, Strategy};
pub use error::{LodError, Result};
pub use lod::{decimate_adaptive, decimate_uniform, AdaptiveParams};
pub use reducer::{ReducedSeries, ReductionStrategy, ViewportReducer};
pub use session::ViewSession;
pub use store::SampleStore;
pub use transform::{DisplayTransform, RenderFrame, Trace};
pub use view::{ViewState, ViewportChangeRequest, XRange};

/// Common imports for engine users.
pub mod prelude {
    pub use crate::config::{ReducerConfig, Strategy};
    pub use crate::error::{LodError, Result};
    pub use crate::reducer::{ReducedSeries, ReductionStrategy, ViewportReducer};
    pub use crate::session::ViewSession;
    pub use crate::store::SampleStore;
    pub use crate::transform::{DisplayTransform, RenderFrame, Trace};
    pub use crate::view::{ViewState, ViewportChangeRequest, XRange};
}
