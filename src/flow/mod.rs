/// Flow Decision Engine
///
/// This module contains the core transform of the dashboard: a pure,
/// stateless mapping from one inverter reading to the set of active
/// directed flows between the four fixed nodes, with per-flow power and
/// animation period. It is re-evaluated from scratch on every polling
/// cycle and never touches the rendering surface.

pub mod edge;
pub mod engine;
pub mod format;
pub mod reading;

pub use edge::{EdgeFlow, EdgeId, FlowMap, Node};
pub use engine::{period_seconds, IDLE_PERIOD_S, MAX_PERIOD_S, MIN_PERIOD_S};
pub use reading::Reading;
