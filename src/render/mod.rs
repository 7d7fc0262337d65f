/// Rendering surface
///
/// Thin presentation layer: consumes the engine's output plus a layout
/// and emits the SVG scene and the dashboard page. All flow decisions
/// happen upstream; nothing here inspects a reading beyond printing
/// its values.

pub mod layout;
pub mod page;
pub mod svg;

pub use layout::{Layout, MOBILE_BREAKPOINT_PX};
pub use page::dashboard_page;
pub use svg::svg_scene;
