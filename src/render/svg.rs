use std::fmt::Write as _;
use strum::IntoEnumIterator;

use super::layout::Layout;
use crate::flow::{format, FlowMap, Node, Reading};
use crate::geometry::{curved_between, point_on_circle, CURVE_INTENSITY};

const FLOW_STROKE_WIDTH: f64 = 2.0;
const FLOW_DOT_RADIUS: f64 = 4.0;

/// Build the full SVG scene for one cycle: twelve always-drawn flow
/// curves, a dot per curve (animated when active, opacity 0 when not),
/// and the four node circles with their readouts on top.
///
/// The scene is rebuilt from scratch every time; a degenerate viewport
/// yields an empty document instead of an error.
pub fn svg_scene(flows: &FlowMap, reading: Option<&Reading>, layout: &Layout) -> String {
    if layout.is_degenerate() {
        return String::new();
    }

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = layout.width,
        h = layout.height,
    );

    // Flow layer first so the node circles sit on top of the curves.
    for (edge_id, edge) in flows.iter() {
        let from_center = layout.center(edge.from);
        let to_center = layout.center(edge.to);
        let a = point_on_circle(from_center, to_center, layout.node_radius);
        let b = point_on_circle(to_center, from_center, layout.node_radius);
        let path_data = curved_between(a, b, CURVE_INTENSITY).to_path_data();

        let id = edge_id.element_id();
        let color = edge.from.color();

        let _ = write!(
            svg,
            r#"<path id="{id}" d="{path_data}" class="flow-path" fill="none" stroke="{color}" stroke-width="{FLOW_STROKE_WIDTH}"/>"#,
        );

        if edge.active {
            let _ = write!(
                svg,
                r##"<circle r="{FLOW_DOT_RADIUS}" fill="{color}" class="flow-dot" opacity="1"><animateMotion dur="{dur:.2}s" repeatCount="indefinite"><mpath href="#{id}"/></animateMotion></circle>"##,
                dur = edge.period_seconds,
            );
        } else {
            // Invisible placeholder keeps the scene structure identical
            // whether or not the edge carries flow.
            let _ = write!(
                svg,
                r#"<circle r="{FLOW_DOT_RADIUS}" fill="{color}" class="flow-dot" opacity="0"/>"#,
            );
        }
    }

    for node in Node::iter() {
        write_node(&mut svg, node, reading, layout);
    }

    svg.push_str("</svg>");
    svg
}

fn write_node(svg: &mut String, node: Node, reading: Option<&Reading>, layout: &Layout) {
    let center = layout.center(node);
    let color = node.color();
    let label = match node {
        Node::Solar => "Solar",
        Node::Battery => "Battery",
        Node::House => "House",
        Node::Grid => "Grid",
    };

    let value = match (node, reading) {
        (_, None) => "--".to_string(),
        (Node::Solar, Some(r)) => format!("{} W", format::watts(r.solar_production)),
        (Node::House, Some(r)) => format!("{} W", format::watts(r.house_consumption)),
        (Node::Grid, Some(r)) => format!("{} W", format::format_grid_power(r.grid_power)),
        (Node::Battery, Some(r)) => format!("{} W", format::format_battery_power(r.battery_power)),
    };

    let _ = write!(
        svg,
        r##"<g class="node node-{slug}"><circle cx="{cx:.1}" cy="{cy:.1}" r="{r}" fill="#0f172a" stroke="{color}" stroke-width="3"/><text x="{cx:.1}" y="{ly:.1}" text-anchor="middle" class="node-label" fill="{color}">{label}</text><text x="{cx:.1}" y="{vy:.1}" text-anchor="middle" class="node-value" fill="#e2e8f0">{value}</text>"##,
        slug = node.slug(),
        cx = center.x,
        cy = center.y,
        r = layout.node_radius,
        ly = center.y - 8.0,
        vy = center.y + 14.0,
    );

    // The battery node carries a state-of-charge gauge under its circle.
    if node == Node::Battery {
        if let Some(r) = reading {
            let level = r.battery_level.clamp(0.0, 100.0);
            let bar_w = layout.node_radius * 1.5;
            let bar_x = center.x - bar_w / 2.0;
            let bar_y = center.y + layout.node_radius + 10.0;
            let _ = write!(
                svg,
                r##"<rect x="{bar_x:.1}" y="{bar_y:.1}" width="{bar_w:.1}" height="6" rx="3" fill="#1e293b"/><rect id="battery-fill" x="{bar_x:.1}" y="{bar_y:.1}" width="{fill_w:.1}" height="6" rx="3" fill="{color}"/><text x="{cx:.1}" y="{ty:.1}" text-anchor="middle" class="node-value" fill="#e2e8f0">{level:.0}%</text>"##,
                fill_w = bar_w * level / 100.0,
                cx = center.x,
                ty = bar_y + 20.0,
            );
        }
    }

    svg.push_str("</g>");
}
