use serde::Serialize;
use std::fmt;
use strum::{Display, EnumIter};

use super::engine;
use super::reading::Reading;

/// The four fixed visual nodes of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Node {
    Solar,
    Battery,
    House,
    Grid,
}

impl Node {
    /// Short slug used in SVG element ids.
    pub fn slug(&self) -> &'static str {
        match self {
            Node::Solar => "solar",
            Node::Battery => "batt",
            Node::House => "home",
            Node::Grid => "grid",
        }
    }

    /// Stroke color of flows leaving this node.
    pub fn color(&self) -> &'static str {
        match self {
            Node::Solar => "#f59e0b",
            Node::Battery => "#ef4444",
            Node::House => "#06b6d4",
            Node::Grid => "#8b5cf6",
        }
    }
}

/// One of the twelve fixed directed pairs among the four nodes.
///
/// The discriminant of each variant is its slot in [`EdgeId::ALL`]'s
/// draw order, so a flow-map lookup is a plain index, never a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeId {
    SolarBattery,
    SolarHouse,
    SolarGrid,
    GridSolar,
    GridHouse,
    GridBattery,
    HouseSolar,
    HouseGrid,
    HouseBattery,
    BatterySolar,
    BatteryHouse,
    BatteryGrid,
}

impl EdgeId {
    /// All twelve edges, in stable draw order. The same set exists on
    /// every render; only per-edge state varies.
    pub const ALL: [EdgeId; 12] = [
        EdgeId::SolarBattery,
        EdgeId::SolarHouse,
        EdgeId::SolarGrid,
        EdgeId::GridSolar,
        EdgeId::GridHouse,
        EdgeId::GridBattery,
        EdgeId::HouseSolar,
        EdgeId::HouseGrid,
        EdgeId::HouseBattery,
        EdgeId::BatterySolar,
        EdgeId::BatteryHouse,
        EdgeId::BatteryGrid,
    ];

    pub const fn from_node(self) -> Node {
        match self {
            EdgeId::SolarBattery | EdgeId::SolarHouse | EdgeId::SolarGrid => Node::Solar,
            EdgeId::GridSolar | EdgeId::GridHouse | EdgeId::GridBattery => Node::Grid,
            EdgeId::HouseSolar | EdgeId::HouseGrid | EdgeId::HouseBattery => Node::House,
            EdgeId::BatterySolar | EdgeId::BatteryHouse | EdgeId::BatteryGrid => Node::Battery,
        }
    }

    pub const fn to_node(self) -> Node {
        match self {
            EdgeId::GridSolar | EdgeId::HouseSolar | EdgeId::BatterySolar => Node::Solar,
            EdgeId::SolarBattery | EdgeId::GridBattery | EdgeId::HouseBattery => Node::Battery,
            EdgeId::SolarHouse | EdgeId::GridHouse | EdgeId::BatteryHouse => Node::House,
            EdgeId::SolarGrid | EdgeId::HouseGrid | EdgeId::BatteryGrid => Node::Grid,
        }
    }

    /// SVG element id, e.g. `p-solar-batt`.
    pub fn element_id(&self) -> String {
        format!("p-{}-{}", self.from_node().slug(), self.to_node().slug())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from_node(), self.to_node())
    }
}

/// Per-edge state for one polling cycle.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeFlow {
    pub from: Node,
    pub to: Node,
    pub active: bool,
    /// Instantaneous power along this edge in W; 0 when inactive.
    pub power_w: f64,
    /// Looping animation period for the flow dot.
    pub period_seconds: f64,
}

/// The engine's output: state for all twelve edges of one reading.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FlowMap {
    edges: [EdgeFlow; 12],
}

impl FlowMap {
    /// Evaluate the activation rules, per-edge power and animation
    /// period for one reading. Pure and idempotent.
    pub fn derive(reading: &Reading) -> Self {
        let edges = EdgeId::ALL.map(|id| {
            let active = engine::edge_active(id, reading);
            let power_w = if active { engine::edge_power(id, reading) } else { 0.0 };
            EdgeFlow {
                from: id.from_node(),
                to: id.to_node(),
                active,
                power_w,
                period_seconds: engine::period_seconds(power_w),
            }
        });
        Self { edges }
    }

    /// Edge states in draw order, paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &EdgeFlow)> {
        EdgeId::ALL.into_iter().zip(self.edges.iter())
    }

    /// Total lookup: every id has a slot on every derivation.
    pub fn get(&self, edge: EdgeId) -> &EdgeFlow {
        &self.edges[edge as usize]
    }

    pub fn active_edges(&self) -> impl Iterator<Item = &EdgeFlow> {
        self.edges.iter().filter(|e| e.active)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
