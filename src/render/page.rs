use std::fmt::Write as _;

use super::layout::Layout;
use super::svg::svg_scene;
use crate::flow::{FlowMap, Reading};
use crate::poller::Snapshot;

/// Reload/resize glue. Reloads on the polling cadence and, on resize,
/// after a short debounce, so the next request carries the new
/// viewport dimensions.
const RELOAD_SCRIPT: &str = r##"
const dims = () => '?width=' + window.innerWidth + '&height=' + window.innerHeight;
let debounce;
window.addEventListener('resize', () => {
  clearTimeout(debounce);
  debounce = setTimeout(() => location.replace(location.pathname + dims()), 100);
});
setTimeout(() => location.replace(location.pathname + dims()), __REFRESH_MS__);
"##;

const STYLE: &str = r##"
body { margin: 0; background: #0b1120; color: #e2e8f0; font-family: system-ui, sans-serif; }
header { display: flex; align-items: baseline; gap: 1rem; padding: 0.75rem 1.25rem; }
header h1 { font-size: 1.1rem; margin: 0; }
.timestamp { margin-left: auto; color: #94a3b8; font-variant-numeric: tabular-nums; }
.energy-flow { display: flex; justify-content: center; }
.node-label { font-size: 0.8rem; font-weight: 600; }
.node-value { font-size: 0.75rem; }
"##;

/// The dashboard page: a dark shell around the SVG scene, with the
/// link status and the reading's timestamp in the header. Rebuilt in
/// full on every request.
pub fn dashboard_page(snapshot: &Snapshot, layout: &Layout, refresh_seconds: u64) -> String {
    let fallback = Reading::default();
    let reading = snapshot.reading.as_ref();
    let flows = FlowMap::derive(reading.unwrap_or(&fallback));
    let scene = svg_scene(&flows, reading, layout);

    let timestamp = match (reading, snapshot.received_at) {
        (Some(r), Some(at)) => r.display_timestamp(at).format("%H:%M:%S").to_string(),
        _ => "--:--:--".to_string(),
    };

    let script = RELOAD_SCRIPT.replace("__REFRESH_MS__", &(refresh_seconds * 1000).to_string());

    let mut page = String::new();
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Energy Flow Dashboard</title>
<style>{STYLE}</style>
</head>
<body>
<header>
<h1>Energy Flow</h1>
<span id="system-status" style="color: {status_color}">{status_label}</span>
<span id="timestamp" class="timestamp">{timestamp}</span>
</header>
<main class="energy-flow">{scene}</main>
<script>{script}</script>
</body>
</html>
"#,
        status_color = snapshot.status.color(),
        status_label = snapshot.status.label(),
    );
    page
}
