// ABOUTME: Aggregates per-layer daemon progress into layer and overall percentages.
// ABOUTME: Layers are weighted equally since sizes are not known up front.

use crate::types::Percent;
use std::collections::HashMap;

/// Percentages to report after observing one progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressUpdate {
    pub layer: Option<Percent>,
    pub overall: Option<Percent>,
}

#[derive(Debug, Default, Clone, Copy)]
struct LayerState {
    current: u64,
    total: u64,
    done: bool,
}

impl LayerState {
    fn fraction(&self) -> f64 {
        if self.done {
            1.0
        } else if self.total == 0 {
            0.0
        } else {
            (self.current.min(self.total) as f64) / (self.total as f64)
        }
    }
}

#[derive(Debug, Default)]
pub struct LayerTracker {
    layers: HashMap<String, LayerState>,
}

impl LayerTracker {
    /// Feed one status message for layer `id`.
    ///
    /// `current`/`total` come from the daemon's progress detail and may be absent.
    /// Downloading and extracting both report layer progress; a new phase
    /// starts the layer bar from zero again.
    pub fn observe(
        &mut self,
        id: &str,
        status: &str,
        current: Option<i64>,
        total: Option<i64>,
    ) -> ProgressUpdate {
        let layer = self.layers.entry(id.to_string()).or_default();

        let layer_pct = match status {
            "Pull complete" | "Already exists" => {
                layer.done = true;
                Some(Percent::FULL)
            }
            "Download complete" | "Verifying Checksum" => {
                if layer.total > 0 {
                    layer.current = layer.total;
                }
                Some(Percent::FULL)
            }
            "Downloading" => match (current, total) {
                (Some(current), Some(total)) if total > 0 => {
                    layer.current = current.max(0) as u64;
                    layer.total = total as u64;
                    Some(Percent::of(layer.current, layer.total))
                }
                _ => None,
            },
            "Extracting" => match (current, total) {
                (Some(current), Some(total)) if total > 0 => {
                    Some(Percent::of(current.max(0) as u64, total as u64))
                }
                _ => None,
            },
            _ => None,
        };

        let overall = match layer_pct {
            Some(_) => Some(self.overall()),
            // A newly announced layer lowers the overall figure
            None if status == "Pulling fs layer" => Some(self.overall()),
            None => None,
        };

        ProgressUpdate {
            layer: layer_pct,
            overall,
        }
    }

    /// Mean completion across every layer seen so far.
    pub fn overall(&self) -> Percent {
        if self.layers.is_empty() {
            return Percent::ZERO;
        }
        let sum: f64 = self.layers.values().map(LayerState::fraction).sum();
        Percent::clamped(((sum / self.layers.len() as f64) * 100.0).floor() as i64)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
