use serde::Serialize;
use std::time::Instant;

/// Timed stages of [`crate::PrimitiveDetector`], in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Cells,
    Grow,
    Merge,
    Refine,
    Extract,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Wall-clock breakdown of one detector run. `Merge` is absent when merging
/// is disabled.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Close `stage` at the current instant and return its duration.
    pub fn finish(&mut self, stage: Stage, start: Instant) -> f64 {
        let elapsed_ms = elapsed_ms(start);
        self.stages.push(StageTiming { stage, elapsed_ms });
        elapsed_ms
    }

    pub fn stage_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }
}

#[inline]
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_serialize_by_name() {
        let mut timings = TimingBreakdown::default();
        timings.stages.push(StageTiming {
            stage: Stage::Refine,
            elapsed_ms: 1.5,
        });
        timings.stages.push(StageTiming {
            stage: Stage::Extract,
            elapsed_ms: 0.5,
        });
        assert_eq!(timings.stage_ms(Stage::Refine), Some(1.5));
        assert_eq!(timings.stage_ms(Stage::Merge), None);
        let json = serde_json::to_value(&timings).unwrap();
        assert_eq!(json["stages"][0]["stage"], "refine");
        assert_eq!(json["stages"][1]["elapsedMs"], 0.5);
    }
}
