use std::{fmt::Write, iter};

use serde::Serialize;

use rebound_core::prelude::*;
use rebound_model::{DelayMs, Step};

/// One planned attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub step: Step,
    /// Delay drawn for this step.
    pub delay_ms: DelayMs,
    /// Delay the step would produce without jitter.
    pub ceiling_ms: DelayMs,
}

/// Draws one delay per step, starting at `backoff`'s current step.
pub fn build_plan<J>(backoff: ExponentialBackoff<J>, steps: Step) -> Vec<PlanEntry>
where
    J: JitterSource + Clone,
{
    iter::successors(Some(backoff), |b| Some(b.next()))
        .take(steps as usize)
        .map(|b| PlanEntry {
            step: b.step(),
            delay_ms: b.delay_ms(),
            ceiling_ms: b.ceiling_ms(),
        })
        .collect()
}

pub fn total_wait_ms(plan: &[PlanEntry]) -> DelayMs {
    plan.iter()
        .fold(0, |acc: DelayMs, e| acc.saturating_add(e.delay_ms))
}

pub fn render_text(plan: &[PlanEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:>12}  {:>12}", "step", "delay_ms", "ceiling_ms");
    for e in plan {
        let _ = writeln!(out, "{:>5}  {:>12}  {:>12}", e.step, e.delay_ms, e.ceiling_ms);
    }
    let _ = writeln!(out, "total wait: {}ms", total_wait_ms(plan));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebound_model::ExponentialOptions;

    #[test]
    fn deterministic_plan() {
        let backoff = ExponentialBackoff::new(ExponentialOptions::deterministic(100, 10_000));
        let plan = build_plan(backoff, 8);

        let delays: Vec<DelayMs> = plan.iter().map(|e| e.delay_ms).collect();
        assert_eq!(delays, vec![100, 200, 400, 800, 1_600, 3_200, 6_400, 10_000]);
        assert!(plan.iter().all(|e| e.delay_ms == e.ceiling_ms));
        assert_eq!(plan.last().map(|e| e.step), Some(7));
    }

    #[test]
    fn seeded_plans_repeat() {
        let options = ExponentialOptions::new(10, 3.0, 60_000);
        let a = build_plan(ExponentialBackoff::new(options).with_jitter(SeededJitter::new(9)), 12);
        let b = build_plan(ExponentialBackoff::new(options).with_jitter(SeededJitter::new(9)), 12);

        assert_eq!(a, b);
        assert!(a.iter().all(|e| e.delay_ms <= e.ceiling_ms));
        assert_eq!(a[0].delay_ms, 10);
    }

    #[test]
    fn total_saturates() {
        let plan = [
            PlanEntry { step: 0, delay_ms: DelayMs::MAX, ceiling_ms: DelayMs::MAX },
            PlanEntry { step: 1, delay_ms: 5, ceiling_ms: 5 },
        ];
        assert_eq!(total_wait_ms(&plan), DelayMs::MAX);
    }

    #[test]
    fn text_lists_every_step() {
        let backoff = ExponentialBackoff::new(ExponentialOptions::deterministic(100, 300));
        let text = render_text(&build_plan(backoff, 3));

        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with("total wait: 600ms\n"), "{text}");
    }

    #[test]
    fn json_uses_camel_case() {
        let entry = PlanEntry { step: 2, delay_ms: 400, ceiling_ms: 400 };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"step":2,"delayMs":400,"ceilingMs":400}"#);
    }
}
