use std::collections::HashMap;
use std::fmt::Write;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        *self.step_map.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.steps.push(StepTiming { name, duration });
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every step recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn summary(&self) -> String {
        let total = self.total_duration();
        let mut out = String::new();
        let _ = writeln!(out, "{:-<60}", "");
        for step in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "{:<30} {:>12.3}ms ({:>5.1}%)",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        let _ = writeln!(out, "{:-<60}", "");
        let _ = write!(out, "{:<30} {:>12.3}ms", "Total", total.as_secs_f64() * 1000.0);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_steps_accumulate() {
        let mut timings = PipelineTimings::new();
        timings.add_step("resize", Duration::from_millis(4));
        timings.add_step("resize", Duration::from_millis(6));

        assert_eq!(timings.steps().len(), 2);
        assert_eq!(timings.get_step("resize"), Some(Duration::from_millis(10)));
        assert_eq!(timings.get_step("decode"), None);
    }

    #[test]
    fn summary_lists_every_step() {
        let mut timings = PipelineTimings::new();
        timings.add_step("decode", Duration::from_millis(1));
        timings.add_step("normalize", Duration::from_millis(3));

        let summary = timings.summary();
        assert!(summary.contains("decode"));
        assert!(summary.contains("normalize"));
        assert!(summary.contains("75.0%"));
        assert!(summary.ends_with("4.000ms"));
    }
}
