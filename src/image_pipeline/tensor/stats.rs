/// Summary of a tensor's values, used to sanity-check model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TensorStats {
    pub len: usize,
    /// Smallest finite value, `None` when there is none.
    pub min: Option<f32>,
    pub max: Option<f32>,
    /// Mean of the finite values, accumulated in `f64`.
    pub mean: Option<f64>,
    pub nan_count: usize,
    pub inf_count: usize,
}

impl TensorStats {
    pub fn compute(values: &[f32]) -> Self {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut finite = 0usize;
        let mut nan_count = 0usize;
        let mut inf_count = 0usize;

        for &v in values {
            if v.is_nan() {
                nan_count += 1;
                continue;
            }
            if v.is_infinite() {
                inf_count += 1;
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
            finite += 1;
        }

        let (min, max, mean) = if finite == 0 {
            (None, None, None)
        } else {
            (Some(min), Some(max), Some(sum / finite as f64))
        };

        Self {
            len: values.len(),
            min,
            max,
            mean,
            nan_count,
            inf_count,
        }
    }

    pub fn has_non_finite(&self) -> bool {
        self.nan_count > 0 || self.inf_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values() {
        let stats = TensorStats::compute(&[1.0, -2.0, 4.0]);
        assert_eq!(stats.len, 3);
        assert_eq!(stats.min, Some(-2.0));
        assert_eq!(stats.max, Some(4.0));
        assert_eq!(stats.mean, Some(1.0));
        assert!(!stats.has_non_finite());
    }

    #[test]
    fn skips_non_finite_values() {
        let stats = TensorStats::compute(&[f32::NAN, 2.0, f32::INFINITY, f32::NEG_INFINITY]);
        assert_eq!(stats.nan_count, 1);
        assert_eq!(stats.inf_count, 2);
        assert_eq!(stats.min, Some(2.0));
        assert_eq!(stats.mean, Some(2.0));
        assert!(stats.has_non_finite());
    }

    #[test]
    fn empty_input() {
        let stats = TensorStats::compute(&[]);
        assert_eq!(stats.len, 0);
        assert_eq!(stats.min, None);
        assert_eq!(stats.mean, None);
    }
}
