//! Randomized delay schedules for the test phase.

use rand::Rng;
use rand::seq::SliceRandom;

/// The ordered list of expected delays, one per test trial.
#[derive(Debug, Clone, PartialEq)]
pub struct DelaySchedule {
    delays: Vec<f64>,
}

impl DelaySchedule {
    /// Replicates `levels` `repetitions` times and shuffles the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use tonetime::DelaySchedule;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let schedule = DelaySchedule::shuffled(&[0.5, 1.0, 1.5], 4, &mut rng);
    /// assert_eq!(schedule.len(), 12);
    /// ```
    pub fn shuffled<R: Rng + ?Sized>(levels: &[f64], repetitions: usize, rng: &mut R) -> Self {
        let mut delays: Vec<f64> = std::iter::repeat(levels)
            .take(repetitions)
            .flatten()
            .copied()
            .collect();
        delays.shuffle(rng);
        Self { delays }
    }

    /// Uses `delays` exactly as given.
    pub fn fixed(delays: Vec<f64>) -> Self {
        Self { delays }
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.delays
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.delays.iter()
    }
}

impl IntoIterator for DelaySchedule {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.delays.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn count(schedule: &DelaySchedule, level: f64) -> usize {
        schedule.iter().filter(|&&d| d == level).count()
    }

    #[test]
    fn test_reference_schedule_is_balanced() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let schedule = DelaySchedule::shuffled(&[0.5, 1.0, 1.5], 4, &mut rng);
            assert_eq!(schedule.len(), 12);
            assert_eq!(count(&schedule, 0.5), 4);
            assert_eq!(count(&schedule, 1.0), 4);
            assert_eq!(count(&schedule, 1.5), 4);
        }
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = DelaySchedule::shuffled(&[0.5, 1.0, 1.5], 4, &mut StdRng::seed_from_u64(42));
        let b = DelaySchedule::shuffled(&[0.5, 1.0, 1.5], 4, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_changes_order() {
        let ordered: Vec<f64> = [0.5, 1.0, 1.5].repeat(4);
        let differs = (0..20).any(|seed| {
            let schedule =
                DelaySchedule::shuffled(&[0.5, 1.0, 1.5], 4, &mut StdRng::seed_from_u64(seed));
            schedule.as_slice() != ordered.as_slice()
        });
        assert!(differs);
    }

    #[test]
    fn test_zero_repetitions_is_empty() {
        let schedule = DelaySchedule::shuffled(&[0.5, 1.0], 0, &mut StdRng::seed_from_u64(1));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_into_iter_consumes_each_delay_once() {
        let schedule = DelaySchedule::fixed(vec![1.5, 0.5, 1.0]);
        let consumed: Vec<f64> = schedule.into_iter().collect();
        assert_eq!(consumed, vec![1.5, 0.5, 1.0]);
    }
}
