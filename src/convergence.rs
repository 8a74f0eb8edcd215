/// Tracks each point's discrete decision between passes.
///
/// The decision is a hard label or a dominant fuzzy label. A point that has
/// never been assigned counts as changed on its first decision.
#[derive(Debug, Clone)]
pub struct ConvergenceDetector {
    previous: Vec<Option<usize>>,
}

impl ConvergenceDetector {
    /// Create a detector for `n_points` unassigned points
    pub fn new(n_points: usize) -> Self {
        Self {
            previous: vec![None; n_points],
        }
    }

    /// Record the decisions of the current pass.
    ///
    /// Returns the number of points whose decision differs from the previous
    /// pass. The current decisions become the new baseline.
    pub fn observe(&mut self, current: &[usize]) -> usize {
        debug_assert_eq!(current.len(), self.previous.len());

        let mut changed = 0;
        for (prev, &label) in self.previous.iter_mut().zip(current) {
            if *prev != Some(label) {
                *prev = Some(label);
                changed += 1;
            }
        }
        changed
    }

    /// Decisions recorded by the last call to [`observe`](Self::observe)
    pub fn previous(&self) -> &[Option<usize>] {
        &self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pass_changes_everything() {
        let mut detector = ConvergenceDetector::new(3);
        assert_eq!(detector.previous(), &[None, None, None]);

        assert_eq!(detector.observe(&[0, 0, 1]), 3);
        assert_eq!(detector.previous(), &[Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn test_counts_only_changed_points() {
        let mut detector = ConvergenceDetector::new(4);
        detector.observe(&[0, 1, 1, 0]);

        assert_eq!(detector.observe(&[0, 1, 0, 0]), 1);
        assert_eq!(detector.observe(&[0, 1, 0, 0]), 0);
        assert_eq!(detector.observe(&[1, 0, 1, 1]), 4);
    }

    #[test]
    fn test_empty() {
        let mut detector = ConvergenceDetector::new(0);
        assert_eq!(detector.observe(&[]), 0);
    }
}
