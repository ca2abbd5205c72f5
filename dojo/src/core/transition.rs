//! Single-step state machine advancing learner progress.

use anyhow::Result;

/// Outcome of one status check against the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Index was already at the terminal position; nothing was evaluated.
    AlreadyComplete,
    /// The current step's goal was satisfied; index advanced by one.
    Advanced {
        from: usize,
        to: usize,
        /// True when `to` reached the terminal position.
        complete: bool,
    },
    /// Goal not satisfied; index unchanged.
    Unsatisfied { index: usize },
}

/// Advance the step index by at most one.
///
/// `index == step_count` is terminal and idempotent: the evaluator is not
/// invoked again. Even when later steps would also be satisfiable, one call
/// moves the index by exactly one, so every step's teaching content gets its
/// own reportable moment.
pub fn advance(
    index: usize,
    step_count: usize,
    evaluate: impl FnOnce() -> Result<bool>,
) -> Result<Transition> {
    if index >= step_count {
        return Ok(Transition::AlreadyComplete);
    }
    if !evaluate()? {
        return Ok(Transition::Unsatisfied { index });
    }
    let to = index + 1;
    Ok(Transition::Advanced {
        from: index,
        to,
        complete: to == step_count,
    })
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn satisfied_step_advances_by_exactly_one() {
        let transition = advance(0, 3, || Ok(true)).expect("advance");
        assert_eq!(
            transition,
            Transition::Advanced {
                from: 0,
                to: 1,
                complete: false
            }
        );
    }

    #[test]
    fn unsatisfied_step_keeps_index() {
        let transition = advance(1, 3, || Ok(false)).expect("advance");
        assert_eq!(transition, Transition::Unsatisfied { index: 1 });
    }

    #[test]
    fn last_step_advances_to_terminal() {
        let transition = advance(2, 3, || Ok(true)).expect("advance");
        assert_eq!(
            transition,
            Transition::Advanced {
                from: 2,
                to: 3,
                complete: true
            }
        );
    }

    #[test]
    fn terminal_index_skips_evaluation() {
        let transition = advance(3, 3, || Err(anyhow!("must not evaluate"))).expect("advance");
        assert_eq!(transition, Transition::AlreadyComplete);
    }

    #[test]
    fn index_never_decreases_across_checks() {
        let mut index = 0;
        let outcomes = [true, false, true, true, false];
        for satisfied in outcomes {
            let before = index;
            match advance(index, 3, || Ok(satisfied)).expect("advance") {
                Transition::Advanced { to, .. } => index = to,
                Transition::Unsatisfied { .. } | Transition::AlreadyComplete => {}
            }
            assert!(index >= before);
        }
        assert_eq!(index, 3);
    }

    #[test]
    fn evaluation_errors_propagate() {
        let err = advance(0, 1, || Err(anyhow!("boom"))).expect_err("error");
        assert!(err.to_string().contains("boom"));
    }
}
