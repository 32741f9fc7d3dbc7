//! Goal reduction: rewrite a formula one visible step at a time until a
//! single value remains.
//!
//! Each step either substitutes the leftmost attribute reference or applies
//! the leftmost operator whose two operands are already values. The states
//! in between form the trace a consumer renders line by line.

use serde::Serialize;
use tracing::{debug, trace};

use crate::tag::resolve_attr;
use crate::types::{GoalError, Operator, Term};

/// Result of a single reduction step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The state was already a single value.
    Terminal(f64),
    /// The state after one rewrite.
    Reduced(Vec<Term>),
}

/// A fully reduced goal with every intermediate state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Every state from the initial formula to the final single value.
    pub trace: Vec<Vec<Term>>,
    /// The final value.
    pub value: f64,
    /// Whether the goal holds.
    pub result: bool,
}

impl Evaluation {
    /// Number of reduction steps taken.
    pub fn steps(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }
}

/// Truthiness of a reduced goal: non-zero and not NaN.
pub fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Apply one reduction rule to `state`.
///
/// Rules, in priority order:
/// 1. a lone value is terminal;
/// 2. the leftmost attribute reference is replaced by its value;
/// 3. the leftmost `op a b` window with two values is applied;
/// 4. failing that, the leftmost `a op b` window with two values is applied.
///
/// A state no rule matches is a [`GoalError::StuckFormula`].
pub fn step(state: &[Term], attrs: &[f64]) -> Result<StepOutcome, GoalError> {
    if let [Term::Value(v)] = state {
        return Ok(StepOutcome::Terminal(*v));
    }

    let first_attr = state.iter().enumerate().find_map(|(i, term)| match term {
        Term::Attr(index) => Some((i, *index)),
        _ => None,
    });
    if let Some((position, index)) = first_attr {
        let value = resolve_attr(index, attrs)?;
        let mut next = state.to_vec();
        next[position] = Term::Value(value);
        trace!(position, index, value, "substituted attribute");
        return Ok(StepOutcome::Reduced(next));
    }

    let window = find_prefix_window(state).or_else(|| find_infix_window(state));
    if let Some(Window { start, operator, a, b }) = window {
        let value = operator.apply(a, b);
        let mut next = Vec::with_capacity(state.len() - 2);
        next.extend_from_slice(&state[..start]);
        next.push(Term::Value(value));
        next.extend_from_slice(&state[start + 3..]);
        trace!(start, %operator, a, b, value, "applied operator");
        return Ok(StepOutcome::Reduced(next));
    }

    Err(GoalError::StuckFormula {
        state: state.to_vec(),
    })
}

struct Window {
    start: usize,
    operator: Operator,
    a: f64,
    b: f64,
}

fn find_prefix_window(state: &[Term]) -> Option<Window> {
    state.windows(3).enumerate().find_map(|(start, w)| match *w {
        [Term::Op(operator), Term::Value(a), Term::Value(b)] => Some(Window { start, operator, a, b }),
        _ => None,
    })
}

fn find_infix_window(state: &[Term]) -> Option<Window> {
    state.windows(3).enumerate().find_map(|(start, w)| match *w {
        [Term::Value(a), Term::Op(operator), Term::Value(b)] => Some(Window { start, operator, a, b }),
        _ => None,
    })
}

/// Iterator over the successive states of a reduction.
///
/// Yields the initial state first and the single-value state last. A stuck
/// or unresolvable state is yielded as an error, after which the iterator
/// is exhausted.
#[derive(Debug, Clone)]
pub struct Reduction<'a> {
    next: Option<Vec<Term>>,
    attrs: &'a [f64],
}

impl<'a> Reduction<'a> {
    /// Start reducing `initial` against `attrs`.
    pub fn new<T>(initial: &[T], attrs: &'a [f64]) -> Self
    where
        T: Copy + Into<Term>,
    {
        Self {
            next: Some(initial.iter().copied().map(Into::into).collect()),
            attrs,
        }
    }
}

impl Iterator for Reduction<'_> {
    type Item = Result<Vec<Term>, GoalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        match step(&current, self.attrs) {
            Ok(StepOutcome::Terminal(_)) => Some(Ok(current)),
            Ok(StepOutcome::Reduced(next)) => {
                self.next = Some(next);
                Some(Ok(current))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Reduce a formula to a boolean, keeping every intermediate state.
pub fn evaluate_with_trace<T>(formula: &[T], attrs: &[f64]) -> Result<Evaluation, GoalError>
where
    T: Copy + Into<Term>,
{
    let trace = Reduction::new(formula, attrs).collect::<Result<Vec<_>, _>>()?;
    let value = match trace.last().map(Vec::as_slice) {
        Some([Term::Value(v)]) => *v,
        _ => return Err(GoalError::StuckFormula { state: Vec::new() }),
    };
    let result = is_truthy(value);
    debug!(steps = trace.len() - 1, value, result, "evaluated goal");
    Ok(Evaluation {
        trace,
        value,
        result,
    })
}

/// Reduce a formula to a boolean without recording the trace.
pub fn evaluate<T>(formula: &[T], attrs: &[f64]) -> Result<bool, GoalError>
where
    T: Copy + Into<Term>,
{
    let mut state: Vec<Term> = formula.iter().copied().map(Into::into).collect();
    loop {
        match step(&state, attrs)? {
            StepOutcome::Terminal(value) => return Ok(is_truthy(value)),
            StepOutcome::Reduced(next) => state = next,
        }
    }
}
