//! Symbolic form of a reduction, e.g. `R1 + (R2 || R3)`.

use crate::hierarchy::HierarchyKind;
use crate::reduce::{FoldKind, Reduction};

#[derive(Clone, Copy, PartialEq)]
enum Operator {
    Atom,
    Fold(FoldKind),
}

fn symbol(kind: FoldKind) -> &'static str {
    match kind {
        FoldKind::Series => "+",
        FoldKind::Parallel => "||",
    }
}

fn operand(term: &(String, Operator), kind: FoldKind) -> String {
    match term.1 {
        Operator::Fold(inner) if inner != kind => format!("({})", term.0),
        _ => term.0.clone(),
    }
}

impl Reduction {
    /// Expression per hierarchy node after replaying every fold, plus one
    /// equation line per fold
    fn replay(&self) -> (Vec<(String, Operator)>, Vec<String>) {
        let mut terms: Vec<(String, Operator)> = self
            .hierarchy
            .nodes()
            .iter()
            .map(|n| match n.kind {
                HierarchyKind::Resistor => (n.label(), Operator::Atom),
                _ => (String::new(), Operator::Atom),
            })
            .collect();
        let mut lines = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let combined = format!(
                "{} {} {}",
                operand(&terms[step.kept.node], step.kind),
                symbol(step.kind),
                operand(&terms[step.absorbed.node], step.kind)
            );
            lines.push(format!("{} = {:.2} Ω", combined, step.combined()));
            terms[step.kept.node] = (combined, Operator::Fold(step.kind));
        }
        (terms, lines)
    }

    /// One line per fold, in the order the folds were applied:
    /// `R2 || R3 = 55.56 Ω`
    pub fn equations(&self) -> Vec<String> {
        self.replay().1
    }

    /// Whole network as one expression over the original resistor labels
    pub fn expression(&self) -> String {
        let (mut terms, _) = self.replay();
        std::mem::take(&mut terms[self.result].0)
    }
}
