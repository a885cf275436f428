//! Strategy of bystanders and passive nodes

use rand::rngs::StdRng;

use super::StrategyKind;
use crate::{
    Result,
    actions::Action,
    ports::{DecisionContext, Strategy},
};

/// Never acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inactive;

impl Strategy for Inactive {
    fn decide(&self, _ctx: &DecisionContext<'_>, _rng: &mut StdRng) -> Result<Action> {
        Ok(Action::NoOp)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Inactive
    }
}
