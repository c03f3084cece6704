use crate::entity::NestKey;
use crate::pheromone::PheromoneDeposit;

/// What an ant asks the world to do this tick.
///
/// The world validates and applies it; ants never mutate shared state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Action {
    #[default]
    None,
    Move {
        heading_delta: f32,
        speed: f32,
    },
    TurnAround,
    DepositPheromone(PheromoneDeposit),
    EnterNest(NestKey),
    LeaveNest,
}

impl Action {
    pub const fn name(&self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Move { .. } => "move",
            Action::TurnAround => "turn_around",
            Action::DepositPheromone(_) => "deposit_pheromone",
            Action::EnterNest(_) => "enter_nest",
            Action::LeaveNest => "leave_nest",
        }
    }
}
