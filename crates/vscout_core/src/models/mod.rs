pub mod court;
pub mod events;
pub mod lineup;
pub mod match_state;

pub use court::{
    default_start_coordinate, is_inside_court, normalize, ContainerBounds, Coordinate, RawPoint,
};
pub use events::{ActionQuality, ActionType, RallyEvent, ResultType, TeamSide};
pub use lineup::{rotate, Lineup, Position};
pub use match_state::{MatchConfig, MatchState, SetRecord};
