//! The closed set of steering behaviors a decision can select.

use crate::{Arrive, FollowPath, Kinematic, PathTo, Seek, SteeringConfig, SteeringOutput, SteeringResult};

#[derive(Clone, Debug)]
pub enum SteeringBehavior {
    Seek(Seek),
    Arrive(Arrive),
    FollowPath(FollowPath),
    PathTo(PathTo),
}

impl SteeringBehavior {
    /// One steering query.  Only `PathTo` mutates itself (its route cache).
    pub fn get_steering(&mut self, agent: &Kinematic) -> SteeringOutput {
        match self {
            SteeringBehavior::Seek(b) => b.get_steering(agent),
            SteeringBehavior::Arrive(b) => b.get_steering(agent),
            SteeringBehavior::FollowPath(b) => b.get_steering(agent),
            SteeringBehavior::PathTo(b) => b.get_steering(agent),
        }
    }

    pub fn config(&self) -> &SteeringConfig {
        match self {
            SteeringBehavior::Seek(b) => &b.config,
            SteeringBehavior::Arrive(b) => &b.config,
            SteeringBehavior::FollowPath(b) => b.config(),
            SteeringBehavior::PathTo(b) => b.config(),
        }
    }

    /// Re-check the configuration.  `Seek` and `Arrive` expose theirs as a
    /// public field, so it may have changed since construction.
    pub fn validate(&self) -> SteeringResult<()> {
        self.config().validate()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SteeringBehavior::Seek(_) => "seek",
            SteeringBehavior::Arrive(_) => "arrive",
            SteeringBehavior::FollowPath(_) => "follow_path",
            SteeringBehavior::PathTo(_) => "path_to",
        }
    }
}

impl From<Seek> for SteeringBehavior {
    fn from(b: Seek) -> Self {
        SteeringBehavior::Seek(b)
    }
}

impl From<Arrive> for SteeringBehavior {
    fn from(b: Arrive) -> Self {
        SteeringBehavior::Arrive(b)
    }
}

impl From<FollowPath> for SteeringBehavior {
    fn from(b: FollowPath) -> Self {
        SteeringBehavior::FollowPath(b)
    }
}

impl From<PathTo> for SteeringBehavior {
    fn from(b: PathTo) -> Self {
        SteeringBehavior::PathTo(b)
    }
}
