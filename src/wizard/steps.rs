//! Step graphs for the booking wizard
//!
//! Steps are numbered from 1 in flow order. Each step owns an explicit pair of
//! edges, forward and back, which only branch around the return-trip steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::TripType;

use super::state::Field;

/// Numeric step id, 1-based
pub type StepId = u8;

/// Which set of steps the wizard runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowVariant {
    /// Combined date/time steps, no phone number
    #[default]
    Standard,
    /// Separate date and time steps plus a contact phone step
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Origin,
    Destination,
    DepartDateTime,
    DepartDate,
    DepartTime,
    Passengers,
    TripType,
    ReturnDateTime,
    ReturnDate,
    ReturnTime,
    ContactEmail,
    ContactPhone,
    ContactName,
    Review,
    Results,
    Confirmation,
}

impl Step {
    /// Fields collected on this step
    #[must_use]
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Origin => &[Field::Origin],
            Step::Destination => &[Field::Destination],
            Step::DepartDateTime => &[Field::DepartDate, Field::DepartTime],
            Step::DepartDate => &[Field::DepartDate],
            Step::DepartTime => &[Field::DepartTime],
            Step::Passengers => &[Field::Passengers],
            Step::ReturnDateTime => &[Field::ReturnDate, Field::ReturnTime],
            Step::ReturnDate => &[Field::ReturnDate],
            Step::ReturnTime => &[Field::ReturnTime],
            Step::ContactEmail => &[Field::ContactEmail],
            Step::ContactPhone => &[Field::ContactPhone],
            Step::ContactName => &[Field::ContactName],
            Step::TripType | Step::Review | Step::Results | Step::Confirmation => &[],
        }
    }

    /// Only visited on round trips
    #[must_use]
    pub fn is_return_step(self) -> bool {
        matches!(self, Step::ReturnDateTime | Step::ReturnDate | Step::ReturnTime)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Step::Origin => "Where are you flying from?",
            Step::Destination => "Where are you flying to?",
            Step::DepartDateTime => "When do you want to depart?",
            Step::DepartDate => "Departure date",
            Step::DepartTime => "Departure time",
            Step::Passengers => "How many passengers?",
            Step::TripType => "One-way or round-trip?",
            Step::ReturnDateTime => "When do you want to return?",
            Step::ReturnDate => "Return date",
            Step::ReturnTime => "Return time",
            Step::ContactEmail => "Where should we send your quotes?",
            Step::ContactPhone => "Best phone number to reach you",
            Step::ContactName => "Who is traveling?",
            Step::Review => "Review your trip",
            Step::Results => "Your charter options",
            Step::Confirmation => "Request received",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    End,
    To(StepId),
    Branch { one_way: StepId, round_trip: StepId },
}

#[derive(Debug, Clone, Copy)]
struct Edges {
    next: Edge,
    prev: Edge,
}

/// Directed step graph for one flow variant
#[derive(Debug, Clone)]
pub struct StepGraph {
    steps: Vec<Step>,
    edges: Vec<Edges>,
}

impl StepGraph {
    #[must_use]
    pub fn new(variant: FlowVariant) -> Self {
        let steps: Vec<Step> = match variant {
            FlowVariant::Standard => vec![
                Step::Origin,
                Step::Destination,
                Step::DepartDateTime,
                Step::Passengers,
                Step::TripType,
                Step::ReturnDateTime,
                Step::ContactEmail,
                Step::ContactName,
                Step::Review,
                Step::Results,
                Step::Confirmation,
            ],
            FlowVariant::Extended => vec![
                Step::Origin,
                Step::Destination,
                Step::DepartDate,
                Step::DepartTime,
                Step::Passengers,
                Step::TripType,
                Step::ReturnDate,
                Step::ReturnTime,
                Step::ContactEmail,
                Step::ContactPhone,
                Step::ContactName,
                Step::Review,
                Step::Results,
                Step::Confirmation,
            ],
        };
        let edges = build_edges(&steps);
        Self { steps, edges }
    }

    #[must_use]
    pub fn first(&self) -> StepId {
        1
    }

    #[must_use]
    pub fn step(&self, id: StepId) -> Option<Step> {
        let index = usize::from(id).checked_sub(1)?;
        self.steps.get(index).copied()
    }

    #[must_use]
    pub fn id_of(&self, step: Step) -> Option<StepId> {
        self.steps
            .iter()
            .position(|s| *s == step)
            .and_then(|index| StepId::try_from(index + 1).ok())
    }

    /// All step ids in numeric order
    pub fn ids(&self) -> impl Iterator<Item = StepId> + '_ {
        (1..=self.steps.len()).filter_map(|i| StepId::try_from(i).ok())
    }

    /// Forward edge; `None` at the end or at the branch point without a trip type
    #[must_use]
    pub fn next(&self, id: StepId, trip_type: TripType) -> Option<StepId> {
        let edges = self.edges.get(usize::from(id).checked_sub(1)?)?;
        match edges.next {
            Edge::End => None,
            Edge::To(target) => Some(target),
            Edge::Branch { one_way, round_trip } => match trip_type {
                TripType::Unset => None,
                TripType::OneWay => Some(one_way),
                TripType::RoundTrip => Some(round_trip),
            },
        }
    }

    /// Back edge, the structural inverse of [`StepGraph::next`]
    #[must_use]
    pub fn prev(&self, id: StepId, trip_type: TripType) -> Option<StepId> {
        let edges = self.edges.get(usize::from(id).checked_sub(1)?)?;
        match edges.prev {
            Edge::End => None,
            Edge::To(target) => Some(target),
            Edge::Branch { one_way, round_trip } => match trip_type {
                TripType::RoundTrip => Some(round_trip),
                TripType::OneWay | TripType::Unset => Some(one_way),
            },
        }
    }
}

fn build_edges(steps: &[Step]) -> Vec<Edges> {
    let id = |index: usize| StepId::try_from(index + 1).unwrap_or(StepId::MAX);
    let branch_at = steps.iter().position(|s| *s == Step::TripType);
    let first_return = steps.iter().position(|s| s.is_return_step());
    let last_return = steps.iter().rposition(|s| s.is_return_step());
    let rejoin = last_return.map(|i| i + 1);

    steps
        .iter()
        .enumerate()
        .map(|(index, _)| {
            let next = if Some(index) == branch_at {
                match (first_return, rejoin) {
                    (Some(round_trip), Some(one_way)) => Edge::Branch {
                        one_way: id(one_way),
                        round_trip: id(round_trip),
                    },
                    _ => Edge::To(id(index + 1)),
                }
            } else if index + 1 == steps.len() {
                Edge::End
            } else {
                Edge::To(id(index + 1))
            };

            let prev = if Some(index) == rejoin {
                match (branch_at, last_return) {
                    (Some(one_way), Some(round_trip)) => Edge::Branch {
                        one_way: id(one_way),
                        round_trip: id(round_trip),
                    },
                    _ => Edge::To(id(index - 1)),
                }
            } else if index == 0 {
                Edge::End
            } else {
                Edge::To(id(index - 1))
            };

            Edges { next, prev }
        })
        .collect()
}
