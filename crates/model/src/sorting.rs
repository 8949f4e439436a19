/// Sort keys accepted by `search_connections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortingCriteria {
    OverallTravelTime,
    NumberOfTrainChanges,
    OverallWaitingTime,
    EstimatedPrice,
}
