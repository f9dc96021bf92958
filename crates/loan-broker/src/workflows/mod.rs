pub mod leads;
pub mod simulation;
