pub mod operation;
pub mod outcome;
