pub mod clock;
pub mod pacing;
