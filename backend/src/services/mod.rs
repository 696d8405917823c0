pub mod notifier;
pub mod occupancy;
pub mod sweeper;
