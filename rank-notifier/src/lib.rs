pub mod agent;
pub mod error;
pub mod notifier;
pub mod option;
