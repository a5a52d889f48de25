pub mod filter_handlers;

pub use filter_handlers::criteria_from_args;
