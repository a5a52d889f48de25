pub mod error_mapper;

pub use error_mapper::map_dataset_load_error;
