mod error;
mod extractors;
mod path_id;
