pub mod fileas;

pub use fileas::build_file_as;
