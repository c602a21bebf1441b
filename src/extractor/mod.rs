pub mod path;
pub mod validated;
