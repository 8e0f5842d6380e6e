pub mod workflows;
pub mod workspace;
