pub mod errors;
pub mod grading;
pub mod jwt;
pub mod pagination;
pub mod password;
