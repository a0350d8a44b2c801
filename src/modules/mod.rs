pub mod departments;
pub mod lecturers;
pub mod lessons;
pub mod marks;
pub mod materials;
pub mod news;
pub mod notifications;
pub mod settings;
pub mod students;
pub mod subjects;
pub mod users;
