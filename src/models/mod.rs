pub mod notification;
pub mod project;
pub mod routine;
pub mod tag;
pub mod task;
pub mod timelog;
pub mod user;
