pub mod health;
pub mod users;
pub mod conversations;
pub mod feedback;
pub mod admin;
pub mod swagger;
