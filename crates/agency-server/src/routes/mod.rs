pub mod analytics;
pub mod clients;
pub mod health;
pub mod leads;
pub mod portal;
pub mod projects;
pub mod search;
pub mod tasks;
pub mod users;
pub mod webhook;
