pub mod api;
pub mod app;
pub mod config;
pub mod events;
pub mod gallery;
pub mod shared;
pub mod steps;
pub mod workflow;
