pub mod agenda;
pub mod animation;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod error;
pub mod events;
pub mod locale;
pub mod model;
pub mod ui;
pub mod view;
