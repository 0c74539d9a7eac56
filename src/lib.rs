pub mod app;
pub mod config;
pub mod controls;
pub mod equation;
pub mod equation_log;
pub mod hud;
pub mod palette;
pub mod render;
pub mod simulation;
pub mod stepper;
pub mod view;
