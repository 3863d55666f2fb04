pub mod clock;
pub mod collision;
pub mod display;
pub mod entities;
pub mod game;
pub mod input;
pub mod menu;
pub mod movement;
pub mod persistence;
pub mod scheduler;
pub mod score;
pub mod settings;
