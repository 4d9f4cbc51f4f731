pub mod algo;
pub mod config;
pub mod data;
pub mod engine;
pub mod evaluate;
pub mod game;
pub mod pool;
pub mod score_matrix;
pub mod selectors;
pub mod structs;
