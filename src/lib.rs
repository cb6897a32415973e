pub mod game;
pub mod probability;
pub mod producer;
pub mod rng;
pub mod simulation;
