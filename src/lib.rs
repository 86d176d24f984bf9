pub mod benchmark;
pub mod game;
pub mod logging;
pub mod maze;
pub mod obstacles;
pub mod solvers;
