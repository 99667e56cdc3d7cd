// src/handlers/mod.rs

pub mod difficulty;
pub mod quiz;
pub mod visitor;
