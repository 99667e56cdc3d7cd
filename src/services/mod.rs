// src/services/mod.rs

pub mod advisor;
pub mod question_bank;
pub mod visitor;
