// src/quiz/mod.rs

pub mod controller;
pub mod machine;
pub mod store;
