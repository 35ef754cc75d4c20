// src/handlers/mod.rs

pub mod health;
pub mod history;
pub mod ocr;
pub mod quiz;
