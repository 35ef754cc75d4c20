// src/utils/mod.rs

pub mod ocr;
