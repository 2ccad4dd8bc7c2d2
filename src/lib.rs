pub mod capture;
pub mod config;
pub mod consts;
pub mod corpus;
pub mod error;
pub mod masking;
pub mod progress;
pub mod recall;
pub mod text;
pub mod timing;
pub mod tokenizer;
pub mod training;
// cmd and reports are binary modules (declared in main.rs).
