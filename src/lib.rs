pub mod columns;
pub mod filter;
pub mod input;
pub mod project;
pub mod runner;
