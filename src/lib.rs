#![forbid(unsafe_code)]

pub mod app;
pub mod artifacts;
pub mod cli;
pub mod columns;
pub mod commands;
pub mod dashboard;
pub mod error;
pub mod formats;
pub mod logging;
pub mod popular;
pub mod raw_data;
pub mod recommend;
