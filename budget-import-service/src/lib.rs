//! Budget Import Service - spreadsheet budget reconciliation against the
//! health-ministry organizational unit registry.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod matching;
pub mod models;
pub mod services;
pub mod startup;
