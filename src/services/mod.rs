// src/services/mod.rs
pub mod auth_service;
pub mod calendario_service;
pub mod permissoes;
