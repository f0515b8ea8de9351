// src/api/mod.rs
pub mod auth;
pub mod client;
pub mod dashboard;
pub mod laboratorios;
pub mod reservas;
pub mod semestres;
pub mod usuarios;

pub use client::ApiClient;
