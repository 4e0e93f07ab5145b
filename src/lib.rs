pub mod app;
pub mod config;
pub mod dto;
pub mod handler;
pub mod service;
