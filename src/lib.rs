pub mod app;

pub mod cli;

pub mod config;

pub mod debounce;

pub mod error;

pub mod event;

pub mod input;

pub mod payload;

pub mod qr;

pub mod settings;

pub mod theme;

pub mod ui;
