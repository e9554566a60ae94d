//! # Core Application Logic
//!
//! The page-controller half of Banter. It knows nothing about the terminal
//! or the network; it is plain data plus a reducer.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │           CORE              │
//!                 │  (this module)              │
//!                 │                             │
//!                 │  • App (sessions, thread)   │
//!                 │  • Action (events)          │
//!                 │  • update() (reducer)       │
//!                 │  • Effect (requested I/O)   │
//!                 │                             │
//!                 │  No I/O. No UI. Pure.       │
//!                 └──────────────┬──────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌─────────────┐                 ┌─────────────┐
//!         │     TUI     │                 │  ChatApi    │
//!         │  (ratatui)  │                 │  (reqwest)  │
//!         └─────────────┘                 └─────────────┘
//! ```
//!
//! The TUI feeds every user action and every completed network call through
//! [`action::update`], then performs whatever [`action::Effect`] comes back.
//! State mutations never happen anywhere else.

pub mod action;
pub mod config;
pub mod state;
