//! Realtime tic-tac-toe session server library.
//!
//! The server pairs two remote participants in a room, owns the
//! authoritative game state, arbitrates moves, and relays presence and
//! chat events over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
