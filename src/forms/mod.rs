//! Form payloads submitted by the character browser pages.

pub mod main;
