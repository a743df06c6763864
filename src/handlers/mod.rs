// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT access token, AuthUser injected by middleware)
pub mod protected;
pub mod public;
