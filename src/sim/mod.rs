//! Round simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time is passed in, never read from the platform clock (except the
//!   display date stamped on finished rounds)
//! - Seeded RNG only
//! - No rendering or audio dependencies

pub mod round;
pub mod state;

pub use round::RoundController;
pub use state::{HitWindow, PendingExpiry, RoundEvent, RoundPhase, RoundState, Target};
