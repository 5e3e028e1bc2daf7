// Core trading logic modules

pub mod comparator;
pub mod ledger;
pub mod decision_loop;

// Re-export commonly used types
pub use comparator::{compare, percentage_change, signal_for};
pub use ledger::{GridAllocation, Ledger};
pub use decision_loop::{forward_shutdown_signal, BotState, CycleReport, TradingBot};
