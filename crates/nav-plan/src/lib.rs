//! `nav-plan`: delivery ordering, multi-leg planning, and narration.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`optimizer`] | `OrderOptimizer` trait, `NearestNeighborOptimizer`, `InputOrder`, `crow_distance` |
//! | [`planner`]   | `DeliveryPlanner`, `DeliveryPlan`, `narrate_leg`             |
//! | [`command`]   | `Command`, `Direction`, `TurnSide`                           |
//! | [`loader`]    | `load_deliveries_csv`, `load_deliveries_reader`              |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on plans and commands.     |

pub mod command;
pub mod error;
pub mod loader;
pub mod optimizer;
pub mod planner;


pub use command::{Command, Direction, TurnSide};
pub use error::{PlanError, PlanResult};
pub use loader::{load_deliveries_csv, load_deliveries_reader};
pub use optimizer::{CrowDistances, InputOrder, NearestNeighborOptimizer, OrderOptimizer, crow_distance};
pub use planner::{DeliveryPlan, DeliveryPlanner, narrate_leg};
