//! # venue-engine
//!
//! Scheduling and floor-plan logic for multi-tenant venue management.
//!
//! The engine decides whether line occurrences collide on a venue's calendar,
//! whether floor-plan elements overlap, and how many tables fit into a zone.
//! It also expands recurring lines into concrete occurrences, keeps demo and
//! real tenants apart, and maintains the role hierarchy with its paired
//! management roles.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` wall-clock parsing and the `TimeRange` value
//! - [`overlap`] — Same-date interval intersection with end-of-day wraparound
//! - [`collision`] — Check candidate ranges against existing ones and each other
//! - [`floorplan`] — Rectangle collision and grid packing of tables in a zone
//! - [`line`] — Recurring line → list of dated occurrences
//! - [`tenant`] — Demo/real tenant classes and cross-class access checks
//! - [`roles`] — Role hierarchy with management-role auto-creation
//! - [`error`] — Error types

pub mod collision;
pub mod error;
pub mod floorplan;
pub mod line;
pub mod overlap;
pub mod roles;
pub mod tenant;
pub mod time;

pub use collision::{check_collision, check_multiple_collisions, CollisionCheck, MultiCollisionCheck};
pub use error::VenueError;
pub use floorplan::{
    calculate_table_layout, check_rectangle_collision, do_rectangles_collide, LayoutOptions,
    Position, Rectangle, TableLayout, MAX_TABLES,
};
pub use line::{expand_line, Line, LineOccurrence};
pub use overlap::overlaps;
pub use roles::{Role, RoleCreate, RoleHierarchy, RoleId, RoleUpdate};
pub use tenant::{ensure_same_class, TenantClass, TenantId};
pub use time::{TimeOfDay, TimeRange};
