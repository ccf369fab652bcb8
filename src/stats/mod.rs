//! Statistics derived from a user's records. Everything here is a pure function of its arguments:
//! inputs are borrowed, never modified, and every input the data model allows (empty lists, zero
//! targets) produces a defined result.

mod agenda;
mod budget;
mod monthly;
mod savings;
mod summary;

pub use agenda::{agenda, events_on, upcoming, AgendaDay, DEFAULT_UPCOMING};
pub use budget::{category_breakdown, BudgetStats, CategoryTotal};
pub use monthly::{monthly_series, MonthlyEntry, DEFAULT_MONTH_COUNT};
pub use savings::{apply_delta, SavingsOverview, SavingsProgress};
pub use summary::{DashboardSummary, UserData, DEFAULT_RECENT};
