pub mod dashboard;    // Submission tracking (tab 0)
pub mod daily_update; // Editing grid (tab 1)
pub mod accounts;     // Account directory (tab 2)
pub mod team_leaders; // Team leader directory (tab 3)
pub mod agents;       // Agent directory (tab 4)
pub mod metrics;      // Metric definitions (tab 5)
pub mod exports;      // CSV exports (tab 6)
